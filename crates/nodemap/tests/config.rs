use nodemap::{Map, MapConfig, Mappable, Mapper};
use nodemap_node::{Context, Node, Result};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Settings {
    mapping: MapConfig,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Profile {
    city: Option<String>,
    nickname: Option<String>,
}

impl Mappable for Profile {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at("home/city").bind_optional(&mut self.city)?;
        map.at("nickname").bind_optional(&mut self.nickname)?;
        Ok(())
    }
}

fn mapper_from(text: &str) -> Mapper {
    let settings: Settings = toml::from_str(text).unwrap();
    Mapper::new(settings.mapping)
}

#[test]
fn test_config_table_drives_passes() {
    let mapper = mapper_from(
        r#"
        [mapping]
        key_separator = "/"
        null_as_absent = false
        skip_none_on_encode = false
        "#,
    );

    let node = Node::from(json!({"home": {"city": "Oslo"}, "nickname": null}));
    let profile: Profile = mapper.decode(&node, &Context::empty()).unwrap();
    assert_eq!(profile.city.as_deref(), Some("Oslo"));
    assert_eq!(profile.nickname, None);

    let encoded = mapper.encode(&profile).unwrap();
    assert_eq!(encoded, node);
}

#[test]
fn test_empty_table_uses_defaults() {
    let mapper = mapper_from("[mapping]\n");
    assert_eq!(mapper.config(), &MapConfig::default());

    let profile = Profile {
        city: None,
        nickname: Some("ice".into()),
    };
    assert_eq!(
        mapper.encode(&profile).unwrap(),
        Node::from(json!({"nickname": "ice"}))
    );
}
