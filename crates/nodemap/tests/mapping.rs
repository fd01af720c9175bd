use std::convert::Infallible;

use nodemap::{FromNodeTransformer, Map, MapConfig, Mappable, Mapper, ToNodeTransformer};
use nodemap_node::{path, Context, Error, FromNode, Node, Result};
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq)]
struct Address {
    street: String,
    city: String,
}

impl Mappable for Address {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at("street").bind(&mut self.street)?;
        map.at("city").bind(&mut self.city)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    name: String,
    age: i64,
    score: f64,
    nickname: Option<String>,
    tags: Vec<String>,
    address: Address,
    previous: Vec<Address>,
    joined: u32,
    shouting: String,
}

fn year_as_text() -> nodemap::TwoWayTransformer<String, u32, String> {
    FromNodeTransformer::required(|s: String| s.parse::<u32>())
        .transform_to_node(|year: &u32| Ok::<_, Infallible>(year.to_string()))
}

impl Mappable for Person {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at("name").bind(&mut self.name)?;
        map.at("age").bind(&mut self.age)?;
        map.at("score").bind(&mut self.score)?;
        map.at("nickname").bind_optional(&mut self.nickname)?;
        map.at("tags").bind(&mut self.tags)?;
        map.at("address").bind_nested(&mut self.address)?;
        map.at("previous").bind_nested_vec(&mut self.previous)?;
        map.at(path!["meta", "joined"]).bind_with(&mut self.joined, &year_as_text())?;
        map.at("shouting").bind_with(
            &mut self.shouting,
            &ToNodeTransformer::new(|s: &String| Ok::<_, Infallible>(s.to_uppercase())),
        )?;
        Ok(())
    }
}

fn sample_node() -> Node {
    Node::from(json!({
        "name": "Ada",
        "age": 36,
        "score": 9.5,
        "tags": ["math", "engines"],
        "address": {"street": "1 St James's Sq", "city": "London"},
        "previous": [{"street": "Piccadilly", "city": "London"}],
        "meta": {"joined": "1833"},
        "shouting": "hello"
    }))
}

#[test]
fn test_decode_full_model() {
    let person: Person = nodemap::decode(&sample_node(), &Context::empty()).unwrap();
    assert_eq!(person.name, "Ada");
    assert_eq!(person.age, 36);
    assert_eq!(person.score, 9.5);
    assert_eq!(person.nickname, None);
    assert_eq!(person.tags, vec!["math", "engines"]);
    assert_eq!(person.address.city, "London");
    assert_eq!(person.previous[0].street, "Piccadilly");
    assert_eq!(person.joined, 1833);
    assert_eq!(person.shouting, "hello");
}

#[test]
fn test_encode_full_model() {
    let person: Person = nodemap::decode(&sample_node(), &Context::empty()).unwrap();
    let node = nodemap::encode(&person).unwrap();
    let value = serde_json::Value::from(node);
    assert_eq!(value["meta"]["joined"], json!("1833"));
    assert_eq!(value["shouting"], json!("HELLO"));
    assert_eq!(value["previous"], json!([{"street": "Piccadilly", "city": "London"}]));
    assert!(value.get("nickname").is_none());
}

#[test]
fn test_encode_leaves_value_untouched() {
    let person: Person = nodemap::decode(&sample_node(), &Context::empty()).unwrap();
    let before = person.clone();
    nodemap::encode(&person).unwrap();
    assert_eq!(person, before);
}

#[test]
fn test_decode_leaves_source_untouched() {
    let node = sample_node();
    let before = node.clone();
    let _: Person = nodemap::decode(&node, &Context::empty()).unwrap();
    assert_eq!(node, before);
}

#[test]
fn test_nested_found_nil_reports_full_path() {
    let mut node = sample_node();
    node.as_object_mut()
        .unwrap()
        .insert("previous".into(), Node::from(json!([{"street": "x", "city": "y"}, {"street": "z"}])));
    let err = nodemap::decode::<Person>(&node, &Context::empty()).unwrap_err();
    match err {
        Error::FoundNil { key, expected } => {
            assert_eq!(key, path!["previous", 1, "city"]);
            assert_eq!(expected, "String");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_type_mismatch_aborts_pass() {
    let mut node = sample_node();
    *node.pointer_mut("/age").unwrap() = Node::from("36");
    let err = nodemap::decode::<Person>(&node, &Context::empty()).unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_user_transform_error_aborts_pass() {
    let mut node = sample_node();
    *node.pointer_mut("/meta/joined").unwrap() = Node::from("eighteen");
    let err = nodemap::decode::<Person>(&node, &Context::empty()).unwrap_err();
    assert!(matches!(err, Error::Transform(_)));
}

#[test]
fn test_key_separator_config() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Flat {
        city: String,
    }

    impl Mappable for Flat {
        fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
            map.at("address.city").bind(&mut self.city)
        }
    }

    let mapper = Mapper::new(MapConfig::default().with_key_separator('.'));
    let flat: Flat = mapper.decode(&sample_node(), &Context::empty()).unwrap();
    assert_eq!(flat.city, "London");
    assert_eq!(
        mapper.encode(&flat).unwrap(),
        Node::from(json!({"address": {"city": "London"}}))
    );
}

/// A unit whose decoding depends on the pass context.
#[derive(Debug, Default, Clone, PartialEq)]
struct Scaled(i64);

struct Scale(i64);

impl FromNode for Scaled {
    fn from_node(node: &Node, context: &Context) -> Result<Self> {
        let factor = context.get::<Scale>().map_or(1, |scale| scale.0);
        Ok(Scaled(i64::from_node(node, context)? * factor))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Order {
    quantity: Scaled,
    lines: Vec<Line>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Line {
    amount: Scaled,
}

impl Mappable for Line {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at("amount").bind_decode(&mut self.amount)
    }
}

impl Mappable for Order {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at("quantity").bind_decode(&mut self.quantity)?;
        map.at("lines").bind_nested_vec(&mut self.lines)?;
        Ok(())
    }
}

#[test]
fn test_context_reaches_nested_passes() {
    let node = Node::from(json!({"quantity": 2, "lines": [{"amount": 5}]}));
    let order: Order = nodemap::decode(&node, &Context::with(Scale(10))).unwrap();
    assert_eq!(order.quantity, Scaled(20));
    assert_eq!(order.lines[0].amount, Scaled(50));
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Record {
    id: i64,
    label: String,
    ratio: f64,
    flags: Vec<bool>,
    note: Option<String>,
}

impl Mappable for Record {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at("id").bind(&mut self.id)?;
        map.at(path!["info", "label"]).bind(&mut self.label)?;
        map.at(path!["info", "ratio"]).bind(&mut self.ratio)?;
        map.at("flags").bind(&mut self.flags)?;
        map.at("note").bind_optional(&mut self.note)?;
        Ok(())
    }
}

proptest! {
    #[test]
    fn record_roundtrip(
        id in any::<i64>(),
        label in ".{0,12}",
        ratio in -1.0e9f64..1.0e9,
        flags in prop::collection::vec(any::<bool>(), 0..5),
        note in prop::option::of("[a-z]{0,8}"),
    ) {
        let record = Record { id, label, ratio, flags, note };
        let node = nodemap::encode(&record).unwrap();
        let back: Record = nodemap::decode(&node, &Context::empty()).unwrap();
        prop_assert_eq!(back, record);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Pair {
    first: String,
    second: String,
    second_qty: Option<i64>,
}

impl Mappable for Pair {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
        map.at(path!["items", 0, "name"]).bind(&mut self.first)?;
        map.at(path!["items", 1, "name"]).bind(&mut self.second)?;
        map.at(path!["items", 1, "qty"]).bind_optional(&mut self.second_qty)?;
        Ok(())
    }
}

#[test]
fn test_index_paths_round_trip() {
    let pair = Pair {
        first: "bolt".into(),
        second: "nut".into(),
        second_qty: Some(4),
    };
    let node = nodemap::encode(&pair).unwrap();
    assert_eq!(
        node,
        Node::from(json!({"items": [{"name": "bolt"}, {"name": "nut", "qty": 4}]}))
    );
    let back: Pair = nodemap::decode(&node, &Context::empty()).unwrap();
    assert_eq!(back, pair);
}

#[test]
fn test_index_paths_decode_existing_array() {
    let node = Node::from(json!({"items": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}));
    let pair: Pair = nodemap::decode(&node, &Context::empty()).unwrap();
    assert_eq!((pair.first.as_str(), pair.second.as_str()), ("a", "b"));
    assert_eq!(pair.second_qty, None);
}

#[test]
fn test_digit_keys_under_separator_stay_object_keys() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Slot {
        zero: String,
    }

    impl Mappable for Slot {
        fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
            map.at("items.0").bind(&mut self.zero)
        }
    }

    let mapper = Mapper::new(MapConfig::default().with_key_separator('.'));

    let array = Node::from(json!({"items": ["x"]}));
    let err = mapper.decode::<Slot>(&array, &Context::empty()).unwrap_err();
    assert!(err.is_found_nil());

    let slot = Slot { zero: "x".into() };
    let node = mapper.encode(&slot).unwrap();
    assert_eq!(node, Node::from(json!({"items": {"0": "x"}})));
    assert_eq!(mapper.decode::<Slot>(&node, &Context::empty()).unwrap(), slot);
}

#[test]
fn test_huge_index_fails_the_encode_pass() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Far {
        value: i64,
    }

    impl Mappable for Far {
        fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
            map.at(path!["list", 1usize << 40]).bind(&mut self.value)
        }
    }

    let err = nodemap::encode(&Far { value: 1 }).unwrap_err();
    match err {
        Error::IndexOutOfRange { key, index } => {
            assert_eq!(key, path!["list", 1usize << 40]);
            assert_eq!(index, 1 << 40);
        }
        other => panic!("unexpected {other:?}"),
    }
}
