//! Generic YAML tree for block bodies.
//!
//! A body is decoded in two stages: YAML text becomes a [`Node`], and the
//! node is then deserialized into a typed document value. The second stage
//! matches struct field names and enum variants case-insensitively, so a body
//! may write `Title:`, `title:` or `TITLE:` for `info.title`. Keys of plain
//! maps (paths, definition names, response codes) are kept verbatim.

use crate::error::{DecodeError, ShapeError};
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{DeserializeOwned, Deserializer, IntoDeserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Decoded body tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    /// Entries in source order.
    Mapping(Vec<(String, Node)>),
}

#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

// Floats compare by bit pattern so `.nan` survives a decode round trip.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// Decode a block body into a generic tree.
///
/// An empty body (or one holding only YAML comments) decodes to a null scalar.
pub fn decode(text: &str) -> Result<Node, DecodeError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|source| DecodeError::syntax(text, source))?;
    Ok(Node::from_yaml(value))
}

/// Decode a block body straight into a typed value.
pub fn decode_as<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let node = decode(text)?;
    T::deserialize(node).map_err(|source| DecodeError::shape(text, source))
}

impl Node {
    pub fn from_yaml(value: serde_yaml::Value) -> Node {
        use serde_yaml::Value;
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Scalar(Scalar::Int(i)),
                None => Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Node::Scalar(Scalar::Str(s)),
            Value::Sequence(items) => {
                Node::Sequence(items.into_iter().map(Node::from_yaml).collect())
            }
            Value::Mapping(mapping) => Node::Mapping(
                mapping
                    .into_iter()
                    .map(|(k, v)| (key_string(k), Node::from_yaml(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from_yaml(tagged.value),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    /// Look up a mapping entry by exact key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Re-encode the tree as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Mapping keys become strings; `200:` in a responses block is the key "200".
fn key_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Node::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Node::Scalar(Scalar::Int(i)) => serializer.serialize_i64(*i),
            Node::Scalar(Scalar::Float(x)) => serializer.serialize_f64(*x),
            Node::Scalar(Scalar::Str(s)) => serializer.serialize_str(s),
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Mapping(entries) => {
                serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
            }
        }
    }
}

// -- Typed mapping ------------------------------------------------------------

impl<'de> IntoDeserializer<'de, ShapeError> for Node {
    type Deserializer = Node;

    fn into_deserializer(self) -> Node {
        self
    }
}

fn visit_entries<'de, V: Visitor<'de>>(
    entries: Vec<(String, Node)>,
    visitor: V,
) -> Result<V::Value, ShapeError> {
    let mut map = MapDeserializer::new(entries.into_iter());
    let value = visitor.visit_map(&mut map)?;
    map.end()?;
    Ok(value)
}

fn visit_items<'de, V: Visitor<'de>>(items: Vec<Node>, visitor: V) -> Result<V::Value, ShapeError> {
    let mut seq = SeqDeserializer::new(items.into_iter());
    let value = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(value)
}

/// Rename a key to the canonical spelling it matches, if any.
fn fold_key(key: String, canonical: &'static [&'static str]) -> String {
    match canonical.iter().find(|c| c.eq_ignore_ascii_case(&key)) {
        Some(c) => (*c).to_string(),
        None => key,
    }
}

impl<'de> Deserializer<'de> for Node {
    type Error = ShapeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ShapeError> {
        match self {
            Node::Scalar(Scalar::Null) => visitor.visit_unit(),
            Node::Scalar(Scalar::Bool(b)) => visitor.visit_bool(b),
            Node::Scalar(Scalar::Int(i)) => visitor.visit_i64(i),
            Node::Scalar(Scalar::Float(x)) => visitor.visit_f64(x),
            Node::Scalar(Scalar::Str(s)) => visitor.visit_string(s),
            Node::Sequence(items) => visit_items(items, visitor),
            Node::Mapping(entries) => visit_entries(entries, visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ShapeError> {
        if self.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ShapeError> {
        match self {
            Node::Scalar(Scalar::Null) => visit_items(Vec::new(), visitor),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ShapeError> {
        match self {
            Node::Scalar(Scalar::Null) => visit_entries(Vec::new(), visitor),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ShapeError> {
        match self {
            Node::Mapping(entries) => {
                let folded = entries
                    .into_iter()
                    .map(|(k, v)| (fold_key(k, fields), v))
                    .collect();
                visit_entries(folded, visitor)
            }
            Node::Scalar(Scalar::Null) => visit_entries(Vec::new(), visitor),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ShapeError> {
        match self {
            Node::Scalar(Scalar::Str(s)) => {
                let variant = fold_key(s, variants);
                visitor.visit_enum(variant.into_deserializer())
            }
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ShapeError> {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct tuple tuple_struct identifier ignored_any
    }
}
