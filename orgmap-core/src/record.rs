//! Raw records as delivered by a record source.
//!
//! A record is an opaque id plus a bag of named, tagged property values in
//! the shape of a Notion page. Properties this crate does not understand,
//! or whose payload does not match their tag, are kept as
//! [`PropertyValue::Unsupported`] instead of failing the whole record.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::extract;

/// One segment of a title or rich-text property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    #[serde(default)]
    pub plain_text: String,
}

impl TextSegment {
    pub fn new(plain_text: impl Into<String>) -> Self {
        Self {
            plain_text: plain_text.into(),
        }
    }
}

/// The chosen option of a select property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

/// A reference to another record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

/// A tagged property value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<TextSegment>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<TextSegment>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    Relation {
        #[serde(default)]
        relation: Vec<RelationRef>,
    },
    /// Any other property type, or a payload that did not match its tag.
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Build a title property from plain text.
    pub fn title(text: &str) -> Self {
        PropertyValue::Title {
            title: vec![TextSegment::new(text)],
        }
    }

    /// Build a rich-text property from plain text.
    pub fn rich_text(text: &str) -> Self {
        PropertyValue::RichText {
            rich_text: vec![TextSegment::new(text)],
        }
    }

    /// Build a select property; `None` means no option is chosen.
    pub fn select(name: Option<&str>) -> Self {
        PropertyValue::Select {
            select: name.map(|n| SelectOption {
                name: n.to_string(),
            }),
        }
    }

    /// Build a relation property from referenced record ids.
    pub fn relation<S: AsRef<str>>(ids: &[S]) -> Self {
        PropertyValue::Relation {
            relation: ids
                .iter()
                .map(|id| RelationRef {
                    id: id.as_ref().to_string(),
                })
                .collect(),
        }
    }
}

/// A record fetched from one collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// External record id.
    pub id: String,
    /// Property name to value.
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: HashMap<String, PropertyValue>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: HashMap::new(),
        }
    }

    /// Set a property, replacing any previous value under the same name.
    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    /// Get a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Plain text of a title or rich-text property, or `""`.
    pub fn text(&self, name: &str) -> String {
        extract::extract_text(self.property(name))
    }

    /// Referenced ids of a relation property, or an empty list.
    pub fn relation_ids(&self, name: &str) -> Vec<String> {
        extract::extract_relation_ids(self.property(name))
    }

    /// Chosen option of a select property, if any.
    pub fn select(&self, name: &str) -> Option<String> {
        extract::extract_select(self.property(name))
    }
}

/// Deserialize each property independently, degrading malformed payloads
/// (e.g. `"title": null`) to `Unsupported`.
fn deserialize_properties<'de, D>(deserializer: D) -> Result<HashMap<String, PropertyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            let value = serde_json::from_value(value).unwrap_or(PropertyValue::Unsupported);
            (name, value)
        })
        .collect())
}
