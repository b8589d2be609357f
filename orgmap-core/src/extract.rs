//! Typed extraction of property values.
//!
//! Every function here is total: a missing property, a property of the wrong
//! type, or an empty payload yields a neutral value instead of an error.

use crate::record::PropertyValue;

/// Concatenated plain text of a title or rich-text property.
///
/// Returns an empty string for any other property type or an empty segment list.
pub fn extract_text(prop: Option<&PropertyValue>) -> String {
    match prop {
        Some(PropertyValue::Title { title: segments })
        | Some(PropertyValue::RichText {
            rich_text: segments,
        }) => segments.iter().map(|s| s.plain_text.as_str()).collect(),
        _ => String::new(),
    }
}

/// Referenced record ids of a relation property, in order.
pub fn extract_relation_ids(prop: Option<&PropertyValue>) -> Vec<String> {
    match prop {
        Some(PropertyValue::Relation { relation }) => {
            relation.iter().map(|r| r.id.clone()).collect()
        }
        _ => Vec::new(),
    }
}

/// Name of the chosen option of a select property.
///
/// Returns `None` when the property is absent, not a select, or has no
/// option chosen. Defaults are the caller's business.
pub fn extract_select(prop: Option<&PropertyValue>) -> Option<String> {
    match prop {
        Some(PropertyValue::Select {
            select: Some(option),
        }) => Some(option.name.clone()),
        _ => None,
    }
}
