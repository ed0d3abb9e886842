//! Stored values as RDF objects

use super::error::{LdpError, LdpResult};
use super::identifiers::IdentifierConverter;
use crate::graph::{GraphStore, PropertyValue};
use crate::lexicon::{XSD_BOOLEAN, XSD_DATE_TIME, XSD_DOUBLE, XSD_LONG};
use crate::rdf::{Literal, NamedNode, RdfObject};
use chrono::{DateTime, SecondsFormat, Utc};

/// Converts single stored values into RDF objects
#[derive(Debug, Clone, Copy)]
pub struct ValueConverter<'a> {
    store: &'a GraphStore,
    identifiers: &'a IdentifierConverter,
}

impl<'a> ValueConverter<'a> {
    pub fn new(store: &'a GraphStore, identifiers: &'a IdentifierConverter) -> Self {
        Self { store, identifiers }
    }

    /// Convert one value. Arrays must be iterated by the caller.
    pub fn convert(&self, value: &PropertyValue) -> LdpResult<RdfObject> {
        let object: RdfObject = match value {
            PropertyValue::String(s) => Literal::new_simple_literal(s.as_str()).into(),
            PropertyValue::Integer(i) => typed(i.to_string(), XSD_LONG)?,
            PropertyValue::Float(f) => typed(format_double(*f), XSD_DOUBLE)?,
            PropertyValue::Boolean(b) => typed(b.to_string(), XSD_BOOLEAN)?,
            PropertyValue::DateTime(millis) => {
                let timestamp = DateTime::<Utc>::from_timestamp_millis(*millis).ok_or_else(|| {
                    LdpError::UnconvertibleValue {
                        type_name: value.type_name(),
                        reason: format!("{} ms is out of range", millis),
                    }
                })?;
                typed(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true), XSD_DATE_TIME)?
            }
            PropertyValue::Uri(uri) => NamedNode::new(uri)?.into(),
            PropertyValue::Reference(target) => {
                self.store.node(*target)?;
                self.identifiers.uri_for(self.store, *target)?.into()
            }
            PropertyValue::Array(_) | PropertyValue::Null => {
                return Err(LdpError::UnconvertibleValue {
                    type_name: value.type_name(),
                    reason: "not a single value".to_string(),
                })
            }
        };
        Ok(object)
    }
}

fn typed(lexical: String, datatype: &str) -> LdpResult<RdfObject> {
    Ok(Literal::new_typed_literal(lexical, NamedNode::new(datatype)?).into())
}

fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let lexical = if value > 0.0 { "INF" } else { "-INF" };
        lexical.to_string()
    } else {
        value.to_string()
    }
}
