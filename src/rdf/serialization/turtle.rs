//! Turtle and N-Triples output through rio formatters

use super::{SerializeError, SerializeResult};
use crate::rdf::{RdfObject, RdfSubject, Triple};
use crate::lexicon::XSD_STRING;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_turtle::{NTriplesFormatter, TurtleFormatter};

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize Triples to Turtle string
    pub fn serialize<'t>(triples: impl IntoIterator<Item = &'t Triple>) -> SerializeResult<String> {
        let mut formatter = TurtleFormatter::new(Vec::new());
        format_all(&mut formatter, triples)?;

        let output = formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        into_string(output)
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// Serialize Triples to N-Triples string, one statement per line
    pub fn serialize<'t>(triples: impl IntoIterator<Item = &'t Triple>) -> SerializeResult<String> {
        let mut output = Vec::new();
        {
            let mut formatter = NTriplesFormatter::new(&mut output);
            format_all(&mut formatter, triples)?;
        }
        into_string(output)
    }
}

fn format_all<'t, F>(formatter: &mut F, triples: impl IntoIterator<Item = &'t Triple>) -> SerializeResult<()>
where
    F: TriplesFormatter,
    F::Error: std::fmt::Display,
{
    for triple in triples {
        formatter
            .format(&to_rio(triple))
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }
    Ok(())
}

fn into_string(output: Vec<u8>) -> SerializeResult<String> {
    String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Borrow a triple as its rio model counterpart
fn to_rio(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => {
            let literal = if let Some(language) = l.language() {
                model::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                }
            } else if l.datatype() == XSD_STRING {
                model::Literal::Simple { value: l.value() }
            } else {
                model::Literal::Typed {
                    value: l.value(),
                    datatype: model::NamedNode { iri: l.datatype() },
                }
            };
            model::Term::Literal(literal)
        }
    };

    model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}
