//! Serialization of RDF terms into SPARQL text.
//!
//! Literals are always written as triple-quoted long strings (`'''...'''`). Inside of them, only
//! `\` and `'` need escaping. Line breaks and other control characters are allowed verbatim by the
//! long string grammar and are passed through unchanged.

use crate::error::SparqlCompileError;
use rdf_profile_model::{LiteralRef, SubjectRef, TermRef, TripleRef};

/// Serializes a term into its SPARQL representation.
///
/// - IRIs are written as `<iri>`.
/// - Literals are written as `'''lexical'''` followed by either `@lang` or `^^<datatype>`.
/// - Blank nodes cannot be addressed from SPARQL text and produce an error.
pub fn serialize_term(term: TermRef<'_>) -> crate::Result<String> {
    match term {
        TermRef::NamedNode(node) => Ok(node.to_string()),
        TermRef::Literal(literal) => Ok(serialize_literal(literal)),
        TermRef::BlankNode(node) => Err(SparqlCompileError::BlankNode(node.into_owned())),
    }
}

/// Serializes a triple subject. Fails for blank nodes, see [`serialize_term`].
pub fn serialize_subject(subject: SubjectRef<'_>) -> crate::Result<String> {
    match subject {
        SubjectRef::NamedNode(node) => Ok(node.to_string()),
        SubjectRef::BlankNode(node) => Err(SparqlCompileError::BlankNode(node.into_owned())),
    }
}

/// Serializes a triple as `subject predicate object .`.
pub fn serialize_triple(triple: TripleRef<'_>) -> crate::Result<String> {
    Ok(format!(
        "{} {} {} .",
        serialize_subject(triple.subject)?,
        triple.predicate,
        serialize_term(triple.object)?
    ))
}

pub fn serialize_literal(literal: LiteralRef<'_>) -> String {
    let mut result = String::with_capacity(literal.value().len() + 8);
    result.push_str("'''");
    result.push_str(&escape_lexical(literal.value()));
    result.push_str("'''");
    match literal.language() {
        Some(language) => {
            result.push('@');
            result.push_str(language);
        }
        None => {
            result.push_str("^^<");
            result.push_str(literal.datatype().as_str());
            result.push('>');
        }
    }
    result
}

/// Prefixes every `\` and every `'` with a `\`. All other characters are left untouched.
pub fn escape_lexical(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
