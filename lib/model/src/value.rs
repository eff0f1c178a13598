use crate::{IriParseError, LanguageTagParseError, Literal, NamedNode, Term, TermRef};
use std::fmt::{Display, Formatter};

/// The value of an attribute: either a resource or a literal.
///
/// Blank nodes are not representable as values must be addressable from SPARQL text.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum RdfValue {
    Resource(NamedNode),
    Literal(Literal),
}

impl RdfValue {
    /// Creates a resource value, validating the IRI.
    pub fn resource(iri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(Self::Resource(NamedNode::new(iri)?))
    }

    /// Creates an `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::new_simple_literal(value))
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self::Literal(Literal::new_typed_literal(value, datatype))
    }

    /// Creates an `rdf:langString` literal, validating the language tag.
    pub fn language_tagged(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, LanguageTagParseError> {
        Ok(Self::Literal(Literal::new_language_tagged_literal(value, language)?))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    pub fn as_ref(&self) -> TermRef<'_> {
        match self {
            Self::Resource(node) => TermRef::NamedNode(node.as_ref()),
            Self::Literal(literal) => TermRef::Literal(literal.as_ref()),
        }
    }
}

impl Display for RdfValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<NamedNode> for RdfValue {
    fn from(value: NamedNode) -> Self {
        Self::Resource(value)
    }
}

impl From<Literal> for RdfValue {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl From<RdfValue> for Term {
    fn from(value: RdfValue) -> Self {
        match value {
            RdfValue::Resource(node) => Term::NamedNode(node),
            RdfValue::Literal(literal) => Term::Literal(literal),
        }
    }
}
