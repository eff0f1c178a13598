use crate::{AttributeId, IriParseError, TypeId, VariableNameParseError};

/// An error raised while assembling an [`ApplicationProfile`](crate::ApplicationProfile).
///
/// Profiles are static configuration. All of these errors are detected once, when the profile
/// is built, so that the compilers never see a dangling reference.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// Two types share the same class id.
    #[error("The type {0} is defined more than once")]
    DuplicateType(TypeId),
    /// A type declares the same attribute twice.
    #[error("The attribute {attribute} is defined more than once on type {type_id}")]
    DuplicateAttribute {
        type_id: TypeId,
        attribute: AttributeId,
    },
    /// A rule references a type that is not part of the profile.
    #[error("The type {referenced} referenced from {from} is not part of the profile")]
    UnknownType { referenced: TypeId, from: TypeId },
    /// An attribute carries more than one `Range` rule.
    #[error("The attribute {attribute} of type {type_id} has {count} range rules, at most one is allowed")]
    MultipleRanges {
        type_id: TypeId,
        attribute: AttributeId,
        count: usize,
    },
    /// A `Range` rule was placed directly on a type.
    #[error("The type {0} has a range rule, range rules are only allowed on attributes")]
    RangeOnType(TypeId),
    /// The attribute id cannot be used as a SPARQL variable name.
    #[error("The attribute id {attribute} is not a valid SPARQL variable name: {error}")]
    InvalidAttributeId {
        attribute: AttributeId,
        #[source]
        error: VariableNameParseError,
    },
    /// The IRI of an attribute (or the profile base IRI) is invalid.
    #[error("Invalid IRI '{iri}': {error}")]
    InvalidIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// A type is, directly or transitively, its own superclass.
    #[error("The type {0} is part of a subClassOf cycle")]
    SubClassCycle(TypeId),
}
