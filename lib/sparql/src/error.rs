use rdf_profile_model::{
    AttributeId, BlankNode, RuleKind, TypeId, Variable, VariableNameParseError,
};

/// An error raised while compiling rules or deltas into SPARQL.
///
/// None of these errors is recovered locally. A fragment or an update is either compiled
/// completely or not at all.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SparqlCompileError {
    /// The compiler does not support the rule in its current position.
    #[error("The {compiler} does not support {kind} rules")]
    UnsupportedRule {
        compiler: &'static str,
        kind: RuleKind,
    },
    /// Blank nodes cannot be addressed from SPARQL text.
    #[error("The blank node {0} cannot be serialized into SPARQL")]
    BlankNode(BlankNode),
    /// A type reference could not be resolved against the profile.
    #[error("The type {0} is not part of the profile")]
    UnknownType(TypeId),
    /// The attribute does not have an `EmbeddedClassId` range.
    #[error("The attribute {0} does not refer to an embedded type")]
    NotEmbedded(AttributeId),
    /// An embedded type must declare exactly one `rdf:type`.
    #[error("The embedded type {type_id} has {count} RdfType rules, exactly one is required")]
    EmbeddedRdfType { type_id: TypeId, count: usize },
    /// An additive graph cannot represent removals.
    #[error("The delta contains {count} removed statements that cannot be represented in a graph")]
    DeletionInModel { count: usize },
    /// The variable of an attribute is already bound to the resource or its type.
    #[error("The attribute {attribute} would bind {variable}, which is reserved for the resource")]
    VariableCollision {
        attribute: AttributeId,
        variable: Variable,
    },
    /// The configured variable name is not a valid SPARQL variable.
    #[error("Invalid variable name '{name}': {error}")]
    InvalidVariable {
        name: String,
        #[source]
        error: VariableNameParseError,
    },
}

impl SparqlCompileError {
    pub(crate) fn unsupported<T>(compiler: &'static str, kind: RuleKind) -> crate::Result<T> {
        Err(SparqlCompileError::UnsupportedRule { compiler, kind })
    }
}
