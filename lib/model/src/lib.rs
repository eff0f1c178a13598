mod builder;
mod error;
mod ids;
mod profile;
mod resource;
mod rule;
mod value;
pub mod vocab;

pub use builder::{ApplicationProfileBuilder, AttributeBuilder, TypeBuilder};
pub use error::*;
pub use ids::{AttributeId, TypeId};
pub use profile::{ApplicationProfile, Attribute, Type};
pub use resource::TypedResource;
pub use rule::{Rule, RuleKind};
pub use value::RdfValue;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeRef, Graph, IriParseError, LanguageTagParseError, Literal, LiteralRef,
    NamedNode, NamedNodeRef, NamedOrBlankNode, Subject, SubjectRef, Term, TermRef, Triple,
    TripleRef, Variable, VariableNameParseError, VariableRef,
};
