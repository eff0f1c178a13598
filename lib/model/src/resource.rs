use crate::{NamedOrBlankNode, Subject, TypeId};

/// The identity of a resource that is being edited: its subject and the id of its type.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TypedResource {
    subject: NamedOrBlankNode,
    type_id: TypeId,
}

impl TypedResource {
    pub fn new(subject: impl Into<NamedOrBlankNode>, type_id: impl Into<TypeId>) -> Self {
        Self {
            subject: subject.into(),
            type_id: type_id.into(),
        }
    }

    pub fn subject(&self) -> &NamedOrBlankNode {
        &self.subject
    }

    pub fn type_id(&self) -> &TypeId {
        &self.type_id
    }

    /// Returns the subject in a form that can be used in a triple.
    pub fn triple_subject(&self) -> Subject {
        match &self.subject {
            NamedOrBlankNode::NamedNode(node) => Subject::NamedNode(node.clone()),
            NamedOrBlankNode::BlankNode(node) => Subject::BlankNode(node.clone()),
        }
    }
}
