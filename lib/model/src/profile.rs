use crate::{AttributeId, NamedNode, Rule, TypeId};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// The declarative schema driving the data-access layer.
///
/// The profile owns every [`Type`] and is the only registry that resolves type references.
/// Types and attributes point to each other by id, never by owning pointer, so self-referential
/// schemas do not form ownership cycles. Once built, a profile is immutable and can be shared
/// freely between threads.
#[derive(Clone, Debug, Default)]
pub struct ApplicationProfile {
    types: FxHashMap<TypeId, Type>,
}

impl ApplicationProfile {
    pub(crate) fn new(types: FxHashMap<TypeId, Type>) -> Self {
        Self { types }
    }

    pub fn type_by_id(&self, id: &TypeId) -> Option<&Type> {
        self.types.get(id)
    }

    /// Iterates over all types of the profile in an unspecified order.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A type of resource, defined by its membership rules.
#[derive(Clone, Debug)]
pub struct Type {
    class_id: TypeId,
    rules: Vec<Rule>,
    attributes: BTreeMap<AttributeId, Attribute>,
}

impl Type {
    pub(crate) fn new(
        class_id: TypeId,
        rules: Vec<Rule>,
        attributes: BTreeMap<AttributeId, Attribute>,
    ) -> Self {
        Self {
            class_id,
            rules,
            attributes,
        }
    }

    pub fn class_id(&self) -> &TypeId {
        &self.class_id
    }

    /// The membership rules of this type. They are implicitly combined with `And`.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the IRIs of all top-level `RdfType` rules, in declaration order.
    pub fn rdf_types(&self) -> Vec<&NamedNode> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::RdfType(iri) => Some(iri),
                _ => None,
            })
            .collect()
    }

    /// Returns the ids of the direct superclasses declared through `SubClassOf` rules.
    pub fn super_classes(&self) -> Vec<&TypeId> {
        let mut result = Vec::new();
        for rule in &self.rules {
            rule.visit(&mut |rule| {
                if let Rule::SubClassOf(ids) = rule {
                    result.extend(ids);
                }
            });
        }
        result
    }

    pub fn attribute(&self, id: &AttributeId) -> Option<&Attribute> {
        self.attributes.get(id)
    }

    /// Iterates over the attributes ordered by their id.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

/// A property of a [`Type`], mapped to a predicate IRI and constrained by rules.
#[derive(Clone, Debug)]
pub struct Attribute {
    attribute_id: AttributeId,
    type_id: TypeId,
    uri: NamedNode,
    rules: Vec<Rule>,
}

impl Attribute {
    pub(crate) fn new(
        attribute_id: AttributeId,
        type_id: TypeId,
        uri: NamedNode,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            attribute_id,
            type_id,
            uri,
            rules,
        }
    }

    pub fn attribute_id(&self) -> &AttributeId {
        &self.attribute_id
    }

    /// The id of the type owning this attribute.
    pub fn type_id(&self) -> &TypeId {
        &self.type_id
    }

    pub fn uri(&self) -> &NamedNode {
        &self.uri
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the rule wrapped by the `Range` rule of this attribute, if there is one.
    pub fn range(&self) -> Option<&Rule> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::Range(inner) => Some(inner.as_ref()),
            _ => None,
        })
    }

    pub fn min_cardinality(&self) -> Option<usize> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::MinCardinality(n) => Some(*n),
            _ => None,
        })
    }

    pub fn max_cardinality(&self) -> Option<usize> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::MaxCardinality(n) => Some(*n),
            _ => None,
        })
    }

    /// An attribute is multi-valued unless it declares a maximum cardinality of at most one.
    pub fn is_multi_valued(&self) -> bool {
        !matches!(self.max_cardinality(), Some(max) if max <= 1)
    }
}
