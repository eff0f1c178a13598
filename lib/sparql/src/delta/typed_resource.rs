use crate::delta::Delta;
use rdf_profile_model::vocab::rdf;
use rdf_profile_model::{
    Attribute, AttributeId, NamedNode, NamedOrBlankNode, RdfValue, Triple, Type, TypeId,
    TypedResource,
};
use std::collections::BTreeMap;

/// Identifies an attribute across types, as attributes are only unique within their type.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
struct AttributeKey {
    type_id: TypeId,
    attribute_id: AttributeId,
}

impl AttributeKey {
    fn of(attribute: &Attribute) -> Self {
        Self {
            type_id: attribute.type_id().clone(),
            attribute_id: attribute.attribute_id().clone(),
        }
    }
}

#[derive(Clone, Debug)]
struct AttributeChanges {
    predicate: NamedNode,
    values: Vec<RdfValue>,
}

/// The changes made to the attribute values of a single resource during one edit.
///
/// The delta only ever holds non-empty value lists. Appending values for an attribute replaces
/// the values appended before for the same attribute.
///
/// New resources additionally get an `rdf:type` statement for every `RdfType` rule of their type.
/// Likewise, these statements are removed for deleted resources.
#[derive(Clone, Debug)]
pub struct TypedResourceDelta {
    resource: TypedResource,
    rdf_types: Vec<NamedNode>,
    is_new: bool,
    is_deleted: bool,
    add: BTreeMap<AttributeKey, AttributeChanges>,
    remove: BTreeMap<AttributeKey, AttributeChanges>,
}

impl TypedResourceDelta {
    /// Creates an empty delta for an existing resource of type `ty`.
    pub fn new(ty: &Type, subject: impl Into<NamedOrBlankNode>) -> Self {
        Self {
            resource: TypedResource::new(subject, ty.class_id().clone()),
            rdf_types: ty.rdf_types().into_iter().cloned().collect(),
            is_new: false,
            is_deleted: false,
            add: BTreeMap::new(),
            remove: BTreeMap::new(),
        }
    }

    /// Creates an empty delta for a resource that does not exist in the store yet.
    pub fn for_new_resource(ty: &Type, subject: impl Into<NamedOrBlankNode>) -> Self {
        let mut delta = Self::new(ty, subject);
        delta.mark_new();
        delta
    }

    /// Creates an empty delta for a resource that is removed from the store.
    pub fn for_deleted_resource(ty: &Type, subject: impl Into<NamedOrBlankNode>) -> Self {
        let mut delta = Self::new(ty, subject);
        delta.mark_deleted();
        delta
    }

    pub fn resource(&self) -> &TypedResource {
        &self.resource
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn mark_new(&mut self) {
        self.is_new = true;
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }

    /// Records `values` to be added for `attribute`. Does nothing if `values` is empty.
    pub fn append_to_add(
        &mut self,
        attribute: &Attribute,
        values: impl IntoIterator<Item = RdfValue>,
    ) {
        Self::append(&mut self.add, attribute, values);
    }

    /// Records `values` to be removed for `attribute`. Does nothing if `values` is empty.
    pub fn append_to_remove(
        &mut self,
        attribute: &Attribute,
        values: impl IntoIterator<Item = RdfValue>,
    ) {
        Self::append(&mut self.remove, attribute, values);
    }

    fn append(
        changes: &mut BTreeMap<AttributeKey, AttributeChanges>,
        attribute: &Attribute,
        values: impl IntoIterator<Item = RdfValue>,
    ) {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return;
        }
        changes.insert(
            AttributeKey::of(attribute),
            AttributeChanges {
                predicate: attribute.uri().clone(),
                values,
            },
        );
    }

    /// Returns whether values of `attribute` are added or removed.
    ///
    /// In contrast to [`Delta::has_changes`], the `rdf:type` statements of new or deleted
    /// resources are not taken into account.
    pub fn has_changes_for(&self, attribute: &Attribute) -> bool {
        let key = AttributeKey::of(attribute);
        self.add.contains_key(&key) || self.remove.contains_key(&key)
    }

    pub fn added(&self, attribute: &Attribute) -> &[RdfValue] {
        values_of(&self.add, attribute)
    }

    pub fn removed(&self, attribute: &Attribute) -> &[RdfValue] {
        values_of(&self.remove, attribute)
    }

    /// Returns the ids of all attributes with added or removed values.
    pub fn attributes_with_changes(&self) -> Vec<&AttributeId> {
        let mut result = self
            .add
            .keys()
            .chain(self.remove.keys())
            .map(|key| &key.attribute_id)
            .collect::<Vec<_>>();
        result.sort();
        result.dedup();
        result
    }

    fn statements(
        &self,
        changes: &BTreeMap<AttributeKey, AttributeChanges>,
        with_rdf_types: bool,
    ) -> Vec<Triple> {
        let subject = self.resource.triple_subject();
        let mut statements = Vec::new();
        for change in changes.values() {
            for value in &change.values {
                statements.push(Triple::new(
                    subject.clone(),
                    change.predicate.clone(),
                    value.clone(),
                ));
            }
        }
        if with_rdf_types {
            for rdf_type in &self.rdf_types {
                statements.push(Triple::new(subject.clone(), rdf::TYPE, rdf_type.clone()));
            }
        }
        statements
    }
}

impl Delta for TypedResourceDelta {
    fn add_statements(&self) -> Vec<Triple> {
        self.statements(&self.add, self.is_new)
    }

    fn remove_statements(&self) -> Vec<Triple> {
        self.statements(&self.remove, self.is_deleted)
    }
}

fn values_of<'delta>(
    changes: &'delta BTreeMap<AttributeKey, AttributeChanges>,
    attribute: &Attribute,
) -> &'delta [RdfValue] {
    changes
        .get(&AttributeKey::of(attribute))
        .map(|change| change.values.as_slice())
        .unwrap_or_default()
}
