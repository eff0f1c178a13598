use crate::{
    ApplicationProfile, Attribute, AttributeId, Iri, NamedNode, ProfileError, Rule, Type, TypeId,
    Variable,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

/// Assembles an [`ApplicationProfile`] and validates it once.
///
/// Validation rejects duplicate ids, dangling type references, attributes with more than one
/// `Range`, attribute ids that are not valid SPARQL variable names and `SubClassOf` cycles.
#[derive(Debug, Default)]
pub struct ApplicationProfileBuilder {
    base_iri: Option<Iri<String>>,
    types: Vec<TypeBuilder>,
}

impl ApplicationProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the IRI against which relative attribute IRIs are resolved.
    pub fn with_base_iri(self, base_iri: impl Into<String>) -> Result<Self, ProfileError> {
        let base_iri = base_iri.into();
        let parsed = Iri::parse(base_iri.clone())
            .map_err(|error| ProfileError::InvalidIri { iri: base_iri, error })?;
        Ok(Self {
            base_iri: Some(parsed),
            ..self
        })
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeBuilder) -> Self {
        self.types.push(ty);
        self
    }

    pub fn build(self) -> Result<ApplicationProfile, ProfileError> {
        let mut types = FxHashMap::default();
        for ty in self.types {
            let ty = ty.build(self.base_iri.as_ref())?;
            if types.contains_key(ty.class_id()) {
                return Err(ProfileError::DuplicateType(ty.class_id().clone()));
            }
            types.insert(ty.class_id().clone(), ty);
        }

        let profile = ApplicationProfile::new(types);
        validate_references(&profile)?;
        validate_sub_class_hierarchy(&profile)?;

        tracing::debug!(types = profile.len(), "Built application profile");
        Ok(profile)
    }
}

#[derive(Debug)]
pub struct TypeBuilder {
    class_id: TypeId,
    rules: Vec<Rule>,
    attributes: Vec<AttributeBuilder>,
}

impl TypeBuilder {
    pub fn new(class_id: impl Into<TypeId>) -> Self {
        Self {
            class_id: class_id.into(),
            rules: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, base_iri: Option<&Iri<String>>) -> Result<Type, ProfileError> {
        if self.rules.iter().any(|rule| matches!(rule, Rule::Range(_))) {
            return Err(ProfileError::RangeOnType(self.class_id));
        }

        let mut attributes = BTreeMap::new();
        for attribute in self.attributes {
            let attribute = attribute.build(&self.class_id, base_iri)?;
            if attributes.contains_key(attribute.attribute_id()) {
                return Err(ProfileError::DuplicateAttribute {
                    type_id: self.class_id,
                    attribute: attribute.attribute_id().clone(),
                });
            }
            attributes.insert(attribute.attribute_id().clone(), attribute);
        }

        Ok(Type::new(self.class_id, self.rules, attributes))
    }
}

#[derive(Debug)]
pub struct AttributeBuilder {
    attribute_id: AttributeId,
    uri: String,
    rules: Vec<Rule>,
}

impl AttributeBuilder {
    /// Creates an attribute mapped to the predicate `uri`. Relative IRIs are resolved against the
    /// base IRI of the profile.
    pub fn new(attribute_id: impl Into<AttributeId>, uri: impl Into<String>) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            uri: uri.into(),
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Shorthand for adding `Range(inner)`.
    #[must_use]
    pub fn range(self, inner: Rule) -> Self {
        self.rule(Rule::range(inner))
    }

    fn build(
        self,
        type_id: &TypeId,
        base_iri: Option<&Iri<String>>,
    ) -> Result<Attribute, ProfileError> {
        if let Err(error) = Variable::new(self.attribute_id.as_str()) {
            return Err(ProfileError::InvalidAttributeId {
                attribute: self.attribute_id,
                error,
            });
        }

        let ranges = self
            .rules
            .iter()
            .filter(|rule| matches!(rule, Rule::Range(_)))
            .count();
        if ranges > 1 {
            return Err(ProfileError::MultipleRanges {
                type_id: type_id.clone(),
                attribute: self.attribute_id,
                count: ranges,
            });
        }

        let uri = match base_iri {
            Some(base_iri) => base_iri.resolve(&self.uri).map(Iri::into_inner),
            None => Iri::parse(self.uri.clone()).map(Iri::into_inner),
        }
        .map_err(|error| ProfileError::InvalidIri {
            iri: self.uri.clone(),
            error,
        })?;

        Ok(Attribute::new(
            self.attribute_id,
            type_id.clone(),
            NamedNode::new_unchecked(uri),
            self.rules,
        ))
    }
}

fn validate_references(profile: &ApplicationProfile) -> Result<(), ProfileError> {
    for ty in profile.types() {
        let attribute_rules = ty.attributes().flat_map(Attribute::rules);
        for rule in ty.rules().iter().chain(attribute_rules) {
            for referenced in rule.referenced_types() {
                if profile.type_by_id(referenced).is_none() {
                    return Err(ProfileError::UnknownType {
                        referenced: referenced.clone(),
                        from: ty.class_id().clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Rejects types that are, directly or transitively, their own superclass. The type filter
/// inlines superclass rules recursively and would not terminate on such a hierarchy.
fn validate_sub_class_hierarchy(profile: &ApplicationProfile) -> Result<(), ProfileError> {
    let mut finished = FxHashSet::default();
    for ty in profile.types() {
        let mut in_progress = FxHashSet::default();
        visit_super_classes(profile, ty, &mut in_progress, &mut finished)?;
    }
    Ok(())
}

fn visit_super_classes<'profile>(
    profile: &'profile ApplicationProfile,
    ty: &'profile Type,
    in_progress: &mut FxHashSet<&'profile TypeId>,
    finished: &mut FxHashSet<&'profile TypeId>,
) -> Result<(), ProfileError> {
    if finished.contains(ty.class_id()) {
        return Ok(());
    }
    if !in_progress.insert(ty.class_id()) {
        return Err(ProfileError::SubClassCycle(ty.class_id().clone()));
    }

    for super_class in ty.super_classes() {
        if let Some(super_class) = profile.type_by_id(super_class) {
            visit_super_classes(profile, super_class, in_progress, finished)?;
        }
    }

    in_progress.remove(ty.class_id());
    finished.insert(ty.class_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::skos;

    fn person() -> TypeBuilder {
        TypeBuilder::new("Person")
            .rule(Rule::RdfType(NamedNode::new_unchecked(
                "http://xmlns.com/foaf/0.1/Person",
            )))
            .attribute(
                AttributeBuilder::new("name", "http://xmlns.com/foaf/0.1/name")
                    .range(Rule::LiteralValue)
                    .rule(Rule::MaxCardinality(1)),
            )
    }

    #[test]
    fn builds_a_valid_profile() {
        let profile = ApplicationProfileBuilder::new()
            .with_type(person())
            .build()
            .unwrap();

        let ty = profile.type_by_id(&TypeId::new("Person")).unwrap();
        let name = ty.attribute(&AttributeId::new("name")).unwrap();
        assert_eq!(name.type_id().as_str(), "Person");
        assert_eq!(name.range(), Some(&Rule::LiteralValue));
        assert!(!name.is_multi_valued());
        assert_eq!(ty.rdf_types().len(), 1);
    }

    #[test]
    fn resolves_relative_attribute_iris() {
        let profile = ApplicationProfileBuilder::new()
            .with_base_iri("http://example.org/profile/")
            .unwrap()
            .with_type(TypeBuilder::new("Thing").attribute(AttributeBuilder::new("label", "label")))
            .build()
            .unwrap();

        let uri = profile
            .type_by_id(&TypeId::new("Thing"))
            .and_then(|ty| ty.attribute(&AttributeId::new("label")))
            .map(|attribute| attribute.uri().as_str().to_owned());
        assert_eq!(uri.as_deref(), Some("http://example.org/profile/label"));
    }

    #[test]
    fn rejects_dangling_type_references() {
        let result = ApplicationProfileBuilder::new()
            .with_type(
                TypeBuilder::new("Person").attribute(
                    AttributeBuilder::new("knows", "http://xmlns.com/foaf/0.1/knows")
                        .range(Rule::ClassId(TypeId::new("Agent"))),
                ),
            )
            .build();

        assert!(matches!(
            result,
            Err(ProfileError::UnknownType { referenced, .. }) if referenced.as_str() == "Agent"
        ));
    }

    #[test]
    fn rejects_duplicate_types() {
        let result = ApplicationProfileBuilder::new()
            .with_type(person())
            .with_type(person())
            .build();

        assert!(matches!(result, Err(ProfileError::DuplicateType(_))));
    }

    #[test]
    fn rejects_multiple_ranges() {
        let result = ApplicationProfileBuilder::new()
            .with_type(
                TypeBuilder::new("Concept").attribute(
                    AttributeBuilder::new("broader", "http://www.w3.org/2004/02/skos/core#broader")
                        .range(Rule::InScheme(skos::CONCEPT_SCHEME.into_owned()))
                        .range(Rule::LiteralValue),
                ),
            )
            .build();

        assert!(matches!(
            result,
            Err(ProfileError::MultipleRanges { count: 2, .. })
        ));
    }

    #[test]
    fn rejects_attribute_ids_that_are_not_variables() {
        let result = ApplicationProfileBuilder::new()
            .with_type(
                TypeBuilder::new("Person")
                    .attribute(AttributeBuilder::new("first name", "http://example.org/name")),
            )
            .build();

        assert!(matches!(
            result,
            Err(ProfileError::InvalidAttributeId { .. })
        ));
    }

    #[test]
    fn rejects_range_on_type() {
        let result = ApplicationProfileBuilder::new()
            .with_type(TypeBuilder::new("Person").rule(Rule::range(Rule::LiteralValue)))
            .build();

        assert!(matches!(result, Err(ProfileError::RangeOnType(_))));
    }

    #[test]
    fn rejects_sub_class_cycles() {
        let result = ApplicationProfileBuilder::new()
            .with_type(TypeBuilder::new("A").rule(Rule::SubClassOf(vec![TypeId::new("B")])))
            .with_type(TypeBuilder::new("B").rule(Rule::SubClassOf(vec![TypeId::new("A")])))
            .build();

        assert!(matches!(result, Err(ProfileError::SubClassCycle(_))));
    }

    #[test]
    fn accepts_diamond_inheritance_and_self_referencing_ranges() {
        let profile = ApplicationProfileBuilder::new()
            .with_type(TypeBuilder::new("Top"))
            .with_type(TypeBuilder::new("Left").rule(Rule::SubClassOf(vec![TypeId::new("Top")])))
            .with_type(TypeBuilder::new("Right").rule(Rule::SubClassOf(vec![TypeId::new("Top")])))
            .with_type(
                TypeBuilder::new("Bottom")
                    .rule(Rule::SubClassOf(vec![TypeId::new("Left"), TypeId::new("Right")]))
                    .attribute(
                        AttributeBuilder::new("parent", "http://example.org/parent")
                            .range(Rule::ClassId(TypeId::new("Bottom"))),
                    ),
            )
            .build()
            .unwrap();

        assert_eq!(profile.len(), 4);
    }
}
