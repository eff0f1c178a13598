use crate::error::SparqlCompileError;
use crate::type_filter::{attribute_variable, TypeFilter};
use crate::{SparqlConfig, SparqlFragment};
use itertools::Itertools;
use rdf_profile_model::vocab::skos;
use rdf_profile_model::{ApplicationProfile, Attribute, Rule, TypeId, Variable};

const COMPILER: &str = "attribute filter";

/// Compiles the `Range` rule of an [`Attribute`] into the fragments that retrieve its values.
///
/// Each returned fragment is an alternative: the caller combines them, for example, with `UNION`.
/// Cardinality rules do not contribute to the fragments as they are validated after retrieval.
#[derive(Clone, Debug)]
pub struct AttributeFilter<'profile> {
    profile: &'profile ApplicationProfile,
    config: SparqlConfig,
}

impl<'profile> AttributeFilter<'profile> {
    pub fn new(profile: &'profile ApplicationProfile) -> Self {
        Self::with_config(profile, SparqlConfig::default())
    }

    pub fn with_config(profile: &'profile ApplicationProfile, config: SparqlConfig) -> Self {
        Self { profile, config }
    }

    pub fn apply(&self, attribute: &Attribute) -> crate::Result<Vec<SparqlFragment>> {
        let mut fragments = Vec::new();
        for rule in attribute.rules() {
            match rule {
                Rule::Range(inner) => fragments.extend(self.compile(attribute, inner)?),
                Rule::MinCardinality(_)
                | Rule::MaxCardinality(_)
                | Rule::MinLangCardinality(_)
                | Rule::MaxLangCardinality(_) => {}
                Rule::RdfType(_)
                | Rule::ClassId(_)
                | Rule::EmbeddedClassId(_)
                | Rule::Datatype(_)
                | Rule::InScheme(_)
                | Rule::ResourceReference(_)
                | Rule::SubClassOf(_)
                | Rule::LiteralValue
                | Rule::LanguageIn(_)
                | Rule::Snippet(_)
                | Rule::And(_)
                | Rule::Or(_)
                | Rule::Not(_) => return SparqlCompileError::unsupported(COMPILER, rule.kind()),
            }
        }

        tracing::debug!(
            type_id = %attribute.type_id(),
            attribute = %attribute.attribute_id(),
            fragments = fragments.len(),
            "Compiled attribute filter"
        );
        Ok(fragments)
    }

    fn compile(&self, attribute: &Attribute, rule: &Rule) -> crate::Result<Vec<SparqlFragment>> {
        tracing::trace!(kind = %rule.kind(), attribute = %attribute.attribute_id(), "Lowering rule");
        let variable = attribute_variable(attribute);
        match rule {
            Rule::Or(children) => {
                let mut fragments = Vec::new();
                for child in children {
                    fragments.extend(self.compile(attribute, child)?);
                }
                Ok(fragments)
            }
            Rule::And(children) => self.compile_and(attribute, children),
            Rule::ClassId(_) => {
                let type_variable = self.type_variable(&variable)?;
                let pattern = format!("{variable} a {type_variable}");
                Ok(vec![SparqlFragment::new(pattern.clone(), pattern)])
            }
            Rule::EmbeddedClassId(id) => {
                let ty = self
                    .profile
                    .type_by_id(id)
                    .ok_or_else(|| SparqlCompileError::UnknownType(id.clone()))?;
                let rdf_type = match ty.rdf_types().as_slice() {
                    [rdf_type] => *rdf_type,
                    other => return embedded_rdf_type_error(id, other.len()),
                };
                let construct = format!("{variable} a {rdf_type}");
                let filter = TypeFilter::new(self.profile, variable, ty).get()?;
                Ok(vec![SparqlFragment::new(construct, filter)])
            }
            Rule::InScheme(iri) => {
                let pattern = format!("{variable} {} {iri}", skos::IN_SCHEME);
                Ok(vec![SparqlFragment::new(pattern.clone(), pattern)])
            }
            Rule::LiteralValue | Rule::Datatype(_) | Rule::LanguageIn(_) | Rule::Snippet(_) => {
                Ok(Vec::new())
            }
            Rule::RdfType(_)
            | Rule::ResourceReference(_)
            | Rule::SubClassOf(_)
            | Rule::MinCardinality(_)
            | Rule::MaxCardinality(_)
            | Rule::MinLangCardinality(_)
            | Rule::MaxLangCardinality(_)
            | Rule::Not(_)
            | Rule::Range(_) => SparqlCompileError::unsupported(COMPILER, rule.kind()),
        }
    }

    /// Merges the fragments of all children into exactly one fragment.
    ///
    /// The constructs of the children are concatenated and every filter of a child becomes its
    /// own `{ ... }` group. Children without fragments do not constrain the values and contribute
    /// nothing, so a conjunction of value-shape rules yields an empty fragment.
    fn compile_and(
        &self,
        attribute: &Attribute,
        children: &[Rule],
    ) -> crate::Result<Vec<SparqlFragment>> {
        let fragments = children
            .iter()
            .map(|child| self.compile(attribute, child))
            .flatten_ok()
            .collect::<crate::Result<Vec<_>>>()?;

        let construct = fragments
            .iter()
            .map(SparqlFragment::construct)
            .join(" .\n");
        let filter = fragments
            .iter()
            .map(|fragment| format!("{{ {} }}", fragment.filter()))
            .join("\n");
        Ok(vec![SparqlFragment::new(construct, filter)])
    }

    fn type_variable(&self, variable: &Variable) -> crate::Result<Variable> {
        let name = format!("{}{}", variable.as_str(), self.config.type_variable_suffix);
        Variable::new(name.as_str())
            .map_err(|error| SparqlCompileError::InvalidVariable { name, error })
    }
}

fn embedded_rdf_type_error<T>(type_id: &TypeId, count: usize) -> crate::Result<T> {
    Err(SparqlCompileError::EmbeddedRdfType {
        type_id: type_id.clone(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{iri, type_of};
    use rdf_profile_model::{
        ApplicationProfileBuilder, AttributeBuilder, AttributeId, RuleKind, TypeBuilder,
    };

    fn profile_with(attribute: AttributeBuilder) -> ApplicationProfile {
        ApplicationProfileBuilder::new()
            .with_type(TypeBuilder::new("GenderConcept").rule(Rule::RdfType(iri("Gender"))))
            .with_type(
                TypeBuilder::new("Address")
                    .rule(Rule::RdfType(iri("Address")))
                    .rule(Rule::InScheme(iri("addresses"))),
            )
            .with_type(
                TypeBuilder::new("Unaddressable")
                    .rule(Rule::RdfType(iri("A")))
                    .rule(Rule::RdfType(iri("B"))),
            )
            .with_type(TypeBuilder::new("Untyped").rule(Rule::InScheme(iri("untyped"))))
            .with_type(TypeBuilder::new("Person").attribute(attribute))
            .build()
            .unwrap()
    }

    fn attribute<'profile>(profile: &'profile ApplicationProfile, id: &str) -> &'profile Attribute {
        type_of(profile, "Person")
            .attribute(&AttributeId::new(id))
            .unwrap()
    }

    fn apply(profile: &ApplicationProfile, id: &str) -> crate::Result<Vec<SparqlFragment>> {
        AttributeFilter::new(profile).apply(attribute(profile, id))
    }

    #[test]
    fn class_id_binds_a_type_variable() {
        let profile = profile_with(
            AttributeBuilder::new("gender", "http://example.org/gender")
                .range(Rule::ClassId(TypeId::new("GenderConcept"))),
        );
        let fragments = apply(&profile, "gender").unwrap();

        assert_eq!(fragments.len(), 1);
        insta::assert_snapshot!(fragments[0], @r"
        CONSTRUCT:
        ?gender a ?genderType
        FILTER:
        ?gender a ?genderType
        ");
    }

    #[test]
    fn or_produces_one_fragment_per_alternative() {
        let profile = profile_with(
            AttributeBuilder::new("subject", "http://purl.org/dc/terms/subject").range(Rule::or([
                Rule::ClassId(TypeId::new("GenderConcept")),
                Rule::InScheme(iri("topics")),
            ])),
        );
        let fragments = apply(&profile, "subject").unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].filter(), "?subject a ?subjectType");
        assert_eq!(
            fragments[1].filter(),
            "?subject <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/topics>"
        );
    }

    #[test]
    fn and_merges_into_one_fragment() {
        let profile = profile_with(
            AttributeBuilder::new("gender", "http://example.org/gender").range(Rule::and([
                Rule::ClassId(TypeId::new("GenderConcept")),
                Rule::InScheme(iri("genderScheme")),
            ])),
        );
        let fragments = apply(&profile, "gender").unwrap();

        assert_eq!(fragments.len(), 1);
        insta::assert_snapshot!(fragments[0], @r"
        CONSTRUCT:
        ?gender a ?genderType .
        ?gender <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/genderScheme>
        FILTER:
        { ?gender a ?genderType }
        { ?gender <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/genderScheme> }
        ");
    }

    #[test]
    fn and_with_alternatives_still_merges_into_one_fragment() {
        let profile = profile_with(
            AttributeBuilder::new("topic", "http://example.org/topic").range(Rule::and([
                Rule::ClassId(TypeId::new("GenderConcept")),
                Rule::LiteralValue,
                Rule::or([Rule::InScheme(iri("a")), Rule::InScheme(iri("b"))]),
            ])),
        );
        let fragments = apply(&profile, "topic").unwrap();

        assert_eq!(fragments.len(), 1);
        insta::assert_snapshot!(fragments[0], @r"
        CONSTRUCT:
        ?topic a ?topicType .
        ?topic <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/a> .
        ?topic <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/b>
        FILTER:
        { ?topic a ?topicType }
        { ?topic <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/a> }
        { ?topic <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/b> }
        ");
    }

    #[test]
    fn value_shape_rules_produce_no_fragment() {
        let profile = profile_with(
            AttributeBuilder::new("label", "http://www.w3.org/2000/01/rdf-schema#label")
                .range(Rule::LiteralValue)
                .rule(Rule::MinCardinality(1))
                .rule(Rule::MaxLangCardinality(1)),
        );

        assert!(apply(&profile, "label").unwrap().is_empty());
    }

    #[test]
    fn and_of_value_shape_rules_is_one_empty_fragment() {
        let profile = profile_with(
            AttributeBuilder::new("label", "http://www.w3.org/2000/01/rdf-schema#label").range(
                Rule::and([
                    Rule::LiteralValue,
                    Rule::LanguageIn(vec!["en".to_owned(), "fr".to_owned()]),
                ]),
            ),
        );
        let fragments = apply(&profile, "label").unwrap();

        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].construct().is_empty());
        assert!(fragments[0].filter().is_empty());
    }

    #[test]
    fn embedded_class_delegates_to_the_type_filter() {
        let profile = profile_with(
            AttributeBuilder::new("address", "http://example.org/address")
                .range(Rule::EmbeddedClassId(TypeId::new("Address"))),
        );
        let fragments = apply(&profile, "address").unwrap();

        assert_eq!(fragments.len(), 1);
        insta::assert_snapshot!(fragments[0], @r"
        CONSTRUCT:
        ?address a <http://example.org/Address>
        FILTER:
        ?address a <http://example.org/Address>. ?address <http://www.w3.org/2004/02/skos/core#inScheme> <http://example.org/addresses>
        ");
    }

    #[test]
    fn embedded_class_requires_exactly_one_rdf_type() {
        let profile = profile_with(
            AttributeBuilder::new("thing", "http://example.org/thing")
                .range(Rule::EmbeddedClassId(TypeId::new("Unaddressable"))),
        );

        assert!(matches!(
            apply(&profile, "thing"),
            Err(SparqlCompileError::EmbeddedRdfType { count: 2, .. })
        ));
    }

    #[test]
    fn embedded_class_without_rdf_type_fails() {
        let profile = profile_with(
            AttributeBuilder::new("thing", "http://example.org/thing")
                .range(Rule::EmbeddedClassId(TypeId::new("Untyped"))),
        );

        assert!(matches!(
            apply(&profile, "thing"),
            Err(SparqlCompileError::EmbeddedRdfType { count: 0, .. })
        ));
    }

    #[test]
    fn unsupported_rules_fail() {
        let profile = profile_with(
            AttributeBuilder::new("other", "http://example.org/other")
                .range(Rule::not(Rule::InScheme(iri("a")))),
        );

        assert!(matches!(
            apply(&profile, "other"),
            Err(SparqlCompileError::UnsupportedRule {
                kind: RuleKind::Not,
                ..
            })
        ));
    }

    #[test]
    fn configured_type_variable_suffix() {
        let profile = profile_with(
            AttributeBuilder::new("gender", "http://example.org/gender")
                .range(Rule::ClassId(TypeId::new("GenderConcept"))),
        );
        let config = SparqlConfig {
            type_variable_suffix: "_class".to_owned(),
            ..SparqlConfig::default()
        };
        let fragments = AttributeFilter::with_config(&profile, config)
            .apply(attribute(&profile, "gender"))
            .unwrap();

        assert_eq!(fragments[0].construct(), "?gender a ?gender_class");
    }
}
