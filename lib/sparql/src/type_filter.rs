use crate::error::SparqlCompileError;
use crate::config::DEFAULT_RESOURCE_VARIABLE;
use crate::SparqlConfig;
use rdf_profile_model::vocab::skos;
use rdf_profile_model::{ApplicationProfile, Attribute, Rule, Type, Variable};

const COMPILER: &str = "type filter";

/// Compiles the membership rules of a [`Type`] into a SPARQL group graph pattern body.
///
/// A filter binds a context: the variable that is constrained and the type whose rules are
/// compiled. The rules of the type are implicitly combined with `And`. The top-level conjunction
/// is written without braces, nested conjunctions become `{ ... }` blocks.
///
/// | Rule                     | SPARQL                                       |
/// |--------------------------|----------------------------------------------|
/// | `RdfType(u)`             | `?var a <u>`                                 |
/// | `ResourceReference(u)`   | `FILTER (?var = <u>)`                        |
/// | `InScheme(u)`            | `?var skos:inScheme <u>`                     |
/// | `And(c1..cn)`            | `{ c1. ... cn }`                             |
/// | `SubClassOf(S1..Sn)`     | `{ rules(S1) }. ... { rules(Sn) }`           |
///
/// The inlined superclass rules exclude their `RdfType` rules, as the identity of the subclass
/// must not be derived from its superclasses. Every other rule is rejected.
#[derive(Clone, Debug)]
pub struct TypeFilter<'profile> {
    profile: &'profile ApplicationProfile,
    variable: Variable,
    ty: &'profile Type,
}

impl<'profile> TypeFilter<'profile> {
    /// Creates a filter for the instances of a top-level type, bound to `?resource`.
    pub fn for_type(profile: &'profile ApplicationProfile, ty: &'profile Type) -> Self {
        Self::new(profile, Variable::new_unchecked(DEFAULT_RESOURCE_VARIABLE), ty)
    }

    /// Like [`Self::for_type`] but takes the variable name from `config`.
    pub fn for_type_with_config(
        profile: &'profile ApplicationProfile,
        ty: &'profile Type,
        config: &SparqlConfig,
    ) -> crate::Result<Self> {
        let variable = Variable::new(config.resource_variable.as_str()).map_err(|error| {
            SparqlCompileError::InvalidVariable {
                name: config.resource_variable.clone(),
                error,
            }
        })?;
        Ok(Self::new(profile, variable, ty))
    }

    /// Creates a filter for the embedded type an attribute points to, bound to `?<attributeId>`.
    pub fn for_embedded_attribute(
        profile: &'profile ApplicationProfile,
        attribute: &Attribute,
    ) -> crate::Result<Self> {
        let ty = embedded_type_for(profile, attribute)
            .ok_or_else(|| SparqlCompileError::NotEmbedded(attribute.attribute_id().clone()))?;
        Ok(Self::new(profile, attribute_variable(attribute), ty))
    }

    pub(crate) fn new(
        profile: &'profile ApplicationProfile,
        variable: Variable,
        ty: &'profile Type,
    ) -> Self {
        Self {
            profile,
            variable,
            ty,
        }
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn bound_type(&self) -> &'profile Type {
        self.ty
    }

    /// Compiles the rules of the bound type.
    pub fn get(&self) -> crate::Result<String> {
        let result = self.compile_conjunction(self.ty.rules().iter())?;
        tracing::debug!(
            type_id = %self.ty.class_id(),
            variable = %self.variable,
            "Compiled type filter"
        );
        Ok(result)
    }

    fn compile_conjunction<'rule>(
        &self,
        rules: impl Iterator<Item = &'rule Rule>,
    ) -> crate::Result<String> {
        let parts = rules
            .map(|rule| self.compile(rule))
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(parts.join(". "))
    }

    fn compile(&self, rule: &Rule) -> crate::Result<String> {
        tracing::trace!(kind = %rule.kind(), variable = %self.variable, "Lowering rule");
        let variable = &self.variable;
        match rule {
            Rule::RdfType(iri) => Ok(format!("{variable} a {iri}")),
            Rule::ResourceReference(iri) => Ok(format!("FILTER ({variable} = {iri})")),
            Rule::InScheme(iri) => Ok(format!("{variable} {} {iri}", skos::IN_SCHEME)),
            Rule::And(children) => Ok(block(&self.compile_conjunction(children.iter())?)),
            Rule::SubClassOf(super_classes) => {
                let blocks = super_classes
                    .iter()
                    .map(|id| -> crate::Result<String> {
                        let super_class = self
                            .profile
                            .type_by_id(id)
                            .ok_or_else(|| SparqlCompileError::UnknownType(id.clone()))?;
                        let inherited = super_class
                            .rules()
                            .iter()
                            .filter(|rule| !matches!(rule, Rule::RdfType(_)));
                        Ok(block(&self.compile_conjunction(inherited)?))
                    })
                    .collect::<crate::Result<Vec<_>>>()?;
                Ok(blocks.join(". "))
            }
            Rule::ClassId(_)
            | Rule::EmbeddedClassId(_)
            | Rule::Datatype(_)
            | Rule::LiteralValue
            | Rule::LanguageIn(_)
            | Rule::MinCardinality(_)
            | Rule::MaxCardinality(_)
            | Rule::MinLangCardinality(_)
            | Rule::MaxLangCardinality(_)
            | Rule::Snippet(_)
            | Rule::Or(_)
            | Rule::Not(_)
            | Rule::Range(_) => SparqlCompileError::unsupported(COMPILER, rule.kind()),
        }
    }
}

/// Returns the embedded type of an attribute whose range is `EmbeddedClassId`, or `None`.
pub fn embedded_type_for<'profile>(
    profile: &'profile ApplicationProfile,
    attribute: &Attribute,
) -> Option<&'profile Type> {
    match attribute.range()? {
        Rule::EmbeddedClassId(id) => profile.type_by_id(id),
        _ => None,
    }
}

pub(crate) fn attribute_variable(attribute: &Attribute) -> Variable {
    // Attribute ids are validated as variable names when the profile is built.
    Variable::new_unchecked(attribute.attribute_id().as_str())
}

fn block(body: &str) -> String {
    format!("{{ {body} }}")
}
