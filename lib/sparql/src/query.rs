use crate::error::SparqlCompileError;
use crate::type_filter::attribute_variable;
use crate::{AttributeFilter, SparqlConfig, TypeFilter};
use itertools::Itertools;
use rdf_profile_model::{ApplicationProfile, NamedNode, Type, Variable};

/// Assembles a `CONSTRUCT` query retrieving the instances of a [`Type`] with their attributes.
///
/// The membership of an instance is defined by the [`TypeFilter`]. Every attribute is retrieved
/// in its own `OPTIONAL` block in which the fragments of the [`AttributeFilter`] are combined
/// with `UNION`.
#[derive(Clone, Debug)]
pub struct InstanceQuery<'profile> {
    profile: &'profile ApplicationProfile,
    ty: &'profile Type,
    config: SparqlConfig,
    resource: Option<NamedNode>,
}

impl<'profile> InstanceQuery<'profile> {
    pub fn for_type(profile: &'profile ApplicationProfile, ty: &'profile Type) -> Self {
        Self::with_config(profile, ty, SparqlConfig::default())
    }

    pub fn with_config(
        profile: &'profile ApplicationProfile,
        ty: &'profile Type,
        config: SparqlConfig,
    ) -> Self {
        Self {
            profile,
            ty,
            config,
            resource: None,
        }
    }

    /// Restricts the query to a single resource.
    #[must_use]
    pub fn for_resource(self, resource: NamedNode) -> Self {
        Self {
            resource: Some(resource),
            ..self
        }
    }

    pub fn build(&self) -> crate::Result<String> {
        let type_filter = TypeFilter::for_type_with_config(self.profile, self.ty, &self.config)?;
        let resource = type_filter.variable().clone();
        let resource_type = self.type_variable(&resource)?;
        let attribute_filter = AttributeFilter::with_config(self.profile, self.config.clone());

        let mut template = vec![format!("{resource} a {resource_type}")];
        let mut pattern = Vec::new();

        let membership = type_filter.get()?;
        if !membership.is_empty() {
            pattern.push(membership);
        }
        if let Some(iri) = &self.resource {
            pattern.push(format!("FILTER ({resource} = {iri})"));
        }
        pattern.push(format!("OPTIONAL {{ {resource} a {resource_type} }}"));

        for attribute in self.ty.attributes() {
            let variable = attribute_variable(attribute);
            if variable == resource || variable == resource_type {
                return Err(SparqlCompileError::VariableCollision {
                    attribute: attribute.attribute_id().clone(),
                    variable,
                });
            }
            let edge = format!("{resource} {} {variable}", attribute.uri());
            let fragments = attribute_filter.apply(attribute)?;

            template.push(edge.clone());
            template.extend(
                fragments
                    .iter()
                    .flat_map(|fragment| fragment.construct().split(" .\n"))
                    .filter(|line| !line.is_empty())
                    .map(str::to_owned),
            );

            let mut optional = format!("OPTIONAL {{\n    {edge} .");
            if !fragments.is_empty() {
                let alternatives = fragments
                    .iter()
                    .map(|fragment| match fragment.filter() {
                        "" => "{ }".to_owned(),
                        filter => format!("{{ {} }}", filter.replace('\n', "\n    ")),
                    })
                    .join(" UNION ");
                optional.push_str("\n    ");
                optional.push_str(&alternatives);
            }
            optional.push_str("\n  }");
            pattern.push(optional);
        }

        let query = format!(
            "CONSTRUCT {{\n  {} .\n}}\nWHERE {{\n  {}\n}}",
            template.join(" .\n  "),
            pattern.join(" .\n  ")
        );
        tracing::debug!(
            type_id = %self.ty.class_id(),
            attributes = self.ty.attributes().count(),
            "Assembled instance query"
        );
        Ok(query)
    }

    fn type_variable(&self, variable: &Variable) -> crate::Result<Variable> {
        let name = format!("{}{}", variable.as_str(), self.config.type_variable_suffix);
        Variable::new(name.as_str())
            .map_err(|error| SparqlCompileError::InvalidVariable { name, error })
    }
}
