use rdf_profile_model::NamedNode;

/// The variable bound to the instances of a top-level type unless configured otherwise.
pub const DEFAULT_RESOURCE_VARIABLE: &str = "resource";
pub const DEFAULT_TYPE_VARIABLE_SUFFIX: &str = "Type";

/// Holds the configuration of the SPARQL compilers.
#[derive(Clone, Debug)]
pub struct SparqlConfig {
    /// The variable bound to the instances of a top-level type, without the leading `?`.
    pub resource_variable: String,
    /// Appended to a variable name to obtain the variable holding its `rdf:type`.
    pub type_variable_suffix: String,
    /// When set, updates are written into this named graph instead of the default graph.
    pub graph: Option<NamedNode>,
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            resource_variable: DEFAULT_RESOURCE_VARIABLE.to_owned(),
            type_variable_suffix: DEFAULT_TYPE_VARIABLE_SUFFIX.to_owned(),
            graph: None,
        }
    }
}
