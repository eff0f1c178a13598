//! Compilation of attribute value changes into SPARQL updates.
//!
//! A delta is filled during an edit and compiled afterwards. It is not meant to be shared: the
//! edit session owning it is the only one mutating it.

mod merging;
mod typed_resource;

pub use merging::MergingDelta;
pub use typed_resource::TypedResourceDelta;

use crate::error::SparqlCompileError;
use crate::literal::serialize_triple;
use crate::SparqlConfig;
use rdf_profile_model::{Graph, NamedNode, Triple};

/// A set of statements to remove from and to add to the store.
pub trait Delta {
    fn add_statements(&self) -> Vec<Triple>;

    fn remove_statements(&self) -> Vec<Triple>;

    fn has_changes(&self) -> bool {
        !self.add_statements().is_empty() || !self.remove_statements().is_empty()
    }

    /// Writes the delta as a SPARQL update into the default graph.
    ///
    /// The update consists of a `DELETE DATA` and an `INSERT DATA` operation, in this order. An
    /// operation without statements is omitted. A delta without changes yields an empty string.
    fn sparql(&self) -> crate::Result<String> {
        write_update(&self.remove_statements(), &self.add_statements(), None)
    }

    /// Like [`Delta::sparql`] but targets the graph configured in `config`, if any.
    fn sparql_with_config(&self, config: &SparqlConfig) -> crate::Result<String> {
        write_update(
            &self.remove_statements(),
            &self.add_statements(),
            config.graph.as_ref(),
        )
    }

    /// Builds a graph containing the added statements.
    ///
    /// A graph is additive only. Therefore, this fails if the delta removes any statement.
    fn model(&self) -> crate::Result<Graph> {
        let removed = self.remove_statements().len();
        if removed > 0 {
            tracing::warn!(removed, "Cannot represent removed statements in a graph");
            return Err(SparqlCompileError::DeletionInModel { count: removed });
        }

        let mut graph = Graph::new();
        for triple in &self.add_statements() {
            graph.insert(triple);
        }
        Ok(graph)
    }
}

fn write_update(
    remove: &[Triple],
    add: &[Triple],
    graph: Option<&NamedNode>,
) -> crate::Result<String> {
    let mut operations = Vec::with_capacity(2);
    if !remove.is_empty() {
        operations.push(write_operation("DELETE DATA", remove, graph)?);
    }
    if !add.is_empty() {
        operations.push(write_operation("INSERT DATA", add, graph)?);
    }

    tracing::debug!(
        removed = remove.len(),
        added = add.len(),
        "Compiled delta into SPARQL update"
    );
    Ok(operations.join(";\n"))
}

fn write_operation(
    operation: &str,
    statements: &[Triple],
    graph: Option<&NamedNode>,
) -> crate::Result<String> {
    let indent = if graph.is_some() { "    " } else { "  " };
    let mut body = String::new();
    for statement in statements {
        body.push_str(indent);
        body.push_str(&serialize_triple(statement.as_ref())?);
        body.push('\n');
    }

    Ok(match graph {
        Some(graph) => format!("{operation} {{\n  GRAPH {graph} {{\n{body}  }}\n}}"),
        None => format!("{operation} {{\n{body}}}"),
    })
}
