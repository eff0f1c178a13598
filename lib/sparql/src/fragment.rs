use std::fmt::{Display, Formatter};

/// A pair of SPARQL texts retrieving the values of an attribute.
///
/// `construct` is a sequence of triple patterns usable in a `CONSTRUCT` template. `filter` is the
/// body of a group graph pattern that selects the values.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct SparqlFragment {
    construct: String,
    filter: String,
}

impl SparqlFragment {
    pub fn new(construct: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            construct: construct.into(),
            filter: filter.into(),
        }
    }

    pub fn construct(&self) -> &str {
        &self.construct
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl Display for SparqlFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CONSTRUCT:")?;
        writeln!(f, "{}", self.construct)?;
        writeln!(f, "FILTER:")?;
        write!(f, "{}", self.filter)
    }
}
