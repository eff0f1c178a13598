use crate::delta::Delta;
use rdf_profile_model::Triple;

/// Combines several deltas into one, for example, to save multiple resources in one update.
///
/// Statements are concatenated in the order of the deltas. Duplicates are kept, the store
/// collapses them as RDF graphs are sets.
#[derive(Default)]
pub struct MergingDelta<'delta> {
    deltas: Vec<&'delta dyn Delta>,
}

impl<'delta> MergingDelta<'delta> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, delta: &'delta dyn Delta) -> Self {
        self.push(delta);
        self
    }

    pub fn push(&mut self, delta: &'delta dyn Delta) {
        self.deltas.push(delta);
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

impl<'delta> FromIterator<&'delta dyn Delta> for MergingDelta<'delta> {
    fn from_iter<T: IntoIterator<Item = &'delta dyn Delta>>(iter: T) -> Self {
        Self {
            deltas: iter.into_iter().collect(),
        }
    }
}

impl Delta for MergingDelta<'_> {
    fn add_statements(&self) -> Vec<Triple> {
        self.deltas
            .iter()
            .flat_map(|delta| delta.add_statements())
            .collect()
    }

    fn remove_statements(&self) -> Vec<Triple> {
        self.deltas
            .iter()
            .flat_map(|delta| delta.remove_statements())
            .collect()
    }
}
