//! Vocabularies used by the compilers.

pub use oxrdf::vocab::{rdf, xsd};

pub mod skos {
    //! [SKOS](https://www.w3.org/2004/02/skos/core) vocabulary.
    use oxrdf::NamedNodeRef;

    pub const CONCEPT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#Concept");
    pub const CONCEPT_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#ConceptScheme");
    pub const IN_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#inScheme");
}
