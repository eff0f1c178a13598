#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod model {
    pub use rdf_profile_model::*;
}

pub mod sparql {
    pub use rdf_profile_sparql::*;
}
