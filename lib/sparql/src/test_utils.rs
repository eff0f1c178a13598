use rdf_profile_model::{ApplicationProfile, NamedNode, Type, TypeId};

pub fn iri(local_name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.org/{local_name}"))
}

pub fn type_of<'profile>(profile: &'profile ApplicationProfile, id: &str) -> &'profile Type {
    profile.type_by_id(&TypeId::new(id)).unwrap()
}
