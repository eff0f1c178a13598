use std::fmt::{Display, Formatter};

macro_rules! implement_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

implement_id!(
    /// Identifies a [`Type`](crate::Type) within an [`ApplicationProfile`](crate::ApplicationProfile).
    TypeId
);
implement_id!(
    /// Identifies an [`Attribute`](crate::Attribute) within its owning [`Type`](crate::Type).
    ///
    /// The id doubles as the SPARQL variable name bound to the attribute's values.
    AttributeId
);
