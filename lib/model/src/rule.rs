use crate::{NamedNode, TypeId};
use std::fmt::{Display, Formatter};
use std::slice;

/// A node in the constraint tree of a [`Type`](crate::Type) or an [`Attribute`](crate::Attribute).
///
/// Rules are immutable once the profile is built. Every compiler dispatches over this enum with
/// an exhaustive `match`, hence adding a variant is a compile error wherever it is not handled.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Rule {
    /// The resource has the given `rdf:type`.
    RdfType(NamedNode),
    /// The value is an instance of the referenced type, stored as a standalone resource.
    ClassId(TypeId),
    /// The value is an instance of the referenced type, embedded in the owning resource.
    EmbeddedClassId(TypeId),
    /// The value is a literal of the given datatype.
    Datatype(NamedNode),
    /// The value is a concept of the given SKOS concept scheme.
    InScheme(NamedNode),
    /// The resource is exactly the given IRI.
    ResourceReference(NamedNode),
    /// The type inherits the (non `rdf:type`) rules of the given types.
    SubClassOf(Vec<TypeId>),
    /// The value is a literal.
    LiteralValue,
    /// The value is a literal tagged with one of the given languages.
    LanguageIn(Vec<String>),
    MinCardinality(usize),
    MaxCardinality(usize),
    MinLangCardinality(usize),
    MaxLangCardinality(usize),
    /// A raw SPARQL template. Reserved, none of the compilers support it.
    Snippet(String),
    And(Vec<Rule>),
    Or(Vec<Rule>),
    Not(Box<Rule>),
    /// The shape of the values of an attribute.
    Range(Box<Rule>),
}

impl Rule {
    pub fn and(children: impl IntoIterator<Item = Rule>) -> Self {
        Rule::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Rule>) -> Self {
        Rule::Or(children.into_iter().collect())
    }

    pub fn not(inner: Rule) -> Self {
        Rule::Not(Box::new(inner))
    }

    pub fn range(inner: Rule) -> Self {
        Rule::Range(Box::new(inner))
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::RdfType(_) => RuleKind::RdfType,
            Rule::ClassId(_) => RuleKind::ClassId,
            Rule::EmbeddedClassId(_) => RuleKind::EmbeddedClassId,
            Rule::Datatype(_) => RuleKind::Datatype,
            Rule::InScheme(_) => RuleKind::InScheme,
            Rule::ResourceReference(_) => RuleKind::ResourceReference,
            Rule::SubClassOf(_) => RuleKind::SubClassOf,
            Rule::LiteralValue => RuleKind::LiteralValue,
            Rule::LanguageIn(_) => RuleKind::LanguageIn,
            Rule::MinCardinality(_) => RuleKind::MinCardinality,
            Rule::MaxCardinality(_) => RuleKind::MaxCardinality,
            Rule::MinLangCardinality(_) => RuleKind::MinLangCardinality,
            Rule::MaxLangCardinality(_) => RuleKind::MaxLangCardinality,
            Rule::Snippet(_) => RuleKind::Snippet,
            Rule::And(_) => RuleKind::And,
            Rule::Or(_) => RuleKind::Or,
            Rule::Not(_) => RuleKind::Not,
            Rule::Range(_) => RuleKind::Range,
        }
    }

    /// Returns the direct children of combinators and wrappers. Leaves have none.
    pub fn children(&self) -> &[Rule] {
        match self {
            Rule::And(children) | Rule::Or(children) => children,
            Rule::Not(inner) | Rule::Range(inner) => slice::from_ref(inner.as_ref()),
            Rule::RdfType(_)
            | Rule::ClassId(_)
            | Rule::EmbeddedClassId(_)
            | Rule::Datatype(_)
            | Rule::InScheme(_)
            | Rule::ResourceReference(_)
            | Rule::SubClassOf(_)
            | Rule::LiteralValue
            | Rule::LanguageIn(_)
            | Rule::MinCardinality(_)
            | Rule::MaxCardinality(_)
            | Rule::MinLangCardinality(_)
            | Rule::MaxLangCardinality(_)
            | Rule::Snippet(_) => &[],
        }
    }

    /// Calls `visitor` for this rule and, depth-first, for all of its descendants.
    pub fn visit<'rule>(&'rule self, visitor: &mut impl FnMut(&'rule Rule)) {
        visitor(self);
        for child in self.children() {
            child.visit(visitor);
        }
    }

    /// Returns the ids of all types this rule refers to, including nested references.
    pub fn referenced_types(&self) -> Vec<&TypeId> {
        let mut result = Vec::new();
        self.visit(&mut |rule| match rule {
            Rule::ClassId(id) | Rule::EmbeddedClassId(id) => result.push(id),
            Rule::SubClassOf(ids) => result.extend(ids),
            _ => {}
        });
        result
    }
}

/// The kind of a [`Rule`] without its payload. Used for diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum RuleKind {
    RdfType,
    ClassId,
    EmbeddedClassId,
    Datatype,
    InScheme,
    ResourceReference,
    SubClassOf,
    LiteralValue,
    LanguageIn,
    MinCardinality,
    MaxCardinality,
    MinLangCardinality,
    MaxLangCardinality,
    Snippet,
    And,
    Or,
    Not,
    Range,
}

impl RuleKind {
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::RdfType => "RdfType",
            RuleKind::ClassId => "ClassId",
            RuleKind::EmbeddedClassId => "EmbeddedClassId",
            RuleKind::Datatype => "Datatype",
            RuleKind::InScheme => "InScheme",
            RuleKind::ResourceReference => "ResourceReference",
            RuleKind::SubClassOf => "SubClassOf",
            RuleKind::LiteralValue => "LiteralValue",
            RuleKind::LanguageIn => "LanguageIn",
            RuleKind::MinCardinality => "MinCardinality",
            RuleKind::MaxCardinality => "MaxCardinality",
            RuleKind::MinLangCardinality => "MinLangCardinality",
            RuleKind::MaxLangCardinality => "MaxLangCardinality",
            RuleKind::Snippet => "Snippet",
            RuleKind::And => "And",
            RuleKind::Or => "Or",
            RuleKind::Not => "Not",
            RuleKind::Range => "Range",
        }
    }
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
