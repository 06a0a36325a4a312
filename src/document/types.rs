//! Factory document types
//!
//! Names, classes and references are stored raw, exactly as written in the
//! XML. Interpolation happens when they are read during analysis.

/// Tag of an instance child entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Add,
    Set,
}

impl ChildKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "add" => Some(ChildKind::Add),
            "set" => Some(ChildKind::Set),
            _ => None,
        }
    }
}

/// An `add` or `set` entry of an instance. With a reference it is a
/// dependency, without one an inert property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub kind: ChildKind,
    pub name: String,
    pub reference: Option<String>,
}

impl Child {
    pub fn is_dependency(&self) -> bool {
        self.reference.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    pub class: String,
    pub early: bool,
    pub children: Vec<Child>,
}

impl Instance {
    pub fn has_dependencies(&self) -> bool {
        self.children.iter().any(Child::is_dependency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Instance(Instance),
    Alias(Alias),
}

/// All factory elements of every loaded source, in document order
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    sources: Vec<String>,
}

impl Document {
    pub fn new(source: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            elements,
            sources: vec![source.into()],
        }
    }

    /// Append every element of `other` after the existing ones
    pub fn merge(&mut self, other: Document) {
        self.elements.extend(other.elements);
        self.sources.extend(other.sources);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.elements.iter().filter_map(|element| match element {
            Element::Instance(instance) => Some(instance),
            Element::Alias(_) => None,
        })
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.elements.iter().filter_map(|element| match element {
            Element::Alias(alias) => Some(alias),
            Element::Instance(_) => None,
        })
    }

    /// Every raw `ref` value in document order, from aliases and instance
    /// children alike
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().flat_map(|element| {
            let (own, children): (Option<&str>, &[Child]) = match element {
                Element::Alias(alias) => (Some(alias.reference.as_str()), &[]),
                Element::Instance(instance) => (None, instance.children.as_slice()),
            };

            own.into_iter().chain(
                children
                    .iter()
                    .filter_map(|child| child.reference.as_deref()),
            )
        })
    }
}
