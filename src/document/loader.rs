use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use roxmltree::Node;
use tracing::{debug, info};

use super::types::{Alias, Child, ChildKind, Document, Element, Instance};
use crate::error::{FactoryDotError, MalformedElementError, XmlParseError};

/// Reads factory XML files into [`Document`]s
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load every source and merge them into the first one
    pub fn load_all(paths: &[PathBuf]) -> Result<Document, FactoryDotError> {
        let mut merged: Option<Document> = None;

        for path in paths {
            let document = Self::load_file(path)?;

            match merged.as_mut() {
                None => merged = Some(document),
                Some(root) => {
                    debug!("merging '{}' into the first document", path.display());
                    root.merge(document);
                }
            }
        }

        merged.ok_or_else(|| FactoryDotError::ConfigurationError {
            message: "At least one factory source is required".to_string(),
        })
    }

    pub fn load_file(path: &Path) -> Result<Document, FactoryDotError> {
        info!("loading factory file '{}'", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|source| FactoryDotError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, origin: &str) -> Result<Document, FactoryDotError> {
        let xml = roxmltree::Document::parse(content).map_err(|e| {
            let pos = e.pos();
            let span = Some(SourceSpan::new(
                offset_of(content, pos.row, pos.col).into(),
                0,
            ));

            FactoryDotError::XmlParseError(Box::new(XmlParseError {
                file: origin.to_string(),
                source_code: NamedSource::new(origin, content.to_string()),
                span,
                source: e,
            }))
        })?;

        let parser = ElementParser { content, origin };
        let mut elements = Vec::new();
        parser.collect(xml.root_element(), &mut elements)?;

        debug!("'{}' declares {} elements", origin, elements.len());
        Ok(Document::new(origin, elements))
    }
}

struct ElementParser<'s> {
    content: &'s str,
    origin: &'s str,
}

impl ElementParser<'_> {
    fn collect(&self, parent: Node, elements: &mut Vec<Element>) -> Result<(), FactoryDotError> {
        for node in parent.children().filter(Node::is_element) {
            match node.tag_name().name() {
                "instance" => elements.push(Element::Instance(self.instance(node)?)),
                "alias" => elements.push(Element::Alias(self.alias(node)?)),
                _ => self.collect(node, elements)?,
            }
        }

        Ok(())
    }

    fn instance(&self, node: Node) -> Result<Instance, FactoryDotError> {
        let mut children = Vec::new();

        for child in node.children().filter(Node::is_element) {
            let tag = child.tag_name().name();
            let Some(kind) = ChildKind::from_tag(tag) else {
                debug!("ignoring <{}> inside an instance", tag);
                continue;
            };

            children.push(Child {
                kind,
                name: self.required(child, "name")?,
                reference: child.attribute("ref").map(str::to_string),
            });
        }

        Ok(Instance {
            name: self.required(node, "name")?,
            class: self.required(node, "class")?,
            early: node.attribute("init") == Some("early"),
            children,
        })
    }

    fn alias(&self, node: Node) -> Result<Alias, FactoryDotError> {
        Ok(Alias {
            name: self.required(node, "name")?,
            reference: self.required(node, "ref")?,
        })
    }

    fn required(&self, node: Node, attribute: &str) -> Result<String, FactoryDotError> {
        node.attribute(attribute)
            .map(str::to_string)
            .ok_or_else(|| {
                let range = node.range();
                FactoryDotError::MalformedElement(Box::new(MalformedElementError {
                    element: node.tag_name().name().to_string(),
                    attribute: attribute.to_string(),
                    file: self.origin.to_string(),
                    source_code: NamedSource::new(self.origin, self.content.to_string()),
                    span: Some(SourceSpan::new(range.start.into(), range.len())),
                }))
            })
    }
}

/// Byte offset of a 1-based row/column position
fn offset_of(content: &str, row: u32, col: u32) -> usize {
    let mut offset = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        if index + 1 == row as usize {
            let within: usize = line
                .chars()
                .take(col.saturating_sub(1) as usize)
                .map(char::len_utf8)
                .sum();
            return offset + within;
        }
        offset += line.len();
    }

    content.len()
}
