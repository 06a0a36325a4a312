use std::io::Write;

use miette::Result;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use crate::constants::graph::{NAME, TOP_ANCHOR};
use crate::error::FactoryDotError;
use crate::graph::{InstanceNode, WiringEdge};
use crate::groups::NodeStyle;

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(FactoryDotError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(FactoryDotError::from)
    };
}

macro_rules! write_out {
    ($dst:expr, $($arg:tt)*) => {
        write!($dst, $($arg)*).map_err(FactoryDotError::from)
    };
}

/// Escape text for a double-quoted DOT string
fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Port reference of an edge endpoint, quoted unless it is a plain ID
fn port_ref(id: &str) -> String {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        id.to_string()
    } else {
        format!("\"{}\"", escape_quoted(id))
    }
}

/// Escape text for a record label field, where `|{}<>` delimit fields and
/// ports
fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '|' | '{' | '}' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Writes the wiring graph as Graphviz DOT with one record-shaped node per
/// instance and one port per child entry
#[derive(Debug, Default)]
pub struct GraphRenderer;

impl GraphRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_dot(
        &self,
        graph: &DiGraph<InstanceNode, WiringEdge>,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph {} {{", NAME)?;
        writeln_out!(output, r#"  graph [rankdir="LR"];"#)?;

        for index in graph.node_indices() {
            self.render_node(&graph[index], output)?;
        }

        for edge in graph.edge_references() {
            writeln_out!(
                output,
                r#"  "{}":{} -> "{}":{};"#,
                escape_quoted(&graph[edge.source()].name),
                port_ref(&edge.weight().port),
                escape_quoted(&graph[edge.target()].name),
                TOP_ANCHOR
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    fn render_node(&self, node: &InstanceNode, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, r#"  "{}" ["#, escape_quoted(&node.name))?;
        write_out!(
            output,
            r#"    label="<{}> {}\nclass {}"#,
            TOP_ANCHOR,
            escape_record(&node.name),
            escape_record(node.short_class())
        )?;

        for port in &node.ports {
            write_out!(
                output,
                " | <{}> {}",
                escape_record(&port.id),
                escape_record(&port.label)
            )?;
        }

        writeln_out!(output, "\"")?;
        writeln_out!(output, r#"    shape="record""#)?;
        self.render_style(&node.style, output)?;
        writeln_out!(output, "  ];")?;
        Ok(())
    }

    fn render_style(&self, style: &NodeStyle, output: &mut dyn Write) -> Result<()> {
        if let Some(color) = &style.color {
            writeln_out!(output, r#"    color="{}""#, color)?;
        }
        if let Some(fillcolor) = &style.fillcolor {
            writeln_out!(output, r#"    style="filled" fillcolor="{}""#, fillcolor)?;
        }
        if let Some(fontcolor) = &style.fontcolor {
            writeln_out!(output, r#"    fontcolor="{}""#, fontcolor)?;
        }
        Ok(())
    }
}
