use std::collections::HashMap;

use indexmap::IndexSet;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, info, warn};

use super::types::{InstanceNode, Port, WiringEdge};
use crate::document::{Document, Instance};
use crate::error::FactoryDotError;
use crate::groups::Groups;
use crate::interpolation::Interpolator;
use crate::liveness::LivenessAnalyzer;
use crate::resolver::AliasResolver;

/// Builds the wiring graph of a factory document in two passes: node
/// definitions first (collecting the instances skipped as unused), then the
/// edges of every kept instance.
pub struct FactoryGraphBuilder<'a> {
    document: &'a Document,
    interpolator: &'a Interpolator,
    groups: &'a Groups,
    show_all: bool,
    graph: DiGraph<InstanceNode, WiringEdge>,
    nodes: HashMap<String, NodeIndex>,
    skipped: IndexSet<String>,
}

impl<'a> FactoryGraphBuilder<'a> {
    pub fn new(
        document: &'a Document,
        interpolator: &'a Interpolator,
        groups: &'a Groups,
        show_all: bool,
    ) -> Self {
        Self {
            document,
            interpolator,
            groups,
            show_all,
            graph: DiGraph::new(),
            nodes: HashMap::new(),
            skipped: IndexSet::new(),
        }
    }

    pub fn build(&mut self) -> Result<(), FactoryDotError> {
        self.add_definitions();
        self.add_dependencies()
    }

    pub fn graph(&self) -> &DiGraph<InstanceNode, WiringEdge> {
        &self.graph
    }

    /// Interpolated names of the instances left out as unused
    pub fn skipped(&self) -> &IndexSet<String> {
        &self.skipped
    }

    fn add_definitions(&mut self) {
        info!("generating graph node definitions");

        let document = self.document;
        let liveness = LivenessAnalyzer::new(document, self.interpolator, self.show_all);

        for instance in document.instances() {
            let name = self.interpolator.interpolate(&instance.name);

            if liveness.is_unused(instance) {
                warn!("skipping unused '{}'", instance.name);
                self.skipped.insert(name);
                continue;
            }

            let node = InstanceNode {
                ports: self.ports(instance),
                style: self.groups.style_for(&instance.class),
                class: instance.class.clone(),
                name: name.clone(),
            };

            let index = self.graph.add_node(node);
            self.nodes.entry(name).or_insert(index);
        }
    }

    fn ports(&self, instance: &Instance) -> Vec<Port> {
        instance
            .children
            .iter()
            .enumerate()
            .map(|(offset, child)| {
                let child_name = self.interpolator.interpolate(&child.name);
                Port::new(&child_name, offset, child.is_dependency())
            })
            .collect()
    }

    fn add_dependencies(&mut self) -> Result<(), FactoryDotError> {
        info!("generating graph node dependencies");

        let document = self.document;
        let resolver = AliasResolver::new(document, self.interpolator);

        for instance in document.instances() {
            let name = self.interpolator.interpolate(&instance.name);

            if self.skipped.contains(&name) {
                continue;
            }

            let source = self.node_index(&name)?;

            for (offset, child) in instance.children.iter().enumerate() {
                let Some(reference) = child.reference.as_deref() else {
                    continue;
                };

                let target = resolver.resolve(reference, &name)?;
                let target_index = self.node_index(&target)?;
                let port = Port::new(&self.interpolator.interpolate(&child.name), offset, true);

                debug!("edge '{}':{} -> '{}'", name, port.id, target);
                self.graph
                    .add_edge(source, target_index, WiringEdge { port: port.id });
            }
        }

        Ok(())
    }

    fn node_index(&self, name: &str) -> Result<NodeIndex, FactoryDotError> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| FactoryDotError::GraphError {
                message: format!("No node was emitted for instance '{name}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use petgraph::visit::EdgeRef;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::interpolation::MAX_DEPTH;
    use crate::document::DocumentLoader;
    use crate::store::ConfigStore;

    /// (node names, edges as "source:port -> target", skipped names)
    type BuildSummary = (Vec<String>, Vec<String>, Vec<String>);

    fn build(xml: &str, show_all: bool) -> Result<BuildSummary, FactoryDotError> {
        let document = DocumentLoader::parse(xml, "factory.xml")?;
        let interpolator = Interpolator::new(&ConfigStore::new(), MAX_DEPTH)?;
        let groups = Groups::default();
        let mut builder = FactoryGraphBuilder::new(&document, &interpolator, &groups, show_all);
        builder.build()?;

        let graph = builder.graph();
        let nodes = graph
            .node_indices()
            .map(|index| graph[index].name.clone())
            .collect();
        let edges = graph
            .edge_references()
            .map(|edge| {
                format!(
                    "{}:{} -> {}",
                    graph[edge.source()].name,
                    edge.weight().port,
                    graph[edge.target()].name
                )
            })
            .collect();
        let skipped = builder.skipped().iter().cloned().collect();

        Ok((nodes, edges, skipped))
    }

    #[test]
    fn test_alias_resolved_edge() {
        let (nodes, edges, skipped) = build(
            r#"<system><factory>
                <instance name="A" class="ns::Foo"><set name="dep" ref="B"/></instance>
                <alias name="B" ref="C"/>
                <instance name="C" class="ns::Bar"/>
            </factory></system>"#,
            false,
        )
        .unwrap();

        assert_eq!(nodes, vec!["A", "C"]);
        assert_eq!(edges, vec!["A:dep0 -> C"]);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_offsets_count_property_children() {
        let (_, edges, _) = build(
            r#"<system><factory>
                <instance name="A" class="A">
                  <set name="port" number="1"/>
                  <add name="item" ref="B"/>
                  <add name="item" ref="C"/>
                </instance>
                <instance name="B" class="B"/>
                <instance name="C" class="C"/>
            </factory></system>"#,
            false,
        )
        .unwrap();

        assert_eq!(edges, vec!["A:item1 -> B", "A:item2 -> C"]);
    }

    #[test]
    fn test_unused_instances_are_skipped() {
        let xml = r#"<system><factory>
                <instance name="lonely" class="L"/>
                <instance name="main" class="M" init="early"/>
            </factory></system>"#;

        let (nodes, edges, skipped) = build(xml, false).unwrap();
        assert_eq!(nodes, vec!["main"]);
        assert!(edges.is_empty());
        assert_eq!(skipped, vec!["lonely"]);

        let (nodes, _, skipped) = build(xml, true).unwrap();
        assert_eq!(nodes, vec!["lonely", "main"]);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_edges_never_touch_skipped_nodes() {
        let (nodes, edges, skipped) = build(
            r#"<system><factory>
                <instance name="a" class="A"><add name="x" ref="b"/></instance>
                <instance name="b" class="B"/>
                <instance name="c" class="C"/>
            </factory></system>"#,
            false,
        )
        .unwrap();

        assert_eq!(nodes, vec!["a", "b"]);
        assert_eq!(skipped, vec!["c"]);
        for edge in &edges {
            assert!(!edge.contains(" -> c"));
            assert!(!edge.starts_with("c:"));
        }
    }

    #[test]
    fn test_cycle_aborts_build() {
        let err = build(
            r#"<system><factory>
                <instance name="a" class="A"><add name="x" ref="b"/></instance>
                <alias name="b" ref="c"/>
                <alias name="c" ref="b"/>
            </factory></system>"#,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, FactoryDotError::AliasCycle { .. }));
    }

    #[test]
    fn test_unresolved_reference_aborts_build() {
        let err = build(
            r#"<system><factory>
                <instance name="a" class="A"><add name="x" ref="ghost"/></instance>
            </factory></system>"#,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, FactoryDotError::UnresolvedReference { .. }));
    }
}
