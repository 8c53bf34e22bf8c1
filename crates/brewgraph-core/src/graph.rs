//! Node/edge records and the multigraph they live in.
//!
//! Storage is two ordered maps:
//!
//! - node id → [`Node`]
//! - `(source, target, relationship)` → [`Edge`]
//!
//! Mutation goes through [`GraphBuilder`] only. [`GraphBuilder::finish`] hands
//! out a [`KnowledgeGraph`], which has no mutating methods.

use crate::value::{Attributes, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Roaster,
    BeanLot,
    RoastBatch,
    Grinder,
    Brewer,
    BrewSession,
    SensoryEvaluation,
    FlavorNote,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Roaster,
        NodeKind::BeanLot,
        NodeKind::RoastBatch,
        NodeKind::Grinder,
        NodeKind::Brewer,
        NodeKind::BrewSession,
        NodeKind::SensoryEvaluation,
        NodeKind::FlavorNote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Roaster => "Roaster",
            NodeKind::BeanLot => "BeanLot",
            NodeKind::RoastBatch => "RoastBatch",
            NodeKind::Grinder => "Grinder",
            NodeKind::Brewer => "Brewer",
            NodeKind::BrewSession => "BrewSession",
            NodeKind::SensoryEvaluation => "SensoryEvaluation",
            NodeKind::FlavorNote => "FlavorNote",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relationship: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            target: self.target.clone(),
            relationship: self.relationship.clone(),
        }
    }
}

/// Mutable graph under construction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the node if absent, otherwise merge `attributes` into it.
    ///
    /// Merge rule: an incoming empty value is ignored; an incoming non-empty
    /// value is stored only when the key is missing or currently empty. Label
    /// and kind are fixed by the first call.
    pub fn ensure_node<I, K>(&mut self, id: &str, label: &str, kind: NodeKind, attributes: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        match self.nodes.get_mut(id) {
            None => {
                let node = Node {
                    id: id.to_string(),
                    label: label.to_string(),
                    kind,
                    attributes: attributes
                        .into_iter()
                        .map(|(k, v)| (k.into(), v))
                        .collect(),
                };
                self.nodes.insert(id.to_string(), node);
            }
            Some(node) => {
                for (key, value) in attributes {
                    if value.is_empty() {
                        continue;
                    }
                    let key = key.into();
                    match node.attributes.get(&key) {
                        Some(existing) if !existing.is_empty() => {}
                        _ => {
                            node.attributes.insert(key, value);
                        }
                    }
                }
            }
        }
    }

    /// Insert the edge, replacing the whole payload of an existing edge with
    /// the same `(source, target, relationship)`.
    pub fn add_edge(&mut self, source: &str, relationship: &str, target: &str, attributes: Attributes) {
        let edge = Edge {
            source: source.to_string(),
            target: target.to_string(),
            relationship: relationship.to_string(),
            attributes,
        };
        self.edges.insert(edge.key(), edge);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn finish(self) -> KnowledgeGraph {
        KnowledgeGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Finished, read-only graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeGraph {
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl KnowledgeGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, source: &str, target: &str, relationship: &str) -> Option<&Edge> {
        self.edges.get(&EdgeKey {
            source: source.to_string(),
            target: target.to_string(),
            relationship: relationship.to_string(),
        })
    }

    /// All edges between an ordered node pair, one per relationship.
    pub fn edges_between<'a>(&'a self, source: &'a str, target: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges
            .values()
            .filter(move |e| e.source == source && e.target == target)
    }

    pub fn outgoing<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.values().filter(move |e| e.source == source)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind == kind)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in self.nodes.values() {
            *stats.nodes_by_kind.entry(node.kind).or_insert(0) += 1;
        }
        for edge in self.edges.values() {
            *stats
                .edges_by_relationship
                .entry(edge.relationship.clone())
                .or_insert(0) += 1;
        }
        stats
    }
}

#[derive(Deserialize)]
struct GraphDocument {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Serialize for KnowledgeGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            nodes: Vec<&'a Node>,
            edges: Vec<&'a Edge>,
        }
        Borrowed {
            nodes: self.nodes.values().collect(),
            edges: self.edges.values().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KnowledgeGraph {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = GraphDocument::deserialize(deserializer)?;
        Ok(KnowledgeGraph {
            nodes: doc.nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            edges: doc.edges.into_iter().map(|e| (e.key(), e)).collect(),
        })
    }
}

/// Counts per node kind and per relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    pub edges_by_relationship: BTreeMap<String, usize>,
}
