//! Graph export for humans and other tools.
//!
//! Presentation (colors, tooltips, layout) is decided here, never in the core
//! model.
//!
//! Output formats:
//! - JSON (`{ "nodes": [...], "edges": [...] }`)
//! - Graphviz DOT
//! - Self-contained HTML explorer (vis-network)

use anyhow::{anyhow, Result};
use brewgraph_core::{Attributes, KnowledgeGraph, NodeKind};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Dot,
    Html,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "dot" | "gv" => Ok(Self::Dot),
            "html" | "htm" => Ok(Self::Html),
            other => Err(anyhow!(
                "unknown export format `{other}` (expected json|dot|html)"
            )),
        }
    }

    /// Guess from an output path; `None` when the extension says nothing.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| Self::parse(e).ok())
    }
}

pub fn kind_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Roaster => "#b22222",
        NodeKind::BeanLot => "#2e8b57",
        NodeKind::RoastBatch => "#8b4513",
        NodeKind::Grinder => "#4682b4",
        NodeKind::Brewer => "#6a5acd",
        NodeKind::BrewSession => "#111111",
        NodeKind::SensoryEvaluation => "gold",
        NodeKind::FlavorNote => "#ff8c00",
    }
}

fn font_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::BrewSession | NodeKind::Roaster | NodeKind::RoastBatch => "white",
        _ => "black",
    }
}

/// `key: value` lines, one per attribute.
fn tooltip(lead: &[(&str, &str)], attributes: &Attributes) -> String {
    lead.iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .chain(attributes.iter().map(|(k, v)| format!("{k}: {v}")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(graph: &KnowledgeGraph, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(graph),
        ExportFormat::Dot => Ok(render_dot(graph)),
        ExportFormat::Html => render_html(graph),
    }
}

pub fn render_json(graph: &KnowledgeGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

pub fn render_dot(graph: &KnowledgeGraph) -> String {
    fn dot_escape(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }

    let mut out = String::new();
    out.push_str("digraph brewgraph {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\"];\n");
    out.push_str("  edge [fontname=\"Helvetica\", fontsize=10];\n\n");

    for node in graph.nodes() {
        let title = tooltip(&[("type", node.kind.as_str())], &node.attributes);
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\", fontcolor=\"{}\", tooltip=\"{}\"];\n",
            dot_escape(&node.id),
            dot_escape(&node.label),
            kind_color(node.kind),
            font_color(node.kind),
            dot_escape(&title),
        ));
    }
    out.push('\n');

    for edge in graph.edges() {
        let title = tooltip(&[("type", edge.relationship.as_str())], &edge.attributes);
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", tooltip=\"{}\"];\n",
            dot_escape(&edge.source),
            dot_escape(&edge.target),
            dot_escape(&edge.relationship),
            dot_escape(&title),
        ));
    }

    out.push_str("}\n");
    out
}

#[derive(Serialize)]
struct HtmlNode<'a> {
    id: &'a str,
    label: &'a str,
    title: String,
    color: &'static str,
    font: HtmlFont,
}

#[derive(Serialize)]
struct HtmlFont {
    color: &'static str,
}

#[derive(Serialize)]
struct HtmlEdge<'a> {
    from: &'a str,
    to: &'a str,
    label: &'a str,
    title: String,
    arrows: &'static str,
}

#[derive(Serialize)]
struct HtmlGraph<'a> {
    nodes: Vec<HtmlNode<'a>>,
    edges: Vec<HtmlEdge<'a>>,
}

pub fn render_html(graph: &KnowledgeGraph) -> Result<String> {
    let view = HtmlGraph {
        nodes: graph
            .nodes()
            .map(|n| HtmlNode {
                id: &n.id,
                label: &n.label,
                title: tooltip(&[("type", n.kind.as_str())], &n.attributes),
                color: kind_color(n.kind),
                font: HtmlFont {
                    color: font_color(n.kind),
                },
            })
            .collect(),
        edges: graph
            .edges()
            .map(|e| HtmlEdge {
                from: &e.source,
                to: &e.target,
                label: &e.relationship,
                title: tooltip(&[("type", e.relationship.as_str())], &e.attributes),
                arrows: "to",
            })
            .collect(),
    };

    // `</` is escaped so graph text can't close the <script> tag.
    let json = serde_json::to_string(&view)?.replace("</", "<\\/");

    let template = include_str!("../templates/graph_explorer.html");
    Ok(template
        .replace("{{GRAPH_JSON}}", &json)
        .replace("{{NODES_COUNT}}", &graph.node_count().to_string())
        .replace("{{EDGES_COUNT}}", &graph.edge_count().to_string()))
}
