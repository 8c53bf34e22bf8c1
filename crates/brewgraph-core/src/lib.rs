//! Brewgraph core: entity resolution + graph assembly
//!
//! Turns an in-memory table of brew sessions into a directed, labeled
//! multigraph:
//!
//! - recurring entities (roasters, bean lots, brewers, ...) resolve to one node
//!   each, keyed by normalized natural keys (`slug`, `ids`),
//! - node attributes merge first-non-empty-write-wins across rows,
//! - edges are keyed by `(source, target, relationship)` and replace their
//!   payload when re-added,
//! - columns outside the fixed core schema ride along as metadata on the
//!   `BREWED_WITH` edge (`schema`).
//!
//! Loading tables from disk and rendering the graph live in other crates; this
//! one does no I/O.

pub mod assemble;
pub mod error;
pub mod graph;
pub mod ids;
pub mod notes;
pub mod record;
pub mod schema;
pub mod slug;
pub mod table;
pub mod value;

pub use assemble::{build_graph, GraphAssembler};
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeKey, GraphBuilder, GraphStats, KnowledgeGraph, Node, NodeKind};
pub use ids::{EntityIds, Relation};
pub use notes::{parse_note_intensities, NoteIntensities};
pub use record::BrewRecord;
pub use schema::{TableSchema, CORE_COLUMNS, REQUIRED_COLUMNS};
pub use slug::{slugify, UNKNOWN};
pub use table::{Row, Table};
pub use value::{Attributes, Value};
