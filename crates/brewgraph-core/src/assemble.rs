//! Row-by-row graph assembly.
//!
//! Flow per table:
//!
//! 1. [`TableSchema::from_columns`] checks required columns and fixes the
//!    dynamic column set. Nothing is built if a column is missing.
//! 2. Each row becomes a [`BrewRecord`], its entity ids are computed, nodes
//!    are merged and the fixed edge topology is emitted:
//!
//! ```text
//! Roaster ─PRODUCES─► BeanLot ─ROASTED_AS─► RoastBatch
//!                                               ▲
//! BrewSession ─USES_ROAST───────────────────────┘
//! BrewSession ─USES_GRINDER─► Grinder
//! BrewSession ─BREWED_WITH──► Brewer        (brew_method + dynamic columns)
//! BrewSession ─EVALUATED_AS─► SensoryEvaluation ─HAS_NOTE─► FlavorNote
//! ```
//!
//! A failing row aborts the batch; the builder is dropped with it.

use crate::error::Result;
use crate::graph::{GraphBuilder, KnowledgeGraph, NodeKind};
use crate::ids::{note_id, EntityIds, Relation};
use crate::record::BrewRecord;
use crate::schema::TableSchema;
use crate::table::{Row, Table};
use crate::value::{Attributes, Value};
use tracing::{debug, info};

/// Build the graph for a whole table, or nothing at all.
pub fn build_graph(table: &Table) -> Result<KnowledgeGraph> {
    let mut assembler = GraphAssembler::new(table.columns())?;
    for row in table.rows() {
        assembler.ingest_row(&row)?;
    }
    let graph = assembler.finish();
    info!(
        rows = table.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "assembled brew graph"
    );
    Ok(graph)
}

/// Owns the graph while rows are being folded into it.
#[derive(Debug)]
pub struct GraphAssembler {
    schema: TableSchema,
    builder: GraphBuilder,
    rows: usize,
}

impl GraphAssembler {
    /// Validate the header; fails before any row is read.
    pub fn new(columns: &[String]) -> Result<Self> {
        let schema = TableSchema::from_columns(columns)?;
        debug!(dynamic = ?schema.dynamic_columns(), "classified table columns");
        Ok(Self {
            schema,
            builder: GraphBuilder::new(),
            rows: 0,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn ingest_row(&mut self, row: &Row<'_>) -> Result<()> {
        let record = BrewRecord::from_row(row)?;
        let dynamic = self.schema.dynamic_values(row);
        self.ingest_record(&record, dynamic);
        Ok(())
    }

    /// Merge one record's entities and emit its edges. `dynamic` lands on the
    /// `BREWED_WITH` edge next to `brew_method`.
    pub fn ingest_record(&mut self, record: &BrewRecord, dynamic: Attributes) {
        let ids = EntityIds::for_record(record);
        self.merge_nodes(record, &ids);
        self.emit_edges(record, &ids, dynamic);
        self.rows += 1;
        debug!(
            row = self.rows,
            session = %ids.session,
            notes = record.notes.len(),
            "ingested brew record"
        );
    }

    pub fn rows_ingested(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> KnowledgeGraph {
        self.builder.finish()
    }

    fn merge_nodes(&mut self, r: &BrewRecord, ids: &EntityIds) {
        let b = &mut self.builder;
        let none = Vec::<(&str, Value)>::new;

        b.ensure_node(&ids.roaster, &r.roaster, NodeKind::Roaster, none());
        b.ensure_node(&ids.bean_lot, &r.coffee_name, NodeKind::BeanLot, none());
        b.ensure_node(
            &ids.roast_batch,
            &r.roast_batch_label(),
            NodeKind::RoastBatch,
            [("roast_level", Value::from(r.roast_level.as_str()))],
        );
        b.ensure_node(&ids.grinder, &r.grinder, NodeKind::Grinder, none());
        b.ensure_node(
            &ids.brewer,
            &r.brewer_label(),
            NodeKind::Brewer,
            [
                ("brand", Value::from(r.brewer_brand.as_str())),
                ("model", Value::from(r.brewer_model.as_str())),
                ("filter_material", Value::from(r.filter_material.as_str())),
            ],
        );
        b.ensure_node(
            &ids.session,
            &r.brew_id,
            NodeKind::BrewSession,
            [
                ("dose_g", Value::Float(r.dose_g)),
                ("total_brew_time_sec", Value::Float(r.total_brew_time_sec)),
                ("notes_overall", Value::from(r.notes_overall.as_str())),
                ("barista", Value::from(r.barista.as_str())),
                ("brew_date", Value::from(r.brew_date.as_str())),
            ],
        );
        b.ensure_node(
            &ids.evaluation,
            &r.evaluation_label(),
            NodeKind::SensoryEvaluation,
            [
                ("sweetness_0_10", Value::Float(r.sweetness)),
                ("acidity_0_10", Value::Float(r.acidity)),
                ("bitterness_0_10", Value::Float(r.bitterness)),
                ("body_0_10", Value::Float(r.body)),
                ("overall_0_10", Value::Float(r.overall)),
            ],
        );
        for (note, _) in r.notes.iter() {
            b.ensure_node(&note_id(note), note, NodeKind::FlavorNote, none());
        }
    }

    fn emit_edges(&mut self, r: &BrewRecord, ids: &EntityIds, dynamic: Attributes) {
        let b = &mut self.builder;
        let single = |key: &str, value: Value| Attributes::from([(key.to_string(), value)]);

        b.add_edge(&ids.roaster, Relation::Produces.as_str(), &ids.bean_lot, Attributes::new());
        b.add_edge(
            &ids.bean_lot,
            Relation::RoastedAs.as_str(),
            &ids.roast_batch,
            single("roast_date", Value::from(r.roast_date.as_str())),
        );
        b.add_edge(
            &ids.session,
            Relation::UsesGrinder.as_str(),
            &ids.grinder,
            single("grind_setting", Value::from(r.grind_setting.as_str())),
        );

        let mut method = single("brew_method", Value::from(r.brew_method.as_str()));
        method.extend(dynamic);
        b.add_edge(&ids.session, Relation::BrewedWith.as_str(), &ids.brewer, method);

        b.add_edge(&ids.session, Relation::UsesRoast.as_str(), &ids.roast_batch, Attributes::new());
        b.add_edge(&ids.session, Relation::EvaluatedAs.as_str(), &ids.evaluation, Attributes::new());

        for (note, intensity) in r.notes.iter() {
            b.add_edge(
                &ids.evaluation,
                Relation::HasNote.as_str(),
                &note_id(note),
                single("intensity", Value::Int(intensity)),
            );
        }
    }
}
