use brewgraph_core::schema::REQUIRED_COLUMNS;
use brewgraph_core::{build_graph, GraphError, NodeKind, Table, Value};

const HEADER: &[&str] = &[
    "brew_id",
    "barista",
    "brew_date",
    "roaster",
    "coffee_name",
    "roast_level",
    "roast_date",
    "grinder",
    "grind_setting",
    "brew_method",
    "brewer_brand",
    "brewer_model",
    "filter_material",
    "dose_g",
    "total_brew_time_sec",
    "notes_intensities",
    "sweetness_0_10",
    "acidity_0_10",
    "bitterness_0_10",
    "body_0_10",
    "overall_0_10",
    "notes_overall",
    "water_temp_c",
];

const ROW_1: &[&str] = &[
    "B-001",
    "ana",
    "2024-05-01",
    "Onyx Coffee Lab",
    "Geometry",
    "Light",
    "2024-04-20",
    "Comandante C40",
    "24 clicks",
    "pour-over",
    "Hario",
    "V60 02",
    "paper",
    "15",
    "180",
    "chocolate:4;fruit:x;:5;floral:2",
    "7",
    "6",
    "2",
    "5",
    "8",
    "bright and clean",
    "93",
];

const ROW_2: &[&str] = &[
    "B-002",
    "ben",
    "2024-05-02",
    "ONYX coffee-lab!",
    "Geometry",
    "Light",
    "2024-04-27",
    "Comandante C40",
    "26 clicks",
    "pour-over",
    "Hario",
    "V60 02",
    "cloth",
    "16",
    "200",
    "Chocolate:3;caramel:2",
    "6",
    "5",
    "3",
    "6",
    "7",
    "",
    "",
];

fn table(rows: &[&[&str]]) -> Table {
    Table::from_strs(HEADER, rows).expect("fixture table")
}

#[test]
fn single_row_emits_fixed_topology() {
    let g = build_graph(&table(&[ROW_1])).expect("build");

    for (id, kind) in [
        ("roaster:onyx-coffee-lab", NodeKind::Roaster),
        ("bean:onyx-coffee-lab:geometry", NodeKind::BeanLot),
        ("roast:onyx-coffee-lab:geometry:light", NodeKind::RoastBatch),
        ("grinder:comandante-c40", NodeKind::Grinder),
        ("brewer:hario:v60-02", NodeKind::Brewer),
        ("brew:b-001", NodeKind::BrewSession),
        ("eval:b-001", NodeKind::SensoryEvaluation),
        ("note:chocolate", NodeKind::FlavorNote),
        ("note:floral", NodeKind::FlavorNote),
    ] {
        let node = g.node(id).unwrap_or_else(|| panic!("missing node {id}"));
        assert_eq!(node.kind, kind, "{id}");
    }
    assert_eq!(g.node_count(), 9);

    let edges = [
        ("roaster:onyx-coffee-lab", "bean:onyx-coffee-lab:geometry", "PRODUCES"),
        ("bean:onyx-coffee-lab:geometry", "roast:onyx-coffee-lab:geometry:light", "ROASTED_AS"),
        ("brew:b-001", "grinder:comandante-c40", "USES_GRINDER"),
        ("brew:b-001", "brewer:hario:v60-02", "BREWED_WITH"),
        ("brew:b-001", "roast:onyx-coffee-lab:geometry:light", "USES_ROAST"),
        ("brew:b-001", "eval:b-001", "EVALUATED_AS"),
        ("eval:b-001", "note:chocolate", "HAS_NOTE"),
        ("eval:b-001", "note:floral", "HAS_NOTE"),
    ];
    for (s, t, rel) in edges {
        assert!(g.edge(s, t, rel).is_some(), "missing edge {s} -{rel}-> {t}");
    }
    assert_eq!(g.edge_count(), edges.len());

    let session = g.node("brew:b-001").unwrap();
    assert_eq!(session.label, "B-001");
    assert_eq!(session.attributes["dose_g"], Value::Float(15.0));
    assert_eq!(session.attributes["barista"], Value::from("ana"));

    let eval = g.node("eval:b-001").unwrap();
    assert_eq!(eval.label, "Eval B-001");
    assert_eq!(eval.attributes["overall_0_10"], Value::Float(8.0));

    let batch = g.node("roast:onyx-coffee-lab:geometry:light").unwrap();
    assert_eq!(batch.label, "Geometry (Light)");

    let note = g.edge("eval:b-001", "note:chocolate", "HAS_NOTE").unwrap();
    assert_eq!(note.attributes["intensity"], Value::Int(4));
}

#[test]
fn same_roaster_with_different_spelling_resolves_to_one_node() {
    let g = build_graph(&table(&[ROW_1, ROW_2])).expect("build");
    assert_eq!(g.nodes_of_kind(NodeKind::Roaster).count(), 1);
    assert_eq!(g.nodes_of_kind(NodeKind::BeanLot).count(), 1);
    assert_eq!(g.nodes_of_kind(NodeKind::BrewSession).count(), 2);
    // "chocolate" and "Chocolate" share a tag node.
    assert_eq!(g.nodes_of_kind(NodeKind::FlavorNote).count(), 3);
    assert_eq!(g.node("roaster:onyx-coffee-lab").unwrap().label, "Onyx Coffee Lab");
}

#[test]
fn node_attributes_keep_first_non_empty_value() {
    let g = build_graph(&table(&[ROW_1, ROW_2])).expect("build");
    let brewer = g.node("brewer:hario:v60-02").unwrap();
    assert_eq!(brewer.attributes["filter_material"], Value::from("paper"));

    let g = build_graph(&table(&[ROW_2, ROW_1])).expect("build");
    let brewer = g.node("brewer:hario:v60-02").unwrap();
    assert_eq!(brewer.attributes["filter_material"], Value::from("cloth"));
}

#[test]
fn empty_first_value_is_filled_by_later_row() {
    let mut first = ROW_1.to_vec();
    first[12] = "";
    let g = build_graph(&table(&[&first, ROW_2])).expect("build");
    let brewer = g.node("brewer:hario:v60-02").unwrap();
    assert_eq!(brewer.attributes["filter_material"], Value::from("cloth"));
}

#[test]
fn repeated_edge_takes_latest_payload() {
    let g = build_graph(&table(&[ROW_1, ROW_2])).expect("build");
    let roasted = g
        .edge(
            "bean:onyx-coffee-lab:geometry",
            "roast:onyx-coffee-lab:geometry:light",
            "ROASTED_AS",
        )
        .unwrap();
    assert_eq!(roasted.attributes["roast_date"], Value::from("2024-04-27"));
    assert_eq!(g.edges_between("bean:onyx-coffee-lab:geometry", "roast:onyx-coffee-lab:geometry:light").count(), 1);
}

#[test]
fn repeated_session_replaces_note_intensity() {
    let mut again = ROW_1.to_vec();
    again[15] = "chocolate:1";
    let g = build_graph(&table(&[ROW_1, &again])).expect("build");
    let edge = g.edge("eval:b-001", "note:chocolate", "HAS_NOTE").unwrap();
    assert_eq!(edge.attributes["intensity"], Value::Int(1));
    // The floral edge from the first row is not deleted.
    assert!(g.edge("eval:b-001", "note:floral", "HAS_NOTE").is_some());
}

#[test]
fn dynamic_column_lands_on_brewed_with_edge() {
    let mut second = ROW_1.to_vec();
    second[0] = "B-003";
    second[22] = "";
    let g = build_graph(&table(&[ROW_1, &second])).expect("build");

    let with_temp = g.edge("brew:b-001", "brewer:hario:v60-02", "BREWED_WITH").unwrap();
    assert_eq!(with_temp.attributes["water_temp_c"], Value::Float(93.0));
    assert_eq!(with_temp.attributes["brew_method"], Value::from("pour-over"));

    let without = g.edge("brew:b-003", "brewer:hario:v60-02", "BREWED_WITH").unwrap();
    assert!(!without.attributes.contains_key("water_temp_c"));
    assert_eq!(without.attributes.len(), 1);
}

#[test]
fn non_numeric_dynamic_value_is_kept_as_text() {
    let mut row = ROW_1.to_vec();
    row[22] = " hot ";
    let g = build_graph(&table(&[&row])).expect("build");
    let edge = g.edge("brew:b-001", "brewer:hario:v60-02", "BREWED_WITH").unwrap();
    assert_eq!(edge.attributes["water_temp_c"], Value::from("hot"));
}

#[test]
fn missing_required_column_builds_nothing() {
    for missing in REQUIRED_COLUMNS {
        let columns: Vec<&str> = HEADER.iter().copied().filter(|c| *c != missing).collect();
        let rows: Vec<Vec<&str>> = [ROW_1]
            .iter()
            .map(|row| {
                HEADER
                    .iter()
                    .zip(row.iter())
                    .filter(|(c, _)| **c != missing)
                    .map(|(_, v)| *v)
                    .collect()
            })
            .collect();
        let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let table = Table::from_strs(&columns, &row_refs).unwrap();

        match build_graph(&table) {
            Err(GraphError::MissingColumns { columns }) => {
                assert_eq!(columns, vec![missing.to_string()]);
            }
            other => panic!("expected MissingColumns for {missing}, got {other:?}"),
        }
    }
}

#[test]
fn optional_columns_may_be_absent() {
    let columns: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    let row: Vec<&str> = columns
        .iter()
        .map(|c| match *c {
            "dose_g" | "total_brew_time_sec" => "10",
            c if c.ends_with("_0_10") => "5",
            "notes_intensities" => "",
            _ => "x",
        })
        .collect();
    let table = Table::from_strs(&columns, &[&row]).unwrap();
    let g = build_graph(&table).expect("build");
    assert!(g.node("grinder:unknown").is_some());
    let grind = g.edge("brew:x", "grinder:unknown", "USES_GRINDER").unwrap();
    assert_eq!(grind.attributes["grind_setting"], Value::from("unknown"));
    let roasted = g.edge("bean:x:x", "roast:x:x:x", "ROASTED_AS").unwrap();
    assert_eq!(roasted.attributes["roast_date"], Value::from(""));
}

#[test]
fn bad_number_in_later_row_aborts_batch() {
    let mut bad = ROW_2.to_vec();
    bad[13] = "eighteen";
    let err = build_graph(&table(&[ROW_1, &bad])).unwrap_err();
    assert_eq!(
        err,
        GraphError::InvalidNumber {
            row: 1,
            column: "dose_g".to_string(),
            value: "eighteen".to_string(),
        }
    );
}

#[test]
fn empty_table_builds_empty_graph() {
    let g = build_graph(&table(&[])).expect("build");
    assert!(g.is_empty());
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn stats_count_kinds_and_relationships() {
    let stats = build_graph(&table(&[ROW_1, ROW_2])).expect("build").stats();
    assert_eq!(stats.nodes_by_kind[&NodeKind::BrewSession], 2);
    assert_eq!(stats.nodes_by_kind[&NodeKind::Brewer], 1);
    assert_eq!(stats.edges_by_relationship["PRODUCES"], 1);
    assert_eq!(stats.edges_by_relationship["HAS_NOTE"], 4);
}
