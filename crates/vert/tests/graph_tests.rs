//! Integration tests for the graph handle over both backends.

use proptest::prelude::*;
use vert::{
    AttributeMap, Config, EdgeId, Error, Graph, GraphError, GraphId, GraphStore, Label, LabelSet,
    PersistentConfig, PersistentGraphStore, Value, VertexId,
};

fn ids<T: Ord>(iter: vert::Result<vert::Iter<'_, T>>) -> Vec<T> {
    let mut items: Vec<T> =
        iter.expect("failed to iterate").collect::<vert::Result<_>>().expect("failed mid-scan");
    items.sort();
    items
}

/// Build the same small social graph in any backend.
fn populate<S: GraphStore>(graph: &mut Graph<S>) {
    let alice = graph.add_vertex("alice").expect("add");
    let bob = graph.add_vertex("bob").expect("add");
    let follows = graph.add_edge(&alice, &bob).expect("add");
    graph.add_edge("bob", "carol").expect("add");
    graph.add_edge("carol", "alice").expect("add");

    graph.vertex_labels(&alice).expect("view").add("person").expect("add");
    graph.vertex_labels(&bob).expect("view").add("person").expect("add");
    graph.vertex_data(&alice).expect("view").insert("age", 30i64).expect("insert");
    graph.edge_labels(&follows).expect("view").add("follows").expect("add");
    graph.edge_data(&follows).expect("view").insert("since", 2017i64).expect("insert");
}

fn check_population<S: GraphStore>(graph: &mut Graph<S>) {
    assert_eq!(graph.vertex_count().expect("count"), 3);
    assert_eq!(graph.edge_count().expect("count"), 3);

    let vertices: Vec<VertexId> =
        ids(graph.vertices()).into_iter().map(|v| v.into_id()).collect::<Vec<_>>();
    assert_eq!(vertices.len(), 3);
    assert!(graph.contains_edge(("carol", "alice")).expect("contains"));

    assert!(graph.vertex_labels("alice").expect("view").contains(&Label::new("person")).expect("has"));
    assert_eq!(graph.vertex_data("alice").expect("view").get("age").expect("get"), Some(Value::Int(30)));
    assert_eq!(
        graph.edge_data(("alice", "bob")).expect("view").get_strict("since").expect("get"),
        Value::Int(2017)
    );
    assert!(graph.edge_labels(("alice", "bob")).expect("view").contains(&"follows".into()).expect("has"));
}

#[test]
fn test_memory_graph() {
    let mut graph = Graph::in_memory();
    populate(&mut graph);
    check_population(&mut graph);
}

#[test]
fn test_persistent_graph_survives_reopen() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("social.redb");

    {
        let mut graph = Graph::open(&path).expect("failed to open");
        populate(&mut graph);
        check_population(&mut graph);
        graph.close().expect("failed to close");
        assert!(!graph.is_open());
    }

    let config = Config::new(&path).create_if_missing(false).cache_size(1);
    let mut graph = Graph::open_with_config(config).expect("failed to reopen");
    check_population(&mut graph);
}

#[test]
fn test_persistent_graph_flush_and_stats() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut graph =
        Graph::open_with_config(Config::new(dir.path().join("g.redb")).vertex_cache_size(2))
            .expect("failed to open");

    populate(&mut graph);
    graph.flush().expect("failed to flush");
    assert!(graph.cache_stats().evictions > 0);

    graph.close().expect("failed to close");
    assert!(matches!(graph.vertex_count(), Err(Error::Graph(GraphError::Closed))));
}

#[test]
fn test_missing_database_is_reported() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = Config::new(dir.path().join("nope.redb")).create_if_missing(false);
    assert!(matches!(Graph::open_with_config(config), Err(Error::Graph(GraphError::Storage(_)))));
}

#[test]
fn test_adjacency_views() {
    let mut graph = Graph::in_memory();
    populate(&mut graph);
    graph.add_edge("alice", "carol").expect("add");

    let outbound = graph.outbound("alice").expect("view");
    assert_eq!(outbound.len().expect("len"), 2);
    assert!(outbound.contains(("alice", "bob")).expect("contains"));
    assert!(!outbound.contains(("carol", "alice")).expect("contains"));
    assert!(outbound.edge_to("bob").expect("lookup").is_some());
    assert!(outbound.edge_to("nobody").expect("lookup").is_none());
    let sinks: Vec<EdgeId> = ids(outbound.iter()).into_iter().map(|e| e.into_id()).collect();
    assert_eq!(sinks, vec![EdgeId::new("alice", "bob"), EdgeId::new("alice", "carol")]);

    let inbound = graph.inbound("alice").expect("view");
    assert_eq!(inbound.len().expect("len"), 1);
    assert!(!inbound.is_empty().expect("empty"));
    let edge = inbound.edge_from("carol").expect("lookup").expect("edge exists");
    assert_eq!(edge.source().id(), &VertexId::from("carol"));

    let lonely = graph.inbound("nobody").expect("view");
    assert!(lonely.is_empty().expect("empty"));
    assert_eq!(ids(lonely.iter()).len(), 0);
}

#[test]
fn test_sources_and_sinks() {
    let mut graph = Graph::in_memory();
    graph.add_edge(1, 2).expect("add");
    graph.add_edge(2, 3).expect("add");
    graph.add_vertex(4).expect("add");

    let sources: Vec<VertexId> = ids(graph.sources()).into_iter().map(|v| v.into_id()).collect();
    let sinks: Vec<VertexId> = ids(graph.sinks()).into_iter().map(|v| v.into_id()).collect();
    assert_eq!(sources, vec![VertexId::from(1), VertexId::from(2)]);
    assert_eq!(sinks, vec![VertexId::from(2), VertexId::from(3)]);
}

#[test]
fn test_strict_view_operations() {
    let mut graph = Graph::in_memory();
    let v = graph.add_vertex("x").expect("add");

    let mut labels = graph.vertex_labels(&v).expect("view");
    assert!(labels.is_empty().expect("empty"));
    assert!(matches!(labels.remove(&Label::new("red")), Err(Error::LabelNotFound(_))));
    labels.add("red").expect("add");
    labels.remove(&Label::new("red")).expect("remove");
    assert_eq!(labels.len().expect("len"), 0);

    let mut data = graph.vertex_data(&v).expect("view");
    assert!(matches!(data.get_strict("k"), Err(Error::AttributeNotFound(key)) if key == "k"));
    assert!(matches!(data.remove("k"), Err(Error::AttributeNotFound(_))));
    assert!(!data.discard("k").expect("discard"));
    data.insert("k", "v").expect("insert");
    data.insert("j", true).expect("insert");
    assert_eq!(ids(data.keys()), vec!["j".to_owned(), "k".to_owned()]);
    assert_eq!(data.remove("k").expect("remove"), Value::from("v"));
    assert!(!data.contains_key("k").expect("contains"));

    // The vertex outlives its labels and attributes
    assert!(graph.contains_vertex(&v).expect("contains"));
}

#[test]
fn test_handles_from_another_graph_are_rejected() {
    let mut first = Graph::in_memory();
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut second = Graph::open(dir.path().join("second.redb")).expect("failed to open");

    let edge = first.add_edge("a", "b").expect("add");
    assert!(matches!(second.insert_edge(&edge), Err(Error::ForeignHandle { .. })));
    assert!(matches!(second.edge_data(&edge), Err(Error::ForeignHandle { .. })));
    assert!(matches!(second.outbound(edge.source()), Err(Error::ForeignHandle { .. })));

    // The identifiers carried by the handle are still usable
    second.insert_edge(edge.id()).expect("add");
    assert!(second.contains_edge(("a", "b")).expect("contains"));
}

#[test]
fn test_non_finite_attribute_only_fails_when_persisted() {
    let mut memory = Graph::in_memory();
    memory.vertex_data("x").expect("view").insert("nan", f64::NAN).expect("memory keeps anything");

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut persistent = Graph::open(dir.path().join("g.redb")).expect("failed to open");
    let err = persistent
        .vertex_data("x")
        .expect("view")
        .insert("nan", f64::NAN)
        .expect_err("NaN has no stored form");
    assert!(matches!(err, Error::Graph(GraphError::Encoding(_))));
}

#[derive(Debug, Clone)]
enum Op {
    AddEdge(i64, i64),
    RemoveVertex(i64),
    RemoveEdge(i64, i64),
    Tag(i64),
    Untag(i64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..6i64, 0..6i64).prop_map(|(a, b)| Op::AddEdge(a, b)),
        1 => (0..6i64).prop_map(Op::RemoveVertex),
        1 => (0..6i64, 0..6i64).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
        1 => (0..6i64).prop_map(Op::Tag),
        1 => (0..6i64).prop_map(Op::Untag),
    ]
}

/// Apply one operation; `false` when a strict removal found nothing.
fn apply<S: GraphStore>(graph: &mut Graph<S>, op: &Op) -> bool {
    let outcome = match *op {
        Op::AddEdge(a, b) => graph.add_edge(a, b).map(|_| ()),
        Op::RemoveVertex(v) => graph.remove_vertex(v),
        Op::RemoveEdge(a, b) => graph.remove_edge((a, b)),
        Op::Tag(v) => graph.vertex_labels(v).and_then(|mut labels| labels.add("tag")),
        Op::Untag(v) => {
            graph.vertex_labels(v).and_then(|mut labels| labels.remove(&Label::new("tag")))
        }
    };
    match outcome {
        Ok(()) => true,
        Err(e) if e.is_not_found() => false,
        Err(e) => panic!("{op:?} failed: {e}"),
    }
}

type Snapshot = (Vec<VertexId>, Vec<EdgeId>, Vec<VertexId>);

fn snapshot<S: GraphStore>(graph: &mut Graph<S>) -> Snapshot {
    let vertices: Vec<VertexId> = ids(graph.vertices()).into_iter().map(|v| v.into_id()).collect();
    let edges = ids(graph.edges()).into_iter().map(|e| e.into_id()).collect();
    let tag = Label::new("tag");
    let tagged = vertices
        .iter()
        .filter(|v| graph.vertex_labels(*v).expect("view").contains(&tag).expect("has"))
        .cloned()
        .collect();
    (vertices, edges, tagged)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn backends_agree_through_the_graph(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut memory = Graph::in_memory();
        let store = PersistentGraphStore::in_memory(
            GraphId::next(),
            PersistentConfig::new().cache_size(2),
        ).expect("store");
        let mut persistent = Graph::from_store(store);

        for op in &ops {
            prop_assert_eq!(apply(&mut memory, op), apply(&mut persistent, op), "{:?}", op);
        }

        prop_assert_eq!(snapshot(&mut memory), snapshot(&mut persistent));
        prop_assert_eq!(memory.edge_count().expect("count"), persistent.edge_count().expect("count"));
    }
}
