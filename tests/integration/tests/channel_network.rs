//! Integration test: routing and settlement over generated topologies.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use railsim_core::{EventClock, NodeId, PaymentBook, Sat};
use railsim_graph::ChannelGraph;
use railsim_routing::find_route;
use railsim_settlement::{send_payment, PaymentError};
use railsim_topology::{build_topology, TopologyConfig};

fn generated(node_count: usize, m: usize, seed: u64) -> (ChannelGraph, Vec<NodeId>) {
    let mut graph = ChannelGraph::new();
    let cfg = TopologyConfig {
        node_count,
        attachment_degree: m,
        ..TopologyConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes = build_topology(&mut graph, &cfg, &mut rng).unwrap();
    (graph, nodes)
}

fn all_balances(graph: &ChannelGraph) -> Vec<(Sat, Sat)> {
    graph
        .channels()
        .iter()
        .map(|ch| {
            let (a, b) = ch.endpoints();
            (ch.balance_of(a).unwrap(), ch.balance_of(b).unwrap())
        })
        .collect()
}

#[test]
fn every_pair_is_routable_on_a_generated_graph() {
    let (graph, nodes) = generated(20, 2, 5);
    for &src in &nodes {
        for &dst in &nodes {
            if src == dst {
                continue;
            }
            let path = find_route(&graph, src, dst, 10_000)
                .unwrap_or_else(|| panic!("no route {src} -> {dst}"));
            assert!(path.len() >= 2);
            assert_eq!(path[0], src);
            assert_eq!(*path.last().unwrap(), dst);
            // Consecutive hops are connected, and no node repeats.
            let unique: HashSet<_> = path.iter().collect();
            assert_eq!(unique.len(), path.len());
            for pair in path.windows(2) {
                assert!(graph.channel_between(pair[0], pair[1]).is_some());
            }
        }
    }
}

#[test]
fn routing_on_a_generated_graph_is_deterministic() {
    let (graph, nodes) = generated(40, 2, 9);
    let (src, dst) = (nodes[5], nodes[33]);
    let first = find_route(&graph, src, dst, 75_000).unwrap();
    for _ in 0..10 {
        assert_eq!(find_route(&graph, src, dst, 75_000).unwrap(), first);
    }
}

#[test]
fn oversized_payment_fails_cleanly_on_a_generated_graph() {
    let (mut graph, nodes) = generated(15, 1, 13);
    let mut clock = EventClock::new();
    let mut book = PaymentBook::new();

    let before = all_balances(&graph);
    // Larger than any single channel balance can carry.
    let result = send_payment(
        &mut graph,
        &mut clock,
        &mut book,
        nodes[0],
        nodes[14],
        10_000_000,
    );

    assert!(matches!(
        result,
        Err(PaymentError::LiquidityShortfall { .. })
    ));
    assert_eq!(all_balances(&graph), before);
    assert!(book.is_empty());
    assert_eq!(clock.pending(), 0);
}

#[test]
fn disconnected_components_yield_no_route() {
    let mut graph = ChannelGraph::new();
    let island = |graph: &mut ChannelGraph, tag: char| {
        let a = graph.add_node(format!("{tag}0"));
        let b = graph.add_node(format!("{tag}1"));
        graph.connect(a, b, 2_000_000).unwrap();
        (a, b)
    };
    let (a0, _) = island(&mut graph, 'a');
    let (_, b1) = island(&mut graph, 'b');

    let mut clock = EventClock::new();
    let mut book = PaymentBook::new();
    let result = send_payment(&mut graph, &mut clock, &mut book, a0, b1, 1_000);
    assert_eq!(
        result,
        Err(PaymentError::NoRoute { from: a0, to: b1 })
    );
}

#[test]
fn cycle_of_payments_preserves_per_node_liquidity() {
    // Three nodes in a triangle: each sends 400k sat to the next around
    // the cycle. Every payment is a direct single hop (no fees), so each
    // node's total liquidity across its channels is unchanged even
    // though every channel's split moved.
    let mut graph = ChannelGraph::new();
    let a = graph.add_node("A");
    let b = graph.add_node("B");
    let c = graph.add_node("C");
    graph.connect(a, b, 2_000_000).unwrap();
    graph.connect(b, c, 2_000_000).unwrap();
    graph.connect(c, a, 2_000_000).unwrap();

    let liquidity_of = |graph: &ChannelGraph, n: NodeId| -> Sat {
        graph
            .node(n)
            .unwrap()
            .channels()
            .values()
            .map(|&ch| graph.channel(ch).balance_of(n).unwrap())
            .sum()
    };

    let mut clock = EventClock::new();
    let mut book = PaymentBook::new();
    let before: Vec<Sat> = [a, b, c].iter().map(|&n| liquidity_of(&graph, n)).collect();
    let split_before = all_balances(&graph);

    for (src, dst) in [(a, b), (b, c), (c, a)] {
        send_payment(&mut graph, &mut clock, &mut book, src, dst, 400_000).unwrap();
    }

    let after: Vec<Sat> = [a, b, c].iter().map(|&n| liquidity_of(&graph, n)).collect();
    assert_eq!(after, before);
    assert_ne!(all_balances(&graph), split_before);
    assert_eq!(book.len(), 3);
}
