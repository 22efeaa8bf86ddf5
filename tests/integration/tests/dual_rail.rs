//! Integration test: one workload replayed on both settlement rails.

use rand::rngs::StdRng;
use rand::SeedableRng;

use railsim_core::{EventClock, NodeId, PaymentBook, PaymentMethod, Sat, SimConfig};
use railsim_graph::ChannelGraph;
use railsim_settlement::Mainchain;
use railsim_sim::{make_workload, run_offchain, run_onchain};
use railsim_topology::{build_topology, TopologyConfig};

struct Run {
    graph: ChannelGraph,
    clock: EventClock,
    book: PaymentBook,
    workload: Vec<(NodeId, NodeId, Sat)>,
}

/// Build a funded topology and workload from one seed, the way the CLI
/// `compare` command does.
fn setup(seed: u64) -> Run {
    let cfg = SimConfig {
        node_count: 25,
        attachment_degree: 1,
        seed,
        ..SimConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut graph = ChannelGraph::new();
    let nodes = build_topology(&mut graph, &TopologyConfig::from(&cfg), &mut rng).unwrap();
    for &n in &nodes {
        graph.node_mut(n).unwrap().balance = cfg.onchain_funding_sat;
    }
    let workload = make_workload(
        &nodes,
        cfg.payment_count,
        cfg.min_amount_sat,
        cfg.max_amount_sat,
        &mut rng,
    );
    Run {
        graph,
        clock: EventClock::new(),
        book: PaymentBook::new(),
        workload,
    }
}

#[test]
fn dual_rail_run_is_reproducible() {
    let mut a = setup(42);
    let mut b = setup(42);
    assert_eq!(a.workload, b.workload);

    for run in [&mut a, &mut b] {
        run_onchain(
            &Mainchain::default(),
            &mut run.graph,
            &mut run.clock,
            &mut run.book,
            &run.workload.clone(),
        );
        run_offchain(
            &mut run.graph,
            &mut run.clock,
            &mut run.book,
            &run.workload.clone(),
        );
    }

    assert_eq!(a.book.len(), b.book.len());
    for (pa, pb) in a.book.iter().zip(b.book.iter()) {
        assert_eq!(pa.source, pb.source);
        assert_eq!(pa.destination, pb.destination);
        assert_eq!(pa.amount, pb.amount);
        assert_eq!(pa.fee, pb.fee);
        assert_eq!(pa.latency_ms, pb.latency_ms);
    }
    for (ca, cb) in a.graph.channels().iter().zip(b.graph.channels().iter()) {
        let (x, y) = ca.endpoints();
        assert_eq!(ca.balance_of(x).unwrap(), cb.balance_of(x).unwrap());
        assert_eq!(ca.balance_of(y).unwrap(), cb.balance_of(y).unwrap());
    }
}

#[test]
fn channel_capacity_is_conserved_through_a_full_run() {
    let mut run = setup(7);
    run_offchain(
        &mut run.graph,
        &mut run.clock,
        &mut run.book,
        &run.workload.clone(),
    );

    for ch in run.graph.channels() {
        let (a, b) = ch.endpoints();
        assert_eq!(
            ch.balance_of(a).unwrap() + ch.balance_of(b).unwrap(),
            ch.capacity()
        );
    }
}

#[test]
fn offchain_beats_onchain_on_fee_and_latency() {
    let mut run = setup(3);
    let onchain = run_onchain(
        &Mainchain::default(),
        &mut run.graph,
        &mut run.clock,
        &mut run.book,
        &run.workload.clone(),
    );
    let offchain = run_offchain(
        &mut run.graph,
        &mut run.clock,
        &mut run.book,
        &run.workload.clone(),
    );
    assert!(onchain.success_count() > 0);
    assert!(offchain.success_count() > 0);

    // Every on-chain payment pays the flat 6,250 sat fee and waits six
    // blocks; off-chain payments on this graph pay a few sat and a few
    // hundred milliseconds.
    for p in run.book.iter() {
        match p.method {
            PaymentMethod::Onchain => {
                assert_eq!(p.fee, 6_250);
                assert_eq!(p.latency_ms, 3_600_000);
            }
            PaymentMethod::Offchain => {
                assert!(p.fee < 6_250);
                assert!(p.latency_ms < 3_600_000);
            }
        }
    }
}

#[test]
fn each_rail_measures_time_from_its_own_origin() {
    // The comparison runs the two rails on separate clocks; both sets
    // of records must be stamped from t=0, not with one rail's run time
    // carried into the other's.
    let mut run = setup(5);
    let mut ledger_clock = EventClock::new();
    run_onchain(
        &Mainchain::default(),
        &mut run.graph,
        &mut ledger_clock,
        &mut run.book,
        &run.workload.clone(),
    );
    let mut channel_clock = EventClock::new();
    run_offchain(
        &mut run.graph,
        &mut channel_clock,
        &mut run.book,
        &run.workload.clone(),
    );

    // On-chain submissions are spaced one second apart from t=0.
    for (i, p) in run
        .book
        .iter()
        .filter(|p| p.method == PaymentMethod::Onchain)
        .enumerate()
    {
        assert_eq!(p.created, i as u64 * 1_000);
    }
    // Off-chain submissions are back-to-back at t=0 on a fresh clock.
    for p in run.book.iter().filter(|p| p.method == PaymentMethod::Offchain) {
        assert_eq!(p.created, 0);
    }
}

#[test]
fn all_committed_payments_eventually_complete() {
    let mut run = setup(11);
    run_onchain(
        &Mainchain::default(),
        &mut run.graph,
        &mut run.clock,
        &mut run.book,
        &run.workload.clone(),
    );
    run_offchain(
        &mut run.graph,
        &mut run.clock,
        &mut run.book,
        &run.workload.clone(),
    );

    run.clock.run_to_completion(&mut run.book);
    for p in run.book.iter() {
        assert_eq!(p.completed, Some(p.created + p.latency_ms));
    }
}
