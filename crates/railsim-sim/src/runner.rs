use railsim_core::{EventClock, NodeId, PaymentBook, Sat};
use railsim_graph::ChannelGraph;
use railsim_settlement::{send_payment, Mainchain};

use crate::metrics::Metrics;

/// Execute a workload on the off-chain rail.
///
/// Payments are submitted back-to-back; each one's liquidity check sees
/// the balances left by the previous one. Failures are recorded and the
/// workload continues — no retries.
pub fn run_offchain(
    graph: &mut ChannelGraph,
    clock: &mut EventClock,
    book: &mut PaymentBook,
    workload: &[(NodeId, NodeId, Sat)],
) -> Metrics {
    let mut metrics = Metrics::new();
    for &(src, dst, amount) in workload {
        metrics.add(send_payment(graph, clock, book, src, dst, amount));
    }
    metrics
}

/// Execute a workload on the base-ledger rail, advancing the clock one
/// second between submissions.
pub fn run_onchain(
    chain: &Mainchain,
    graph: &mut ChannelGraph,
    clock: &mut EventClock,
    book: &mut PaymentBook,
    workload: &[(NodeId, NodeId, Sat)],
) -> Metrics {
    let mut metrics = Metrics::new();
    for &(src, dst, amount) in workload {
        metrics.add(chain.send_payment(graph, clock, book, src, dst, amount));
        clock.run_until(clock.now() + 1_000, book);
    }
    metrics
}
