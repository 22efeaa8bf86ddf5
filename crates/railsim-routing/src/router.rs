use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use railsim_core::{ChannelId, NodeId, Sat};
use railsim_graph::ChannelGraph;

/// Risk weight per block of timelock, in parts per million of the
/// routed amount. Matches the LND default.
pub const RISK_PPM: u64 = 1;

/// Candidate in the Dijkstra priority queue.
///
/// Ordered by `(cost, seq)` ascending. The insertion sequence breaks
/// ties between equal-cost candidates in FIFO discovery order, which
/// keeps route selection reproducible; node handles alone carry no
/// meaningful order for routing purposes.
#[derive(Debug, Clone, Copy)]
struct SearchEntry {
    cost: u64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for SearchEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for SearchEntry {}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we pop lowest cost first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Timelock risk term for one edge: `RISK_PPM * amount * delta / 1e6`,
/// floored, saturating at `u64::MAX`.
fn risk(amount: Sat, cltv_delta: u32) -> u64 {
    let r = (RISK_PPM as u128) * (amount as u128) * (cltv_delta as u128) / 1_000_000;
    u64::try_from(r).unwrap_or(u64::MAX)
}

/// Find a minimum-cost path from `source` to `destination` for routing
/// `amount` sat.
///
/// Edge weight is the channel's forwarding fee for `amount` plus the
/// timelock risk term. The same `amount` is used on every edge: the
/// search cannot know per-hop forwarded amounts before the path is
/// fixed, so it optimizes an upper-bound estimate and the settlement
/// layer computes the true per-hop amounts afterwards by backward
/// escalation.
///
/// Returns `None` when the destination is unreachable or identical to
/// the source; a route always has at least two nodes.
pub fn find_route(
    graph: &ChannelGraph,
    source: NodeId,
    destination: NodeId,
    amount: Sat,
) -> Option<Vec<NodeId>> {
    if source == destination {
        return None;
    }
    graph.node(source).ok()?;
    graph.node(destination).ok()?;

    let mut dist: HashMap<NodeId, u64> = HashMap::from([(source, 0)]);
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut seq: u64 = 0;
    let mut heap = BinaryHeap::from([SearchEntry {
        cost: 0,
        seq,
        node: source,
    }]);

    while let Some(entry) = heap.pop() {
        let u = entry.node;
        if u == destination {
            let mut path = vec![destination];
            let mut cur = destination;
            while cur != source {
                cur = *prev.get(&cur)?;
                path.push(cur);
            }
            path.reverse();
            tracing::debug!(%source, %destination, hops = path.len() - 1, cost = entry.cost, "route found");
            return Some(path);
        }
        // Stale queue entry: a cheaper way to `u` was already processed.
        if entry.cost > dist[&u] {
            continue;
        }

        let node = match graph.node(u) {
            Ok(n) => n,
            Err(_) => continue,
        };
        for (&v, &chan_id) in node.channels() {
            let ch = graph.channel(chan_id);
            let weight = ch.policy.fee(amount).saturating_add(risk(amount, ch.cltv_delta));
            let alt = entry.cost.saturating_add(weight);
            if dist.get(&v).map_or(true, |&best| alt < best) {
                dist.insert(v, alt);
                prev.insert(v, u);
                seq += 1;
                heap.push(SearchEntry {
                    cost: alt,
                    seq,
                    node: v,
                });
            }
        }
    }

    tracing::debug!(%source, %destination, "no route");
    None
}

/// Resolve a node path into the channels connecting consecutive hops.
///
/// Returns `None` if any consecutive pair has no open channel; paths
/// produced by [`find_route`] always resolve.
pub fn hop_channels(graph: &ChannelGraph, path: &[NodeId]) -> Option<Vec<ChannelId>> {
    path.windows(2)
        .map(|pair| graph.channel_between(pair[0], pair[1]))
        .collect()
}
