use rand::seq::index;
use rand::Rng;

use railsim_core::{NodeId, Sat};

/// Generate `count` payments between distinct participants, with
/// amounts drawn uniformly from `[min_sat, max_sat]`.
///
/// Returns `(source, destination, amount)` triples. The same workload
/// is meant to be replayed on both rails, so all randomness comes from
/// the caller's seeded generator. Fewer than two nodes yields an empty
/// workload.
pub fn make_workload(
    nodes: &[NodeId],
    count: usize,
    min_sat: Sat,
    max_sat: Sat,
    rng: &mut impl Rng,
) -> Vec<(NodeId, NodeId, Sat)> {
    if nodes.len() < 2 {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let pair = index::sample(rng, nodes.len(), 2);
            let amount = rng.gen_range(min_sat..=max_sat);
            (nodes[pair.index(0)], nodes[pair.index(1)], amount)
        })
        .collect()
}
