use rand::Rng;

use railsim_core::{NodeId, Sat, SimConfig};
use railsim_graph::ChannelGraph;

use crate::error::TopologyError;

/// Parameters for preferential-attachment growth.
#[derive(Debug, Clone)]
pub struct TopologyConfig {
    /// Total number of participants to create.
    pub node_count: usize,
    /// Channels each post-seed node opens on arrival; the seed clique
    /// has `attachment_degree + 1` members.
    pub attachment_degree: usize,
    /// Capacity of every channel, in sat.
    pub base_capacity: Sat,
    /// New-edge fee rates are drawn uniformly from `[1, 1 + ppm_variance]`.
    pub ppm_variance: u64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            attachment_degree: 2,
            base_capacity: 2_000_000,
            ppm_variance: 1_000,
        }
    }
}

impl From<&SimConfig> for TopologyConfig {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            node_count: cfg.node_count,
            attachment_degree: cfg.attachment_degree,
            base_capacity: cfg.base_capacity,
            ppm_variance: cfg.ppm_variance,
        }
    }
}

/// Build a connected channel graph of `cfg.node_count` participants
/// into `graph` and return their handles in creation order.
///
/// Step 1 seeds a full clique of `m + 1` nodes (`m` being the
/// attachment degree). Step 2 adds the remaining nodes one at a time:
/// each picks `m` distinct attachment targets by weighted sampling from
/// a degree bag — a multiset holding every node once per channel
/// endpoint it owns — and connects to each with base capacity. Every
/// new channel's proportional fee rate is drawn from
/// `[1, 1 + ppm_variance]`; seed-clique channels keep the default
/// policy.
///
/// Duplicate target draws are resampled. The resample loop is capped at
/// `64 * m` draws per node; exhausting the cap fails the whole build,
/// though with `m + 1` or more distinct nodes always in the bag the cap
/// is unreachable in a valid configuration.
pub fn build_topology(
    graph: &mut ChannelGraph,
    cfg: &TopologyConfig,
    rng: &mut impl Rng,
) -> Result<Vec<NodeId>, TopologyError> {
    let m = cfg.attachment_degree;
    if m < 1 {
        return Err(TopologyError::InvalidConfig(
            "attachment degree must be at least 1".into(),
        ));
    }
    if cfg.node_count < m + 1 {
        return Err(TopologyError::InvalidConfig(format!(
            "node count {} cannot hold a seed clique of {}",
            cfg.node_count,
            m + 1
        )));
    }

    // Seed clique.
    let mut nodes: Vec<NodeId> = (0..=m).map(|i| graph.add_node(format!("N{i}"))).collect();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            graph.connect(nodes[i], nodes[j], cfg.base_capacity)?;
        }
    }

    // One entry per channel endpoint a node owns.
    let mut degree_bag: Vec<NodeId> = Vec::new();
    for &n in &nodes {
        let degree = graph.node(n)?.degree();
        degree_bag.extend(std::iter::repeat(n).take(degree));
    }

    // Preferential-attachment growth.
    let max_draws = 64 * m;
    for idx in (m + 1)..cfg.node_count {
        let new_node = graph.add_node(format!("N{idx}"));

        let mut targets: Vec<NodeId> = Vec::with_capacity(m);
        let mut draws = 0;
        while targets.len() < m {
            if draws >= max_draws {
                return Err(TopologyError::InvalidConfig(format!(
                    "could not draw {m} distinct attachment targets for N{idx}"
                )));
            }
            draws += 1;
            let pick = degree_bag[rng.gen_range(0..degree_bag.len())];
            if !targets.contains(&pick) {
                targets.push(pick);
            }
        }

        for target in targets {
            let channel = graph.connect(target, new_node, cfg.base_capacity)?;
            let ppm = rng.gen_range(1..=1 + cfg.ppm_variance);
            graph.channel_mut(channel).policy.fee_rate_ppm = ppm;
            degree_bag.push(target);
            degree_bag.push(new_node);
        }

        nodes.push(new_node);
    }

    tracing::info!(
        nodes = nodes.len(),
        channels = graph.channel_count(),
        attachment_degree = m,
        "topology built"
    );
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn build(node_count: usize, m: usize, seed: u64) -> (ChannelGraph, Vec<NodeId>) {
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

    fn reachable_from(graph: &ChannelGraph, start: NodeId) -> HashSet<NodeId> {
        let mut seen = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(n) = stack.pop() {
            for &peer in graph.node(n).unwrap().channels().keys() {
                if seen.insert(peer) {
                    stack.push(peer);
                }
            }
        }
        seen
    }

    #[test]
    fn test_rejects_zero_attachment_degree() {
        let mut graph = ChannelGraph::new();
        let cfg = TopologyConfig {
            attachment_degree: 0,
            ..TopologyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = build_topology(&mut graph, &cfg, &mut rng);
        assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_node_count_below_seed_clique() {
        let mut graph = ChannelGraph::new();
        let cfg = TopologyConfig {
            node_count: 2,
            attachment_degree: 2,
            ..TopologyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = build_topology(&mut graph, &cfg, &mut rng);
        assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
    }

    #[test]
    fn test_node_and_channel_counts() {
        let (graph, nodes) = build(30, 2, 7);
        assert_eq!(nodes.len(), 30);
        // Seed clique of 3 has 3 channels; each of the 27 grown nodes
        // adds exactly 2.
        assert_eq!(graph.channel_count(), 3 + 27 * 2);
    }

    #[test]
    fn test_graph_is_connected() {
        let (graph, nodes) = build(50, 2, 11);
        assert_eq!(reachable_from(&graph, nodes[0]).len(), 50);
    }

    #[test]
    fn test_non_seed_degree_at_least_m() {
        let m = 3;
        let (graph, nodes) = build(40, m, 5);
        for &n in &nodes[m + 1..] {
            assert!(graph.node(n).unwrap().degree() >= m);
        }
    }

    #[test]
    fn test_two_node_seed_plus_three_grown() {
        // Clique of 2 (m = 1) plus 3 grown nodes: 5 nodes, connected.
        let (graph, nodes) = build(5, 1, 42);
        assert_eq!(nodes.len(), 5);
        assert_eq!(graph.node_count(), 5);
        for &n in &nodes {
            assert_eq!(reachable_from(&graph, n).len(), 5);
        }
        for ch in graph.channels() {
            assert_eq!(ch.capacity(), 2_000_000);
        }
    }

    #[test]
    fn test_fee_jitter_range_and_seed_defaults() {
        let (graph, _) = build(30, 2, 3);
        // Seed clique channels are created first and keep the default
        // 1 ppm policy; grown edges get jittered rates.
        for ch in graph.channels().iter().take(3) {
            assert_eq!(ch.policy.fee_rate_ppm, 1);
        }
        for ch in graph.channels().iter().skip(3) {
            assert!((1..=1_001).contains(&ch.policy.fee_rate_ppm));
        }
    }

    #[test]
    fn test_same_seed_same_topology() {
        let (g1, _) = build(40, 2, 99);
        let (g2, _) = build(40, 2, 99);

        assert_eq!(g1.channel_count(), g2.channel_count());
        for (a, b) in g1.channels().iter().zip(g2.channels().iter()) {
            assert_eq!(a.endpoints(), b.endpoints());
            assert_eq!(a.policy, b.policy);
        }
    }

    #[test]
    fn test_unique_names() {
        let (graph, nodes) = build(25, 2, 1);
        let names: HashSet<_> = nodes
            .iter()
            .map(|&n| graph.node(n).unwrap().name().to_string())
            .collect();
        assert_eq!(names.len(), 25);
    }
}
