use serde::{Deserialize, Serialize};

use crate::types::Sat;

/// Parameters for a simulation run.
///
/// Loadable from TOML; every field has a demo-sized default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Total number of participants in the channel graph.
    pub node_count: usize,
    /// Channels opened by each node joining after the seed clique.
    pub attachment_degree: usize,
    /// Capacity of every generated channel, in sat.
    pub base_capacity: Sat,
    /// New-edge fee rates are drawn uniformly from `[1, 1 + ppm_variance]`.
    pub ppm_variance: u64,
    /// Number of payments in the generated workload.
    pub payment_count: usize,
    /// Smallest workload payment amount.
    pub min_amount_sat: Sat,
    /// Largest workload payment amount.
    pub max_amount_sat: Sat,
    /// On-chain wallet balance each participant starts with.
    pub onchain_funding_sat: Sat,
    /// Seed for every random decision in the run.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            node_count: 25,
            attachment_degree: 2,
            base_capacity: 2_000_000,
            ppm_variance: 1_000,
            payment_count: 10,
            min_amount_sat: 1_000,
            max_amount_sat: 100_000,
            onchain_funding_sat: 2_000_000,
            seed: 42,
        }
    }
}
