//! Railsim simulation driver pieces.
//!
//! Everything around the core engine: workload generation
//! ([`make_workload`]), per-rail execution ([`run_onchain`],
//! [`run_offchain`]), metrics aggregation ([`Metrics`]), and the
//! wallet/channel balance reports.

pub mod metrics;
pub mod report;
pub mod runner;
pub mod workload;

pub use metrics::Metrics;
pub use report::{channel_report, wallet_report};
pub use runner::{run_offchain, run_onchain};
pub use workload::make_workload;
