//! Railsim routing — cost-based path search over the channel graph.
//!
//! This crate provides [`find_route`], a Dijkstra search whose edge
//! weight combines the channel's forwarding fee with a timelock risk
//! term, and [`hop_channels`], which resolves a node path into the
//! channels connecting consecutive hops.

pub mod router;

pub use router::{find_route, hop_channels, RISK_PPM};
