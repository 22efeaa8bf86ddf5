//! Railsim topology — channel-graph construction.
//!
//! [`build_topology`] grows a connected graph: a fully-connected seed
//! clique, then one node at a time by degree-proportional preferential
//! attachment, so early and well-connected nodes accumulate channels
//! the way real channel networks develop hubs.

pub mod error;
pub mod generator;

pub use error::TopologyError;
pub use generator::{build_topology, TopologyConfig};
