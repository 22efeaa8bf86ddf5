//! Railsim channel graph — the bilateral-channel balance model.
//!
//! This crate provides:
//! - [`FeePolicy`] — base-fee plus proportional (ppm) forwarding fee.
//! - [`Channel`] — a capacity-bounded balance split between two
//!   participants, with an atomic single-direction balance move.
//! - [`Node`] — a participant, its neighbor map, and its payment lists.
//! - [`ChannelGraph`] — the arena owning all nodes and channels.
//!
//! Channels are arena-held values addressed by [`ChannelId`]; nodes hold
//! handles into the arena rather than owned pointers, which keeps the
//! cyclic participant ↔ channel relation free of reference cycles.
//!
//! [`ChannelId`]: railsim_core::ChannelId

pub mod channel;
pub mod error;
pub mod graph;
pub mod node;

pub use channel::{Channel, FeePolicy, DEFAULT_CLTV_DELTA};
pub use error::GraphError;
pub use graph::ChannelGraph;
pub use node::Node;
