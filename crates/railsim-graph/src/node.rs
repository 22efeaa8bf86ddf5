use std::collections::BTreeMap;

use railsim_core::{ChannelId, NodeId, PaymentId, Sat};

/// A simulated participant.
///
/// Owns its local view of channels (one handle per neighbor) and the
/// cumulative lists of payments it sent and received. The scalar
/// `balance` is the on-chain wallet used only by the mainchain rail;
/// the off-chain engine never touches it.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    channels: BTreeMap<NodeId, ChannelId>,
    /// Payments this node initiated.
    pub sent: Vec<PaymentId>,
    /// Payments this node received.
    pub received: Vec<PaymentId>,
    /// On-chain wallet balance in sat.
    pub balance: Sat,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            channels: BTreeMap::new(),
            sent: Vec::new(),
            received: Vec::new(),
            balance: 0,
        }
    }

    /// This node's arena handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name, unique within a graph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channel to `peer`, if one is open.
    pub fn channel_to(&self, peer: NodeId) -> Option<ChannelId> {
        self.channels.get(&peer).copied()
    }

    /// Neighbor → channel map, ordered by neighbor id so that graph
    /// walks are deterministic.
    pub fn channels(&self) -> &BTreeMap<NodeId, ChannelId> {
        &self.channels
    }

    /// Number of open channels.
    pub fn degree(&self) -> usize {
        self.channels.len()
    }

    pub(crate) fn add_channel(&mut self, peer: NodeId, channel: ChannelId) {
        self.channels.insert(peer, channel);
    }
}
