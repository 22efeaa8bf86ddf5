use railsim_core::{ChannelId, NodeId, Sat};

use crate::channel::Channel;
use crate::error::GraphError;
use crate::node::Node;

/// Arena owning every participant and channel in the simulation.
///
/// Nodes and channels reference each other by handle, never by pointer,
/// so the bidirectional participant ↔ channel relation stays acyclic.
/// All mutation goes through `&mut self`, which serializes balance
/// updates exactly the way the single-threaded event loop requires.
#[derive(Debug, Default)]
pub struct ChannelGraph {
    nodes: Vec<Node>,
    channels: Vec<Channel>,
}

impl ChannelGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a participant. Names are caller-chosen; the generator
    /// uses `N0`, `N1`, … and keeps them unique.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name.into()));
        id
    }

    /// Open a channel between `a` and `b` with the given capacity,
    /// split evenly.
    ///
    /// Rejects self-channels and duplicate pairs; a pair of nodes holds
    /// at most one channel.
    pub fn connect(&mut self, a: NodeId, b: NodeId, capacity: Sat) -> Result<ChannelId, GraphError> {
        if a == b {
            return Err(GraphError::SelfChannel(a));
        }
        self.node(a)?;
        self.node(b)?;
        if self.nodes[a.index()].channel_to(b).is_some() {
            return Err(GraphError::DuplicateChannel { a, b });
        }

        let id = ChannelId(self.channels.len());
        self.channels.push(Channel::new(id, a, b, capacity));
        self.nodes[a.index()].add_channel(b, id);
        self.nodes[b.index()].add_channel(a, id);
        tracing::debug!(channel_id = %id, %a, %b, capacity, "channel opened");
        Ok(id)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(id.index()).ok_or(GraphError::UnknownNode(id))
    }

    /// Look up a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(GraphError::UnknownNode(id))
    }

    /// The channel behind a handle. Handles are only minted by
    /// `connect`, so this cannot fail for handles from this graph.
    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.index()]
    }

    /// Mutable access to a channel.
    pub fn channel_mut(&mut self, id: ChannelId) -> &mut Channel {
        &mut self.channels[id.index()]
    }

    /// Channel between two nodes, if open.
    pub fn channel_between(&self, a: NodeId, b: NodeId) -> Option<ChannelId> {
        self.nodes.get(a.index())?.channel_to(b)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All channels in creation order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Number of participants.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
