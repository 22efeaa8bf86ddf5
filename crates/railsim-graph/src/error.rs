use railsim_core::{ChannelId, NodeId, Sat};

/// Channel-graph errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("{node} is not an endpoint of {channel}")]
    NotAnEndpoint { channel: ChannelId, node: NodeId },

    #[error("insufficient balance on {channel}: available {available}, required {required}")]
    InsufficientBalance {
        channel: ChannelId,
        available: Sat,
        required: Sat,
    },

    #[error("channel between {a} and {b} already exists")]
    DuplicateChannel { a: NodeId, b: NodeId },

    #[error("cannot open a channel from {0} to itself")]
    SelfChannel(NodeId),

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
}
