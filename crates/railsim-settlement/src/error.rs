use railsim_core::{NodeId, Sat};
use railsim_graph::GraphError;

/// Payment-level errors, reported synchronously to the caller.
///
/// `NoRoute` and `LiquidityShortfall` are expected workload outcomes;
/// the caller records the payment as failed and continues. A `Graph`
/// error escaping [`send_payment`](crate::send_payment) after
/// pre-validation indicates an escalation or validation bug.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("liquidity shortfall at hop {hop}: available {available}, required {required}")]
    LiquidityShortfall {
        hop: usize,
        available: Sat,
        required: Sat,
    },

    #[error("insufficient on-chain funds: available {available}, required {required}")]
    InsufficientFunds { available: Sat, required: Sat },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
