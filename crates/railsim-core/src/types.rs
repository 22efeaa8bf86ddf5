use serde::{Deserialize, Serialize};
use std::fmt;

/// Value in satoshis, the smallest currency unit in the simulation.
pub type Sat = u64;

/// Simulated time in milliseconds since the start of the run.
///
/// All latencies and delays are expressed in the same unit, which keeps
/// event ordering a plain integer comparison.
pub type SimTime = u64;

/// Handle to a participant node in the channel graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Index into the graph's node arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle to a channel in the channel graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub usize);

impl ChannelId {
    /// Index into the graph's channel arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chan#{}", self.0)
    }
}

/// Handle to a payment record in a [`PaymentBook`].
///
/// Sequential indices rather than random identifiers, so that two runs
/// with the same seed produce byte-identical logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub usize);

impl PaymentId {
    /// Index into the payment book.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pay#{}", self.0)
    }
}

/// The settlement rail a payment was executed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Multi-hop channel-network settlement.
    Offchain,
    /// Base-ledger settlement.
    Onchain,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offchain => write!(f, "lightning"),
            Self::Onchain => write!(f, "onchain"),
        }
    }
}

/// A settled payment between two participants.
///
/// Immutable once recorded, except for `completed`, which is written
/// later by the event clock when the scheduled completion fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Handle of this record in its book.
    pub id: PaymentId,
    /// Paying participant.
    pub source: NodeId,
    /// Receiving participant.
    pub destination: NodeId,
    /// Amount the destination receives, fees excluded.
    pub amount: Sat,
    /// Simulated time the payment was committed.
    pub created: SimTime,
    /// Rail the payment was settled on.
    pub method: PaymentMethod,
    /// Total fee paid by the source on top of `amount`.
    pub fee: Sat,
    /// End-to-end latency until completion, in milliseconds.
    pub latency_ms: u64,
    /// Simulated time the completion event fired, once it has.
    pub completed: Option<SimTime>,
}

impl Payment {
    /// Whether the deferred completion has fired.
    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }
}

/// The simulation-owned store of all payment records.
///
/// Both rails append here; participants reference records by
/// [`PaymentId`] in their sent/received lists.
#[derive(Debug, Default)]
pub struct PaymentBook {
    payments: Vec<Payment>,
}

impl PaymentBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record and return its handle.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        source: NodeId,
        destination: NodeId,
        amount: Sat,
        created: SimTime,
        method: PaymentMethod,
        fee: Sat,
        latency_ms: u64,
    ) -> PaymentId {
        let id = PaymentId(self.payments.len());
        self.payments.push(Payment {
            id,
            source,
            destination,
            amount,
            created,
            method,
            fee,
            latency_ms,
            completed: None,
        });
        id
    }

    /// Look up a record.
    pub fn get(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.get(id.0)
    }

    /// Mark a record completed at the given simulated time.
    ///
    /// The completion continuation mutates nothing else.
    pub fn complete(&mut self, id: PaymentId, at: SimTime) {
        if let Some(p) = self.payments.get_mut(id.0) {
            p.completed = Some(at);
        }
    }

    /// Number of recorded payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Whether no payments have been recorded.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Iterate over all records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter()
    }
}
