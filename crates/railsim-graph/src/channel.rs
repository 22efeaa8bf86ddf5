use serde::{Deserialize, Serialize};

use railsim_core::{ChannelId, NodeId, Sat};

use crate::error::GraphError;

/// Default channel timelock delta, in blocks.
pub const DEFAULT_CLTV_DELTA: u32 = 40;

/// Forwarding fee schedule for one channel.
///
/// `fee(a) = base_fee + a * fee_rate_ppm / 1_000_000`, all integer
/// arithmetic, truncating division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Flat fee per forward, in sat.
    pub base_fee: Sat,
    /// Proportional fee, in parts per million of the forwarded amount.
    pub fee_rate_ppm: u64,
}

impl FeePolicy {
    /// Fee charged for forwarding `amount` sat.
    ///
    /// Saturates at `Sat::MAX`; no realizable amount gets near it, but
    /// callers may quote fees for amounts no channel could carry.
    pub fn fee(&self, amount: Sat) -> Sat {
        let proportional = (amount as u128) * (self.fee_rate_ppm as u128) / 1_000_000;
        self.base_fee
            .saturating_add(Sat::try_from(proportional).unwrap_or(Sat::MAX))
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            base_fee: 1,
            fee_rate_ppm: 1,
        }
    }
}

/// A bilateral payment channel.
///
/// The capacity is split between the two endpoints; the split moves as
/// payments flow through, but `balance_of(a) + balance_of(b)` always
/// equals the capacity.
#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    endpoints: (NodeId, NodeId),
    capacity: Sat,
    balances: (Sat, Sat),
    /// Fee schedule applied when this channel forwards a payment.
    pub policy: FeePolicy,
    /// Timelock delta in blocks; the router uses it as a risk proxy.
    pub cltv_delta: u32,
}

impl Channel {
    /// Create a channel with its capacity split evenly (odd capacities
    /// give the extra sat to `b`, matching `capacity - capacity / 2`).
    pub fn new(id: ChannelId, a: NodeId, b: NodeId, capacity: Sat) -> Self {
        let half = capacity / 2;
        Self {
            id,
            endpoints: (a, b),
            capacity,
            balances: (half, capacity - half),
            policy: FeePolicy::default(),
            cltv_delta: DEFAULT_CLTV_DELTA,
        }
    }

    /// This channel's arena handle.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Both endpoints, in creation order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        self.endpoints
    }

    /// Total channel capacity in sat.
    pub fn capacity(&self) -> Sat {
        self.capacity
    }

    /// The other endpoint of the channel.
    pub fn peer_of(&self, node: NodeId) -> Result<NodeId, GraphError> {
        if node == self.endpoints.0 {
            Ok(self.endpoints.1)
        } else if node == self.endpoints.1 {
            Ok(self.endpoints.0)
        } else {
            Err(GraphError::NotAnEndpoint {
                channel: self.id,
                node,
            })
        }
    }

    /// Current share of the capacity held by `node`.
    pub fn balance_of(&self, node: NodeId) -> Result<Sat, GraphError> {
        if node == self.endpoints.0 {
            Ok(self.balances.0)
        } else if node == self.endpoints.1 {
            Ok(self.balances.1)
        } else {
            Err(GraphError::NotAnEndpoint {
                channel: self.id,
                node,
            })
        }
    }

    /// Atomically move `amount` sat from `src`'s share to its peer's.
    ///
    /// All-or-nothing: on any failure the balances are untouched.
    pub fn move_balance(&mut self, src: NodeId, amount: Sat) -> Result<(), GraphError> {
        let available = self.balance_of(src)?;
        if amount > available {
            return Err(GraphError::InsufficientBalance {
                channel: self.id,
                available,
                required: amount,
            });
        }
        if src == self.endpoints.0 {
            self.balances.0 -= amount;
            self.balances.1 += amount;
        } else {
            self.balances.1 -= amount;
            self.balances.0 += amount;
        }
        debug_assert_eq!(self.balances.0 + self.balances.1, self.capacity);
        Ok(())
    }
}
