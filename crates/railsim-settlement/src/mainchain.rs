use railsim_core::{EventClock, NodeId, PaymentBook, PaymentId, PaymentMethod, Sat};
use railsim_graph::ChannelGraph;

use crate::error::PaymentError;

/// Base-ledger block interval, in milliseconds of simulated time.
pub const LEDGER_BLOCK_TIME_MS: u64 = 600_000;

/// The base-ledger settlement rail.
///
/// No routing and no channels: a payment debits the sender's on-chain
/// wallet by `amount + fee` and credits the receiver `amount`, with a
/// fixed fee-market fee and a confirmation delay of several blocks.
#[derive(Debug, Clone)]
pub struct Mainchain {
    /// Fee rate in sat per virtual byte.
    pub fee_rate_sat_per_vb: Sat,
    /// Transaction size in virtual bytes (simple P2WPKH spend).
    pub tx_size_vb: Sat,
    /// Blocks until a payment counts as final.
    pub conf_target_blocks: u64,
    /// Block interval in milliseconds.
    pub block_time_ms: u64,
}

impl Default for Mainchain {
    fn default() -> Self {
        Self {
            fee_rate_sat_per_vb: 25,
            tx_size_vb: 250,
            conf_target_blocks: 6,
            block_time_ms: LEDGER_BLOCK_TIME_MS,
        }
    }
}

impl Mainchain {
    /// Flat fee every payment pays, independent of amount.
    pub fn fee(&self) -> Sat {
        self.tx_size_vb * self.fee_rate_sat_per_vb
    }

    /// Confirmation latency every payment incurs.
    pub fn latency_ms(&self) -> u64 {
        self.conf_target_blocks * self.block_time_ms
    }

    /// Settle `amount` sat on-chain from `source` to `destination`.
    ///
    /// Wallet balances move synchronously; completion is scheduled after
    /// the confirmation delay.
    pub fn send_payment(
        &self,
        graph: &mut ChannelGraph,
        clock: &mut EventClock,
        book: &mut PaymentBook,
        source: NodeId,
        destination: NodeId,
        amount: Sat,
    ) -> Result<PaymentId, PaymentError> {
        let fee = self.fee();
        // Saturating: an amount near Sat::MAX must be rejected as
        // unaffordable, not wrap past the wallet check.
        let required = amount.saturating_add(fee);
        let available = graph.node(source)?.balance;
        if available < required {
            tracing::debug!(%source, %destination, amount, available, required,
                "on-chain payment rejected: insufficient funds");
            return Err(PaymentError::InsufficientFunds {
                available,
                required,
            });
        }

        let latency_ms = self.latency_ms();
        let id = book.record(
            source,
            destination,
            amount,
            clock.now(),
            PaymentMethod::Onchain,
            fee,
            latency_ms,
        );
        graph.node_mut(source)?.balance -= required;
        graph.node_mut(destination)?.balance += amount;
        graph.node_mut(source)?.sent.push(id);
        graph.node_mut(destination)?.received.push(id);
        clock.schedule(latency_ms, id);

        tracing::info!(payment_id = %id, %source, %destination, amount, fee, latency_ms,
            "on-chain payment committed");
        Ok(id)
    }
}
