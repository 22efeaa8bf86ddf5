use railsim_core::{ChannelId, EventClock, NodeId, PaymentBook, PaymentId, PaymentMethod, Sat};
use railsim_graph::ChannelGraph;
use railsim_routing::{find_route, hop_channels};

use crate::error::PaymentError;

/// User-perceived forwarding delay per hop, in milliseconds.
pub const OFFCHAIN_HOP_DELAY_MS: u64 = 200;

/// Per-hop amounts for one multi-hop transfer.
struct HopAmounts {
    /// Amount the upstream node locks on each hop.
    send: Vec<Sat>,
    /// Fee earned by each hop; zero on the final hop.
    fee: Vec<Sat>,
}

/// Backward fee escalation: walk the hops from the one closest to the
/// destination back to the source, growing the forwarded amount by each
/// hop's fee. The destination receives exactly `amount`; the final hop
/// charges nothing.
///
/// Escalated amounts saturate at `Sat::MAX`, which no channel balance
/// can cover, so an overflowing request fails liquidity validation
/// instead of wrapping.
fn escalate_fees(graph: &ChannelGraph, channels: &[ChannelId], amount: Sat) -> HopAmounts {
    let k = channels.len();
    let mut send = vec![0; k];
    let mut fee = vec![0; k];

    let mut to_forward = amount;
    for i in (0..k).rev() {
        let hop_fee = if i == k - 1 {
            0
        } else {
            graph.channel(channels[i]).policy.fee(to_forward)
        };
        fee[i] = hop_fee;
        to_forward = to_forward.saturating_add(hop_fee);
        send[i] = to_forward;
    }

    HopAmounts { send, fee }
}

/// Execute an atomic multi-hop transfer of `amount` sat from `source`
/// to `destination`.
///
/// Finds a route, computes per-hop locked amounts by backward fee
/// escalation, validates liquidity on every hop before touching any
/// balance, then performs the balance moves in forward order. A
/// liquidity failure on any hop leaves every channel untouched,
/// emulating the all-or-nothing commitment real HTLCs provide
/// cryptographically.
///
/// Balance mutation, fee accounting, and the sent/received linkage are
/// all synchronous; only the payment's `completed` timestamp is
/// deferred, scheduled on `clock` at one hop-delay per hop.
pub fn send_payment(
    graph: &mut ChannelGraph,
    clock: &mut EventClock,
    book: &mut PaymentBook,
    source: NodeId,
    destination: NodeId,
    amount: Sat,
) -> Result<PaymentId, PaymentError> {
    let no_route = || PaymentError::NoRoute {
        from: source,
        to: destination,
    };
    let path = find_route(graph, source, destination, amount).ok_or_else(no_route)?;
    let channels = hop_channels(graph, &path).ok_or_else(no_route)?;

    let hops = escalate_fees(graph, &channels, amount);

    // Validate the whole path before mutating anything.
    for (i, &ch) in channels.iter().enumerate() {
        let available = graph.channel(ch).balance_of(path[i])?;
        if available < hops.send[i] {
            tracing::debug!(
                %source, %destination, amount, hop = i,
                available, required = hops.send[i],
                "payment rejected: liquidity shortfall"
            );
            return Err(PaymentError::LiquidityShortfall {
                hop: i,
                available,
                required: hops.send[i],
            });
        }
    }

    // Validation guaranteed sufficiency; these moves cannot fail.
    for (i, &ch) in channels.iter().enumerate() {
        graph.channel_mut(ch).move_balance(path[i], hops.send[i])?;
    }

    let total_fee: Sat = hops.fee.iter().sum();
    let latency_ms = channels.len() as u64 * OFFCHAIN_HOP_DELAY_MS;
    let id = book.record(
        source,
        destination,
        amount,
        clock.now(),
        PaymentMethod::Offchain,
        total_fee,
        latency_ms,
    );
    graph.node_mut(source)?.sent.push(id);
    graph.node_mut(destination)?.received.push(id);
    clock.schedule(latency_ms, id);

    tracing::info!(
        payment_id = %id, %source, %destination, amount,
        fee = total_fee, hops = channels.len(), latency_ms,
        "off-chain payment committed"
    );
    Ok(id)
}
