use railsim_graph::ChannelGraph;

use crate::metrics::group_sat;

/// One line per participant with its on-chain wallet balance.
pub fn wallet_report(graph: &ChannelGraph) -> String {
    graph
        .nodes()
        .iter()
        .map(|n| format!("  {}: {} sat", n.name(), group_sat(n.balance)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per channel with the balance split seen by each endpoint.
///
/// The arena holds each undirected channel once, so no deduplication is
/// needed.
pub fn channel_report(graph: &ChannelGraph) -> String {
    let lines: Vec<String> = graph
        .channels()
        .iter()
        .filter_map(|ch| {
            let (a, b) = ch.endpoints();
            let name_a = graph.node(a).ok()?.name().to_string();
            let name_b = graph.node(b).ok()?.name().to_string();
            Some(format!(
                "  {} <-> {}: {}/{} sat (cap {})",
                name_a,
                name_b,
                group_sat(ch.balance_of(a).ok()?),
                group_sat(ch.balance_of(b).ok()?),
                group_sat(ch.capacity()),
            ))
        })
        .collect();
    if lines.is_empty() {
        "  (no channels)".into()
    } else {
        lines.join("\n")
    }
}
