use railsim_core::{PaymentBook, PaymentId, Sat};
use railsim_graph::ChannelGraph;
use railsim_settlement::PaymentError;

/// Format a sat amount with thousands separators.
pub(crate) fn group_sat(n: Sat) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Aggregates the outcome of one workload run on one rail.
#[derive(Debug, Default)]
pub struct Metrics {
    payments: Vec<PaymentId>,
    failed: usize,
}

impl Metrics {
    /// Empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a payment outcome; failures are counted, not stored.
    pub fn add(&mut self, outcome: Result<PaymentId, PaymentError>) {
        match outcome {
            Ok(id) => self.payments.push(id),
            Err(err) => {
                tracing::debug!(%err, "payment failed");
                self.failed += 1;
            }
        }
    }

    /// Successful payment handles, in submission order.
    pub fn payments(&self) -> &[PaymentId] {
        &self.payments
    }

    /// Number of successful payments.
    pub fn success_count(&self) -> usize {
        self.payments.len()
    }

    /// Number of failed payments.
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    /// One line per successful payment, truncated at `max_lines`.
    pub fn payment_log(&self, book: &PaymentBook, graph: &ChannelGraph, max_lines: usize) -> String {
        let mut lines: Vec<String> = self
            .payments
            .iter()
            .take(max_lines)
            .filter_map(|&id| book.get(id))
            .map(|p| {
                let src = graph
                    .node(p.source)
                    .map(|n| n.name().to_string())
                    .unwrap_or_else(|_| p.source.to_string());
                let dst = graph
                    .node(p.destination)
                    .map(|n| n.name().to_string())
                    .unwrap_or_else(|_| p.destination.to_string());
                format!("{:>4} -- {:>11} sat --> {:<4}", src, group_sat(p.amount), dst)
            })
            .collect();
        if self.payments.len() > max_lines {
            lines.push("  ...".into());
        }
        if lines.is_empty() {
            "  (no successful payments)".into()
        } else {
            lines.join("\n")
        }
    }

    /// Summary table: counts, volume, fees, and latency statistics.
    pub fn summary_table(&self, book: &PaymentBook) -> String {
        let records: Vec<_> = self
            .payments
            .iter()
            .filter_map(|&id| book.get(id))
            .collect();

        let moved: Sat = records.iter().map(|p| p.amount).sum();
        let fee: Sat = records.iter().map(|p| p.fee).sum();
        let mut latencies_s: Vec<f64> =
            records.iter().map(|p| p.latency_ms as f64 / 1_000.0).collect();
        latencies_s.sort_by(|a, b| a.total_cmp(b));

        let fee_per_ksat = if moved > 0 {
            format!("{:.2}", fee as f64 / moved as f64 * 1_000.0)
        } else {
            "0".into()
        };
        let mean_latency = if latencies_s.is_empty() {
            "0".into()
        } else {
            let mean = latencies_s.iter().sum::<f64>() / latencies_s.len() as f64;
            format!("{mean:.3}")
        };
        let p95_latency = match latencies_s.len() {
            0 => "0".into(),
            n => {
                let idx = ((n as f64 * 0.95).ceil() as usize).max(1) - 1;
                format!("{:.3}", latencies_s[idx])
            }
        };

        let rows = [
            ("payments", self.success_count().to_string()),
            ("failed", self.failed.to_string()),
            ("satoshi moved", group_sat(moved)),
            ("total fee (sat)", group_sat(fee)),
            ("avg fee per ksat", fee_per_ksat),
            ("mean latency (s)", mean_latency),
            ("p95 latency (s)", p95_latency),
        ];
        rows.iter()
            .map(|(k, v)| format!("{k:<18} {v:>12}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
