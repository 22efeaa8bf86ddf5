use clap::Args;

use railsim_core::{EventClock, PaymentBook, Sat};
use railsim_graph::ChannelGraph;
use railsim_settlement::send_payment;
use railsim_sim::{channel_report, Metrics};

#[derive(Args, Debug)]
pub struct LineArgs {
    /// Payment amount in sat.
    #[arg(long, default_value_t = 200_000)]
    pub amount: Sat,

    /// Capacity of each channel in sat.
    #[arg(long, default_value_t = 2_000_000)]
    pub capacity: Sat,
}

/// Build an A–B–C–D–E line and push one payment from A to E.
pub fn run(args: &LineArgs) -> anyhow::Result<()> {
    let mut graph = ChannelGraph::new();
    let nodes: Vec<_> = (0..5u8)
        .map(|i| graph.add_node(((b'A' + i) as char).to_string()))
        .collect();
    for pair in nodes.windows(2) {
        graph.connect(pair[0], pair[1], args.capacity)?;
    }

    println!("Initial channel balances:");
    println!("{}", channel_report(&graph));

    let mut clock = EventClock::new();
    let mut book = PaymentBook::new();
    let mut metrics = Metrics::new();

    let outcome = send_payment(
        &mut graph,
        &mut clock,
        &mut book,
        nodes[0],
        nodes[4],
        args.amount,
    );
    if let Err(err) = &outcome {
        println!("\nPayment failed: {err}");
    }
    metrics.add(outcome);

    clock.run_to_completion(&mut book);

    println!("\n=== Lightning payment log ===");
    println!("{}", metrics.payment_log(&book, &graph, 25));
    println!("\nFinal channel balances:");
    println!("{}", channel_report(&graph));
    println!("\n=== Lightning metrics ===");
    println!("{}", metrics.summary_table(&book));

    Ok(())
}
