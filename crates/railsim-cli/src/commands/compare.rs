use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use railsim_core::{EventClock, PaymentBook, SimConfig};
use railsim_graph::ChannelGraph;
use railsim_settlement::Mainchain;
use railsim_sim::{channel_report, make_workload, run_offchain, run_onchain, wallet_report};
use railsim_topology::{build_topology, TopologyConfig};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the number of participants.
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Override the number of workload payments.
    #[arg(long)]
    pub payments: Option<usize>,

    /// Override the attachment degree.
    #[arg(long)]
    pub attachment: Option<usize>,

    /// Override the random seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write every payment record to this file as JSON.
    #[arg(long)]
    pub json_out: Option<PathBuf>,
}

fn load_config(args: &CompareArgs) -> anyhow::Result<SimConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(nodes) = args.nodes {
        cfg.node_count = nodes;
    }
    if let Some(payments) = args.payments {
        cfg.payment_count = payments;
    }
    if let Some(attachment) = args.attachment {
        cfg.attachment_degree = attachment;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    Ok(cfg)
}

pub fn run(args: &CompareArgs) -> anyhow::Result<()> {
    let cfg = load_config(args)?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let mut graph = ChannelGraph::new();
    let nodes = build_topology(&mut graph, &TopologyConfig::from(&cfg), &mut rng)?;
    for &n in &nodes {
        graph.node_mut(n)?.balance = cfg.onchain_funding_sat;
    }

    // One workload, replayed on both rails.
    let workload = make_workload(
        &nodes,
        cfg.payment_count,
        cfg.min_amount_sat,
        cfg.max_amount_sat,
        &mut rng,
    );

    // Each rail runs on its own clock so both latency reports measure
    // from t=0; records share one book.
    let mut book = PaymentBook::new();

    println!("========== BASE LEDGER ==========");
    println!("\nInitial on-chain wallet balances:");
    println!("{}", wallet_report(&graph));

    let chain = Mainchain::default();
    let mut ledger_clock = EventClock::new();
    let onchain = run_onchain(&chain, &mut graph, &mut ledger_clock, &mut book, &workload);

    println!("\n=== On-chain payment log ===");
    println!("{}", onchain.payment_log(&book, &graph, 25));
    println!("\nFinal on-chain wallet balances:");
    println!("{}", wallet_report(&graph));
    println!("\n=== On-chain metrics ===");
    println!("{}", onchain.summary_table(&book));

    println!("\n========== LIGHTNING ==========");
    println!("\nInitial channel balances:");
    println!("{}", channel_report(&graph));

    let mut channel_clock = EventClock::new();
    let offchain = run_offchain(&mut graph, &mut channel_clock, &mut book, &workload);

    println!("\n=== Lightning payment log ===");
    println!("{}", offchain.payment_log(&book, &graph, 25));
    println!("\nFinal channel balances:");
    println!("{}", channel_report(&graph));
    println!("\n=== Lightning metrics ===");
    println!("{}", offchain.summary_table(&book));

    // Let every deferred completion fire before reporting it.
    ledger_clock.run_to_completion(&mut book);
    channel_clock.run_to_completion(&mut book);
    let completed = book.iter().filter(|p| p.is_completed()).count();
    println!(
        "\n{} of {} payments completed (ledger horizon {} ms, lightning horizon {} ms)",
        completed,
        book.len(),
        ledger_clock.now(),
        channel_clock.now(),
    );

    if let Some(path) = &args.json_out {
        let records: Vec<_> = book.iter().collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(path, json)
            .with_context(|| format!("writing payment records to {}", path.display()))?;
        println!("wrote {} payment records to {}", records.len(), path.display());
    }

    Ok(())
}
