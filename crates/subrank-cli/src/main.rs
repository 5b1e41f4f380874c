// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;
use subrank::{GraphView, RankReport, Subrank};

mod args;

use args::{DirectionArg, ModeArg, OutputFormat, ValueKind, parse_value};

#[derive(Parser)]
#[command(name = "subrank")]
#[command(about = "Subgraph PageRank over an in-memory property graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the subgraph around a seed and rank it
    Rank {
        /// Path to a JSON-lines graph file
        #[arg(long)]
        graph: PathBuf,
        /// Property key matched against --value to select seed vertices
        #[arg(long, default_value = "number")]
        key: String,
        /// Property value identifying the seed vertices
        #[arg(long)]
        value: String,
        /// How --value is parsed
        #[arg(long, value_enum, default_value_t = ValueKind::Auto)]
        value_type: ValueKind,
        /// Hops to expand from the seed
        #[arg(long, default_value_t = 2)]
        hops: usize,
        /// PageRank iterations after the seeding superstep
        #[arg(long, default_value_t = 1)]
        iterations: u32,
        /// Rows printed per mode
        #[arg(long, default_value_t = 20)]
        top: usize,
        #[arg(long, value_enum, default_value_t = ModeArg::All)]
        mode: ModeArg,
        /// Edge direction followed while extracting and ranking
        #[arg(long, value_enum, default_value_t = DirectionArg::Both)]
        direction: DirectionArg,
        /// Damping factor; ranks are not damped when unset
        #[arg(long)]
        damping: Option<f64>,
        /// Stop once the total rank change drops below this value
        #[arg(long)]
        tolerance: Option<f64>,
        /// Worker threads (defaults to available parallelism)
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print vertex and edge counts of a graph file
    Stats {
        /// Path to a JSON-lines graph file
        #[arg(long)]
        graph: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            graph,
            key,
            value,
            value_type,
            hops,
            iterations,
            top,
            mode,
            direction,
            damping,
            tolerance,
            threads,
            format,
        } => {
            let value = parse_value(&value, value_type)?;
            let db = Subrank::in_memory();
            db.load_path(&graph)?;

            let mut builder = db
                .rank()
                .seed(&key, value)
                .hops(hops)
                .iterations(iterations)
                .top_k(top)
                .direction(direction.into());
            if let Some(d) = damping {
                builder = builder.damping(d);
            }
            if let Some(t) = tolerance {
                builder = builder.tolerance(t);
            }
            if let Some(n) = threads {
                builder = builder.parallelism(n);
            }
            let reports = builder.run_modes(&mode.modes())?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
                OutputFormat::Table => {
                    for report in &reports {
                        print_report(report);
                    }
                }
            }
        }
        Commands::Stats { graph } => {
            let db = Subrank::in_memory();
            db.load_path(&graph)?;
            let store = db.graph().read();
            println!("V: {}", store.vertex_count());
            println!("E: {}", store.edge_count());
        }
    }

    Ok(())
}

fn print_report(report: &RankReport) {
    println!(
        "{} {}",
        "Mode:".bold(),
        report.mode.to_string().green().bold()
    );
    println!(
        "Subgraph: {} vertices, {} edges in {} supersteps ({:?})",
        report.subgraph_vertices,
        report.subgraph_edges,
        report.stats.supersteps,
        report.stats.elapsed
    );

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("#").style_spec("bf"),
        Cell::new("Vid").style_spec("bf"),
        Cell::new("Rank").style_spec("bf"),
        Cell::new("Properties").style_spec("bf"),
    ]));
    for (i, row) in report.table.rows().iter().enumerate() {
        let mut keys: Vec<&String> = row.properties.keys().collect();
        keys.sort();
        let props = keys
            .into_iter()
            .map(|k| format!("{k}={}", row.properties[k]))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(Row::new(vec![
            Cell::new(&(i + 1).to_string()),
            Cell::new(&row.vid.to_string()),
            Cell::new(&format!("{:.6}", row.rank)),
            Cell::new(&props),
        ]));
    }
    table.printstd();

    println!("V: {}", report.table.vertex_count());
    println!("E: {}", report.table.edge_count());
    println!();
}
