//! CLI: Build a topology from a JSON description and print its structure.
//!
//! Usage: `describe_topology [OPTIONS] <path-to-topology-json>`
//! Example: describe_topology tests/integration/word_count.json
//!
//! Only the built-in processor types (`pass_through`) and store types
//! (`in_memory`) are available from the command line.
//!
//! Set RUST_LOG=streamweave_topology=debug to see each node as it resolves.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process;
use streamweave_topology::description_io::load_description;
use streamweave_topology::{ProcessorRegistry, TopologySummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build a topology from a JSON description and print its structure.
#[derive(Parser, Debug)]
#[command(name = "describe_topology")]
#[command(after_help = r#"Environment variables (override flags when set):
  TOPOLOGY_OUTPUT   Output format: "text" or "json".

Examples:
  describe_topology tests/integration/word_count.json
  describe_topology --json tests/integration/word_count.json"#)]
struct Args {
  /// Print the summary as JSON instead of text. Overridden by TOPOLOGY_OUTPUT if set.
  #[arg(long)]
  json: bool,

  /// Path to the topology description file
  #[arg(value_name = "path-to-topology-json")]
  path: PathBuf,
}

fn print_text(summary: &TopologySummary) {
  println!("Topology built.");
  println!("  Topics: {:?}", summary.topics);
  println!("  Stores: {:?}", summary.stores);
  for node in &summary.nodes {
    println!(
      "  {} ({}) <- {:?} -> {:?} stores={:?}",
      node.name, node.kind, node.parents, node.children, node.stores
    );
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Env var overrides the flag.
  let json = match env::var("TOPOLOGY_OUTPUT") {
    Ok(v) => v.eq_ignore_ascii_case("json"),
    Err(_) => args.json,
  };
  info!(path = %args.path.display(), json, "describe_topology starting");

  let description = match load_description(&args.path) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Error reading {}: {}", args.path.display(), e);
      process::exit(1);
    }
  };

  let topology = match description
    .to_builder(&ProcessorRegistry::with_defaults())
    .and_then(|builder| builder.build())
  {
    Ok(t) => t,
    Err(e) => {
      eprintln!("Topology error: {}", e);
      process::exit(1);
    }
  };

  let summary = topology.summary();
  if json {
    match serde_json::to_string_pretty(&summary) {
      Ok(s) => println!("{}", s),
      Err(e) => {
        eprintln!("Error encoding summary: {}", e);
        process::exit(1);
      }
    }
  } else {
    print_text(&summary);
  }
}
