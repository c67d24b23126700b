// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use cfcore::component::BuilderRegistry;
use cfcore::config::load_and_validate_tree_config;
use std::env;
use std::fs;
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <tree.yaml|tree.json> [signal.xml ...]", args[0]);
        eprintln!("Example: {} configs/demo-tree.yaml signals/create-fields.xml signals/list-tree.xml", args[0]);
        process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2..]) {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}

/// Build the tree described by `config_path`, then dispatch each signal
/// document in order, printing every reply.
fn run(config_path: &str, signal_files: &[String]) -> Result<()> {
    let registry = BuilderRegistry::global();
    let config = load_and_validate_tree_config(config_path, &registry)
        .with_context(|| format!("loading {}", config_path))?;
    let mut tree = config.build_with(registry)?;
    info!(components = tree.len(), "Built tree from {}", config_path);

    println!("🌳 Component tree");
    println!("═════════════════");
    print!("{}", tree.render(tree.root()));

    for file in signal_files {
        let document = fs::read_to_string(file).with_context(|| format!("reading {}", file))?;
        let reply = tree
            .dispatch_xml(&document)
            .with_context(|| format!("dispatching {}", file))?;
        println!();
        println!("📨 {}", file);
        print!("{}", reply);
    }

    if !signal_files.is_empty() {
        println!();
        println!("🌳 Final tree");
        println!("═════════════");
        print!("{}", tree.render(tree.root()));
    }
    Ok(())
}
