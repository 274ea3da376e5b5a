//! Seqgen - synchronization sequence generator
//!
//! Entry point for the command-line driver.

use anyhow::{bail, Result};
use seqgen::config::{self, JobConfig};
use std::path::PathBuf;
use tracing::error;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("seqgen=info".parse()?),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut preset_name: Option<String> = None;
    let mut output: Option<PathBuf> = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--list" | "-l" => {
                list_presets();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("seqgen {} ({})", seqgen::VERSION, seqgen::BUILD_DATE);
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--config requires a file path");
                };
                config_path = Some(PathBuf::from(path));
                i += 2;
                continue;
            }
            "--preset" | "-p" => {
                let Some(name) = args.get(i + 1) else {
                    bail!("--preset requires a preset name");
                };
                preset_name = Some(name.clone());
                i += 2;
                continue;
            }
            "--output" | "-o" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--output requires a file path");
                };
                output = Some(PathBuf::from(path));
                i += 2;
                continue;
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                bail!("unknown argument {}", arg);
            }
        }
    }

    let mut job = match (config_path, preset_name) {
        (Some(path), None) => JobConfig::load(&path)?,
        (None, Some(name)) => match config::preset(&name) {
            Some(job) => job,
            None => {
                eprintln!("Unknown preset: {}", name);
                list_presets();
                bail!("unknown preset {}", name);
            }
        },
        (Some(_), Some(_)) => bail!("--config and --preset are mutually exclusive"),
        (None, None) => {
            print_help();
            return Ok(());
        }
    };

    if let Some(path) = output {
        job.output = path;
    }

    match seqgen::job::run(&job) {
        Ok(report) => {
            println!(
                "Wrote {} {} samples to {}",
                report.length,
                report.kind,
                report.output.display()
            );
            if let Some(ones) = report.ones {
                println!("  ones: {}, zeros: {}", ones, report.length - ones);
            }
            if let Some(cycled) = report.has_cycled {
                println!("  full register cycle: {}", if cycled { "yes" } else { "no" });
            }
            if let Some(magnitude) = report.mean_magnitude {
                println!("  mean magnitude: {:.12}", magnitude);
            }
            Ok(())
        }
        Err(e) => {
            error!("Job failed: {:#}", e);
            Err(e)
        }
    }
}

fn print_help() {
    println!("Usage: seqgen [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config PATH    Run the job described by a JSON config file");
    println!("  -p, --preset NAME    Run a built-in job");
    println!("  -o, --output PATH    Override the output file");
    println!("  -l, --list           List built-in jobs");
    println!("  -v, --version        Show version");
    println!("  -h, --help           Show this help");
    println!();
    println!("Examples:");
    println!("  seqgen --preset gold-8 -o goldseq.txt");
    println!("  seqgen --config jobs/zc.json");
}

fn list_presets() {
    println!("Built-in jobs:");
    for (name, job) in config::presets() {
        println!(
            "  {:<10} {:<11} -> {}",
            name,
            job.sequence.kind(),
            job.output.display()
        );
    }
}
