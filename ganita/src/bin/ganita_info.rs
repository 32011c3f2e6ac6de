//! Diagnostic CLI: compiled backend, CPU features and camera matrices.
//!
//! # Usage
//!
//! ```bash
//! ganita_info
//! ganita_info --config configs/camera.yaml --verbose
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sysinfo::System;

use ganita::{ACTIVE_BACKEND, CameraConfig, CpuFeatures, Mat4f};

/// Report the compiled math backend and optional camera matrices
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let features = CpuFeatures::detect();
    features.log_report();

    let mut sys = System::new();
    sys.refresh_cpu_all();
    if let Some(cpu) = sys.cpus().first() {
        println!("CPU:      {} ({} logical)", cpu.brand(), sys.cpus().len());
    }
    println!("Backend:  {}", ACTIVE_BACKEND);
    let names = features.supported();
    if names.is_empty() {
        println!("Features: (none)");
    } else {
        println!("Features: {}", names.join(" "));
    }

    let Some(path) = args.config else {
        return;
    };

    let camera = match CameraConfig::load(&path) {
        Ok(camera) => camera,
        Err(e) => {
            eprintln!("Error: failed to load {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    print_matrix("Projection", &camera.projection_matrix());
    print_matrix("View", &camera.view_matrix());
    print_matrix("View-projection", &camera.view_projection());
}

fn print_matrix(title: &str, m: &Mat4f) {
    println!();
    println!("{}:", title);
    for row in m.to_rows() {
        println!(
            "  [{:>10.4} {:>10.4} {:>10.4} {:>10.4}]",
            row[0], row[1], row[2], row[3]
        );
    }
}
