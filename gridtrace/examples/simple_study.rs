//! Simple study example: resolve a project file and print the results.

use gridtrace::prelude::*;
use std::path::Path;

fn main() -> Result<(), GridTraceError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/ring_main.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_study [path/to/project.json]");
        std::process::exit(1);
    }

    let result = GridTraceCore::study_file(path)?;

    println!("Study results for: {}", result.file.display());
    println!(
        "Nodes: {} ({} virtual), ports: {}",
        result.topology.node_count, result.topology.virtual_count, result.topology.port_count
    );
    println!();

    for binding in &result.topology.ports {
        println!("  {} -> node {}", binding.port, binding.node);
    }

    for device in &result.devices {
        println!();
        println!(
            "Device: {} ({} upper / {} lower points)",
            device.title, device.upper_points, device.lower_points
        );
        if device.degenerate {
            println!("  Degenerate curves; nothing to plot.");
        } else if let Some(ref region) = device.region {
            println!("  Envelope polygon: {} points", region.polygon.len());
        }
    }

    Ok(())
}
