//! GridTrace CLI - schematic topology and protection coordination studies
//! from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use gridtrace::{DeviceReport, GridTraceCore, StudyResult, TopologyReport};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gridtrace")]
#[command(about = "Electrical schematic topology and protection coordination tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a project's electrical topology
    Resolve {
        /// Path to a project JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Evaluate protective-device curves and coordination regions
    Curves {
        /// Path to a project JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only evaluate the device with this title
        #[arg(long)]
        device: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Full study: topology plus every protective device
    Study {
        /// Path to a project JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for pipelines
    Json,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Resolve { file, format } => handle_resolve(&file, format),
        Commands::Curves {
            file,
            device,
            format,
        } => handle_curves(&file, device.as_deref(), format),
        Commands::Study { file, format } => handle_study(&file, format),
    };

    process::exit(exit_code);
}

fn handle_resolve(file: &PathBuf, format: OutputFormat) -> i32 {
    match GridTraceCore::resolve_file(file) {
        Ok(report) => {
            match format {
                OutputFormat::Human => print_topology(&report),
                OutputFormat::Json => print_json(&report),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_curves(file: &PathBuf, device: Option<&str>, format: OutputFormat) -> i32 {
    let result = match GridTraceCore::study_file(file) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let devices: Vec<&DeviceReport> = match device {
        Some(title) => {
            let matched: Vec<_> = result.devices.iter().filter(|d| d.title == title).collect();
            if matched.is_empty() {
                eprintln!("Error: no device titled '{}' in {}", title, file.display());
                return 1;
            }
            matched
        }
        None => result.devices.iter().collect(),
    };

    match format {
        OutputFormat::Human => {
            for report in devices {
                print_device(report);
            }
        }
        OutputFormat::Json => {
            print_json(&devices);
        }
    }
    0
}

fn handle_study(file: &PathBuf, format: OutputFormat) -> i32 {
    match GridTraceCore::study_file(file) {
        Ok(result) => {
            match format {
                OutputFormat::Human => print_study(&result),
                OutputFormat::Json => print_json(&result),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn print_topology(report: &TopologyReport) {
    println!("Topology");
    println!("{}", "─".repeat(60));
    println!("  Nodes:   {}", report.node_count);
    println!("  Virtual: {}", report.virtual_count);
    println!("  Ports:   {}", report.port_count);

    if !report.ports.is_empty() {
        println!("\n  Port bindings:");
        for binding in &report.ports {
            println!("    {} -> node {}", binding.port, binding.node);
        }
    }
    if !report.nodes.is_empty() {
        println!("\n  Element bindings:");
        for binding in &report.nodes {
            let marker = if binding.is_virtual { " (virtual)" } else { "" };
            println!("    {} -> node {}{}", binding.local, binding.node, marker);
        }
    }
}

fn print_device(report: &DeviceReport) {
    println!("\nDevice: {}", report.title);
    println!("{}", "─".repeat(60));
    println!(
        "  Samples: {} upper, {} lower",
        report.upper_points, report.lower_points
    );
    if report.degenerate {
        println!("  Degenerate curves; no coordination region.");
    } else if let Some(ref region) = report.region {
        println!("  Region: {} polygon points", region.polygon.len());
        if let (Some(first), Some(last)) = (region.polygon.first(), region.polygon.last()) {
            println!(
                "    from {:.1} A / {:.3} s to {:.1} A / {:.3} s",
                first.current, first.time, last.current, last.time
            );
        }
    }
    for trace in &report.graph.traces {
        println!("  Trace: {} ({} points)", trace.title, trace.currents.len());
    }
}

fn print_study(result: &StudyResult) {
    println!("File: {}", result.file.display());
    print_topology(&result.topology);
    for device in &result.devices {
        print_device(device);
    }
    println!("\nSummary:");
    println!("  Nodes:   {}", result.topology.node_count);
    println!("  Devices: {}", result.devices.len());
    println!(
        "  Degenerate devices: {}",
        result.devices.iter().filter(|d| d.degenerate).count()
    );
}
