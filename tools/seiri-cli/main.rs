use clap::Parser;
use seiri::prelude::*;
use std::fs;
use std::time::Instant;

/// A deterministic validation, repair and layout engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow graph JSON file (synthesis payload shape)
    graph_path: String,

    /// Optional path to write the converged graph as JSON
    #[arg(short, long)]
    output: Option<String>,

    /// Optional path to write the converged graph as a bincode artifact
    #[arg(short, long)]
    artifact: Option<String>,

    /// Maximum validate/repair iterations
    #[arg(long, default_value_t = 2)]
    max_repair_passes: usize,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let graph_json = fs::read_to_string(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            &cli.graph_path, e
        ))
    });
    let load_duration = load_start.elapsed();

    // --- 2. Parsing ---
    let ui_graph: UiGraph = serde_json::from_str(&graph_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));
    let node_count = ui_graph.nodes.len();

    // --- 3. Conversion ---
    println!("\nConverting workflow graph ({} nodes)...", node_count);
    let convert_start = Instant::now();
    let engine = FlowEngine::builder()
        .with_max_repair_passes(cli.max_repair_passes)
        .build();
    let outcome = engine
        .convert(ui_graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    let convert_duration = convert_start.elapsed();

    // --- 4. Report ---
    let report = outcome.report();
    if !report.fixes_applied.is_empty() {
        println!("\nApplied fixes:");
        for fix in &report.fixes_applied {
            println!("  - {}", fix);
        }
    }
    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    let graph = match outcome {
        ConversionOutcome::Converged(graph) => graph,
        ConversionOutcome::Exhausted { report, .. } => {
            eprintln!("\nGraph could not be repaired:");
            for error in &report.errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(1);
        }
    };

    println!(
        "\nConversion successful! {} nodes, {} connections positioned.",
        graph.nodes.len(),
        graph.connections.len()
    );

    // --- 5. Outputs ---
    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&graph)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
        fs::write(path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
        });
        println!("Wrote converged graph to '{}'", path);
    }
    if let Some(path) = &cli.artifact {
        graph.save(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write artifact '{}': {}", path, e))
        });
        println!("Wrote artifact to '{}'", path);
    }

    // --- 6. Summary ---
    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:   {:?}", load_duration);
    println!("Conversion:     {:?}", convert_duration);
    println!("---------------------------");
    println!("Total:          {:?}", total_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
