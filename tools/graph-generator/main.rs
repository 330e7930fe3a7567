use clap::Parser;
use rand::rngs::ThreadRng;
use rand::Rng;
use serde_json::json;
use std::fs;

/// A CLI tool to generate deliberately messy workflow graphs for exercising
/// the conversion pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// The number of nodes to generate
    #[arg(long, default_value_t = 8)]
    nodes: usize,

    /// Leave out the end node so autofix has to synthesize one
    #[arg(long)]
    drop_end: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.nodes == 0 {
        eprintln!("Error: --nodes must be at least 1");
        std::process::exit(1);
    }

    println!("Generating a messy graph with {} node(s)...", cli.nodes);

    let mut nodes = Vec::new();
    for index in 0..cli.nodes {
        nodes.push(generate_node(&mut rng, index, cli.nodes));
    }
    if !cli.drop_end {
        nodes.push(json!({
            "id": "finish",
            "kind": "end",
            "title": "Finish",
            "endStatus": "success",
        }));
    }

    let payload = json!({ "nodes": nodes });
    let json_output = serde_json::to_string_pretty(&payload)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved graph to '{}'",
        cli.output
    );
    Ok(())
}

/// Generates one node with a randomly unreliable follow-up reference: a
/// positional index, a real id, or garbage.
fn generate_node(rng: &mut ThreadRng, index: usize, total: usize) -> serde_json::Value {
    let kind = if index == 0 {
        "webhook"
    } else if rng.random_bool(0.25) {
        "condition"
    } else {
        "task"
    };

    let id = format!("step_{}", index + 1);
    let title = format!("Step {}", index + 1);

    // 1-based position of the next node in the batch.
    let next_position = index + 2;
    let reference = match rng.random_range(0..4u8) {
        // Numeric positional reference, the common synthesis quirk.
        0 | 1 => json!(next_position.to_string()),
        // A proper id.
        2 if next_position <= total => json!(format!("step_{}", next_position)),
        2 => json!("finish"),
        // Garbage.
        _ => json!(format!("ghost_{}", rng.random_range(100..999))),
    };

    let mut node = json!({
        "id": id,
        "kind": kind,
        "title": title,
        "nextOnSuccess": reference,
    });
    if kind == "condition" && rng.random_bool(0.5) {
        // Half the conditions come without a failure branch on purpose.
        node["nextOnFailure"] = json!("finish");
    }
    println!("-> Generated '{}' ({})", node["id"].as_str().unwrap_or("?"), kind);
    node
}
