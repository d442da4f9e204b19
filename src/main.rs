// Main CLI entry point for endor
// Uses clap for argument parsing

use clap::{Arg, Command};
use endor::analyzer::IdorAnalyzer;
use endor::reporting::{export_markdown, render_markdown};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = Command::new("endor")
        .version("1.0.0")
        .about("Heuristic IDOR/BOLA analyzer for OpenAPI/Swagger specifications")
        .after_help("EXAMPLES:\n  endor --input openapi.json\n  endor -i api.yaml --json\n  endor -i openapi.json --markdown-report\n\nThe analyzer is advisory: findings are candidates for human triage, not\nconfirmed vulnerabilities.")
        .arg(Arg::new("input")
            .short('i')
            .long("input")
            .required(true)
            .num_args(1)
            .help("Path to an OpenAPI/Swagger spec file (JSON or YAML)"))
        .arg(Arg::new("json")
            .long("json")
            .action(clap::ArgAction::SetTrue)
            .help("Print the report as JSON instead of Markdown"))
        .arg(Arg::new("markdown_report")
            .long("markdown-report")
            .action(clap::ArgAction::SetTrue)
            .help("Also write the Markdown report to a timestamped file"))
        .get_matches();

    let input = matches.get_one::<String>("input").expect("input is required");
    let json_output = matches.get_flag("json");
    let markdown_report = matches.get_flag("markdown_report");

    let bytes = std::fs::read(input).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", input, e);
        std::process::exit(1);
    });

    let analyzer = IdorAnalyzer::new();
    let report = analyzer.analyze_bytes(&bytes).unwrap_or_else(|e| {
        eprintln!("Failed to analyze {}: {}", input, e);
        std::process::exit(1);
    });

    println!(
        "Flagged {} operation(s) in {}.",
        report.vulnerabilities.len(),
        input
    );

    if json_output {
        match serde_json::to_string_pretty(&report.to_value()) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", render_markdown(&report));
    }

    if markdown_report {
        match export_markdown(&report) {
            Ok(filename) => println!("Wrote {}", filename),
            Err(e) => eprintln!("Failed to write markdown report: {}", e),
        }
    }
}
