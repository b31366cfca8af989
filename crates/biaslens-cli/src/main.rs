//! biaslens CLI: Command-line interface for the bias-detection client

use biaslens_engine::{default_config_path, ApiClient, Config};
use clap::{Parser, Subcommand};

/// Interactive client for a bias-detection API
#[derive(Parser)]
#[command(name = "biaslens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Initialize .biaslens/ directory and config
    Init,

    /// One-shot: generate a response, optionally evaluate its bias
    Ask {
        /// Prompt to submit
        prompt: String,

        /// Also request a bias evaluation of the response
        #[arg(long)]
        evaluate: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Tui) => {
            // Default: open TUI
            let config = Config::load_or_default(&default_config_path());
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(biaslens_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Init) => {
            cmd_init();
        }
        Some(Commands::Ask {
            prompt,
            evaluate,
            json,
        }) => {
            cmd_ask(&prompt, evaluate, json);
        }
    }
}

fn cmd_init() {
    let config_path = default_config_path();

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }

    let config = Config::default();
    match config.save(&config_path) {
        Ok(()) => {
            println!("Created {}", config_path.display());
            println!(
                "Edit it to point at your bias-detection API (default: {})",
                config.api_base_url
            );
        }
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_ask(prompt: &str, evaluate: bool, json: bool) {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Please enter a prompt");
        std::process::exit(1);
    }

    let config = Config::load_or_default(&default_config_path());
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    rt.block_on(async {
        let client = match ApiClient::new(&config) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };

        let response = match client.generate(prompt).await {
            Ok(response) => response,
            Err(e) => {
                eprintln!("Error generating response: {e}");
                std::process::exit(1);
            }
        };

        if !evaluate {
            if json {
                let output = serde_json::json!({
                    "prompt": prompt,
                    "response": response,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).expect("failed to serialize")
                );
            } else {
                println!("{response}");
            }
            return;
        }

        match client.evaluate(prompt, &response).await {
            Ok(evaluation) => {
                if json {
                    let output = serde_json::json!({
                        "prompt": prompt,
                        "response": response,
                        "bias_evaluation": evaluation.label.as_str(),
                        "saved_to": evaluation.saved_to,
                    });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&output).expect("failed to serialize")
                    );
                } else {
                    println!("{response}");
                    println!();
                    println!("Evaluation: {}", evaluation.label);
                    println!("Saved to: {}", evaluation.saved_to);
                }
            }
            Err(e) => {
                eprintln!("Error evaluating bias: {e}");
                std::process::exit(1);
            }
        }
    });
}
