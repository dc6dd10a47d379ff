//! Stock Compare CLI
//!
//! An interactive command-line tool comparing two stocks' closing prices.
//!
//! # Usage
//!
//! ```bash
//! # Optional: enables /summary
//! export OPENAI_API_KEY="sk-..."
//! # Optional: any OpenAI-compatible endpoint and model
//! export OPENAI_API_BASE="http://localhost:1234/v1"
//! export OPENAI_MODEL="your-model-name"
//!
//! cargo run --bin stock-compare -p compare-stock
//! ```

use compare_llm::providers::openai::API_BASE_ENV;
use compare_llm::providers::{OpenAIConfig, OpenAIProvider};
use compare_stock::interface::{CompareRepl, Command, Reply, render};
use compare_stock::{
    CachedSource, CompareConfig, MarketDataSource, SessionController, SessionState, Summarizer,
    YahooFinanceClient,
};
use compare_utils::Config;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

fn print_banner(app_name: &str) {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                        Stock Compare                         ║
║                                                              ║
║  Set two symbols and a date range, then /submit to compare   ║
║  their closing prices. /summary asks for a written review.   ║
╚══════════════════════════════════════════════════════════════╝
  ({app_name})
"
    );
}

fn load_config() -> anyhow::Result<CompareConfig> {
    let mut builder = CompareConfig::builder().with_env_api_key();
    if let Ok(model) = env::var("OPENAI_MODEL") {
        builder = builder.model(model);
    }
    Ok(builder.build()?)
}

fn build_summarizer(config: &CompareConfig) -> anyhow::Result<Option<Summarizer>> {
    let Some(api_key) = config.openai_api_key.as_deref() else {
        return Ok(None);
    };
    if !config.has_api_key() {
        return Ok(None);
    }

    let mut openai_config =
        OpenAIConfig::new(api_key).with_timeout(config.request_timeout.as_secs());
    if let Ok(api_base) = env::var(API_BASE_ENV) {
        openai_config = openai_config.with_api_base(api_base);
    }

    println!("Configuration:");
    println!("  API Base: {}", openai_config.api_base);
    println!("  Model: {}", config.model);
    println!();

    let provider = Arc::new(OpenAIProvider::with_config(openai_config)?);
    Ok(Some(
        Summarizer::new(provider, config.model.clone()).with_max_tokens(config.max_summary_tokens),
    ))
}

fn build_source(config: &CompareConfig) -> Box<dyn MarketDataSource> {
    let client = YahooFinanceClient::new();
    match config.fetch_cache_ttl {
        Some(ttl) => Box::new(CachedSource::new(client, ttl)),
        None => Box::new(client),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Config::default();
    compare_utils::init_tracing(&app);

    print_banner(&app.app_name);

    let config = load_config()?;
    let mut controller = SessionController::new(build_source(&config));
    if let Some(summarizer) = build_summarizer(&config)? {
        controller = controller.with_summarizer(summarizer);
    }

    let today = chrono::Local::now().date_naive();
    let state = SessionState::with_defaults(&config, today)?;
    let mut repl = CompareRepl::new(controller, state);
    info!("Session started");

    println!("{}\n", repl.welcome());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", repl.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}\n", render::format_error(&e.to_string()));
                continue;
            }
        };

        if let Some(message) = command.busy_message() {
            println!("{message}");
        }

        match repl.execute_command(command).await {
            Ok(Reply::Text(text)) => println!("{text}\n"),
            Ok(Reply::Exit) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("{}\n", render::format_error(&e.to_string()));
            }
        }
    }

    Ok(())
}
