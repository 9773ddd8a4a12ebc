use anyhow::{Context, Result};
use quote_preview::config::{Config, DEFAULT_CONFIG_FILE};
use quote_preview::engine::preview::render_plain_text;
use quote_preview::engine::FormSync;
use quote_preview::print::Printer;
use quote_preview::tui::{self, state::AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    preview: bool,
    json: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--preview" => parsed.preview = true,
            "--json" => parsed.json = true,
            "-h" | "--help" => {
                println!("usage: quote-preview [--config PATH] [--preview] [--json]");
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("quote-preview.log")?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quote_preview=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    // An explicit --config must exist; the default file is optional.
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE))?,
    };

    let today = chrono::Local::now().date_naive();
    let engine = FormSync::load(config.baseline.clone(), config.engine_settings(), today)
        .context("baseline line items are invalid")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(engine.preview())?);
        return Ok(());
    }
    if args.preview {
        print!("{}", render_plain_text(engine.preview(), config.print.page_width));
        return Ok(());
    }

    tracing::info!(
        quotation = %engine.preview().quotation_number,
        items = engine.line_items().len(),
        "starting editor"
    );
    let state = AppState::new(engine, config.print.page_width);
    tui::run_tui(state, Printer::from_config(&config.print)).await
}
