use anyhow::{Context, Result};
use character_browser::{Browser, BrowserConfig, CharacterPage, endpoint, ui};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;

mod args;
use args::{Args, CommandArg};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    let config = load_config(&args)?;

    match args.command() {
        CommandArg::Browse { name } => {
            init_file_logging(config.log_file.as_deref())?;
            ::log::info!("Browsing characters from {}", config.endpoint);

            std::panic::set_hook(Box::new(|info| {
                ui::destruct_terminal_for_panic();
                eprintln!("{info}");
            }));

            let handle = Browser::new().with_config(config).spawn()?;
            ui::start_loop(handle, name).await
        }
        CommandArg::List { name, page, url } => {
            env_logger::init();
            let browser = Browser::new().with_config(config);

            let start_time = std::time::Instant::now();
            let result = browser.fetch(&name, page, url.as_deref()).await;
            ::log::info!(
                "Fetched page in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );

            let page = result.context("failed to fetch characters")?;
            print_page(&page);
            Ok(())
        }
    }
}

/// Merge the optional config file with command-line overrides
fn load_config(args: &Args) -> Result<BrowserConfig> {
    let mut config = match &args.config {
        Some(path) => BrowserConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BrowserConfig::new(),
    };

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = Some(log_file.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Route logs to a file so they don't draw over the terminal UI
fn init_file_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn print_page(page: &CharacterPage) {
    if page.is_empty() {
        println!("No characters found matching your search.");
        return;
    }

    for character in &page.results {
        println!("{} (#{})", character.name, character.id);
        println!("  Status:   {}", character.status);
        println!("  Species:  {}", character.species);
        println!("  Gender:   {}", character.gender);
        println!("  Origin:   {}", character.origin.name);
        println!("  Location: {}", character.location.name);
        println!("  Image:    {}", character.image);
        println!();
    }

    match (endpoint::current_page(&page.info), page.info.pages) {
        (Some(current), Some(pages)) => println!("Page {current} of {pages}"),
        (Some(current), None) => println!("Page {current}"),
        _ => {}
    }
    if let Some(count) = page.info.count {
        println!("{count} characters in total");
    }
    if let Some(prev) = &page.info.prev {
        println!("Prev: {prev}");
    }
    if let Some(next) = &page.info.next {
        println!("Next: {next}");
    }
}
