use clap::Parser;
use site_survey::{PathOutcome, Pipeline, ScrapeConfig};
use std::process::ExitCode;

mod args;
use args::Args;

const RULE: &str = "============================================================";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, showing per-page status lines by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_banner(&config);

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    let output = match pipeline.run().await {
        Ok(output) => output,
        Err(e) => {
            ::log::error!("Scraping aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", RULE);
    println!("Scraping complete in {:.2} seconds", start_time.elapsed().as_secs_f64());
    println!(
        "Scraped {} pages ({} blocked, {} failed)",
        output.pages.len(),
        output.count(PathOutcome::Disallowed),
        output.count(PathOutcome::Failed)
    );
    println!("Data saved to: {}", output.output_file.display());
    println!("Screenshots saved to: {}", pipeline.config().output_dir.display());
    println!("{}", RULE);

    ExitCode::SUCCESS
}

fn print_banner(config: &ScrapeConfig) {
    println!("{}", RULE);
    println!("Site survey of {}", config.base_url);
    println!("{}", RULE);
    println!("User-Agent: {}", config.user_agent);
    println!("Output directory: {}", config.output_dir.display());
    println!(
        "Rate limit: {:?} between requests",
        config.request_delay()
    );
    println!("WebDriver: {} ({:?})", config.webdriver_url, config.browser);
    println!("Note: a WebDriver server (geckodriver or chromedriver) must be running.");
    println!("{}", RULE);
}
