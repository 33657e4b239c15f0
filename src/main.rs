use clap::Parser;
use course_scout::{CourseCrawl, PayloadBudget};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting crawl for: {}", args.url);
    println!("Note: crawling requires a WebDriver server (e.g., ChromeDriver or geckodriver).");
    println!(
        "Set WEBDRIVER_URL or --webdriver-url if not using the default http://localhost:4444"
    );

    let budget = PayloadBudget {
        max_tokens: args.max_tokens,
        ..PayloadBudget::default()
    };

    let start_time = std::time::Instant::now();
    let outcome = match CourseCrawl::new(&args.url)
        .with_page_budget(args.pages)
        .with_webdriver_url(&args.webdriver_url)
        .with_request_delay_ms(args.delay_ms)
        .with_budget(budget)
        .run()
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            ::log::error!("Failed to start crawl: {}", e);
            std::process::exit(1);
        }
    };

    let duration = start_time.elapsed();
    ::log::info!(
        "Crawl finished in {:.2} seconds: {} pages, ~{} tokens after optimization",
        duration.as_secs_f64(),
        outcome.payload.metadata.total_pages,
        outcome.report.estimated_tokens
    );
    if !outcome.report.tiers_applied.is_empty() {
        ::log::info!(
            "Truncation tiers applied: {} ({} pages dropped)",
            outcome.report.tiers_applied.join(", "),
            outcome.report.pages_dropped
        );
    }
    if outcome.report.over_budget {
        ::log::warn!("Payload still exceeds the token budget after all reduction stages");
    }
    if let Some(scorecard) = &outcome.important_urls.scorecard_url {
        ::log::info!("Scorecard page: {}", scorecard);
    }
    if let Some(rates) = &outcome.important_urls.rates_url {
        ::log::info!("Rates page: {}", rates);
    }

    let json = serde_json::to_string_pretty(&outcome.payload.to_value())
        .unwrap_or_else(|_| "{}".to_string());

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &json) {
                ::log::error!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            ::log::info!("Payload written to {}", path.display());
        }
        None => println!("{}", json),
    }
}
