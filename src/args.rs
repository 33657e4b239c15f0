use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "course-scout")]
#[command(about = "Crawls a golf-course website into an LLM-ready content bundle")]
#[command(version)]
pub struct Args {
    /// Seed URL of the golf-course website to crawl
    pub url: String,

    /// Maximum number of pages to collect, seed included
    #[arg(short, long, default_value_t = 10)]
    pub pages: usize,

    /// WebDriver endpoint (WEBDRIVER_URL env var takes precedence)
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// Token budget for the optimized payload
    #[arg(long, default_value_t = 120_000)]
    pub max_tokens: usize,

    /// Delay between page fetches in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,

    /// Write the payload JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
