//! Command-line interface definitions for the news date scraper.
//!
//! This module defines the CLI arguments using the `clap` crate and the
//! interactive fallback used when no date is passed on the command line.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command-line arguments for the news date scraper.
///
/// Values given here take precedence over the optional YAML config file.
///
/// # Examples
///
/// ```sh
/// # Prompt for the date interactively
/// news_date_scraper
///
/// # Non-interactive, with a JSON copy of the results
/// news_date_scraper --date 2024-03-15 -o out/news.csv --json-output out/news.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Publication date to collect, as YYYY-MM-DD (prompted for when omitted)
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// CSV file to write (defaults to news_articles.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the results as JSON to this file
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// User-Agent header sent with every request
    #[arg(long, env = "NEWS_SCRAPER_USER_AGENT")]
    pub user_agent: Option<String>,
}

/// Ask the operator for a date on stdin.
pub fn prompt_for_date() -> io::Result<String> {
    let stdin = io::stdin();
    read_date(&mut stdin.lock(), &mut io::stdout())
}

fn read_date<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "Enter date (YYYY-MM-DD): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
