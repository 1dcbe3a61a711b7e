//! Headless-browser collaborator, covering the two external concerns the
//! core delegates: extracting plain text from a job-offer URL and printing
//! rendered markup to PDF bytes.
//!
//! Chrome work is blocking, so every operation runs under spawn_blocking.
//! Failures here are transport failures: the collaborator was unreachable
//! or the page could not be processed.

use anyhow::Context;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::io::Write;
use tracing::debug;

// A4 portrait with the layout's print margins, in inches.
const PAGE_WIDTH_IN: f64 = 8.27;
const PAGE_HEIGHT_IN: f64 = 11.69;
const MARGIN_TOP_IN: f64 = 0.71; // 18mm
const MARGIN_BOTTOM_IN: f64 = 0.71; // 18mm
const MARGIN_LEFT_IN: f64 = 0.59; // 15mm
const MARGIN_RIGHT_IN: f64 = 0.56; // 14.25mm

/// Navigates to a job-offer URL and returns the page's visible text.
pub async fn page_text(url: &str) -> anyhow::Result<String> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || fetch_page_text(&url))
        .await
        .context("scraping task panicked")?
}

fn fetch_page_text(url: &str) -> anyhow::Result<String> {
    let browser = launch()?;
    let tab = browser.new_tab()?;
    tab.navigate_to(url)?.wait_until_navigated()?;
    let text = tab.find_element("body")?.get_inner_text()?;
    debug!("scraped {} characters from {url}", text.len());
    Ok(text)
}

/// Prints rendered markup to PDF bytes (A4, print background on).
pub async fn html_to_pdf(markup: String) -> anyhow::Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || print_pdf(&markup))
        .await
        .context("PDF export task panicked")?
}

fn print_pdf(markup: &str) -> anyhow::Result<Vec<u8>> {
    // Chrome needs a URL; stage the markup in a temp file that outlives
    // the navigation.
    let mut page = tempfile::Builder::new()
        .prefix("cv-export-")
        .suffix(".html")
        .tempfile()
        .context("failed to stage markup for printing")?;
    page.write_all(markup.as_bytes())?;
    page.flush()?;

    let browser = launch()?;
    let tab = browser.new_tab()?;
    tab.navigate_to(&format!("file://{}", page.path().display()))?
        .wait_until_navigated()?;

    let pdf = tab.print_to_pdf(Some(PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(PAGE_WIDTH_IN),
        paper_height: Some(PAGE_HEIGHT_IN),
        margin_top: Some(MARGIN_TOP_IN),
        margin_bottom: Some(MARGIN_BOTTOM_IN),
        margin_left: Some(MARGIN_LEFT_IN),
        margin_right: Some(MARGIN_RIGHT_IN),
        ..Default::default()
    }))?;

    debug!("printed {} bytes of PDF", pdf.len());
    Ok(pdf)
}

fn launch() -> anyhow::Result<Browser> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to assemble browser launch options: {e}"))?;
    Browser::new(options).context("failed to launch headless browser")
}
