// Company website scraping: fetch home + /about, extract signals, fold into a ScrapeResult.
// Scraping never fails outward; problems land in `ScrapeResult::error`.

pub mod extractor;
pub mod fetcher;
pub mod handlers;

use tracing::{info, warn};

use crate::models::email::ScrapeResult;
use crate::scraper::extractor::{
    build_scrape_result, extract, visible_text, ABOUT_STRIP_TAGS, ABOUT_TEXT_LIMIT,
};
use crate::scraper::fetcher::{parse_target, PageFetcher};

/// Scrapes a company website into normalized signals.
///
/// The home page and `/about` are fetched concurrently. A home-page failure
/// yields an empty result carrying the error; an about-page failure is ignored.
pub async fn run_scrape(fetcher: &PageFetcher, url: &str) -> ScrapeResult {
    let target = match parse_target(url) {
        Ok(target) => target,
        Err(e) => {
            warn!("Scrape rejected for {url:?}: {e}");
            return ScrapeResult::failed(e.to_string());
        }
    };

    let (home, about) = tokio::join!(fetcher.fetch(&target), fetcher.fetch_about(&target));

    let html = match home {
        Ok(html) => html,
        Err(e) => {
            warn!("Scrape of {target} failed: {e}");
            return ScrapeResult::failed(e.to_string());
        }
    };

    let signals = extract(&html);
    let about_text = about
        .map(|html| visible_text(&html, ABOUT_STRIP_TAGS, ABOUT_TEXT_LIMIT))
        .unwrap_or_default();

    let result = build_scrape_result(&signals, &about_text);
    info!(
        "Scraped {target}: company={:?}, headings={}, about_page={}",
        result.company_name,
        signals.headings.len(),
        !about_text.is_empty()
    );
    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::stalled_server;

    const WIDGETS_HOME: &str = r#"<html><head><title>Example — Home of Widgets</title></head>
<body><h1>Best Widgets</h1><p>Widgets for every workshop.</p><h2>Trusted by Thousands</h2></body></html>"#;

    fn assert_failed_and_empty(result: &ScrapeResult) {
        let error = result.error.as_deref().unwrap_or_default();
        assert!(!error.is_empty(), "error must be set");
        assert_eq!(result.company_name, "");
        assert_eq!(result.description, "");
        assert_eq!(result.services, "");
        assert_eq!(result.industry_signals, "");
        assert_eq!(result.raw_text, "");
    }

    #[tokio::test]
    async fn test_scrape_widgets_site_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(WIDGETS_HOME)
            .create_async()
            .await;
        server
            .mock("GET", "/about")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let result = run_scrape(&fetcher, &server.url()).await;

        assert!(result.error.is_none());
        assert_eq!(result.company_name, "Example");
        assert_eq!(result.description, "Best Widgets. Trusted by Thousands");
        assert_eq!(result.services, "Best Widgets, Trusted by Thousands");
        assert!(result.raw_text.contains("Widgets for every workshop."));
    }

    #[tokio::test]
    async fn test_scrape_includes_about_page_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body(WIDGETS_HOME)
            .create_async()
            .await;
        server
            .mock("GET", "/about")
            .with_status(200)
            .with_body("<header>Family owned since 1952.</header><footer>Sitemap</footer>")
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let result = run_scrape(&fetcher, &server.url()).await;

        assert!(result.raw_text.ends_with("Family owned since 1952."));
        assert!(!result.raw_text.contains("Sitemap"));
    }

    #[tokio::test]
    async fn test_scrape_http_error_yields_empty_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let result = run_scrape(&fetcher, &server.url()).await;

        assert_failed_and_empty(&result);
        assert_eq!(result.error.as_deref(), Some("HTTP 404 fetching URL"));
    }

    #[tokio::test]
    async fn test_scrape_unreachable_host_does_not_fail() {
        let fetcher = PageFetcher::new().unwrap();
        // Port 1 on loopback refuses connections immediately.
        let result = run_scrape(&fetcher, "http://127.0.0.1:1").await;

        assert_failed_and_empty(&result);
        assert!(result
            .error
            .as_deref()
            .unwrap_or_default()
            .starts_with("Failed to scrape URL"));
    }

    #[tokio::test]
    async fn test_scrape_about_text_is_capped_and_keeps_header() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body(WIDGETS_HOME)
            .create_async()
            .await;
        let about = format!(
            "<header>Family owned since 1952.</header><p>{}</p><footer>Sitemap</footer>",
            "y".repeat(ABOUT_TEXT_LIMIT + 500)
        );
        server
            .mock("GET", "/about")
            .with_status(200)
            .with_body(about)
            .create_async()
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let result = run_scrape(&fetcher, &server.url()).await;

        let start = result
            .raw_text
            .find("Family owned since 1952.")
            .expect("about header text kept");
        let about_share = &result.raw_text[start..];
        assert_eq!(about_share.chars().count(), ABOUT_TEXT_LIMIT);
        assert!(!about_share.contains("Sitemap"));
    }

    #[tokio::test]
    async fn test_scrape_timeout_yields_empty_result() {
        let url = stalled_server().await;
        let fetcher = PageFetcher::with_timeout(Duration::from_millis(200)).unwrap();

        let result = run_scrape(&fetcher, &url).await;

        assert_failed_and_empty(&result);
        assert_eq!(
            result.error.as_deref(),
            Some("Request timed out after 10 seconds")
        );
    }

    #[tokio::test]
    async fn test_scrape_invalid_url_yields_empty_result() {
        let fetcher = PageFetcher::new().unwrap();
        let result = run_scrape(&fetcher, "   ").await;
        assert_failed_and_empty(&result);
    }
}
