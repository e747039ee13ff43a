//! Yahoo Finance API client

use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::quote::{
    HistoryBar, QuoteSnapshot, QuoteSource, RawSnapshot, SearchCandidate, SearchOutcome,
    SymbolSearch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance client serving both snapshots/history and symbol search
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    http: Client,
    chart_base: String,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: RawSnapshot,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn yahoo_error(err: yahoo::YahooError) -> StockError {
    StockError::YahooFinanceError(err.to_string())
}

fn connector() -> Result<yahoo::YahooConnector> {
    yahoo::YahooConnector::new().map_err(yahoo_error)
}

/// Extract the snapshot fields from a chart response body
fn parse_chart_meta(body: &str) -> Result<QuoteSnapshot> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.chart.error {
        return Err(StockError::YahooFinanceError(format!(
            "{}: {}",
            error.code.unwrap_or_else(|| "error".to_string()),
            error.description.unwrap_or_default()
        )));
    }

    Ok(envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|result| result.meta.normalize())
        .unwrap_or_default())
}

/// First `limit` search hits as candidates, in the order Yahoo ranked them
fn search_candidates_from(result: yahoo::YSearchResultOpt, limit: usize) -> Vec<SearchCandidate> {
    result
        .quotes
        .into_iter()
        .take(limit)
        .map(|item| SearchCandidate::new(item.symbol, item.quote_type))
        .collect()
}

impl YahooFinanceClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&StockConfig::default())
    }

    /// Create a client using the endpoint and user agent from `config`
    pub fn from_config(config: &StockConfig) -> Result<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            http,
            chart_base: config.yahoo_chart_base.clone(),
        })
    }

    fn chart_url(&self, symbol: &str) -> Result<Url> {
        let mut url = Url::parse(&self.chart_base)
            .map_err(|e| StockError::ConfigError(format!("Invalid chart base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StockError::ConfigError("Chart base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1d");
        Ok(url)
    }

    /// Fetch the near-real-time snapshot from the chart endpoint metadata
    pub async fn get_snapshot(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let url = self.chart_url(symbol)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StockError::YahooFinanceError(format!(
                "Chart request for {symbol} failed with status {status}"
            )));
        }

        parse_chart_meta(&body)
    }

    /// Get the last `days` daily bars for a symbol, oldest first
    pub async fn get_daily_history(&self, symbol: &str, days: u32) -> Result<Vec<HistoryBar>> {
        let provider = connector()?;

        let response = provider
            .get_quote_range(symbol, "1d", &format!("{days}d"))
            .await
            .map_err(yahoo_error)?;

        let quotes = response.quotes().map_err(yahoo_error)?;

        Ok(quotes
            .iter()
            .filter(|q| q.close.is_finite())
            .map(|q| HistoryBar {
                timestamp: i64::try_from(q.timestamp)
                    .ok()
                    .and_then(|ts| DateTime::from_timestamp(ts, 0))
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
            })
            .collect())
    }

    /// Search instruments matching free text, keeping at most `limit` results
    pub async fn search_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>> {
        let provider = connector()?;

        let result = provider
            .search_ticker_opt(query)
            .await
            .map_err(yahoo_error)?;

        Ok(search_candidates_from(result, limit))
    }
}

#[async_trait]
impl QuoteSource for YahooFinanceClient {
    async fn snapshot(&self, symbol: &str) -> Result<QuoteSnapshot> {
        self.get_snapshot(symbol).await
    }

    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<HistoryBar>> {
        self.get_daily_history(symbol, days).await
    }
}

#[async_trait]
impl SymbolSearch for YahooFinanceClient {
    async fn search(&self, query: &str, limit: usize) -> SearchOutcome {
        match self.search_candidates(query, limit).await {
            Ok(candidates) => SearchOutcome::Candidates(candidates),
            Err(err) => {
                debug!(query, error = %err, "Yahoo symbol search failed");
                SearchOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_url() {
        let client = YahooFinanceClient::new().unwrap();
        let url = client.chart_url("BRK.B").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK.B?range=1d&interval=1d"
        );
    }

    #[test]
    fn test_chart_url_trailing_slash() {
        let config = StockConfig::builder()
            .yahoo_chart_base("http://localhost:8080/chart/")
            .build()
            .unwrap();
        let client = YahooFinanceClient::from_config(&config).unwrap();
        let url = client.chart_url("AAPL").unwrap();
        assert_eq!(url.path(), "/chart/AAPL");
    }

    #[test]
    fn test_parse_chart_meta() {
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": {
                        "currency": "USD",
                        "symbol": "AAPL",
                        "regularMarketPrice": 189.84,
                        "regularMarketDayHigh": 190.32,
                        "regularMarketDayLow": 188.19,
                        "chartPreviousClose": 187.0
                    },
                    "timestamp": [1718040600]
                }],
                "error": null
            }
        }"#;

        let snapshot = parse_chart_meta(body).unwrap();
        assert_eq!(snapshot.last_price, Some(189.84));
        assert_eq!(snapshot.day_low, Some(188.19));
        assert_eq!(snapshot.day_high, Some(190.32));
    }

    #[test]
    fn test_parse_chart_meta_partial() {
        let body = r#"{"chart": {"result": [{"meta": {"regularMarketPrice": 12.5}}], "error": null}}"#;
        let snapshot = parse_chart_meta(body).unwrap();
        assert_eq!(snapshot.last_price, Some(12.5));
        assert!(snapshot.day_low.is_none());
        assert!(snapshot.day_high.is_none());
    }

    #[test]
    fn test_parse_chart_meta_empty_result() {
        let body = r#"{"chart": {"result": [], "error": null}}"#;
        assert_eq!(parse_chart_meta(body).unwrap(), QuoteSnapshot::default());
    }

    #[test]
    fn test_parse_chart_error() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_meta(body).unwrap_err();
        assert!(err.to_string().contains("No data found"));
    }

    #[test]
    fn test_parse_chart_garbage() {
        assert!(matches!(
            parse_chart_meta("<html>"),
            Err(StockError::JsonError(_))
        ));
    }

    fn search_body() -> yahoo::YSearchResultOpt {
        let body = serde_json::json!({
            "count": 3,
            "quotes": [
                {
                    "exchange": "NMS", "shortname": "Netflix, Inc.", "quoteType": "EQUITY",
                    "symbol": "NFLX", "index": "quotes", "score": 2_011_300.0,
                    "typeDisp": "Equity", "longname": "Netflix, Inc.", "isYahooFinance": true
                },
                {
                    "exchange": "MEX", "quoteType": "EQUITY", "symbol": "NFLX.MX",
                    "index": "quotes", "score": 20_010.0, "typeDisp": "Equity",
                    "isYahooFinance": true
                },
                {
                    "exchange": "PCX", "shortname": "Netflix Option Income ETF", "quoteType": "ETF",
                    "symbol": "NFLY", "index": "quotes", "score": 20_005.0, "typeDisp": "ETF",
                    "isYahooFinance": true
                }
            ],
            "news": []
        });
        yahoo::YSearchResultOpt::from_json(body).unwrap()
    }

    #[test]
    fn test_search_candidates_from_payload() {
        let candidates = search_candidates_from(search_body(), 10);
        assert_eq!(
            candidates,
            vec![
                SearchCandidate::new("NFLX", "EQUITY"),
                SearchCandidate::new("NFLX.MX", "EQUITY"),
                SearchCandidate::new("NFLY", "ETF"),
            ]
        );
        assert!(candidates[0].is_equity());
    }

    #[test]
    fn test_search_candidates_from_truncates() {
        let candidates = search_candidates_from(search_body(), 2);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].symbol, "NFLX.MX");
        assert!(search_candidates_from(search_body(), 0).is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_daily_history() {
        let client = YahooFinanceClient::new().unwrap();
        let bars = client.get_daily_history("AAPL", 5).await.unwrap();
        assert!(!bars.is_empty());
        assert!(bars.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_snapshot() {
        let client = YahooFinanceClient::new().unwrap();
        let snapshot = client.get_snapshot("AAPL").await.unwrap();
        assert!(snapshot.last_price.is_some());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_search() {
        let client = YahooFinanceClient::new().unwrap();
        match client.search("netflix", 10).await {
            SearchOutcome::Candidates(candidates) => {
                assert!(candidates.len() <= 10);
                assert!(candidates.iter().any(|c| c.symbol == "NFLX"));
            }
            SearchOutcome::Unavailable => panic!("search unavailable"),
        }
    }
}
