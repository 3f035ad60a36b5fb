use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::data_source::{BarsRequest, DataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Bar, Interval, PriceSeries, ProviderId, Symbol, UtcDateTime};

pub const DEFAULT_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// The chart endpoint rejects library user agents with 429s.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Yahoo Finance v8 chart adapter.
///
/// Issues one unauthenticated GET per request; no cookie/crumb handshake and
/// no retries.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: Option<u64>,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooAdapter {
    pub fn new() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_CHART_BASE_URL),
            timeout_ms: None,
        }
    }

    /// Point the adapter at a different chart host (local mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn chart_url(&self, req: &BarsRequest) -> String {
        format!(
            "{}/{}?range={}&interval={}&events=div,splits",
            self.base_url,
            urlencoding::encode(req.symbol.as_str()),
            req.period,
            req.interval
        )
    }

    async fn fetch_chart(&self, req: &BarsRequest) -> Result<PriceSeries, SourceError> {
        let endpoint = self.chart_url(req);
        let request = HttpRequest::get(endpoint)
            .with_header("user-agent", BROWSER_USER_AGENT)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        info!(
            symbol = %req.symbol,
            period = %req.period,
            interval = %req.interval,
            "downloading bars from yahoo"
        );
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::invalid_request(format!("yahoo request rejected: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            // Failure bodies usually still carry a chart.error description.
            let detail = serde_json::from_str::<YahooChartResponse>(&response.body)
                .ok()
                .and_then(|parsed| parsed.chart.error)
                .map(|error| error.to_string());
            return Err(SourceError::provider(match detail {
                Some(detail) => format!("yahoo returned status {}: {detail}", response.status),
                None => format!("yahoo returned status {}", response.status),
            }));
        }

        parse_chart(&response.body, &req.symbol, req.interval)
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn bars<'a>(
        &'a self,
        req: BarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_chart(&req).await })
    }
}

/// Decode a v8 chart body into a date-ordered series.
///
/// Rows with any missing OHLC value are skipped, as are rows that fail bar
/// validation. When two rows share a calendar date the later one wins.
pub fn parse_chart(
    body: &str,
    symbol: &Symbol,
    interval: Interval,
) -> Result<PriceSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        return Err(SourceError::provider(format!(
            "yahoo chart API error: {error}"
        )));
    }

    let result = chart_response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::no_data(format!("yahoo returned no chart result for {symbol}")))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;
    for (i, &ts_value) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        ) else {
            skipped += 1;
            continue;
        };

        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());

        let bar = UtcDateTime::from_unix_timestamp(ts_value)
            .and_then(|ts| Bar::new(ts, open, high, low, close, volume));
        match bar {
            Ok(bar) => bars.push(bar),
            Err(error) => {
                warn!(%symbol, ts = ts_value, %error, "skipping invalid yahoo bar");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!(%symbol, skipped, "dropped incomplete yahoo rows");
    }

    bars.sort_by(|a, b| a.ts.cmp(&b.ts));
    let bars = dedup_by_date(bars);

    if bars.is_empty() {
        return Err(SourceError::no_data(format!(
            "yahoo returned no usable rows for {symbol}"
        )));
    }

    PriceSeries::new(symbol.clone(), interval, bars)
        .map_err(|e| SourceError::malformed(format!("yahoo bars failed validation: {e}")))
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn dedup_by_date(bars: Vec<Bar>) -> Vec<Bar> {
    let mut out: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(last) if last.date() == bar.date() => *last = bar,
            _ => out.push(bar),
        }
    }
    out
}

// ============================================================================
// Yahoo API response types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

impl std::fmt::Display for YahooChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {description}", self.code),
            None => f.write_str(&self.code),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}
