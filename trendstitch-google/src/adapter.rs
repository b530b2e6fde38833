#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::OnceCell;
use trendstitch_core::{RawSeries, TimelinePoint, TrendsError, TrendsRequest};

use crate::GoogleTrendsConfig;

const CONNECTOR: &str = "trendstitch-google";

/// Widget descriptor returned by the explore endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExploreWidget {
    /// Widget kind, e.g. `TIMESERIES`.
    pub id: String,
    /// Token authorizing the widget data request.
    #[serde(default)]
    pub token: String,
    /// Opaque request payload echoed back to the widget data endpoint.
    #[serde(default)]
    pub request: serde_json::Value,
}

/// Google Trends endpoints used by the connector (so we can inject mocks in tests).
#[async_trait]
pub trait TrendsApi: Send + Sync {
    /// Resolve the widgets for a request.
    async fn explore(&self, req: &TrendsRequest) -> Result<Vec<ExploreWidget>, TrendsError>;

    /// Fetch the interest-over-time timeline for a `TIMESERIES` widget.
    async fn multiline(&self, widget: &ExploreWidget) -> Result<RawSeries, TrendsError>;
}

/// Production adapter talking to the Google Trends web API over `reqwest`.
pub struct RealAdapter {
    http: reqwest::Client,
    config: GoogleTrendsConfig,
    warmed: OnceCell<()>,
}

impl RealAdapter {
    /// Build a cookie-enabled client honoring `config.timeout`.
    ///
    /// # Errors
    /// Returns `TrendsError::Other` if the HTTP client cannot be constructed.
    pub fn new(config: GoogleTrendsConfig) -> Result<Self, TrendsError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| TrendsError::Other(e.to_string()))?;
        Ok(Self::with_client(http, config))
    }

    /// Wrap an existing client. It should keep a cookie store.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: GoogleTrendsConfig) -> Self {
        Self {
            http,
            config,
            warmed: OnceCell::new(),
        }
    }

    /// Visit the home page once so the session carries the provider cookies.
    async fn warm_up(&self) {
        if !self.config.warm_up {
            return;
        }
        self.warmed
            .get_or_init(|| async {
                let Ok(url) = self.endpoint("") else {
                    return;
                };
                if let Err(_e) = self.http.get(url).send().await {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %_e, "cookie warm-up failed");
                }
            })
            .await;
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, TrendsError> {
        url::Url::parse(&self.config.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| TrendsError::InvalidArg(format!("bad endpoint '{path}': {e}")))
    }

    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<String, TrendsError> {
        self.warm_up().await;
        let url = self.endpoint(path)?;
        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, what))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1_000));
            return Err(TrendsError::RateLimited { retry_after_ms });
        }
        if !status.is_success() {
            return Err(TrendsError::connector(
                CONNECTOR,
                format!("status {status}: {what}"),
            ));
        }
        resp.text()
            .await
            .map_err(|e| map_transport_err(&e, what))
    }
}

fn map_transport_err(e: &reqwest::Error, context: &str) -> TrendsError {
    if e.is_timeout() {
        TrendsError::connector(CONNECTOR, format!("timeout: {context}"))
    } else {
        TrendsError::connector(CONNECTOR, format!("{e}: {context}"))
    }
}

#[async_trait]
impl TrendsApi for RealAdapter {
    async fn explore(&self, req: &TrendsRequest) -> Result<Vec<ExploreWidget>, TrendsError> {
        let items: Vec<_> = req
            .keywords
            .iter()
            .map(|kw| {
                json!({
                    "keyword": kw,
                    "time": req.timeframe.to_string(),
                    "geo": req.geo,
                })
            })
            .collect();
        let payload = json!({
            "comparisonItem": items,
            "category": req.category,
            "property": req.property.as_param(),
        });
        let body = self
            .get_text(
                "trends/api/explore",
                &[
                    ("hl", self.config.hl.clone()),
                    ("tz", self.config.tz_offset_minutes.to_string()),
                    ("req", payload.to_string()),
                ],
                &format!("explore {}", req.timeframe),
            )
            .await?;
        parse_explore(&body)
    }

    async fn multiline(&self, widget: &ExploreWidget) -> Result<RawSeries, TrendsError> {
        let body = self
            .get_text(
                "trends/api/widgetdata/multiline",
                &[
                    ("req", widget.request.to_string()),
                    ("token", widget.token.clone()),
                    ("tz", self.config.tz_offset_minutes.to_string()),
                ],
                "multiline",
            )
            .await?;
        parse_multiline(&body)
    }
}

/// Drop the anti-JSON-hijacking prefix the service puts before every payload.
fn strip_prefix(body: &str) -> Result<&str, TrendsError> {
    body.find('{')
        .map(|i| &body[i..])
        .ok_or_else(|| TrendsError::Data("response carries no JSON object".into()))
}

#[derive(Deserialize)]
struct ExploreBody {
    #[serde(default)]
    widgets: Vec<ExploreWidget>,
}

/// Parse an explore response into its widgets.
///
/// # Errors
/// Returns `TrendsError::Data` when the body is not a JSON object.
pub fn parse_explore(body: &str) -> Result<Vec<ExploreWidget>, TrendsError> {
    let parsed: ExploreBody = serde_json::from_str(strip_prefix(body)?)?;
    Ok(parsed.widgets)
}

#[derive(Deserialize)]
struct MultilineBody {
    default: MultilineDefault,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultilineDefault {
    #[serde(default)]
    timeline_data: Vec<TimelineRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRow {
    time: String,
    #[serde(default)]
    value: Vec<f64>,
    #[serde(default)]
    is_partial: bool,
}

/// Parse a multiline widget response into a timeline.
///
/// # Errors
/// Returns `TrendsError::Data` for malformed JSON or an unparsable timestamp.
pub fn parse_multiline(body: &str) -> Result<RawSeries, TrendsError> {
    let parsed: MultilineBody = serde_json::from_str(strip_prefix(body)?)?;
    let points = parsed
        .default
        .timeline_data
        .into_iter()
        .map(|row| {
            let secs: i64 = row
                .time
                .parse()
                .map_err(|_| TrendsError::Data(format!("bad timeline time '{}'", row.time)))?;
            let ts = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| TrendsError::Data(format!("timestamp {secs} out of range")))?;
            Ok(TimelinePoint {
                ts,
                values: row.value,
                is_partial: row.is_partial,
            })
        })
        .collect::<Result<Vec<_>, TrendsError>>()?;
    Ok(RawSeries::new(points))
}

#[cfg(feature = "test-adapters")]
impl dyn TrendsApi {
    /// Build a `TrendsApi` from closures (tests only).
    pub fn from_fns<FE, FM>(fexplore: FE, fmultiline: FM) -> Arc<dyn TrendsApi>
    where
        FE: Send + Sync + 'static + Fn(TrendsRequest) -> Result<Vec<ExploreWidget>, TrendsError>,
        FM: Send + Sync + 'static + Fn(ExploreWidget) -> Result<RawSeries, TrendsError>,
    {
        struct FnApi<FE, FM> {
            fexplore: FE,
            fmultiline: FM,
        }
        #[async_trait]
        impl<FE, FM> TrendsApi for FnApi<FE, FM>
        where
            FE: Send
                + Sync
                + 'static
                + Fn(TrendsRequest) -> Result<Vec<ExploreWidget>, TrendsError>,
            FM: Send + Sync + 'static + Fn(ExploreWidget) -> Result<RawSeries, TrendsError>,
        {
            async fn explore(
                &self,
                req: &TrendsRequest,
            ) -> Result<Vec<ExploreWidget>, TrendsError> {
                (self.fexplore)(req.clone())
            }

            async fn multiline(&self, widget: &ExploreWidget) -> Result<RawSeries, TrendsError> {
                (self.fmultiline)(widget.clone())
            }
        }
        Arc::new(FnApi {
            fexplore,
            fmultiline,
        })
    }
}
