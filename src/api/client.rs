//! 管理サーバーのREST APIクライアント
//!
//! すべてのエンドポイントはGET + JSON。失敗の種別（タイムアウト・4xx・5xx・
//! パースエラー）は呼び出し側では区別せず、一律「取得失敗」として
//! フォールバックチェーンに委ねる。

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::models::*;

/// デフォルトのリクエストタイムアウト
const REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Request failed")]
    Request(#[from] reqwest::Error),
    #[error("Endpoint {endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("Failed to parse JSON from {endpoint}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// ダッシュボードが参照するデータソースの抽象
///
/// 本番では[`DashboardApi`]、テストではフェイク実装を差し込む。
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn revenue(&self) -> Result<RevenueSummary, FetchError>;
    async fn active_vehicles(&self) -> Result<CountResponse, FetchError>;
    async fn occupancy_rate(&self) -> Result<OccupancyRate, FetchError>;
    async fn active_alerts(&self) -> Result<CountResponse, FetchError>;
    async fn daily_stats(&self, period: StatsPeriod) -> Result<Vec<DailyStat>, FetchError>;
    async fn revenue_breakdown(&self) -> Result<Vec<(String, f64)>, FetchError>;
    async fn recent_activity(&self) -> Result<Vec<ActivityRecord>, FetchError>;
    async fn recent_sessions(&self, limit: Option<u32>) -> Result<Vec<SessionRecord>, FetchError>;
    async fn system_alerts(&self) -> Result<Vec<AlertRecord>, FetchError>;
    async fn low_balance_alerts(&self) -> Result<Vec<LowBalanceAlert>, FetchError>;
}

/// reqwestベースのAPIクライアント
#[derive(Debug, Clone)]
pub struct DashboardApi {
    base_url: String,
    client: reqwest::Client,
}

impl DashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .user_agent("Parkview/1.0")
            .build()
            .expect("Failed to create HTTP client");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let request_id = uuid::Uuid::new_v4();
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        tracing::debug!(request_id = %request_id, url = %url, "📡 [API] GET request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            endpoint: path.to_string(),
            source,
        })?;

        tracing::debug!(
            request_id = %request_id,
            response_size_bytes = body.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "📨 [API] response received"
        );

        Ok(decoded)
    }
}

#[async_trait]
impl DashboardBackend for DashboardApi {
    async fn revenue(&self) -> Result<RevenueSummary, FetchError> {
        self.get_json("/api/revenue", &[]).await
    }

    async fn active_vehicles(&self) -> Result<CountResponse, FetchError> {
        self.get_json("/api/active-vehicles", &[]).await
    }

    async fn occupancy_rate(&self) -> Result<OccupancyRate, FetchError> {
        self.get_json("/api/occupancy-rate", &[]).await
    }

    async fn active_alerts(&self) -> Result<CountResponse, FetchError> {
        self.get_json("/api/active-alerts", &[]).await
    }

    async fn daily_stats(&self, period: StatsPeriod) -> Result<Vec<DailyStat>, FetchError> {
        self.get_json("/api/daily-stats", &[("period", period.tag().to_string())])
            .await
    }

    async fn revenue_breakdown(&self) -> Result<Vec<(String, f64)>, FetchError> {
        // preserve_order有効のserde_json::Mapで凡例順＝サーバーのキー順を維持する
        let map: serde_json::Map<String, serde_json::Value> =
            self.get_json("/api/revenue-breakdown", &[]).await?;
        Ok(map
            .iter()
            .map(|(label, value)| (label.clone(), coerce_f64(value).unwrap_or(0.0)))
            .collect())
    }

    async fn recent_activity(&self) -> Result<Vec<ActivityRecord>, FetchError> {
        self.get_json("/api/recent-activity", &[]).await
    }

    async fn recent_sessions(&self, limit: Option<u32>) -> Result<Vec<SessionRecord>, FetchError> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.get_json("/api/recent-sessions", &query).await
    }

    async fn system_alerts(&self) -> Result<Vec<AlertRecord>, FetchError> {
        self.get_json("/api/system-alerts", &[]).await
    }

    async fn low_balance_alerts(&self) -> Result<Vec<LowBalanceAlert>, FetchError> {
        self.get_json("/api/low-balance-alerts", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = DashboardApi::new("http://127.0.0.1:5000/");
        assert_eq!(api.base_url(), "http://127.0.0.1:5000");

        let api = DashboardApi::new("http://127.0.0.1:5000");
        assert_eq!(api.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_fetch_error_display() {
        let error = FetchError::Status {
            endpoint: "/api/revenue".to_string(),
            status: 503,
        };
        assert_eq!(
            error.to_string(),
            "Endpoint /api/revenue returned HTTP 503"
        );
    }
}
