//! ダッシュボードサービス
//!
//! 各メトリクスの取得を[`FallbackChain`]として定義する層。
//! ローダーは必ず表示可能な値を返し、エラーをUI側へ伝播しない。

use std::sync::{Arc, OnceLock};

use futures_util::FutureExt;

use crate::api::models::{StatsPeriod, DailyStat};
use crate::api::{DashboardBackend, FallbackChain, PaymentStatus};
use crate::gui::format::{format_number, format_percent, parse_moment};
use crate::gui::models::{ActivityItem, AlertItem};

/// 管理サーバーのデフォルトURL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// フォールバック経路で合成するアクティビティの最大件数
const ACTIVITY_FALLBACK_LIMIT: u32 = 5;

/// メトリクスローダー集約
pub struct DashboardService {
    backend: Arc<dyn DashboardBackend>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    /// 総収益の表示文字列（例: "RWF 12,500"）
    pub async fn load_revenue(&self) -> String {
        let backend = self.backend.clone();
        FallbackChain::new("revenue", "RWF 0".to_string())
            .source("revenue", move || {
                let backend = backend.clone();
                async move {
                    let summary = backend.revenue().await?;
                    Ok(format!("RWF {}", format_number(summary.total_revenue)))
                }
                .boxed()
            })
            .resolve()
            .await
    }

    /// 在場中の車両台数
    ///
    /// 専用カウントエンドポイント → 最近のセッションから未払い（在場中）を
    /// 数える、の2段フォールバック。
    pub async fn load_active_vehicles(&self) -> String {
        let count_backend = self.backend.clone();
        let sessions_backend = self.backend.clone();
        FallbackChain::new("active-vehicles", "0".to_string())
            .source("active-vehicles", move || {
                let backend = count_backend.clone();
                async move {
                    let response = backend.active_vehicles().await?;
                    Ok(format_number(response.count as f64))
                }
                .boxed()
            })
            .source("recent-sessions", move || {
                let backend = sessions_backend.clone();
                async move {
                    let sessions = backend.recent_sessions(None).await?;
                    let active = sessions
                        .iter()
                        .filter(|s| s.status() == PaymentStatus::Unpaid)
                        .count();
                    Ok(format_number(active as f64))
                }
                .boxed()
            })
            .resolve()
            .await
    }

    /// 占有率の表示文字列（例: "72%"、取得不能なら "--"）
    pub async fn load_occupancy(&self) -> String {
        let backend = self.backend.clone();
        FallbackChain::new("occupancy-rate", "--".to_string())
            .source("occupancy-rate", move || {
                let backend = backend.clone();
                async move {
                    let occupancy = backend.occupancy_rate().await?;
                    Ok(format_percent(occupancy.rate))
                }
                .boxed()
            })
            .resolve()
            .await
    }

    /// アクティブなアラート件数
    pub async fn load_alert_count(&self) -> String {
        let backend = self.backend.clone();
        FallbackChain::new("active-alerts", "0".to_string())
            .source("active-alerts", move || {
                let backend = backend.clone();
                async move {
                    let response = backend.active_alerts().await?;
                    Ok(format_number(response.count as f64))
                }
                .boxed()
            })
            .resolve()
            .await
    }

    /// 期間指定の日次統計（時系列昇順に整列済み）
    pub async fn load_stats(&self, period: StatsPeriod) -> Vec<DailyStat> {
        let backend = self.backend.clone();
        let mut stats = FallbackChain::new("daily-stats", Vec::new())
            .source("daily-stats", move || {
                let backend = backend.clone();
                async move { backend.daily_stats(period).await }.boxed()
            })
            .resolve()
            .await;

        // サーバーは降順で返すことがあるため、描画前に昇順へ整列する
        stats.sort_by_key(|stat| parse_moment(stat.label_source()));
        stats
    }

    /// 収益内訳（凡例順維持、取得不能なら単一スライス）
    pub async fn load_breakdown(&self) -> Vec<(String, f64)> {
        let backend = self.backend.clone();
        FallbackChain::new(
            "revenue-breakdown",
            vec![("Parking Revenue".to_string(), 100.0)],
        )
        .source("revenue-breakdown", move || {
            let backend = backend.clone();
            async move { backend.revenue_breakdown().await }.boxed()
        })
        .resolve()
        .await
    }

    /// 最近のアクティビティ
    ///
    /// 整形済みエンドポイント → セッションからの合成 → プレースホルダ。
    pub async fn load_activity(&self) -> Vec<ActivityItem> {
        let activity_backend = self.backend.clone();
        let sessions_backend = self.backend.clone();
        let items = FallbackChain::new("recent-activity", vec![ActivityItem::placeholder()])
            .source("recent-activity", move || {
                let backend = activity_backend.clone();
                async move {
                    let records = backend.recent_activity().await?;
                    Ok(records
                        .into_iter()
                        .map(ActivityItem::from_record)
                        .collect::<Vec<_>>())
                }
                .boxed()
            })
            .source("recent-sessions", move || {
                let backend = sessions_backend.clone();
                async move {
                    let sessions = backend
                        .recent_sessions(Some(ACTIVITY_FALLBACK_LIMIT))
                        .await?;
                    Ok(sessions
                        .iter()
                        .map(ActivityItem::from_session)
                        .collect::<Vec<_>>())
                }
                .boxed()
            })
            .resolve()
            .await;

        if items.is_empty() {
            vec![ActivityItem::placeholder()]
        } else {
            items
        }
    }

    /// システムアラート一覧
    ///
    /// システムアラート → 残高不足アラート → プレースホルダ。
    pub async fn load_alerts(&self) -> Vec<AlertItem> {
        let system_backend = self.backend.clone();
        let balance_backend = self.backend.clone();
        let items = FallbackChain::new("system-alerts", vec![AlertItem::placeholder()])
            .source("system-alerts", move || {
                let backend = system_backend.clone();
                async move {
                    let records = backend.system_alerts().await?;
                    Ok(records
                        .into_iter()
                        .map(AlertItem::from_record)
                        .collect::<Vec<_>>())
                }
                .boxed()
            })
            .source("low-balance-alerts", move || {
                let backend = balance_backend.clone();
                async move {
                    let alerts = backend.low_balance_alerts().await?;
                    Ok(alerts
                        .iter()
                        .map(AlertItem::from_low_balance)
                        .collect::<Vec<_>>())
                }
                .boxed()
            })
            .resolve()
            .await;

        if items.is_empty() {
            vec![AlertItem::placeholder()]
        } else {
            items
        }
    }
}

static DASHBOARD_SERVICE: OnceLock<Arc<DashboardService>> = OnceLock::new();

/// グローバルダッシュボードサービスを初期化する
///
/// 2回目以降の呼び出しは無視される（最初のバックエンドが勝つ）。
pub fn init_dashboard_service(backend: Arc<dyn DashboardBackend>) -> Arc<DashboardService> {
    DASHBOARD_SERVICE
        .get_or_init(|| {
            tracing::info!("🅿️ [SERVICE] Creating global dashboard service");
            Arc::new(DashboardService::new(backend))
        })
        .clone()
}

/// グローバルダッシュボードサービスを取得する
///
/// 未初期化の場合はデフォルトURLのAPIクライアントで初期化する。
pub fn get_dashboard_service() -> Arc<DashboardService> {
    DASHBOARD_SERVICE
        .get_or_init(|| {
            tracing::warn!(
                "🅿️ [SERVICE] Dashboard service not initialized, using default base URL: {}",
                DEFAULT_BASE_URL
            );
            Arc::new(DashboardService::new(Arc::new(
                crate::api::DashboardApi::new(DEFAULT_BASE_URL),
            )))
        })
        .clone()
}
