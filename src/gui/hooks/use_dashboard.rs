//! ダッシュボード状態のカスタムフック
//!
//! シグナル集約ハンドルと固定間隔ポーリングの登録を担当する。
//! データ取得はすべて[`DashboardService`]のフォールバックチェーン経由で、
//! ハンドルのメソッドは失敗してもシグナルを壊さない。

use chrono::Local;
use dioxus::prelude::*;

use crate::api::models::StatsPeriod;
use crate::gui::charts::{
    build_breakdown_chart, build_main_chart, get_chart_registry, ChartSpec, BREAKDOWN_CHART_REGION,
    MAIN_CHART_REGION,
};
use crate::gui::format::format_clock;
use crate::gui::models::{ActivityItem, AlertItem};
use crate::gui::poller::{get_poll_scheduler, PollConfig, PollResult, PollTaskType};
use crate::gui::services::get_dashboard_service;
use crate::gui::utils::RefreshTimer;

/// ダッシュボードハンドル
#[derive(Clone)]
pub struct DashboardHandle {
    pub current_time: Signal<String>,
    pub revenue: Signal<String>,
    pub active_vehicles: Signal<String>,
    pub occupancy: Signal<String>,
    pub alert_count: Signal<String>,
    pub main_chart: Signal<ChartSpec>,
    pub breakdown_chart: Signal<ChartSpec>,
    pub activities: Signal<Vec<ActivityItem>>,
    pub alerts: Signal<Vec<AlertItem>>,
    pub period: Signal<StatsPeriod>,
}

impl PartialEq for DashboardHandle {
    fn eq(&self, _other: &Self) -> bool {
        // Signalの比較は困難なので、常にfalseとして扱う
        // これによりpropsの変更が検出される
        false
    }
}

impl DashboardHandle {
    /// ヘッダー時計を更新
    pub fn tick_clock(&self) {
        let mut current_time = self.current_time;
        current_time.set(format_clock(Local::now()));
    }

    /// ライブ指標とリストを更新（30秒間隔の対象）
    pub fn refresh_live(&self) {
        let mut revenue = self.revenue;
        let mut active_vehicles = self.active_vehicles;
        let mut occupancy = self.occupancy;
        let mut alert_count = self.alert_count;
        let mut activities = self.activities;
        let mut alerts = self.alerts;

        spawn(async move {
            let _timer = RefreshTimer::new("live-refresh");
            let service = get_dashboard_service();

            revenue.set(service.load_revenue().await);
            active_vehicles.set(service.load_active_vehicles().await);
            occupancy.set(service.load_occupancy().await);
            alert_count.set(service.load_alert_count().await);
            activities.set(service.load_activity().await);
            alerts.set(service.load_alerts().await);
        });
    }

    /// チャート統計を更新（5分間隔・期間切替の対象）
    pub fn refresh_stats(&self, period: StatsPeriod) {
        let mut main_chart = self.main_chart;
        let mut breakdown_chart = self.breakdown_chart;

        spawn(async move {
            let _timer = RefreshTimer::new("stats-refresh");
            let service = get_dashboard_service();
            let registry = get_chart_registry();

            let stats = service.load_stats(period).await;
            let spec = build_main_chart(&stats);
            if let Some(replaced) = registry.install(MAIN_CHART_REGION, spec.clone()) {
                tracing::debug!(
                    region = MAIN_CHART_REGION,
                    generation = replaced.generation,
                    "📊 [CHART] Destroyed previous chart handle"
                );
            }
            main_chart.set(spec);

            let breakdown = service.load_breakdown().await;
            let spec = build_breakdown_chart(&breakdown);
            if let Some(replaced) = registry.install(BREAKDOWN_CHART_REGION, spec.clone()) {
                tracing::debug!(
                    region = BREAKDOWN_CHART_REGION,
                    generation = replaced.generation,
                    "📊 [CHART] Destroyed previous chart handle"
                );
            }
            breakdown_chart.set(spec);
        });
    }

    /// 全セクションを即時更新
    pub fn refresh_all(&self) {
        self.tick_clock();
        self.refresh_live();
        self.refresh_stats(*self.period.peek());
    }

    /// 統計期間を切り替えてチャートを再取得
    pub fn set_period(&self, period: StatsPeriod) {
        let mut period_signal = self.period;
        if *period_signal.peek() == period {
            return;
        }
        period_signal.set(period);
        tracing::info!("📊 [CHART] Stats period changed to {}", period.tag());
        self.refresh_stats(period);
    }
}

/// ダッシュボードフック
///
/// 初回マウントで全セクションを即時更新し、時計1秒・ライブ30秒・
/// 統計5分のポーリングタスクを登録する。
pub fn use_dashboard() -> DashboardHandle {
    let handle = DashboardHandle {
        current_time: use_signal(|| format_clock(Local::now())),
        revenue: use_signal(|| "RWF 0".to_string()),
        active_vehicles: use_signal(|| "0".to_string()),
        occupancy: use_signal(|| "--".to_string()),
        alert_count: use_signal(|| "0".to_string()),
        main_chart: use_signal(|| ChartSpec::empty("Loading chart data...")),
        breakdown_chart: use_signal(|| ChartSpec::empty("Loading chart data...")),
        activities: use_signal(Vec::new),
        alerts: use_signal(Vec::new),
        period: use_signal(StatsPeriod::default),
    };

    use_effect({
        let handle = handle.clone();
        move || {
            tracing::info!("🅿️ [DASHBOARD] Mounting dashboard, starting poll tasks");
            handle.refresh_all();

            let scheduler = get_poll_scheduler();

            let clock_handle = handle.clone();
            let _ = scheduler.start_task(
                "clock-tick".to_string(),
                PollTaskType::ClockTick,
                PollConfig::clock_tick(),
                move |_context| {
                    clock_handle.tick_clock();
                    PollResult::Continue
                },
            );

            let live_handle = handle.clone();
            let _ = scheduler.start_task(
                "live-refresh".to_string(),
                PollTaskType::LiveRefresh,
                PollConfig::live_refresh(),
                move |_context| {
                    live_handle.refresh_live();
                    PollResult::Continue
                },
            );

            let stats_handle = handle.clone();
            let _ = scheduler.start_task(
                "stats-refresh".to_string(),
                PollTaskType::StatsRefresh,
                PollConfig::stats_refresh(),
                move |_context| {
                    stats_handle.refresh_stats(*stats_handle.period.peek());
                    PollResult::Continue
                },
            );
        }
    });

    use_drop(|| {
        let cancelled = get_poll_scheduler().cancel_all_tasks();
        tracing::info!(
            "🅿️ [DASHBOARD] Unmounting dashboard, cancelled {} poll tasks",
            cancelled
        );
    });

    handle
}
