//! チャート仕様とチャートレジストリ
//!
//! チャートは「描画領域ごとに高々1つ」を不変条件とする。レジストリは
//! 領域名→ハンドルのマップを保持し、installは置換（既存ハンドルの破棄）
//! として動作する。仕様の構築は純粋関数で行い、描画はコンポーネント側。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::api::models::DailyStat;
use crate::gui::format::format_date;

/// メインチャートの描画領域名
pub const MAIN_CHART_REGION: &str = "stats-chart";
/// 収益内訳チャートの描画領域名
pub const BREAKDOWN_CHART_REGION: &str = "revenue-chart";

/// 系列カラーパレット（内訳チャートで循環使用）
pub const SERIES_PALETTE: [&str; 5] = ["#667eea", "#56cc9d", "#ff8a65", "#ff5252", "#26c6da"];

pub const VEHICLES_COLOR: &str = "#26c6da";
pub const REVENUE_COLOR: &str = "#56cc9d";
pub const SESSIONS_COLOR: &str = "#667eea";

/// 系列が従う値軸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAxis {
    /// 左軸（台数・セッション数）
    Primary,
    /// 右軸（収益）
    Secondary,
}

/// 折れ線チャートの1系列
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub axis: ValueAxis,
    pub points: Vec<f64>,
}

/// 折れ線チャート仕様
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl LineChartSpec {
    /// 指定軸の最大値（ゼロ除算回避のため最低1.0）
    pub fn axis_max(&self, axis: ValueAxis) -> f64 {
        self.series
            .iter()
            .filter(|s| s.axis == axis)
            .flat_map(|s| s.points.iter().copied())
            .fold(1.0_f64, f64::max)
    }
}

/// ドーナツチャート仕様
#[derive(Debug, Clone, PartialEq)]
pub struct DonutChartSpec {
    pub slices: Vec<(String, f64)>,
}

impl DonutChartSpec {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|(_, value)| value).sum()
    }

    /// スライスの構成比（%、四捨五入）。合計0なら0。
    pub fn percentage(&self, index: usize) -> u32 {
        let total = self.total();
        if total <= 0.0 {
            return 0;
        }
        let value = self.slices.get(index).map(|(_, v)| *v).unwrap_or(0.0);
        (value / total * 100.0).round() as u32
    }

    /// 凡例・ツールチップ用ラベル
    pub fn tooltip_label(&self, index: usize) -> String {
        match self.slices.get(index) {
            Some((label, value)) => format!(
                "{}: RWF {} ({}%)",
                label,
                crate::gui::format::format_number(*value),
                self.percentage(index)
            ),
            None => String::new(),
        }
    }
}

/// 描画領域に設置するチャートの内容
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Line(LineChartSpec),
    Donut(DonutChartSpec),
    /// データなし。チャートは構築されず、メッセージのみ表示する。
    Empty { message: String },
}

impl ChartSpec {
    pub fn empty(message: impl Into<String>) -> Self {
        ChartSpec::Empty {
            message: message.into(),
        }
    }

    /// 実チャート（Empty以外）かどうか
    pub fn is_chart(&self) -> bool {
        !matches!(self, ChartSpec::Empty { .. })
    }
}

/// 日次統計からメインチャート仕様を構築する
///
/// 収益のみ右軸。データが空の場合はチャートを構築しない。
pub fn build_main_chart(stats: &[DailyStat]) -> ChartSpec {
    if stats.is_empty() {
        return ChartSpec::empty("No data available");
    }

    let labels = stats
        .iter()
        .map(|stat| format_date(stat.label_source()))
        .collect();

    ChartSpec::Line(LineChartSpec {
        labels,
        series: vec![
            ChartSeries {
                label: "Vehicles",
                color: VEHICLES_COLOR,
                axis: ValueAxis::Primary,
                points: stats.iter().map(|s| s.vehicles() as f64).collect(),
            },
            ChartSeries {
                label: "Revenue (RWF)",
                color: REVENUE_COLOR,
                axis: ValueAxis::Secondary,
                points: stats.iter().map(|s| s.revenue_value()).collect(),
            },
            ChartSeries {
                label: "Sessions",
                color: SESSIONS_COLOR,
                axis: ValueAxis::Primary,
                points: stats.iter().map(|s| s.sessions() as f64).collect(),
            },
        ],
    })
}

/// 収益内訳からドーナツチャート仕様を構築する（凡例順＝入力順）
pub fn build_breakdown_chart(breakdown: &[(String, f64)]) -> ChartSpec {
    if breakdown.is_empty() {
        return ChartSpec::empty("No data available");
    }
    ChartSpec::Donut(DonutChartSpec {
        slices: breakdown.to_vec(),
    })
}

/// 設置済みチャートのハンドル
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub region: String,
    pub generation: u64,
    pub spec: ChartSpec,
}

/// 描画領域→ハンドルのレジストリ
///
/// 同じ領域へのinstallは既存ハンドルを返しつつ置き換える。
/// 呼び出し側は返却されたハンドルを「破棄済み」として扱う。
pub struct ChartRegistry {
    charts: RwLock<HashMap<String, ChartHandle>>,
    generation: AtomicU64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self {
            charts: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// チャートを設置し、置き換えた旧ハンドルを返す
    pub fn install(&self, region: &str, spec: ChartSpec) -> Option<ChartHandle> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = ChartHandle {
            region: region.to_string(),
            generation,
            spec,
        };
        self.charts.write().insert(region.to_string(), handle)
    }

    /// 領域の現在のハンドル
    pub fn current(&self, region: &str) -> Option<ChartHandle> {
        self.charts.read().get(region).cloned()
    }

    /// 領域に生きている実チャートの数（0か1）
    pub fn live_charts(&self, region: &str) -> usize {
        self.charts
            .read()
            .get(region)
            .filter(|handle| handle.spec.is_chart())
            .map(|_| 1)
            .unwrap_or(0)
    }
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static CHART_REGISTRY: OnceLock<Arc<ChartRegistry>> = OnceLock::new();

/// グローバルチャートレジストリ
pub fn get_chart_registry() -> Arc<ChartRegistry> {
    CHART_REGISTRY
        .get_or_init(|| Arc::new(ChartRegistry::new()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(date: &str, vehicles: u64, revenue: f64, sessions: u64) -> DailyStat {
        DailyStat {
            date: Some(date.to_string()),
            timestamp: None,
            total_vehicles: Some(vehicles),
            revenue: Some(revenue),
            amount: None,
            total_sessions: Some(sessions),
        }
    }

    #[test]
    fn test_install_twice_keeps_single_live_chart() {
        let registry = ChartRegistry::new();
        let spec = build_main_chart(&[stat("2025-08-27", 10, 5000.0, 12)]);

        let replaced = registry.install(MAIN_CHART_REGION, spec.clone());
        assert!(replaced.is_none());

        let replaced = registry.install(MAIN_CHART_REGION, spec);
        assert!(replaced.is_some());
        assert_eq!(registry.live_charts(MAIN_CHART_REGION), 1);
    }

    #[test]
    fn test_empty_spec_is_not_a_live_chart() {
        let registry = ChartRegistry::new();
        registry.install(MAIN_CHART_REGION, build_main_chart(&[]));
        assert_eq!(registry.live_charts(MAIN_CHART_REGION), 0);
        assert!(matches!(
            registry.current(MAIN_CHART_REGION).map(|h| h.spec),
            Some(ChartSpec::Empty { .. })
        ));
    }

    #[test]
    fn test_main_chart_series_and_axes() {
        let spec = build_main_chart(&[
            stat("2025-08-26", 10, 5000.0, 12),
            stat("2025-08-27", 20, 9000.0, 25),
        ]);
        let ChartSpec::Line(line) = spec else {
            panic!("expected line chart");
        };
        assert_eq!(line.labels, vec!["Aug 26", "Aug 27"]);
        assert_eq!(line.series.len(), 3);
        assert_eq!(line.series[1].axis, ValueAxis::Secondary);
        assert_eq!(line.axis_max(ValueAxis::Primary), 25.0);
        assert_eq!(line.axis_max(ValueAxis::Secondary), 9000.0);
    }

    #[test]
    fn test_donut_percentages() {
        let ChartSpec::Donut(donut) = build_breakdown_chart(&[
            ("Parking Fees".to_string(), 50.0),
            ("Penalties".to_string(), 50.0),
        ]) else {
            panic!("expected donut chart");
        };
        assert_eq!(donut.percentage(0), 50);
        assert_eq!(donut.percentage(1), 50);
        assert_eq!(donut.tooltip_label(0), "Parking Fees: RWF 50 (50%)");
    }

    #[test]
    fn test_donut_zero_total() {
        let donut = DonutChartSpec {
            slices: vec![("Empty".to_string(), 0.0)],
        };
        assert_eq!(donut.percentage(0), 0);
    }
}
