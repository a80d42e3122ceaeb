use dioxus::prelude::*;

use crate::api::models::StatsPeriod;
use crate::gui::charts::{ChartSpec, LineChartSpec, ValueAxis};
use crate::gui::hooks::DashboardHandle;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 260.0;
const CHART_PADDING: f64 = 24.0;

/// 日次統計チャートカード
///
/// 期間セレクタ（排他的アクティブ）とメイン折れ線チャートを持つ。
#[component]
pub fn StatsChartCard(dashboard: DashboardHandle) -> Element {
    let spec = dashboard.main_chart.read().clone();
    let active_period = *dashboard.period.read();

    rsx! {
        div {
            class: "chart-card",
            style: "
                background: white;
                border-radius: 12px;
                padding: 20px;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
            ",

            // ヘッダー（タイトル + 期間セレクタ）
            div {
                style: "
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    margin-bottom: 16px;
                ",

                h3 {
                    style: "font-size: 16px; color: #333; margin: 0;",
                    "📈 Parking Statistics"
                }

                div {
                    class: "chart-controls",
                    style: "display: flex; gap: 8px;",

                    for period in StatsPeriod::all() {
                        button {
                            class: if period == active_period { "btn active" } else { "btn" },
                            style: format!(
                                "
                                    padding: 6px 14px;
                                    border-radius: 16px;
                                    border: 1px solid #667eea;
                                    font-size: 12px;
                                    cursor: pointer;
                                    background: {};
                                    color: {};
                                ",
                                if period == active_period { "#667eea" } else { "white" },
                                if period == active_period { "white" } else { "#667eea" },
                            ),
                            onclick: {
                                let dashboard = dashboard.clone();
                                move |_| {
                                    tracing::info!("🔄 Period button clicked: {}", period.tag());
                                    dashboard.set_period(period);
                                }
                            },
                            {period.label()}
                        }
                    }
                }
            }

            match spec {
                ChartSpec::Line(line) => rsx! {
                    LineChartView { line }
                },
                ChartSpec::Empty { message } => rsx! {
                    EmptyChartState { message }
                },
                // メイン領域にドーナツが来ることはない
                ChartSpec::Donut(_) => rsx! {
                    EmptyChartState { message: "No data available".to_string() }
                },
            }
        }
    }
}

/// 折れ線チャート本体（SVG描画）
#[component]
pub fn LineChartView(line: LineChartSpec) -> Element {
    let point_count = line.labels.len();
    let inner_width = CHART_WIDTH - CHART_PADDING * 2.0;
    let inner_height = CHART_HEIGHT - CHART_PADDING * 2.0;

    // 各系列を軸最大値で正規化してポリライン座標へ変換する
    let polylines: Vec<(&'static str, String, Vec<(String, String)>)> = line
        .series
        .iter()
        .map(|series| {
            let max = line.axis_max(series.axis);
            let coords: Vec<(String, String)> = series
                .points
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let x = if point_count > 1 {
                        CHART_PADDING + inner_width * (i as f64) / ((point_count - 1) as f64)
                    } else {
                        CHART_PADDING + inner_width / 2.0
                    };
                    let y = CHART_PADDING + inner_height * (1.0 - (value / max).clamp(0.0, 1.0));
                    (format!("{x:.1}"), format!("{y:.1}"))
                })
                .collect();
            let points = coords
                .iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect::<Vec<_>>()
                .join(" ");
            (series.color, points, coords)
        })
        .collect();

    rsx! {
        div {
            svg {
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                width: "100%",
                height: "260",

                // ベースライン
                line {
                    x1: "{CHART_PADDING}",
                    y1: "{CHART_HEIGHT - CHART_PADDING}",
                    x2: "{CHART_WIDTH - CHART_PADDING}",
                    y2: "{CHART_HEIGHT - CHART_PADDING}",
                    stroke: "#e5e7eb",
                    stroke_width: "1",
                }

                for (color, points, coords) in polylines.iter() {
                    polyline {
                        points: "{points}",
                        fill: "none",
                        stroke: "{color}",
                        stroke_width: "2",
                    }
                    for (cx, cy) in coords.iter() {
                        circle {
                            cx: "{cx}",
                            cy: "{cy}",
                            r: "3",
                            fill: "{color}",
                        }
                    }
                }
            }

            // X軸ラベル
            div {
                style: "
                    display: flex;
                    justify-content: space-between;
                    padding: 0 {CHART_PADDING}px;
                    font-size: 11px;
                    color: #6b7280;
                ",
                for label in line.labels.iter() {
                    span { "{label}" }
                }
            }

            // 凡例
            div {
                style: "
                    display: flex;
                    gap: 16px;
                    justify-content: center;
                    margin-top: 12px;
                ",
                for series in line.series.iter() {
                    div {
                        style: "display: flex; align-items: center; gap: 6px; font-size: 12px; color: #374151;",
                        span {
                            style: format!(
                                "width: 10px; height: 10px; border-radius: 2px; display: inline-block; background: {};",
                                series.color
                            ),
                        }
                        {
                            if series.axis == ValueAxis::Secondary {
                                format!("{} ↗", series.label)
                            } else {
                                series.label.to_string()
                            }
                        }
                    }
                }
            }
        }
    }
}

/// データなし状態の表示
#[component]
pub fn EmptyChartState(message: String) -> Element {
    rsx! {
        div {
            class: "no-data",
            style: "
                height: 260px;
                display: flex;
                align-items: center;
                justify-content: center;
                color: #9ca3af;
                font-size: 14px;
            ",
            "{message}"
        }
    }
}
