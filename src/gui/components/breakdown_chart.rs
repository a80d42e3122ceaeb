use dioxus::prelude::*;

use crate::gui::charts::{ChartSpec, DonutChartSpec, SERIES_PALETTE};
use crate::gui::hooks::DashboardHandle;

const DONUT_RADIUS: f64 = 70.0;
const DONUT_STROKE: f64 = 42.0;

/// 収益内訳カード（ドーナツチャート + 凡例）
#[component]
pub fn BreakdownChartCard(dashboard: DashboardHandle) -> Element {
    let spec = dashboard.breakdown_chart.read().clone();

    rsx! {
        div {
            class: "chart-card",
            style: "
                background: white;
                border-radius: 12px;
                padding: 20px;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
            ",

            h3 {
                style: "font-size: 16px; color: #333; margin: 0 0 16px 0;",
                "💰 Revenue Breakdown"
            }

            match spec {
                ChartSpec::Donut(donut) => rsx! {
                    DonutChartView { donut }
                },
                ChartSpec::Empty { message } => rsx! {
                    div {
                        class: "no-data",
                        style: "
                            height: 220px;
                            display: flex;
                            align-items: center;
                            justify-content: center;
                            color: #9ca3af;
                            font-size: 14px;
                        ",
                        "{message}"
                    }
                },
                // 内訳領域に折れ線が来ることはない
                ChartSpec::Line(_) => rsx! {
                    div { class: "no-data", "No data available" }
                },
            }
        }
    }
}

/// ドーナツチャート本体（SVGのstroke-dasharrayで描画）
#[component]
pub fn DonutChartView(donut: DonutChartSpec) -> Element {
    let circumference = 2.0 * std::f64::consts::PI * DONUT_RADIUS;
    let total = donut.total();

    // スライスごとの弧長と開始オフセットを積算する
    let mut offset = 0.0;
    let segments: Vec<(String, String, String)> = donut
        .slices
        .iter()
        .enumerate()
        .map(|(i, (_, value))| {
            let fraction = if total > 0.0 { value / total } else { 0.0 };
            let arc = circumference * fraction;
            let color = SERIES_PALETTE[i % SERIES_PALETTE.len()].to_string();
            let dasharray = format!("{arc:.2} {:.2}", circumference - arc);
            let dashoffset = format!("{:.2}", -offset);
            offset += arc;
            (color, dasharray, dashoffset)
        })
        .collect();

    let legend: Vec<(String, String)> = donut
        .slices
        .iter()
        .enumerate()
        .map(|(i, _)| {
            (
                SERIES_PALETTE[i % SERIES_PALETTE.len()].to_string(),
                donut.tooltip_label(i),
            )
        })
        .collect();

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 24px;",

            svg {
                view_box: "0 0 220 220",
                width: "220",
                height: "220",

                g {
                    // 12時の位置から開始
                    transform: "rotate(-90 110 110)",

                    for (color, dasharray, dashoffset) in segments.iter() {
                        circle {
                            cx: "110",
                            cy: "110",
                            r: "{DONUT_RADIUS}",
                            fill: "none",
                            stroke: "{color}",
                            stroke_width: "{DONUT_STROKE}",
                            stroke_dasharray: "{dasharray}",
                            stroke_dashoffset: "{dashoffset}",
                        }
                    }
                }
            }

            // 凡例
            div {
                style: "display: flex; flex-direction: column; gap: 10px;",
                for (color, label) in legend.iter() {
                    div {
                        style: "display: flex; align-items: center; gap: 8px; font-size: 13px; color: #374151;",
                        span {
                            style: format!(
                                "width: 12px; height: 12px; border-radius: 3px; display: inline-block; background: {};",
                                color
                            ),
                        }
                        "{label}"
                    }
                }
            }
        }
    }
}
