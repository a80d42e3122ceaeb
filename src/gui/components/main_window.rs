use dioxus::prelude::*;

use crate::gui::{
    components::{ActivityList, AlertsList, BreakdownChartCard, StatCard, StatsChartCard},
    hooks::use_dashboard,
    styles::theme::get_embedded_css,
};

/// ダッシュボードメインウィンドウ
#[component]
pub fn DashboardWindow() -> Element {
    let dashboard = use_dashboard();

    tracing::debug!("🖥️ DashboardWindow: Rendering");

    rsx! {
        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        div {
            class: "main-window",
            style: "
                min-height: 100vh;
                background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                padding: 20px;
                box-sizing: border-box;
                display: flex;
                flex-direction: column;
                gap: 20px;
            ",

            // ヘッダー（タイトル + 時計）
            div {
                class: "app-header",
                style: "
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    background: rgba(255, 255, 255, 0.1);
                    border-radius: 16px;
                    padding: 20px;
                    backdrop-filter: blur(10px);
                    border: 1px solid rgba(255, 255, 255, 0.2);
                ",

                div {
                    h1 {
                        style: "
                            font-size: clamp(1.6rem, 4vw, 2.4rem);
                            color: white;
                            margin: 0 0 4px 0;
                            font-weight: 700;
                            text-shadow: 0 2px 4px rgba(0, 0, 0, 0.3);
                            letter-spacing: -0.02em;
                        ",
                        "🅿️ Parkview"
                    }
                    p {
                        style: "
                            color: rgba(255, 255, 255, 0.9);
                            margin: 0;
                            font-size: clamp(0.85rem, 2vw, 1rem);
                        ",
                        "Parking Management Dashboard"
                    }
                }

                div {
                    class: "header-clock",
                    style: "
                        color: white;
                        font-size: 15px;
                        font-weight: 600;
                        background: rgba(255, 255, 255, 0.15);
                        border-radius: 10px;
                        padding: 10px 16px;
                    ",
                    "{dashboard.current_time}"
                }
            }

            // 統計カードグリッド
            div {
                class: "stats-grid",
                style: "
                    display: grid;
                    grid-template-columns: repeat(4, 1fr);
                    gap: 16px;
                ",

                StatCard {
                    icon: "💵",
                    label: "Total Revenue",
                    value: dashboard.revenue.read().clone(),
                    accent: "#56cc9d",
                }
                StatCard {
                    icon: "🚗",
                    label: "Active Vehicles",
                    value: dashboard.active_vehicles.read().clone(),
                    accent: "#26c6da",
                }
                StatCard {
                    icon: "🏁",
                    label: "Occupancy Rate",
                    value: dashboard.occupancy.read().clone(),
                    accent: "#667eea",
                }
                StatCard {
                    icon: "⚠️",
                    label: "Active Alerts",
                    value: dashboard.alert_count.read().clone(),
                    accent: "#ff5252",
                }
            }

            // チャート行
            div {
                style: "
                    display: grid;
                    grid-template-columns: 2fr 1fr;
                    gap: 16px;
                ",

                StatsChartCard { dashboard: dashboard.clone() }
                BreakdownChartCard { dashboard: dashboard.clone() }
            }

            // リスト行
            div {
                style: "
                    display: grid;
                    grid-template-columns: 1fr 1fr;
                    gap: 16px;
                ",

                ActivityList { dashboard: dashboard.clone() }
                AlertsList { dashboard }
            }
        }
    }
}
