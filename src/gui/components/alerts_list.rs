use dioxus::prelude::*;

use crate::gui::hooks::DashboardHandle;

/// システムアラートリスト
///
/// 行クラスは重大度に応じて alert-high / alert-medium / alert-low の3種。
#[component]
pub fn AlertsList(dashboard: DashboardHandle) -> Element {
    let alerts = dashboard.alerts.read().clone();

    rsx! {
        div {
            class: "list-card",
            style: "
                background: white;
                border-radius: 12px;
                padding: 20px;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
            ",

            h3 {
                style: "font-size: 16px; color: #333; margin: 0 0 12px 0;",
                "🔔 System Alerts"
            }

            if alerts.is_empty() {
                div {
                    class: "loading-state",
                    style: "padding: 16px; color: #9ca3af; font-size: 13px; text-align: center;",
                    "Loading alerts..."
                }
            } else {
                div {
                    for alert in alerts.iter() {
                        div {
                            class: format!("alert-item {}", alert.severity_class()),
                            style: "
                                display: flex;
                                align-items: center;
                                gap: 12px;
                                padding: 10px 8px;
                                border-radius: 6px;
                                margin-bottom: 6px;
                            ",

                            span { style: "font-size: 16px;", "🔔" }

                            div {
                                div {
                                    style: "font-size: 13px; color: #111827;",
                                    "{alert.title}"
                                }
                                div {
                                    style: "font-size: 11px; color: #9ca3af; margin-top: 2px;",
                                    "{alert.time}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
