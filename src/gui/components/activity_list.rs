use dioxus::prelude::*;

use crate::gui::hooks::DashboardHandle;
use crate::gui::models::icon_glyph;

/// 最近のアクティビティリスト
#[component]
pub fn ActivityList(dashboard: DashboardHandle) -> Element {
    let activities = dashboard.activities.read().clone();

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
                "🕒 Recent Activity"
            }

            if activities.is_empty() {
                div {
                    class: "loading-state",
                    style: "padding: 16px; color: #9ca3af; font-size: 13px; text-align: center;",
                    "Loading recent activities..."
                }
            } else {
                div {
                    for activity in activities.iter() {
                        div {
                            class: "activity-item {activity.kind}",
                            style: "
                                display: flex;
                                align-items: center;
                                gap: 12px;
                                padding: 10px 4px;
                                border-bottom: 1px solid #f3f4f6;
                            ",

                            span {
                                style: "font-size: 18px;",
                                {icon_glyph(&activity.icon)}
                            }

                            div {
                                div {
                                    style: "font-size: 13px; color: #111827;",
                                    "{activity.title}"
                                }
                                div {
                                    style: "font-size: 11px; color: #9ca3af; margin-top: 2px;",
                                    "{activity.time}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
