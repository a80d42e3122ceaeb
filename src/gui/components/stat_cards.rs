use dioxus::prelude::*;

/// 統計カードコンポーネント
///
/// 上段グリッドの1枚分。値はフォーマット済み文字列で受け取る。
#[component]
pub fn StatCard(icon: &'static str, label: &'static str, value: String, accent: &'static str) -> Element {
    rsx! {
        div {
            class: "stat-card",
            style: "
                background: white;
                border-radius: 12px;
                padding: 20px;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
                display: flex;
                align-items: center;
                gap: 16px;
            ",

            div {
                style: format!(
                    "
                        width: 52px;
                        height: 52px;
                        border-radius: 12px;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        font-size: 24px;
                        background: {}22;
                    ",
                    accent
                ),
                "{icon}"
            }

            div {
                div {
                    class: "stat-value",
                    style: format!(
                        "
                            font-size: 24px;
                            font-weight: 700;
                            color: {};
                            line-height: 1.2;
                        ",
                        accent
                    ),
                    "{value}"
                }
                div {
                    class: "stat-label",
                    style: "
                        font-size: 12px;
                        color: #6b7280;
                        margin-top: 2px;
                    ",
                    "{label}"
                }
            }
        }
    }
}
