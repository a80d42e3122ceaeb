// Core modules
pub mod charts; // チャート仕様とレジストリ
pub mod config_manager; // 設定管理モジュール
pub mod format; // 表示用フォーマッタ
pub mod models; // 表示用ビューモデル
pub mod poller; // ポーリングスケジューラ
pub mod services; // メトリクスローダー
pub mod utils; // ユーティリティ関数

// Dioxus UI components
pub mod components; // UIコンポーネント
pub mod hooks; // ダッシュボードフック
pub mod styles; // スタイル

// Core functionality exports
pub use charts::{get_chart_registry, ChartRegistry, ChartSpec};
pub use models::{ActivityItem, AlertItem};
pub use poller::{get_poll_scheduler, PollConfig, PollResult, PollScheduler, PollTaskType};
pub use services::{get_dashboard_service, init_dashboard_service, DashboardService};

pub use components::DashboardWindow;
pub use hooks::{use_dashboard, DashboardHandle};
