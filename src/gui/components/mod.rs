// ダッシュボードUIコンポーネント

pub mod activity_list;
pub mod alerts_list;
pub mod breakdown_chart;
pub mod main_window;
pub mod stat_cards;
pub mod stats_chart;

pub use activity_list::ActivityList;
pub use alerts_list::AlertsList;
pub use breakdown_chart::BreakdownChartCard;
pub use main_window::DashboardWindow;
pub use stat_cards::StatCard;
pub use stats_chart::StatsChartCard;
