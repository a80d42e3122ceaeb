//! Dioxusカスタムフック

pub mod use_dashboard;

pub use use_dashboard::{use_dashboard, DashboardHandle};
