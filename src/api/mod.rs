//! 管理サーバーAPI層
//!
//! クライアント・ペイロードモデル・フォールバックチェーンを提供する。

pub mod client;
pub mod fallback;
pub mod models;

pub use client::{DashboardApi, DashboardBackend, FetchError};
pub use fallback::FallbackChain;
pub use models::{
    ActivityRecord, AlertRecord, CountResponse, DailyStat, LowBalanceAlert, OccupancyRate,
    PaymentStatus, PlateNumber, RevenueSummary, SessionRecord, Severity, StatsPeriod,
};
