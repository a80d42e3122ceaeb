use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dioxus::prelude::*;
use parkview::api::DashboardApi;
use parkview::gui::{
    components::DashboardWindow, config_manager::ConfigManager, services::init_dashboard_service,
    utils,
};

/// 駐車場管理ダッシュボード
#[derive(Parser, Debug)]
#[command(name = "parkview", about = "Parking management dashboard")]
struct Args {
    /// 管理サーバーのベースURL（設定ファイルより優先）
    #[arg(long)]
    base_url: Option<String>,
}

fn app() -> Element {
    rsx! {
        div {
            class: "app",
            style: "
                height: 100vh;
                margin: 0;
                padding: 0;
                overflow: auto;
                background: #f0f2f5;
                font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            ",

            DashboardWindow {}
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigManager::new()?.load_or_default();

    utils::init_logging(&config.log.log_level)?;

    let base_url = args.base_url.unwrap_or_else(|| config.base_url.clone());

    tracing::info!("🅿️ Starting Parkview dashboard");
    tracing::info!("📡 Management server: {}", base_url);

    init_dashboard_service(Arc::new(DashboardApi::new(base_url)));

    // 内部でtokioランタイムが管理されるため、外部でtokio::mainは不要
    dioxus::launch(app);

    tracing::info!("👋 Parkview shutting down");
    Ok(())
}
