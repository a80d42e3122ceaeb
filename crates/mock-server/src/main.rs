//! 開発用モック管理サーバー
//!
//! ダッシュボードが参照する全エンドポイントをランダムデータで提供する。
//! --fail-rate でエンドポイント単位の疑似障害を注入でき、
//! フォールバックチェーンの動作確認に使う。

use chrono::{Duration, Local};
use clap::Parser;
use log::info;
use rand::Rng;
use serde_json::json;
use warp::http::StatusCode;
use warp::Filter;

#[derive(Parser, Debug, Clone)]
#[command(name = "mock-server", about = "Mock parking management server")]
struct Args {
    /// 待ち受けポート
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// 疑似障害率（0.0〜1.0、各リクエストで500を返す確率）
    #[arg(long, default_value_t = 0.0)]
    fail_rate: f64,

    /// 整形済みエンドポイント（recent-activity / low-balance-alerts）を無効化し、
    /// フォールバック経路を強制する
    #[arg(long)]
    raw_only: bool,
}

const GATES: [&str; 4] = ["gate-1", "gate-2", "exit-a", "unauthorized"];

fn random_plate() -> String {
    let mut rng = rand::thread_rng();
    let letters: String = (0..2)
        .map(|_| (b'A' + rng.gen_range(0..26)) as char)
        .collect();
    format!("RA{} {} {}", letters.chars().next().unwrap_or('A'), rng.gen_range(100..999), letters)
}

/// fail_rateに基づいて500を返すかどうか
fn should_fail(fail_rate: f64) -> bool {
    fail_rate > 0.0 && rand::thread_rng().gen_bool(fail_rate.clamp(0.0, 1.0))
}

fn maybe_fail(fail_rate: f64, body: serde_json::Value) -> Box<dyn warp::Reply> {
    if should_fail(fail_rate) {
        Box::new(warp::reply::with_status(
            warp::reply::json(&json!({"error": "injected failure"})),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else {
        Box::new(warp::reply::json(&body))
    }
}

fn daily_stats(days: i64) -> serde_json::Value {
    let mut rng = rand::thread_rng();
    let today = Local::now().date_naive();
    // 実サーバーと同様に降順で返す
    let stats: Vec<_> = (0..days)
        .map(|offset| {
            let date = today - Duration::days(offset);
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "total_vehicles": rng.gen_range(20..120),
                // DECIMAL列は文字列でシリアライズされることがある
                "revenue": format!("{}", rng.gen_range(5_000..80_000)),
                "total_sessions": rng.gen_range(25..140),
            })
        })
        .collect();
    json!(stats)
}

fn recent_sessions(limit: usize) -> serde_json::Value {
    let mut rng = rand::thread_rng();
    let now = Local::now().naive_local();
    let sessions: Vec<_> = (0..limit)
        .map(|i| {
            let minutes_ago = rng.gen_range(1..600) + (i as i64) * 3;
            json!({
                "plate_number": random_plate(),
                "payment_status": rng.gen_range(0..3),
                "amount": rng.gen_range(200..5_000),
                "gate": GATES[rng.gen_range(0..GATES.len())],
                "timestamp": (now - Duration::minutes(minutes_ago))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            })
        })
        .collect();
    json!(sessions)
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let fail_rate = args.fail_rate;
    let raw_only = args.raw_only;

    info!(
        "🅿️ Mock parking server listening on port {} (fail_rate={}, raw_only={})",
        args.port, fail_rate, raw_only
    );

    let revenue = warp::path!("api" / "revenue").map(move || {
        let total: u32 = rand::thread_rng().gen_range(50_000..2_000_000);
        maybe_fail(fail_rate, json!({"total_revenue": total}))
    });

    let active_vehicles = warp::path!("api" / "active-vehicles").map(move || {
        maybe_fail(
            fail_rate,
            json!({"count": rand::thread_rng().gen_range(0..80)}),
        )
    });

    let occupancy = warp::path!("api" / "occupancy-rate").map(move || {
        let occupied = rand::thread_rng().gen_range(0..100u32);
        maybe_fail(
            fail_rate,
            json!({"rate": occupied, "occupied": occupied, "capacity": 100}),
        )
    });

    let active_alerts = warp::path!("api" / "active-alerts").map(move || {
        maybe_fail(
            fail_rate,
            json!({"count": rand::thread_rng().gen_range(0..12)}),
        )
    });

    let stats = warp::path!("api" / "daily-stats")
        .and(warp::query::<std::collections::HashMap<String, String>>())
        .map(move |query: std::collections::HashMap<String, String>| {
            let days = match query.get("period").map(String::as_str) {
                Some("30d") => 30,
                _ => 7,
            };
            maybe_fail(fail_rate, daily_stats(days))
        });

    let breakdown = warp::path!("api" / "revenue-breakdown").map(move || {
        let mut rng = rand::thread_rng();
        maybe_fail(
            fail_rate,
            json!({
                "Parking Fees": rng.gen_range(40_000..900_000),
                "Penalties": rng.gen_range(5_000..120_000),
                "Subscriptions": rng.gen_range(10_000..300_000),
            }),
        )
    });

    let activity = warp::path!("api" / "recent-activity").map(move || {
        if raw_only {
            return Box::new(warp::reply::with_status(
                warp::reply::json(&json!({"error": "not found"})),
                StatusCode::NOT_FOUND,
            )) as Box<dyn warp::Reply>;
        }
        maybe_fail(
            fail_rate,
            json!([
                {
                    "type": "payment",
                    "title": format!("Payment received from {} - RWF 1,500", random_plate()),
                    "time": "2 minutes ago",
                    "icon": "fa-credit-card",
                },
                {
                    "type": "entry",
                    "title": format!("Vehicle {} entered at gate-1", random_plate()),
                    "time": "5 minutes ago",
                    "icon": "fa-car",
                },
            ]),
        )
    });

    let sessions = warp::path!("api" / "recent-sessions")
        .and(warp::query::<std::collections::HashMap<String, String>>())
        .map(move |query: std::collections::HashMap<String, String>| {
            let limit = query
                .get("limit")
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(20);
            maybe_fail(fail_rate, recent_sessions(limit))
        });

    let system_alerts = warp::path!("api" / "system-alerts").map(move || {
        maybe_fail(
            fail_rate,
            json!([
                {
                    "type": "error",
                    "title": "Barrier at exit-a not responding",
                    "time": "10 minutes ago",
                    "severity": "high",
                },
                {
                    "type": "warning",
                    "title": "Camera 3 signal degraded",
                    "time": "1 hour ago",
                    "severity": "medium",
                },
            ]),
        )
    });

    let low_balance = warp::path!("api" / "low-balance-alerts").map(move || {
        if raw_only {
            return Box::new(warp::reply::with_status(
                warp::reply::json(&json!({"error": "not found"})),
                StatusCode::NOT_FOUND,
            )) as Box<dyn warp::Reply>;
        }
        let now = Local::now().naive_local();
        maybe_fail(
            fail_rate,
            json!([
                {
                    "plate_number": random_plate(),
                    "balance": rand::thread_rng().gen_range(0..500),
                    "last_seen": (now - Duration::hours(2))
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                },
            ]),
        )
    });

    let routes = revenue
        .or(active_vehicles)
        .or(occupancy)
        .or(active_alerts)
        .or(stats)
        .or(breakdown)
        .or(activity)
        .or(sessions)
        .or(system_alerts)
        .or(low_balance)
        .with(warp::log("mock_server"));

    warp::serve(routes).run(([127, 0, 0, 1], args.port)).await;
}
