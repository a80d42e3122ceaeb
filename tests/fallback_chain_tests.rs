//! フォールバックチェーンとチャートレジストリの統合テスト

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::FutureExt;
use parkview::api::{FallbackChain, FetchError};
use parkview::gui::charts::{
    build_breakdown_chart, build_main_chart, ChartRegistry, ChartSpec, BREAKDOWN_CHART_REGION,
    MAIN_CHART_REGION,
};

fn server_error(endpoint: &'static str) -> FetchError {
    FetchError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
    }
}

#[tokio::test]
async fn test_sources_are_tried_in_registration_order() {
    let calls = Arc::new(AtomicUsize::new(0));

    let first_calls = calls.clone();
    let second_calls = calls.clone();

    let chain = FallbackChain::new("ordering", 0usize)
        .source("first", move || {
            let calls = first_calls.clone();
            async move {
                assert_eq!(calls.fetch_add(1, Ordering::SeqCst), 0);
                Err::<usize, _>(server_error("/api/first"))
            }
            .boxed()
        })
        .source("second", move || {
            let calls = second_calls.clone();
            async move {
                assert_eq!(calls.fetch_add(1, Ordering::SeqCst), 1);
                Ok(42usize)
            }
            .boxed()
        });

    assert_eq!(chain.source_count(), 2);
    assert_eq!(chain.resolve().await, 42);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_later_sources_are_not_called_after_success() {
    let second_called = Arc::new(AtomicUsize::new(0));
    let probe = second_called.clone();

    let chain = FallbackChain::new("short-circuit", 0u64)
        .source("first", || async { Ok(7u64) }.boxed())
        .source("second", move || {
            let probe = probe.clone();
            async move {
                probe.fetch_add(1, Ordering::SeqCst);
                Ok(99u64)
            }
            .boxed()
        });

    assert_eq!(chain.resolve().await, 7);
    assert_eq!(second_called.load(Ordering::SeqCst), 0);
}

#[test]
fn test_registry_replaces_handle_per_region() {
    let registry = ChartRegistry::new();

    let breakdown = build_breakdown_chart(&[("Parking Fees".to_string(), 1000.0)]);
    assert!(registry
        .install(BREAKDOWN_CHART_REGION, breakdown.clone())
        .is_none());

    // 同じ領域への再設置は旧ハンドルを返す
    let replaced = registry.install(BREAKDOWN_CHART_REGION, breakdown);
    assert!(replaced.is_some());
    assert_eq!(registry.live_charts(BREAKDOWN_CHART_REGION), 1);

    // 別領域には影響しない
    assert_eq!(registry.live_charts(MAIN_CHART_REGION), 0);
}

#[test]
fn test_registry_generation_increases_per_install() {
    let registry = ChartRegistry::new();
    let spec = build_breakdown_chart(&[("Parking Fees".to_string(), 1000.0)]);

    registry.install(MAIN_CHART_REGION, spec.clone());
    let first = registry.current(MAIN_CHART_REGION).unwrap().generation;

    registry.install(MAIN_CHART_REGION, spec);
    let second = registry.current(MAIN_CHART_REGION).unwrap().generation;

    assert!(second > first);
}

#[test]
fn test_empty_stats_install_shows_message_without_chart() {
    let registry = ChartRegistry::new();
    registry.install(MAIN_CHART_REGION, build_main_chart(&[]));

    assert_eq!(registry.live_charts(MAIN_CHART_REGION), 0);
    match registry.current(MAIN_CHART_REGION).map(|h| h.spec) {
        Some(ChartSpec::Empty { message }) => assert_eq!(message, "No data available"),
        other => panic!("expected empty chart state, got {other:?}"),
    }
}
