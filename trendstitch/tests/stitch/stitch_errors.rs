use std::sync::Arc;
use std::time::Duration;

use trendstitch::{
    ConnectorBuilder, RetryConfig, Timeframe, TrendQuery, TrendStitcher, TrendsError,
};
use trendstitch_mock::{DynamicMockConnector, MockBehavior, MockConnector};

use crate::helpers::{daily_raw, day, window_b, ymd};

fn mock() -> Arc<MockConnector> {
    Arc::new(MockConnector::new(ymd(2020, 10, 20)))
}

#[test]
fn builder_rejects_bad_geometry() {
    for (delta, overlap) in [(100, 100), (100, 150), (270, 100), (100, 0)] {
        let err = TrendStitcher::builder()
            .with_connector(mock())
            .delta_days(delta)
            .overlap_days(overlap)
            .build()
            .err()
            .unwrap();
        assert!(err.is_configuration(), "{delta}/{overlap}: {err}");
    }
}

#[test]
fn builder_requires_connector() {
    let err = TrendStitcher::builder().build().err().unwrap();
    assert!(matches!(err, TrendsError::InvalidArg(_)));
}

#[tokio::test]
async fn bad_arguments_fail_before_any_fetch() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("args");
    let s = TrendStitcher::builder().with_connector(conn).build().unwrap();

    let q = TrendQuery::new("rust");
    let err = s.daily_trend(&q, day(10), day(10)).await.unwrap_err();
    assert!(err.is_configuration());
    let err = s.daily_trend(&q, day(10), day(2)).await.unwrap_err();
    assert!(err.is_configuration());
    let err = s
        .daily_trend(&TrendQuery::new("  "), day(1), day(10))
        .await
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(ctl.call_count().await, 0);
}

#[tokio::test]
async fn empty_window_is_unavailable() {
    let s = TrendStitcher::builder().with_connector(mock()).build().unwrap();
    let err = s
        .daily_trend(&TrendQuery::new("EMPTY"), ymd(2020, 1, 1), ymd(2020, 6, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::DataUnavailable(_)), "{err}");
}

#[tokio::test]
async fn connector_failure_propagates() {
    let s = TrendStitcher::builder().with_connector(mock()).build().unwrap();
    let err = s
        .daily_trend(&TrendQuery::new("FAIL"), ymd(2020, 1, 1), ymd(2020, 6, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::Connector { .. }), "{err}");
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_abort_the_run() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("throttled");
    ctl.set_fallback(MockBehavior::Fail(TrendsError::RateLimited {
        retry_after_ms: None,
    }))
    .await;
    let conn = ConnectorBuilder::new(raw)
        .with_retry(&RetryConfig {
            base_delay: Duration::from_secs(1),
            step_delay: Duration::ZERO,
            ..RetryConfig::default()
        })
        .build();
    let s = TrendStitcher::builder().with_connector(conn).build().unwrap();

    let err = s
        .daily_trend(&TrendQuery::new("rust"), ymd(2020, 1, 1), ymd(2020, 6, 1))
        .await
        .unwrap_err();
    assert!(err.root_cause().is_transient());
    match err {
        TrendsError::RetriesExhausted { attempts, last } => {
            assert_eq!(attempts, 4);
            assert!(last.is_transient());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ctl.call_count().await, 4);
}

#[tokio::test]
async fn retry_recovers_mid_run() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("flaky");
    ctl.set_behavior(
        Timeframe::dates(day(170), day(438)),
        MockBehavior::RateLimitTimes(2, window_b()),
    )
    .await;
    let conn = ConnectorBuilder::new(raw)
        .with_retry(&RetryConfig {
            base_delay: Duration::from_millis(1),
            step_delay: Duration::ZERO,
            ..RetryConfig::default()
        })
        .build();
    let s = TrendStitcher::builder()
        .with_connector(conn)
        .delta_days(268)
        .overlap_days(99)
        .build()
        .unwrap();

    let trend = s
        .daily_trend(&TrendQuery::new("flaky"), day(200), day(438))
        .await
        .unwrap();
    assert_eq!(trend.span(), Some((day(200), day(438))));
    assert_eq!(ctl.call_count().await, 3);
}

#[tokio::test]
async fn zero_overlap_in_new_window_is_undefined() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("zeros");
    ctl.set_behavior(
        Timeframe::dates(day(170), day(438)),
        MockBehavior::Return(window_b()),
    )
    .await;
    ctl.set_behavior(
        Timeframe::dates(day(1), day(269)),
        MockBehavior::Return(daily_raw((1..=269).map(|i| {
            let v = if i < 170 { 10.0 } else { 0.0 };
            (day(i), v)
        }))),
    )
    .await;
    let s = TrendStitcher::builder()
        .with_connector(conn)
        .delta_days(268)
        .overlap_days(99)
        .build()
        .unwrap();

    let err = s
        .daily_trend(&TrendQuery::new("zeros"), day(1), day(438))
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::UndefinedCoefficient(_)), "{err}");
}

#[tokio::test]
async fn disjoint_windows_are_unavailable() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("gap");
    ctl.set_behavior(
        Timeframe::dates(day(170), day(438)),
        MockBehavior::Return(daily_raw((300..=438).map(|i| (day(i), 50.0)))),
    )
    .await;
    ctl.set_behavior(
        Timeframe::dates(day(1), day(269)),
        MockBehavior::Return(daily_raw((1..=269).map(|i| (day(i), 50.0)))),
    )
    .await;
    let s = TrendStitcher::builder()
        .with_connector(conn)
        .delta_days(268)
        .overlap_days(99)
        .build()
        .unwrap();

    let err = s
        .daily_trend(&TrendQuery::new("gap"), day(1), day(438))
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::DataUnavailable(_)), "{err}");
}
