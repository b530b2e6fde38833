use trendstitch::{Method, Timeframe, TrendQuery, TrendStitcher};
use trendstitch_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{day, window_a, window_b};

async fn run(method: Method) -> (trendstitch::DailyTrend, usize) {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("reference");
    ctl.set_behavior(
        Timeframe::dates(day(170), day(438)),
        MockBehavior::Return(window_b()),
    )
    .await;
    ctl.set_behavior(
        Timeframe::dates(day(1), day(269)),
        MockBehavior::Return(window_a()),
    )
    .await;

    // 268-day spans with 99-day overlap spans give 269 and 100 calendar days.
    let stitcher = TrendStitcher::builder()
        .with_connector(conn)
        .delta_days(268)
        .overlap_days(99)
        .method(method)
        .build()
        .unwrap();
    let trend = stitcher
        .daily_trend(&TrendQuery::new("reference"), day(1), day(438))
        .await
        .unwrap();
    (trend, ctl.call_count().await)
}

#[tokio::test]
async fn max_method_scales_older_window_by_quarter() {
    let (trend, calls) = run(Method::Max).await;
    assert_eq!(calls, 2);
    assert_eq!(trend.points.len(), 438);
    assert_eq!(trend.max_value(), Some(100.0));

    // Relative to window A's scale, day 438 ends up 4x its raw value:
    // raw B(438) / raw A(1) = 2, stitched ratio = 8.
    assert_eq!(trend.value_on(day(438)), Some(100.0));
    // 12.5 rounds to even
    assert_eq!(trend.value_on(day(1)), Some(12.0));
    assert_eq!(trend.value_on(day(170)), Some(19.0));
    assert_eq!(trend.value_on(day(269)), Some(25.0));

    for p in &trend.points {
        let inside = p.date >= day(170) && p.date <= day(269);
        assert_eq!(p.overlap, inside, "flag on {}", p.date);
    }
}

#[tokio::test]
async fn min_method_averages_overlap() {
    let (trend, _) = run(Method::Min).await;
    assert_eq!(trend.value_on(day(1)), Some(25.0));
    assert_eq!(trend.value_on(day(170)), Some(25.0));
    assert_eq!(trend.value_on(day(269)), Some(38.0));
}

#[tokio::test]
async fn sum_method_keeps_latest_window_on_overlap() {
    let (trend, _) = run(Method::Sum).await;
    assert_eq!(trend.value_on(day(200)), Some(25.0));
    assert_eq!(trend.value_on(day(1)), Some(17.0));
    assert_eq!(trend.value_on(day(438)), Some(100.0));
    assert!(trend.points.iter().any(|p| p.overlap));
}

#[tokio::test]
async fn mean_method_keeps_latest_window_on_overlap() {
    let (trend, _) = run(Method::Mean).await;
    assert_eq!(trend.value_on(day(250)), Some(25.0));
    assert_eq!(trend.max_value(), Some(100.0));
    let flagged = trend.points.iter().filter(|p| p.overlap).count();
    assert_eq!(flagged, 100);
}
