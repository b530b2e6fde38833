use std::sync::Arc;

use chrono::Days;
use trendstitch::{Timeframe, TrendQuery, TrendStitcher, TrendsError};
use trendstitch_mock::{DynamicMockConnector, MockBehavior, MockConnector};

use crate::helpers::{daily_raw, hourly_raw, ymd};

#[tokio::test]
async fn fixture_tail_fills_lagging_days() {
    let today = ymd(2020, 10, 20);
    let s = TrendStitcher::builder()
        .with_connector(Arc::new(MockConnector::new(today)))
        .build()
        .unwrap();
    let trend = s
        .daily_trend(&TrendQuery::new("rust"), ymd(2020, 6, 1), today)
        .await
        .unwrap();

    assert_eq!(trend.points.len(), 142);
    assert_eq!(trend.span(), Some((ymd(2020, 6, 1), today)));
    assert_eq!(trend.max_value(), Some(100.0));

    let flag = |d| trend.points.iter().find(|p| p.date == d).map(|p| p.overlap);
    // 18-hour first day is not part of the overlap
    assert_eq!(flag(ymd(2020, 10, 13)), Some(false));
    for d in 14..=18 {
        assert_eq!(flag(ymd(2020, 10, d)), Some(true), "2020-10-{d}");
    }
    assert_eq!(flag(ymd(2020, 10, 19)), Some(false));
    assert_eq!(flag(ymd(2020, 10, 20)), Some(false));
}

#[tokio::test]
async fn incomplete_first_hourly_day_is_excluded_from_coefficient() {
    let end = ymd(2021, 3, 31);
    let back = |n: u64| end.checked_sub_days(Days::new(n)).unwrap();

    let (conn, ctl) = DynamicMockConnector::new_with_controller("tail");
    let daily_start = back(269);
    ctl.set_behavior(
        Timeframe::dates(daily_start, end),
        MockBehavior::Return(daily_raw(
            daily_start.iter_days().take_while(|d| *d <= back(3)).map(|d| (d, 10.0)),
        )),
    )
    .await;
    let mut hourly = vec![(back(7), 18, 5.0)];
    hourly.extend((1..=6).rev().map(|n| (back(n), 24, 1.0)));
    hourly.push((end, 24, 2.0));
    ctl.set_behavior(Timeframe::LastSevenDays, MockBehavior::Return(hourly_raw(&hourly)))
        .await;

    let s = TrendStitcher::builder().with_connector(conn).build().unwrap();
    let trend = s
        .daily_trend(&TrendQuery::new("tail"), back(30), end)
        .await
        .unwrap();

    // coefficient 10/24 from complete days only; the partial day (sum 90) would give 10/90
    assert_eq!(trend.value_on(back(2)), Some(50.0));
    assert_eq!(trend.value_on(back(1)), Some(50.0));
    assert_eq!(trend.value_on(end), Some(100.0));
    assert_eq!(trend.value_on(back(10)), Some(50.0));

    let flag = |d| trend.points.iter().find(|p| p.date == d).map(|p| p.overlap);
    assert_eq!(flag(back(7)), Some(false));
    assert_eq!(flag(back(6)), Some(true));
    assert_eq!(flag(back(3)), Some(true));
    assert_eq!(flag(back(2)), Some(false));
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn tail_without_shared_days_is_unavailable() {
    let end = ymd(2021, 3, 31);
    let back = |n: u64| end.checked_sub_days(Days::new(n)).unwrap();

    let (conn, ctl) = DynamicMockConnector::new_with_controller("tail");
    ctl.set_behavior(
        Timeframe::dates(back(269), end),
        MockBehavior::Return(daily_raw(
            back(269).iter_days().take_while(|d| *d <= back(20)).map(|d| (d, 10.0)),
        )),
    )
    .await;
    let hourly: Vec<_> = (0..=6).rev().map(|n| (back(n), 24, 1.0)).collect();
    ctl.set_behavior(Timeframe::LastSevenDays, MockBehavior::Return(hourly_raw(&hourly)))
        .await;

    let s = TrendStitcher::builder().with_connector(conn).build().unwrap();
    let err = s
        .daily_trend(&TrendQuery::new("tail"), back(60), end)
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::DataUnavailable(_)), "{err}");
}

#[tokio::test]
async fn gap_after_tail_is_unavailable() {
    let end = ymd(2021, 3, 31);
    let back = |n: u64| end.checked_sub_days(Days::new(n)).unwrap();

    let (conn, ctl) = DynamicMockConnector::new_with_controller("tail");
    ctl.set_behavior(
        Timeframe::dates(back(269), end),
        MockBehavior::Return(daily_raw(
            back(269).iter_days().take_while(|d| *d <= back(5)).map(|d| (d, 10.0)),
        )),
    )
    .await;
    // hourly data stops two days before the requested end
    let hourly: Vec<_> = (2..=7).rev().map(|n| (back(n), 24, 1.0)).collect();
    ctl.set_behavior(Timeframe::LastSevenDays, MockBehavior::Return(hourly_raw(&hourly)))
        .await;

    let s = TrendStitcher::builder().with_connector(conn).build().unwrap();
    let err = s
        .daily_trend(&TrendQuery::new("tail"), back(60), end)
        .await
        .unwrap_err();
    assert!(matches!(err, TrendsError::DataUnavailable(_)), "{err}");
}

#[tokio::test]
async fn scaled_tail_rounds_halves_to_even() {
    let end = ymd(2021, 3, 31);
    let back = |n: u64| end.checked_sub_days(Days::new(n)).unwrap();

    let (conn, ctl) = DynamicMockConnector::new_with_controller("tail");
    ctl.set_behavior(
        Timeframe::dates(back(269), end),
        MockBehavior::Return(daily_raw(
            back(269).iter_days().take_while(|d| *d <= back(3)).map(|d| (d, 6.0)),
        )),
    )
    .await;
    let mut hourly: Vec<_> = (1..=6).rev().map(|n| (back(n), 24, 0.5)).collect();
    // five hours so far today: 5 * 0.5 coefficient = 2.5
    hourly.push((end, 5, 1.0));
    ctl.set_behavior(Timeframe::LastSevenDays, MockBehavior::Return(hourly_raw(&hourly)))
        .await;

    let s = TrendStitcher::builder().with_connector(conn).build().unwrap();
    let trend = s
        .daily_trend(&TrendQuery::new("tail"), back(30), end)
        .await
        .unwrap();

    assert_eq!(trend.value_on(back(2)), Some(100.0));
    // 2 after the tail rounding, then 2 * 100 / 6
    assert_eq!(trend.value_on(end), Some(33.0));
}
