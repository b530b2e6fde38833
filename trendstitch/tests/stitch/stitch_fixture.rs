use std::sync::Arc;
use std::time::Duration;

use trendstitch::{Method, TrendQuery, TrendStitcher};
use trendstitch_mock::MockConnector;

use crate::helpers::ymd;

fn stitcher(method: Method) -> TrendStitcher {
    let today = ymd(2020, 10, 20);
    TrendStitcher::builder()
        .with_connector(Arc::new(MockConnector::new(today)))
        .method(method)
        .build()
        .unwrap()
}

#[tokio::test]
async fn reference_range_is_complete_and_normalized() {
    let s = stitcher(Method::Max);
    let start = ymd(2019, 1, 1);
    let end = ymd(2020, 10, 15);
    let trend = s
        .daily_trend(&TrendQuery::new("iphone").geo("US"), start, end)
        .await
        .unwrap();

    assert_eq!(trend.keyword, "iphone");
    assert_eq!(trend.span(), Some((start, end)));
    let expected_days = usize::try_from((end - start).num_days() + 1).unwrap();
    assert_eq!(trend.points.len(), expected_days);
    assert!(trend.points.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
    assert_eq!(trend.max_value(), Some(100.0));
    assert!(trend.points.iter().all(|p| p.value >= 0.0 && p.value.fract() == 0.0));
    assert!(trend.points.iter().any(|p| p.overlap));
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    for method in Method::ALL {
        let s = stitcher(method);
        let q = TrendQuery::new("rust");
        let a = s.daily_trend(&q, ymd(2019, 3, 1), ymd(2020, 6, 30)).await.unwrap();
        let b = s.daily_trend(&q, ymd(2019, 3, 1), ymd(2020, 6, 30)).await.unwrap();
        assert_eq!(a, b, "{method}");
    }
}

#[tokio::test]
async fn one_stitcher_serves_keywords_concurrently() {
    let s = stitcher(Method::Mean);
    let (start, end) = (ymd(2019, 6, 1), ymd(2020, 6, 1));
    let qa = TrendQuery::new("alpha");
    let qb = TrendQuery::new("beta");
    let (a, b) = tokio::join!(s.daily_trend(&qa, start, end), s.daily_trend(&qb, start, end));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.points.len(), b.points.len());
    assert_ne!(a.points, b.points);
    assert_eq!(a, s.daily_trend(&qa, start, end).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn sleeps_after_every_window() {
    let s = TrendStitcher::builder()
        .with_connector(Arc::new(MockConnector::new(ymd(2020, 10, 20))))
        .sleep(Duration::from_secs(10))
        .build()
        .unwrap();
    let started = tokio::time::Instant::now();
    s.daily_trend(&TrendQuery::new("rust"), ymd(2019, 1, 1), ymd(2020, 10, 15))
        .await
        .unwrap();
    // four windows
    assert!(started.elapsed() >= Duration::from_secs(40));
    assert!(started.elapsed() < Duration::from_secs(41));
}

#[tokio::test]
async fn short_range_uses_single_window() {
    let s = stitcher(Method::Max);
    let trend = s
        .daily_trend(&TrendQuery::new("rust"), ymd(2020, 5, 1), ymd(2020, 6, 1))
        .await
        .unwrap();
    assert_eq!(trend.points.len(), 32);
    assert!(trend.points.iter().all(|p| !p.overlap));
    assert_eq!(trend.max_value(), Some(100.0));
}
