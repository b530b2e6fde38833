use std::sync::Arc;

use chrono::Days;
use proptest::prelude::*;
use trendstitch::{Method, TrendQuery, TrendStitcher};
use trendstitch_mock::MockConnector;

use crate::helpers::ymd;

fn arb_method() -> impl Strategy<Value = Method> {
    prop::sample::select(Method::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn stitched_series_is_complete_and_normalized(
        back in 0u64..400,
        length in 1u64..1_200,
        method in arb_method(),
        keyword in "[a-z]{3,8}",
    ) {
        let today = ymd(2020, 10, 20);
        let end = today - Days::new(back);
        let start = end - Days::new(length);
        let stitcher = TrendStitcher::builder()
            .with_connector(Arc::new(MockConnector::new(today)))
            .method(method)
            .build()
            .unwrap();

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let trend = rt
            .block_on(stitcher.daily_trend(&TrendQuery::new(keyword), start, end))
            .unwrap();

        prop_assert_eq!(trend.span(), Some((start, end)));
        prop_assert_eq!(trend.points.len() as u64, length + 1);
        prop_assert!(trend.points.windows(2).all(|w| w[1].date == w[0].date + Days::new(1)));
        prop_assert_eq!(trend.max_value(), Some(100.0));
        prop_assert!(trend.points.iter().all(|p| (0.0..=100.0).contains(&p.value)));
    }
}
