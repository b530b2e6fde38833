use chrono::NaiveDate;
use trendstitch_types::{Method, Property, Timeframe, TrendQuery, TrendsError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn method_parses_known_names_case_insensitively() {
    assert_eq!("max".parse::<Method>().unwrap(), Method::Max);
    assert_eq!("MIN".parse::<Method>().unwrap(), Method::Min);
    assert_eq!(" Mean ".parse::<Method>().unwrap(), Method::Mean);
    assert_eq!("sum".parse::<Method>().unwrap(), Method::Sum);
    for m in Method::ALL {
        assert_eq!(m.as_str().parse::<Method>().unwrap(), m);
    }
}

#[test]
fn unknown_method_is_invalid_argument() {
    let err = "median".parse::<Method>().unwrap_err();
    assert!(matches!(err, TrendsError::InvalidArg(ref msg) if msg.contains("median")));
}

#[test]
fn collapse_policy_is_keyed_by_exact_method() {
    assert!(Method::Max.averages_columns());
    assert!(Method::Min.averages_columns());
    assert!(!Method::Mean.averages_columns());
    assert!(!Method::Sum.averages_columns());
}

#[test]
fn timeframe_renders_provider_strings() {
    let tf = Timeframe::dates(d(2020, 1, 20), d(2020, 10, 15));
    assert_eq!(tf.to_string(), "2020-01-20 2020-10-15");
    assert_eq!(Timeframe::LastSevenDays.to_string(), "now 7-d");
}

#[test]
fn property_maps_to_wire_values() {
    assert_eq!(Property::Web.as_param(), "");
    assert_eq!("shopping".parse::<Property>().unwrap().as_param(), "froogle");
    assert_eq!("".parse::<Property>().unwrap(), Property::Web);
    assert!("radio".parse::<Property>().is_err());
}

#[test]
fn query_builds_single_keyword_request() {
    let q = TrendQuery::new("iphone")
        .geo("US")
        .category(5)
        .property(Property::News);
    let req = q.request(Timeframe::LastSevenDays);
    assert_eq!(req.keywords, vec!["iphone".to_string()]);
    assert_eq!(req.geo, "US");
    assert_eq!(req.category, 5);
    assert_eq!(req.property, Property::News);
    assert_eq!(req.timeframe, Timeframe::LastSevenDays);
}
