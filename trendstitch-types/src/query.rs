//! Query and request types passed to connectors.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TrendsError;

/// Search property filter (`gprop` on the provider side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// Regular web search.
    #[default]
    Web,
    /// Image search.
    Images,
    /// News search.
    News,
    /// YouTube search.
    Youtube,
    /// Shopping search.
    Shopping,
}

impl Property {
    /// Provider wire value; web search is the empty string.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Web => "",
            Self::Images => "images",
            Self::News => "news",
            Self::Youtube => "youtube",
            Self::Shopping => "froogle",
        }
    }
}

impl FromStr for Property {
    type Err = TrendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "web" => Ok(Self::Web),
            "images" => Ok(Self::Images),
            "news" => Ok(Self::News),
            "youtube" => Ok(Self::Youtube),
            "shopping" | "froogle" => Ok(Self::Shopping),
            other => Err(TrendsError::InvalidArg(format!("unknown property '{other}'"))),
        }
    }
}

/// Time range of a single provider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Inclusive calendar date range; served daily for short ranges.
    Dates {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
    /// The trailing seven days, served hourly.
    LastSevenDays,
}

impl Timeframe {
    /// Convenience constructor for a date range.
    #[must_use]
    pub const fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Dates { start, end }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dates { start, end } => {
                write!(f, "{} {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
            Self::LastSevenDays => f.write_str("now 7-d"),
        }
    }
}

/// Keyword plus the opaque provider filters shared by every request of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendQuery {
    /// Search term.
    pub keyword: String,
    /// Provider category id; `0` means all categories.
    pub category: u32,
    /// Region code such as `US`; empty means worldwide.
    pub geo: String,
    /// Search property filter.
    pub property: Property,
}

impl TrendQuery {
    /// Worldwide, all-category web query for `keyword`.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: 0,
            geo: String::new(),
            property: Property::Web,
        }
    }

    /// Set the region code.
    #[must_use]
    pub fn geo(mut self, geo: impl Into<String>) -> Self {
        self.geo = geo.into();
        self
    }

    /// Set the category id.
    #[must_use]
    pub const fn category(mut self, category: u32) -> Self {
        self.category = category;
        self
    }

    /// Set the search property.
    #[must_use]
    pub const fn property(mut self, property: Property) -> Self {
        self.property = property;
        self
    }

    /// Build a single-keyword connector request for `timeframe`.
    #[must_use]
    pub fn request(&self, timeframe: Timeframe) -> TrendsRequest {
        TrendsRequest {
            keywords: vec![self.keyword.clone()],
            timeframe,
            category: self.category,
            geo: self.geo.clone(),
            property: self.property,
        }
    }
}

/// Fully specified connector request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendsRequest {
    /// Search terms; the provider returns one value column per keyword.
    pub keywords: Vec<String>,
    /// Requested range.
    pub timeframe: Timeframe,
    /// Provider category id.
    pub category: u32,
    /// Region code.
    pub geo: String,
    /// Search property filter.
    pub property: Property,
}
