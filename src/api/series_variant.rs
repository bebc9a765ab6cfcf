use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_to_unix_seconds, parse_calendar_date};
use crate::core::{DataPoint, PlotPoint};
use crate::error::{ChartError, ChartResult};

/// Supported interpretations of a [`DataPoint`] series.
///
/// Each variant fixes how the date string is parsed, which field is plotted
/// and which y-axis label is shown when the caller supplies none. Unknown tags
/// are rejected rather than mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeriesVariant {
    /// ISO dates (`2024-03-01`), label supplied by the caller.
    #[default]
    Daily,
    /// Compact dates (`20240301`), labelled "Impressions".
    Impressions,
    /// Compact dates (`20240301`), labelled "Test Label".
    Test,
}

/// Accessor/label triple selected by a [`SeriesVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesAccessors {
    pub date_format: &'static str,
    pub default_label: Option<&'static str>,
}

impl SeriesAccessors {
    /// X accessor: the record's date as unix seconds.
    pub fn x(&self, point: &DataPoint) -> ChartResult<f64> {
        parse_calendar_date(&point.date, self.date_format).map(date_to_unix_seconds)
    }

    /// Y accessor: the plotted numeric field.
    #[must_use]
    pub fn y(&self, point: &DataPoint) -> f64 {
        point.impressions
    }

    /// Label to draw: the caller's label when present, else the preset.
    #[must_use]
    pub fn label(&self, caller_label: Option<&str>) -> String {
        caller_label
            .or(self.default_label)
            .unwrap_or_default()
            .to_owned()
    }
}

impl SeriesVariant {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Impressions, Self::Test];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Impressions => "impressions",
            Self::Test => "test",
        }
    }

    #[must_use]
    pub fn accessors(self) -> SeriesAccessors {
        match self {
            Self::Daily => SeriesAccessors {
                date_format: "%Y-%m-%d",
                default_label: None,
            },
            Self::Impressions => SeriesAccessors {
                date_format: "%Y%m%d",
                default_label: Some("Impressions"),
            },
            Self::Test => SeriesAccessors {
                date_format: "%Y%m%d",
                default_label: Some("Test Label"),
            },
        }
    }

    /// Applies both accessors to every record, keeping series order.
    ///
    /// Fails on the first date the variant's format can't parse and on the
    /// first non-finite value.
    pub fn resolve(self, data: &[DataPoint]) -> ChartResult<Vec<PlotPoint>> {
        let accessors = self.accessors();
        data.iter()
            .map(|point| {
                let x = accessors.x(point)?;
                let y = accessors.y(point);
                if !y.is_finite() {
                    return Err(ChartError::InvalidData(format!(
                        "value for `{}` must be finite",
                        point.date
                    )));
                }
                Ok(PlotPoint::new(x, y))
            })
            .collect()
    }
}

impl FromStr for SeriesVariant {
    type Err = ChartError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.tag() == tag)
            .ok_or_else(|| ChartError::UnknownSeriesVariant(tag.to_owned()))
    }
}

impl TryFrom<String> for SeriesVariant {
    type Error = ChartError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<SeriesVariant> for String {
    fn from(variant: SeriesVariant) -> Self {
        variant.tag().to_owned()
    }
}

impl fmt::Display for SeriesVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
