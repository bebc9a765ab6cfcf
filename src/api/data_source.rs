use serde::Deserialize;

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Deserialize)]
struct SeriesEnvelope {
    data: Vec<DataPoint>,
}

/// Decodes a series payload.
///
/// Accepts a bare array of records or an object with a `data` array. Records
/// carry `date` and either `impressions` or `Impressions`.
pub fn series_from_json_str(input: &str) -> ChartResult<Vec<DataPoint>> {
    if let Ok(points) = serde_json::from_str::<Vec<DataPoint>>(input) {
        return Ok(points);
    }
    let envelope: SeriesEnvelope = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse series json: {e}")))?;
    Ok(envelope.data)
}

pub fn series_to_json_pretty(points: &[DataPoint]) -> ChartResult<String> {
    serde_json::to_string_pretty(points)
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize series json: {e}")))
}
