//! JSON rendering of an [`AnalysisResult`].

use crate::audit::AnalysisResult;
use crate::{GeoLensError, Result};

/// Serialize the full result using the camelCase consumer contract.
pub fn to_json(result: &AnalysisResult, pretty: bool) -> Result<String> {
    let rendered = if pretty { serde_json::to_string_pretty(result) } else { serde_json::to_string(result) };
    rendered.map_err(|e| GeoLensError::Serialization(e.to_string()))
}
