//! CSV export of a rally log.

use crate::models::RallyRecord;
use serde::Serialize;

#[derive(Serialize)]
struct RallyRow {
    sequence: u32,
    scoring_side: String,
    serving_side: String,
    side1_score: u32,
    side2_score: u32,
}

/// One header line, then one row per rally in log order.
pub fn rally_log_csv(rallies: &[RallyRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rallies.is_empty() {
        writer.write_record([
            "sequence",
            "scoring_side",
            "serving_side",
            "side1_score",
            "side2_score",
        ])?;
    }
    for rally in rallies {
        writer.serialize(RallyRow {
            sequence: rally.sequence_number,
            scoring_side: rally.scoring_side.to_string(),
            serving_side: rally.serving_side.to_string(),
            side1_score: rally.side1_score,
            side2_score: rally.side2_score,
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
