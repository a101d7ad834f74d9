//! Event, reason-code, and geospatial boundary types produced by L3-L5.

use serde::{Deserialize, Serialize};

/// Causal reason code assigned to an event by the Causal Analyzer (L4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    #[serde(rename = "Brake_Pressure_Delta")]
    BrakePressureDelta,
    #[serde(rename = "Brake_Timing_Delta")]
    BrakeTimingDelta,
    #[serde(rename = "Throttle_Commit_Delta")]
    ThrottleCommitDelta,
    #[serde(rename = "Gear_Delta")]
    GearDelta,
    #[serde(rename = "Data_Missing")]
    DataMissing,
    #[serde(rename = "Invalid_Sector")]
    InvalidSector,
}

impl ReasonCode {
    /// String form matching the JSON schema's enum values exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::BrakePressureDelta => "Brake_Pressure_Delta",
            ReasonCode::BrakeTimingDelta => "Brake_Timing_Delta",
            ReasonCode::ThrottleCommitDelta => "Throttle_Commit_Delta",
            ReasonCode::GearDelta => "Gear_Delta",
            ReasonCode::DataMissing => "Data_Missing",
            ReasonCode::InvalidSector => "Invalid_Sector",
        }
    }
}

/// The compact record bundled into an event's `LLM_Context_Input` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmContextInput {
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Context")]
    pub context: String,
}

/// An overtake event, as emitted by L3 and annotated once by L4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertakeEvent {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Winner_ID")]
    pub winner_id: String,
    #[serde(rename = "Loser_ID")]
    pub loser_id: String,
    #[serde(rename = "Sector_ID")]
    pub sector_id: String,
    #[serde(rename = "Track")]
    pub track: String,
    #[serde(rename = "Race_Number")]
    pub race_number: String,
    #[serde(rename = "Lap_Number")]
    pub lap_number: i64,
    #[serde(rename = "Critical_Event_ID")]
    pub critical_event_id: String,
    #[serde(rename = "Reason_Code")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<ReasonCode>,
    #[serde(rename = "Reason_Value")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_value: Option<f64>,
    #[serde(rename = "LLM_Context_Input")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_context_input: Option<LlmContextInput>,
}

impl OvertakeEvent {
    /// Builds the collision-proof composite identifier
    /// `<sector>_L<lap>_WIN<winner>_LOS<loser>`.
    pub fn composite_id(sector_id: &str, lap: i64, winner: &str, loser: &str) -> String {
        format!("{sector_id}_L{lap}_WIN{winner}_LOS{loser}")
    }
}

/// A 2D geospatial bounding box with centroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub long_min: f64,
    pub long_max: f64,
}

impl BoundingBox {
    pub fn centroid(&self) -> (f64, f64) {
        ((self.lat_min + self.lat_max) / 2.0, (self.long_min + self.long_max) / 2.0)
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut iter = points.into_iter();
        let (lat0, long0) = iter.next()?;
        let mut bbox = BoundingBox {
            lat_min: lat0,
            lat_max: lat0,
            long_min: long0,
            long_max: long0,
        };
        for (lat, long) in iter {
            bbox.lat_min = bbox.lat_min.min(lat);
            bbox.lat_max = bbox.lat_max.max(lat);
            bbox.long_min = bbox.long_min.min(long);
            bbox.long_max = bbox.long_max.max(long);
        }
        Some(bbox)
    }
}

/// Track-level geospatial summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackBoundary {
    #[serde(rename = "Track")]
    pub track: String,
    #[serde(rename = "Lat_Min")]
    pub lat_min: f64,
    #[serde(rename = "Lat_Max")]
    pub lat_max: f64,
    #[serde(rename = "Long_Min")]
    pub long_min: f64,
    #[serde(rename = "Long_Max")]
    pub long_max: f64,
    #[serde(rename = "Center_Lat")]
    pub center_lat: f64,
    #[serde(rename = "Center_Long")]
    pub center_long: f64,
    #[serde(rename = "Boundary_Points")]
    pub boundary_points: Vec<(f64, f64)>,
}

/// Sector-level geospatial summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorBoundary {
    #[serde(rename = "Track")]
    pub track: String,
    #[serde(rename = "Sector_ID")]
    pub sector_id: String,
    #[serde(rename = "Lat_Min")]
    pub lat_min: f64,
    #[serde(rename = "Lat_Max")]
    pub lat_max: f64,
    #[serde(rename = "Long_Min")]
    pub long_min: f64,
    #[serde(rename = "Long_Max")]
    pub long_max: f64,
    #[serde(rename = "Center_Lat")]
    pub center_lat: f64,
    #[serde(rename = "Center_Long")]
    pub center_long: f64,
    #[serde(rename = "Sample_Points")]
    pub sample_points: Vec<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_id_matches_spec_format() {
        let id = OvertakeEvent::composite_id("S_003", 4, "12", "45");
        assert_eq!(id, "S_003_L4_WIN12_LOS45");
    }

    #[test]
    fn reason_code_serializes_to_exact_enum_strings() {
        let json = serde_json::to_string(&ReasonCode::BrakePressureDelta).unwrap();
        assert_eq!(json, "\"Brake_Pressure_Delta\"");
    }

    #[test]
    fn bounding_box_from_points_computes_extent_and_centroid() {
        let bbox = BoundingBox::from_points(vec![(1.0, 2.0), (3.0, -1.0), (0.5, 4.0)]).unwrap();
        assert_eq!(bbox.lat_min, 0.5);
        assert_eq!(bbox.lat_max, 3.0);
        assert_eq!(bbox.long_min, -1.0);
        assert_eq!(bbox.long_max, 4.0);
        assert_eq!(bbox.centroid(), (1.75, 1.5));
    }

    #[test]
    fn bounding_box_from_empty_points_is_none() {
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }
}
