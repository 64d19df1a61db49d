//! Case records shared by the integration tests.

use casedoc::{CaseRecord, Severity, Status};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A complete record that comfortably fits on one page.
pub fn short_critical_record() -> CaseRecord {
    CaseRecord::new(
        "Chlorine dosing pump stalled",
        "Utilities",
        Severity::Critical,
        Status::Resolved,
    )
    .with_public_id("CASE-0042")
    .with_internal_id("INT-9f3a")
    .with_subsector("Water treatment")
    .with_category("Equipment failure")
    .with_tool("SCADA historian")
    .with_location("Plant 3")
    .with_incident_date(date(2024, 3, 9))
    .with_duration_minutes(245)
    .with_overview("The primary dosing pump stopped during the night shift.")
    .with_investigation("Operators traced the stall to a seized bearing.")
    .with_root_cause("Lubrication schedule was skipped twice.")
    .with_resolution("The pump was replaced and the schedule enforced.")
    .with_verdict("Preventable")
    .with_summary("Maintenance gap caused a four hour outage.")
    .with_detected_by("Night operator")
    .with_validated_by("Shift lead")
    .with_impact_scope("Single plant")
    .with_tags(["pumps", "maintenance"])
}

/// A record whose investigation alone runs to `words` words.
pub fn long_investigation_record(words: usize) -> CaseRecord {
    let vocabulary = [
        "sensor", "valve", "pressure", "reading", "operator", "checked", "the", "manifold",
        "again", "while", "logging", "every", "deviation", "observed",
    ];
    let investigation = (0..words)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ");

    CaseRecord::new("Extended pressure drift", "Energy", Severity::High, Status::InProgress)
        .with_public_id("CASE-0099")
        .with_incident_date(date(2024, 11, 2))
        .with_overview("Pressure drifted across several shifts.")
        .with_investigation(investigation)
        .with_root_cause("Calibration drift in a shared transmitter.")
        .with_verdict("Instrument fault")
}

/// Only the required fields.
pub fn minimal_record() -> CaseRecord {
    CaseRecord::new("Unlabelled alarm", "Transport", Severity::Low, Status::Open)
}

/// The short record as a client would send it, with explicit nulls.
pub const SHORT_RECORD_JSON: &str = r##"{
    "publicId": "CASE-0042",
    "internalId": null,
    "title": "Chlorine dosing pump stalled",
    "sector": "Utilities",
    "subsector": "Water treatment",
    "tool": null,
    "severity": "critical",
    "status": "in_progress",
    "incidentDate": "2024-03-09",
    "durationMinutes": 245,
    "overview": "The primary dosing pump stopped during the night shift.",
    "investigation": null,
    "verdict": null,
    "summary": "Maintenance gap caused a four hour outage.",
    "tags": ["#pumps", "maintenance"]
}"##;
