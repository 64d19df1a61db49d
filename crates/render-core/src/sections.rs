//! The canonical section catalog both renderers walk in the same order.
//!
//! Renderers differ only in how they treat an absent value: Markdown prints
//! the `NOT_AVAILABLE` token, the paginated renderer omits the block.

use crate::utils::{format_duration, format_incident_date, format_tags};
use casedoc_types::CaseRecord;

/// Fallback token for absent values in the Markdown document.
pub const NOT_AVAILABLE: &str = "N/A";

/// Body of the verdict section when neither verdict nor summary is recorded.
pub const NO_VERDICT_PLACEHOLDER: &str = "No verdict or summary recorded.";

pub const VERDICT_HEADING: &str = "Verdict & Summary";
pub const OPERATIONAL_HEADING: &str = "Operational Context";

/// A label and its value, `None` when the record has nothing to show.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: Option<String>,
}

impl Field {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self { label, value }
    }

    pub fn value_or_na(&self) -> &str {
        self.value.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// The four free-text sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSection {
    Overview,
    Investigation,
    RootCause,
    Resolution,
}

pub const NARRATIVE_SECTIONS: [NarrativeSection; 4] = [
    NarrativeSection::Overview,
    NarrativeSection::Investigation,
    NarrativeSection::RootCause,
    NarrativeSection::Resolution,
];

impl NarrativeSection {
    pub fn heading(self) -> &'static str {
        match self {
            NarrativeSection::Overview => "Overview",
            NarrativeSection::Investigation => "Investigation",
            NarrativeSection::RootCause => "Root Cause",
            NarrativeSection::Resolution => "Resolution",
        }
    }

    pub fn text(self, record: &CaseRecord) -> Option<&str> {
        let raw = match self {
            NarrativeSection::Overview => &record.overview,
            NarrativeSection::Investigation => &record.investigation,
            NarrativeSection::RootCause => &record.root_cause,
            NarrativeSection::Resolution => &record.resolution,
        };
        present(raw)
    }
}

/// Treats blank strings the same as missing ones.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn owned(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

/// Metadata preamble: Sector, Subsector, Tool, Location, Category, Incident
/// Date, Tags. The public id is not part of it; it names the saved file.
pub fn metadata_fields(record: &CaseRecord) -> Vec<Field> {
    let sector = Some(record.sector.clone()).filter(|s| !s.trim().is_empty());
    vec![
        Field::new("Sector", sector),
        Field::new("Subsector", owned(&record.subsector)),
        Field::new("Tool", owned(&record.tool)),
        Field::new("Location", owned(&record.location)),
        Field::new("Category", owned(&record.category)),
        Field::new("Incident Date", record.incident_date.map(format_incident_date)),
        Field::new("Tags", format_tags(&record.tags)),
    ]
}

/// Operational context: Detected By, Severity, Status, Impact Scope,
/// Duration, Validated By.
pub fn operational_fields(record: &CaseRecord) -> Vec<Field> {
    vec![
        Field::new("Detected By", owned(&record.detected_by)),
        Field::new("Severity", Some(record.severity.to_string())),
        Field::new("Status", Some(record.status.to_string())),
        Field::new("Impact Scope", owned(&record.impact_scope)),
        Field::new("Duration", record.duration_minutes.map(format_duration)),
        Field::new("Validated By", owned(&record.validated_by)),
    ]
}

/// Present verdict and summary parts, labelled, in document order.
pub fn verdict_parts(record: &CaseRecord) -> Vec<(&'static str, &str)> {
    [
        ("Verdict", present(&record.verdict)),
        ("Summary", present(&record.summary)),
    ]
    .into_iter()
    .filter_map(|(label, text)| text.map(|t| (label, t)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedoc_types::{Severity, Status};
    use chrono::NaiveDate;

    fn record() -> CaseRecord {
        CaseRecord::new("Pump failure", "Utilities", Severity::Critical, Status::InProgress)
    }

    #[test]
    fn test_metadata_order_and_absent_values() {
        let fields = metadata_fields(&record().with_public_id("CASE-1"));
        let labels: Vec<_> = fields.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            [
                "Sector",
                "Subsector",
                "Tool",
                "Location",
                "Category",
                "Incident Date",
                "Tags"
            ]
        );
        assert_eq!(fields[0].value_or_na(), "Utilities");
        assert_eq!(fields[1].value_or_na(), NOT_AVAILABLE);
        assert_eq!(fields[6].value, None);
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let r = record().with_overview("   ").with_tool("");
        assert_eq!(NarrativeSection::Overview.text(&r), None);
        assert_eq!(metadata_fields(&r)[2].value, None);
    }

    #[test]
    fn test_operational_fields_format_values() {
        let r = record()
            .with_duration_minutes(245)
            .with_incident_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let ops = operational_fields(&r);
        assert_eq!(ops[1].value.as_deref(), Some("Critical"));
        assert_eq!(ops[2].value.as_deref(), Some("In Progress"));
        assert_eq!(ops[4].value.as_deref(), Some("245 minutes"));
        assert_eq!(metadata_fields(&r)[5].value.as_deref(), Some("3/9/2024"));
    }

    #[test]
    fn test_verdict_parts_skip_missing() {
        assert!(verdict_parts(&record()).is_empty());
        let r = record().with_summary("Closed out");
        assert_eq!(verdict_parts(&r), vec![("Summary", "Closed out")]);
    }
}
