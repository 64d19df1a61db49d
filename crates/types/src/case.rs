use crate::classification::{Severity, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A structured incident record, the sole input of the renderers.
///
/// Every narrative and attribution field is optional. Renderers decide how an
/// absent value is shown; the record itself never substitutes placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Identifier shown to readers and used in saved file names.
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub internal_id: Option<String>,

    pub title: String,
    pub sector: String,
    #[serde(default)]
    pub subsector: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// The tool or instrument involved in the incident.
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub severity: Severity,
    pub status: Status,

    #[serde(default)]
    pub incident_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,

    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub investigation: Option<String>,
    #[serde(default)]
    pub root_cause: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub detected_by: Option<String>,
    #[serde(default)]
    pub validated_by: Option<String>,
    #[serde(default)]
    pub impact_scope: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl CaseRecord {
    /// Creates a record with only the required classification fields set.
    pub fn new(
        title: impl Into<String>,
        sector: impl Into<String>,
        severity: Severity,
        status: Status,
    ) -> Self {
        Self {
            public_id: None,
            internal_id: None,
            title: title.into(),
            sector: sector.into(),
            subsector: None,
            category: None,
            tool: None,
            location: None,
            severity,
            status,
            incident_date: None,
            duration_minutes: None,
            overview: None,
            investigation: None,
            root_cause: None,
            resolution: None,
            verdict: None,
            summary: None,
            detected_by: None,
            validated_by: None,
            impact_scope: None,
            tags: Vec::new(),
        }
    }

    pub fn with_public_id(mut self, id: impl Into<String>) -> Self {
        self.public_id = Some(id.into());
        self
    }

    pub fn with_internal_id(mut self, id: impl Into<String>) -> Self {
        self.internal_id = Some(id.into());
        self
    }

    pub fn with_subsector(mut self, subsector: impl Into<String>) -> Self {
        self.subsector = Some(subsector.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_incident_date(mut self, date: NaiveDate) -> Self {
        self.incident_date = Some(date);
        self
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_overview(mut self, text: impl Into<String>) -> Self {
        self.overview = Some(text.into());
        self
    }

    pub fn with_investigation(mut self, text: impl Into<String>) -> Self {
        self.investigation = Some(text.into());
        self
    }

    pub fn with_root_cause(mut self, text: impl Into<String>) -> Self {
        self.root_cause = Some(text.into());
        self
    }

    pub fn with_resolution(mut self, text: impl Into<String>) -> Self {
        self.resolution = Some(text.into());
        self
    }

    pub fn with_verdict(mut self, text: impl Into<String>) -> Self {
        self.verdict = Some(text.into());
        self
    }

    pub fn with_summary(mut self, text: impl Into<String>) -> Self {
        self.summary = Some(text.into());
        self
    }

    pub fn with_detected_by(mut self, name: impl Into<String>) -> Self {
        self.detected_by = Some(name.into());
        self
    }

    pub fn with_validated_by(mut self, name: impl Into<String>) -> Self {
        self.validated_by = Some(name.into());
        self
    }

    pub fn with_impact_scope(mut self, scope: impl Into<String>) -> Self {
        self.impact_scope = Some(scope.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "title": "Pump failure",
            "sector": "Utilities",
            "severity": "High",
            "status": "Open"
        }"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Pump failure");
        assert!(record.public_id.is_none());
        assert!(record.tags.is_empty());
        assert!(record.incident_date.is_none());
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let json = r#"{
            "publicId": "CASE-0042",
            "title": "Pump failure",
            "sector": "Utilities",
            "severity": "critical",
            "status": "in-progress",
            "incidentDate": "2024-03-09",
            "durationMinutes": 245,
            "rootCause": "Seal wear",
            "tags": ["pump", "seal"]
        }"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.public_id.as_deref(), Some("CASE-0042"));
        assert_eq!(record.severity, Severity::Critical);
        assert_eq!(record.status, Status::InProgress);
        assert_eq!(record.incident_date, NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(record.duration_minutes, Some(245));
        assert_eq!(record.root_cause.as_deref(), Some("Seal wear"));
        assert_eq!(record.tags, vec!["pump", "seal"]);
    }

    #[test]
    fn test_builder_setters() {
        let record = CaseRecord::new("T", "S", Severity::Low, Status::Closed)
            .with_public_id("P-1")
            .with_tags(["a", "b"])
            .with_duration_minutes(10);
        assert_eq!(record.public_id.as_deref(), Some("P-1"));
        assert_eq!(record.tags.len(), 2);
        assert_eq!(record.duration_minutes, Some(10));
    }
}
