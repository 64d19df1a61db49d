use chrono::NaiveDate;

/// US numeric calendar date, e.g. `3/9/2024`.
pub fn format_incident_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn format_duration(minutes: u32) -> String {
    format!("{} minutes", minutes)
}

/// `#a, #b`; `None` when there are no non-blank tags.
pub fn format_tags(tags: &[String]) -> Option<String> {
    let joined = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| format!("#{}", t.trim_start_matches('#')))
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}
