use crate::error::RenderError;
use casedoc_types::CaseRecord;

/// A renderer that turns one case record into a downloadable artifact.
///
/// Rendering is synchronous and deterministic for a given record and
/// renderer configuration (the PDF creation date aside).
pub trait DocumentRenderer: Send + Sync {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;

    fn render(&self, record: &CaseRecord) -> Result<Vec<u8>, RenderError>;
}

/// Rejects records no renderer can produce a meaningful document for.
pub fn validate_record(record: &CaseRecord) -> Result<(), RenderError> {
    if record.title.trim().is_empty() {
        return Err(RenderError::InvalidRecord("title is empty".to_string()));
    }
    Ok(())
}
