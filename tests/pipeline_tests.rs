//! End-to-end runs: render, name and save the documents.

mod common;

use casedoc::{CaseRecord, OutputFormat, PipelineBuilder};
use casedoc_traits::InMemoryFontSource;
use chrono::NaiveDate;
use common::fixtures::{SHORT_RECORD_JSON, minimal_record, short_critical_record};
use common::{GeneratedPdf, TestResult, init_logging};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn generation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

#[tokio::test]
async fn generate_both_saves_markdown_and_pdf() -> TestResult {
    init_logging();
    let dir = tempdir()?;
    let pipeline = PipelineBuilder::new()
        .with_font_source(Arc::new(InMemoryFontSource::new()))
        .with_output_dir(dir.path())
        .with_generation_date(generation_date())
        .build()?;
    let record = short_critical_record();

    let saved = pipeline.generate(&record, OutputFormat::Both).await?;
    assert_eq!(
        saved,
        vec![
            dir.path().join("CASE-0042_2024-05-17.md"),
            dir.path().join("CASE-0042_2024-05-17.pdf"),
        ]
    );

    assert_eq!(fs::read_to_string(&saved[0])?, pipeline.render_markdown(&record));
    let pdf = GeneratedPdf::from_bytes(fs::read(&saved[1])?)?;
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Chlorine dosing pump stalled");

    // Nothing but the two documents is left behind.
    assert_eq!(fs::read_dir(dir.path())?.count(), 2);
    Ok(())
}

#[tokio::test]
async fn single_format_saves_one_file() -> TestResult {
    let dir = tempdir()?;
    let pipeline = PipelineBuilder::new()
        .with_font_source(Arc::new(InMemoryFontSource::new()))
        .with_output_dir(dir.path())
        .with_generation_date(generation_date())
        .build()?;

    let saved = pipeline.generate(&minimal_record(), OutputFormat::Pdf).await?;
    assert_eq!(saved, vec![dir.path().join("case_2024-05-17.pdf")]);

    let saved = pipeline.generate(&minimal_record(), OutputFormat::Markdown).await?;
    assert_eq!(saved, vec![dir.path().join("case_2024-05-17.md")]);
    Ok(())
}

#[tokio::test]
async fn blank_title_is_rejected_before_anything_is_saved() -> TestResult {
    let dir = tempdir()?;
    let pipeline = PipelineBuilder::new()
        .with_font_source(Arc::new(InMemoryFontSource::new()))
        .with_output_dir(dir.path())
        .build()?;
    let mut record = short_critical_record();
    record.title = "   ".to_string();

    assert!(pipeline.generate(&record, OutputFormat::Both).await.is_err());
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn record_parsed_from_json_renders_to_pdf() -> TestResult {
    let record: CaseRecord = serde_json::from_str(SHORT_RECORD_JSON)?;
    let pipeline = PipelineBuilder::new()
        .with_font_source(Arc::new(InMemoryFontSource::new()))
        .build()?;

    let pdf = GeneratedPdf::from_bytes(pipeline.render_pdf(&record).await?)?;
    assert_pdf_contains_text!(pdf, "In Progress");
    assert_pdf_contains_text!(pdf, "Summary: Maintenance gap caused a four hour outage.");
    assert_pdf_not_contains_text!(pdf, "Tool:");

    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_dictionary(info_id)?;
    assert_eq!(info.get(b"Subject")?.as_str()?, b"CASE-0042");
    Ok(())
}
