// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Fetches the raw abalone file by URL and parses it into
// RawRecords.
//
// The source file has a fixed 9-column schema with no header:
//
//   sex, length, diameter, height, whole_weight,
//   shucked_weight, viscera_weight, shell_weight, rings
//
// Published copies of the dataset differ only in delimiter —
// some are comma-separated, some whitespace-separated — so the
// parser accepts both, decided per line.
//
// The download and the parse are deliberately separate
// functions: parse_text is pure and fully unit-testable, and
// only the thin download wrapper ever touches the network.
//
// Reference: Rust Book §9 (Error Handling)
//            reqwest crate documentation (blocking client)

use crate::domain::error::PipelineError;
use crate::domain::record::RawRecord;

/// Number of columns every source line must have.
pub const SOURCE_COLUMNS: usize = 9;

/// Download the raw dataset text from `url`, blocking until the
/// transfer completes. Any HTTP failure is a remote-service
/// failure — we neither interpret nor retry it.
pub fn download(url: &str) -> Result<String, PipelineError> {
    tracing::info!("Downloading dataset from {url}");

    let response = reqwest::blocking::get(url)
        .map_err(|e| PipelineError::RemoteService(format!("GET {url}: {e}")))?
        .error_for_status()
        .map_err(|e| PipelineError::RemoteService(format!("GET {url}: {e}")))?;

    response
        .text()
        .map_err(|e| PipelineError::RemoteService(format!("reading body of {url}: {e}")))
}

/// Download and parse in one step.
pub fn load(url: &str) -> Result<Vec<RawRecord>, PipelineError> {
    let text = download(url)?;
    let records = parse_text(&text)?;
    tracing::info!("Loaded {} records", records.len());
    Ok(records)
}

/// Parse the whole file body. Blank lines are skipped; any
/// malformed line fails the load with its 1-based line number.
pub fn parse_text(text: &str) -> Result<Vec<RawRecord>, PipelineError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(parse_line(line, idx + 1)?);
    }

    Ok(records)
}

/// Parse one source line into a RawRecord.
fn parse_line(line: &str, line_no: usize) -> Result<RawRecord, PipelineError> {
    // Comma-delimited copies may also pad fields with spaces,
    // so every field is trimmed after splitting
    let fields: Vec<&str> = if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };

    if fields.len() != SOURCE_COLUMNS {
        return Err(PipelineError::schema_at_line(
            line_no,
            format!("expected {SOURCE_COLUMNS} columns, found {}", fields.len()),
        ));
    }

    let real = |i: usize, name: &str| -> Result<f64, PipelineError> {
        fields[i].parse::<f64>().map_err(|_| {
            PipelineError::schema_at_line(line_no, format!("{name}: '{}' is not a number", fields[i]))
        })
    };

    let rings = fields[8].parse::<u32>().map_err(|_| {
        PipelineError::schema_at_line(
            line_no,
            format!("rings: '{}' is not a non-negative integer", fields[8]),
        )
    })?;

    Ok(RawRecord {
        sex:            fields[0].to_string(),
        length:         real(1, "length")?,
        diameter:       real(2, "diameter")?,
        height:         real(3, "height")?,
        whole_weight:   real(4, "whole_weight")?,
        shucked_weight: real(5, "shucked_weight")?,
        viscera_weight: real(6, "viscera_weight")?,
        shell_weight:   real(7, "shell_weight")?,
        rings,
    })
}
