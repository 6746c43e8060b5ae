//! CSV Ingestion and Export
//!
//! Loads inventory batches with Polars and writes scored batches back out.
//! Every column is read as text and converted per cell, so a malformed cell
//! degrades to a default instead of rejecting the batch:
//!
//! - categorical: trimmed; empty or missing → default category
//! - numeric: trimmed and parsed; missing, unparseable or non-finite → 0
//! - `Lead time`: non-negative integer, decimals truncated; anything else → 0
//!
//! Missing columns behave like all-missing cells and extra columns are ignored.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use anyhow::{Context, Result};

use crate::types::{
    InventoryRecord, ScoredRecord, DEFAULT_CONSIGNMENT_STOCK, DEFAULT_DEMAND_FLUCTUATION,
    DEFAULT_RISK, DEFAULT_UNIT_SIZE,
};

/// Input column headers, in canonical order
pub const INPUT_COLUMNS: [&str; 8] = [
    "Risk",
    "Demand fluctuation",
    "Average stock",
    "Daily usage",
    "Unit cost",
    "Lead time",
    "Consignment stock",
    "Unit size",
];

/// Derived column headers appended on export
pub const DERIVED_COLUMNS: [&str; 15] = [
    "Risk_Score",
    "Fluctuation_Score",
    "Consignment_Score",
    "Size_Score",
    "Norm_Usage",
    "Norm_Stock",
    "Norm_LeadTime",
    "Norm_Cost",
    "Criticality_Agg",
    "Demand_Agg",
    "Supply_Agg",
    "TOPSIS_Score",
    "Fuzzy_TOPSIS_Score",
    "Class",
    "Fuzzy_Class",
];

// ============================================================================
// Ingestion
// ============================================================================

fn string_options() -> CsvReadOptions {
    // Schema inference over zero rows reads every column as String
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Load an inventory batch from a CSV file
pub fn load_inventory_csv<P: AsRef<Path>>(path: P) -> Result<Vec<InventoryRecord>> {
    let path = path.as_ref();
    let df = string_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load inventory CSV: {}", path.display()))?;

    let records = records_from_frame(&df)?;
    tracing::info!("Loaded {} inventory items from {}", records.len(), path.display());
    Ok(records)
}

/// Parse an inventory batch from CSV text (header row required)
///
/// Blank input is an empty batch.
pub fn parse_inventory_csv(bytes: &[u8]) -> Result<Vec<InventoryRecord>> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }

    let df = string_options()
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .context("Failed to parse inventory CSV")?;

    records_from_frame(&df)
}

/// Text cells of one input column, or `None` when the column is absent
fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<Option<&'a StringChunked>> {
    let Some(column) = df
        .get_columns()
        .iter()
        .find(|c| c.name().as_str().trim() == name)
    else {
        return Ok(None);
    };
    let chunked = column
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?;
    Ok(Some(chunked))
}

fn cell<'a>(column: Option<&'a StringChunked>, idx: usize) -> Option<&'a str> {
    column
        .and_then(|c| c.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn category(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

/// Finite number, or 0
pub fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Non-negative whole days, decimals truncated, or 0
pub fn parse_lead_time(value: Option<&str>) -> u32 {
    match value.and_then(|s| s.parse::<f64>().ok()) {
        Some(v) if v.is_finite() && v >= 0.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Convert a string-typed frame into inventory records
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<InventoryRecord>> {
    let risk = text_column(df, INPUT_COLUMNS[0])?;
    let fluctuation = text_column(df, INPUT_COLUMNS[1])?;
    let stock = text_column(df, INPUT_COLUMNS[2])?;
    let usage = text_column(df, INPUT_COLUMNS[3])?;
    let cost = text_column(df, INPUT_COLUMNS[4])?;
    let lead_time = text_column(df, INPUT_COLUMNS[5])?;
    let consignment = text_column(df, INPUT_COLUMNS[6])?;
    let size = text_column(df, INPUT_COLUMNS[7])?;

    let missing: Vec<&str> = INPUT_COLUMNS
        .iter()
        .zip([risk, fluctuation, stock, usage, cost, lead_time, consignment, size])
        .filter(|(_, c)| c.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        tracing::warn!("CSV is missing columns {:?}; defaults applied", missing);
    }

    let records = (0..df.height())
        .map(|idx| InventoryRecord {
            risk: category(cell(risk, idx), DEFAULT_RISK),
            demand_fluctuation: category(cell(fluctuation, idx), DEFAULT_DEMAND_FLUCTUATION),
            average_stock: parse_number(cell(stock, idx)),
            daily_usage: parse_number(cell(usage, idx)),
            unit_cost: parse_number(cell(cost, idx)),
            lead_time: parse_lead_time(cell(lead_time, idx)),
            consignment_stock: category(cell(consignment, idx), DEFAULT_CONSIGNMENT_STOCK),
            unit_size: category(cell(size, idx), DEFAULT_UNIT_SIZE),
        })
        .collect();

    Ok(records)
}

// ============================================================================
// Export
// ============================================================================

fn f64_column(name: &str, scored: &[ScoredRecord], f: impl Fn(&ScoredRecord) -> f64) -> Column {
    Column::new(name.into(), scored.iter().map(f).collect::<Vec<f64>>())
}

fn str_column(name: &str, scored: &[ScoredRecord], f: impl Fn(&ScoredRecord) -> String) -> Column {
    Column::new(name.into(), scored.iter().map(f).collect::<Vec<String>>())
}

/// Scored records as a frame: `id`, the input columns, then the derived columns
pub fn scored_to_frame(scored: &[ScoredRecord]) -> Result<DataFrame> {
    let columns = vec![
        Column::new("id".into(), scored.iter().map(|s| s.id as u64).collect::<Vec<u64>>()),
        str_column("Risk", scored, |s| s.record.risk.clone()),
        str_column("Demand fluctuation", scored, |s| s.record.demand_fluctuation.clone()),
        f64_column("Average stock", scored, |s| s.record.average_stock),
        f64_column("Daily usage", scored, |s| s.record.daily_usage),
        f64_column("Unit cost", scored, |s| s.record.unit_cost),
        Column::new(
            "Lead time".into(),
            scored.iter().map(|s| s.record.lead_time).collect::<Vec<u32>>(),
        ),
        str_column("Consignment stock", scored, |s| s.record.consignment_stock.clone()),
        str_column("Unit size", scored, |s| s.record.unit_size.clone()),
        f64_column("Risk_Score", scored, |s| s.risk_score),
        f64_column("Fluctuation_Score", scored, |s| s.fluctuation_score),
        f64_column("Consignment_Score", scored, |s| s.consignment_score),
        f64_column("Size_Score", scored, |s| s.size_score),
        f64_column("Norm_Usage", scored, |s| s.norm_usage),
        f64_column("Norm_Stock", scored, |s| s.norm_stock),
        f64_column("Norm_LeadTime", scored, |s| s.norm_lead_time),
        f64_column("Norm_Cost", scored, |s| s.norm_cost),
        f64_column("Criticality_Agg", scored, |s| s.criticality_agg),
        f64_column("Demand_Agg", scored, |s| s.demand_agg),
        f64_column("Supply_Agg", scored, |s| s.supply_agg),
        f64_column("TOPSIS_Score", scored, |s| s.topsis_score),
        f64_column("Fuzzy_TOPSIS_Score", scored, |s| s.fuzzy_topsis_score),
        str_column("Class", scored, |s| s.class.to_string()),
        str_column("Fuzzy_Class", scored, |s| s.fuzzy_class.to_string()),
    ];

    DataFrame::new(columns).context("Failed to build scored DataFrame")
}

/// Scored records as CSV text with a header row
pub fn scored_to_csv(scored: &[ScoredRecord]) -> Result<String> {
    let mut df = scored_to_frame(scored)?;
    let mut buf: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to serialize scored CSV")?;
    String::from_utf8(buf).context("Scored CSV is not valid UTF-8")
}

/// Write scored records to a CSV file
pub fn write_scored_csv<P: AsRef<Path>>(path: P, scored: &[ScoredRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut df = scored_to_frame(scored)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write scored CSV: {}", path.display()))?;

    tracing::info!("Wrote {} scored items to {}", scored.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data::{reference_items, SAMPLE_CSV};

    #[test]
    fn test_parse_sample_csv() {
        let records = parse_inventory_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records, reference_items());
    }

    #[test]
    fn test_number_fallbacks() {
        assert_eq!(parse_number(Some("12.5")), 12.5);
        assert_eq!(parse_number(Some("abc")), 0.0);
        assert_eq!(parse_number(Some("inf")), 0.0);
        assert_eq!(parse_number(None), 0.0);
    }

    #[test]
    fn test_lead_time_truncation() {
        assert_eq!(parse_lead_time(Some("23")), 23);
        assert_eq!(parse_lead_time(Some("7.9")), 7);
        assert_eq!(parse_lead_time(Some("-3")), 0);
        assert_eq!(parse_lead_time(Some("soon")), 0);
        assert_eq!(parse_lead_time(None), 0);
    }

    #[test]
    fn test_blank_input_is_empty_batch() {
        assert!(parse_inventory_csv(b"").unwrap().is_empty());
        assert!(parse_inventory_csv(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_export_header() {
        let csv = scored_to_csv(&[]).unwrap();
        let header = csv.lines().next().unwrap();
        let expected: Vec<&str> = std::iter::once("id")
            .chain(INPUT_COLUMNS)
            .chain(DERIVED_COLUMNS)
            .collect();
        assert_eq!(header, expected.join(","));
    }
}
