use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;

use crate::domain::telemetry::model::record::TelemetryRecord;
use crate::errors::TelemetryError;

const COL_TIMESTAMP: &str = "timestamp";
const COL_SERVICE_NAME: &str = "service_name";
const COL_ENDPOINT: &str = "endpoint";
const COL_REGION: &str = "region";
const COL_STATUS_CODE: &str = "response_status_code";

/// Positions of the required columns after header normalization.
struct ColumnMap {
    timestamp: usize,
    service_name: usize,
    endpoint: usize,
    region: usize,
    status_code: usize,
}

impl ColumnMap {
    /// Headers are matched after stripping whitespace and lower-casing.
    fn resolve(headers: &[String]) -> Result<Self, TelemetryError> {
        let find = |name: &'static str| -> Result<usize, TelemetryError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(TelemetryError::MissingColumn(name))
        };
        Ok(Self {
            timestamp: find(COL_TIMESTAMP)?,
            service_name: find(COL_SERVICE_NAME)?,
            endpoint: find(COL_ENDPOINT)?,
            region: find(COL_REGION)?,
            status_code: find(COL_STATUS_CODE)?,
        })
    }
}

/// Load and normalize a tabular telemetry source.
///
/// Existence is checked before the extension, and repeated calls with the
/// same path yield identical output in source order.
pub fn load_records(path: &Path) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    if !path.exists() {
        return Err(TelemetryError::SourceNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_delimited(path, b','),
        "tsv" => read_delimited(path, b'\t'),
        "xlsx" | "xls" => read_spreadsheet(path),
        _ => Err(TelemetryError::UnsupportedFormat(extension)),
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TelemetryError::Malformed(e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TelemetryError::Malformed(e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| TelemetryError::Malformed(e.to_string()))?;
        // Flexible mode tolerates short rows; absent cells read as empty.
        let cell = |idx: usize| row.get(idx).unwrap_or_default().trim().to_string();
        records.push(TelemetryRecord::new(
            parse_timestamp(&cell(columns.timestamp)),
            cell(columns.service_name),
            cell(columns.endpoint),
            cell(columns.region),
            cell(columns.status_code),
        ));
    }
    Ok(records)
}

fn read_spreadsheet(path: &Path) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| TelemetryError::Malformed(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TelemetryError::Malformed("workbook has no sheets".into()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| TelemetryError::Malformed(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| TelemetryError::Malformed("worksheet is empty".into()))?
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for row in rows {
        let text = |idx: usize| {
            row.get(idx)
                .map(cell_to_text)
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        let timestamp = row
            .get(columns.timestamp)
            .and_then(cell_to_timestamp)
            .or_else(|| parse_timestamp(&text(columns.timestamp)));
        records.push(TelemetryRecord::new(
            timestamp,
            text(columns.service_name),
            text(columns.endpoint),
            text(columns.region),
            text(columns.status_code),
        ));
    }
    Ok(records)
}

fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // Status codes arrive as floats from spreadsheets; render 200.0 as 200.
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn cell_to_timestamp(cell: &Data) -> Option<DateTime<Utc>> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|naive| naive.and_utc()),
        _ => None,
    }
}

/// Coerce a textual timestamp to a UTC instant; unparsable values become
/// `None` rather than failing the load.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
        "%d-%m-%Y %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::model::record::Outcome;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_source_is_rejected_before_extension() {
        let err = load_records(Path::new("/nonexistent/telemetry.parquet")).unwrap_err();
        assert!(matches!(err, TelemetryError::SourceNotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, TelemetryError::UnsupportedFormat(ext) if ext == "parquet"));
    }

    #[test]
    fn headers_are_stripped_and_lowercased() {
        let file = write_csv(
            " Timestamp ,SERVICE_NAME,Endpoint,Region,Response_Status_Code\n\
             2024-01-01T10:00:00Z,auth,/login,eu-west-1,200\n",
        );
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].service_name, "auth");
        assert_eq!(records[0].outcome, Outcome::Success);
        assert_eq!(
            records[0].timestamp.unwrap().to_rfc3339(),
            "2024-01-01T10:00:00+00:00"
        );
    }

    #[test]
    fn missing_required_column_is_reported() {
        let file = write_csv("timestamp,service_name,endpoint,region\n2024-01-01,auth,/x,eu\n");
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, TelemetryError::MissingColumn("response_status_code")));
    }

    #[test]
    fn unparsable_timestamps_become_none() {
        let file = write_csv(
            "timestamp,service_name,endpoint,region,response_status_code\n\
             not-a-date,auth,/login,eu-west-1,500\n\
             2024-01-02 08:30:00,auth,/login,eu-west-1,200\n",
        );
        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].timestamp, None);
        assert_eq!(records[0].outcome, Outcome::Failure);
        assert!(records[1].timestamp.is_some());
    }

    #[test]
    fn short_rows_read_absent_cells_as_empty() {
        let file = write_csv(
            "timestamp,service_name,endpoint,region,response_status_code\n\
             2024-01-01T10:00:00Z,auth\n",
        );
        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].endpoint, "");
        assert_eq!(records[0].outcome, Outcome::Failure);
    }

    #[test]
    fn repeated_loads_are_idempotent() {
        let file = write_csv(
            "timestamp,service_name,endpoint,region,response_status_code\n\
             2024-01-01T10:00:00Z,auth,/login,eu-west-1,200\n\
             2024-01-01T11:00:00Z,billing,/charge,us-east-1,503\n",
        );
        let first = load_records(file.path()).unwrap();
        let second = load_records(file.path()).unwrap();
        assert_eq!(first, second);
    }
}
