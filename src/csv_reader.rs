use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::io::{self, Cursor};

#[derive(Debug, Clone)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_csv<R: io::Read>(source: R) -> Result<CsvData> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        rows.push(row);
    }

    Ok(CsvData { headers, rows })
}

pub fn read_csv_from_str(content: &str) -> Result<CsvData> {
    read_csv(Cursor::new(content))
}

/// Locate a header by name, ignoring ASCII case.
pub fn column_index(data: &CsvData, name: &str) -> Result<usize> {
    data.headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            anyhow!(
                "Column '{}' not found. Available columns: {}",
                name,
                data.headers.join(", ")
            )
        })
}

/// Cells of one column; `None` where a short row ends before it.
fn column_cells<'a>(data: &'a CsvData, name: &str) -> Result<(String, Vec<Option<&'a str>>)> {
    let column_index = column_index(data, name)?;
    let column_name = data.headers[column_index].clone();

    let cells = data
        .rows
        .iter()
        .map(|row| row.get(column_index).map(String::as_str))
        .collect();

    Ok((column_name, cells))
}

/// Every row must reach this column.
pub fn extract_column_as_string(data: &CsvData, name: &str) -> Result<(String, Vec<String>)> {
    let (column_name, cells) = column_cells(data, name)?;
    let column_index = column_index(data, name)?;

    let mut values = Vec::with_capacity(cells.len());
    for (row_idx, cell) in cells.into_iter().enumerate() {
        let cell = cell.ok_or_else(|| {
            anyhow!(
                "Row {} has only {} columns, expected at least {}",
                row_idx + 1,
                data.rows[row_idx].len(),
                column_index + 1
            )
        })?;
        values.push(cell.to_string());
    }

    Ok((column_name, values))
}

/// Extract a numeric column, turning every cell that is not a finite number
/// into `None` instead of failing. Cells missing from short rows count as
/// blank.
pub fn extract_numeric_column(data: &CsvData, name: &str) -> Result<(String, Vec<Option<f64>>)> {
    let (column_name, cells) = column_cells(data, name)?;
    Ok((
        column_name,
        cells.into_iter().map(|cell| coerce_numeric(cell.unwrap_or(""))).collect(),
    ))
}

/// Lenient number parsing: placeholders like `-`, blanks and non-finite
/// values all come back as `None`.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
