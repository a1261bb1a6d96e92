//! # Spreadsheet Uploads
//!
//! Turns a multipart `.xlsx` upload into the [`ImportUpload`] the importer
//! consumes.
//!
//! ```text
//! multipart/form-data
//!   └── field "file" (filename + bytes)
//!         │
//!         ├── name not *.xlsx? → empty workbook, importer rejects the name
//!         ├── not a readable xlsx container? → 400 "Excel inválido: ..."
//!         ▼
//!   InMemoryWorkbook (every sheet, rows anchored at A1)
//! ```

use std::io::Cursor;

use axum::extract::Multipart;
use calamine::{Data, Reader, Xlsx};
use inventa_core::import::{Cell, ImportUpload, InMemoryWorkbook, Sheet};
use inventa_core::CoreError;

use crate::error::{ApiError, ApiResult};

/// Multipart field carrying the spreadsheet.
pub const FILE_FIELD: &str = "file";

/// Reads the `file` field of a multipart body.
pub async fn read_multipart(mut multipart: Multipart) -> ApiResult<ImportUpload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        let workbook = if filename.to_lowercase().ends_with(".xlsx") {
            decode_xlsx(&bytes)?
        } else {
            InMemoryWorkbook::default()
        };
        tracing::debug!(%filename, size = bytes.len(), "Spreadsheet received");
        return Ok(ImportUpload { filename, workbook });
    }

    Err(ApiError::invalid(format!(
        "multipart body needs a '{FILE_FIELD}' field"
    )))
}

/// Decodes every sheet of an `.xlsx` file.
///
/// Cells keep their spreadsheet position: a sheet whose first used cell is
/// `B3` gets two leading empty rows and one leading empty column, so row 1
/// is always the header row.
pub fn decode_xlsx(bytes: &[u8]) -> Result<InMemoryWorkbook, CoreError> {
    let invalid =
        |e: calamine::XlsxError| CoreError::InvalidUpload(format!("Excel inválido: {e}"));

    let mut book: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(invalid)?;

    let mut sheets = Vec::new();
    for name in book.sheet_names() {
        let range = book.worksheet_range(&name).map_err(invalid)?;
        let (top, left) = range.start().unwrap_or((0, 0));

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); top as usize];
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; left as usize];
            cells.extend(row.iter().map(to_cell));
            rows.push(cells);
        }
        sheets.push(Sheet { name, rows });
    }

    Ok(InMemoryWorkbook { sheets })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_keep_their_type() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Int(7)), Cell::Int(7));
        assert_eq!(to_cell(&Data::Float(0.125)), Cell::Float(0.125));
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(
            to_cell(&Data::String("Clavos".to_string())),
            Cell::Text("Clavos".to_string())
        );
    }

    #[test]
    fn test_garbage_is_an_invalid_upload() {
        let err = decode_xlsx(b"no es un zip").unwrap_err();
        assert!(matches!(err, CoreError::InvalidUpload(_)));
        assert!(err.to_string().contains("Excel inválido"));
    }
}
