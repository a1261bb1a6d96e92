//! # Bulk Product Import
//!
//! Maps spreadsheet rows onto product upserts.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  upload (file name + decoded workbook)                                  │
//! │       │                                                                 │
//! │       ├── name not *.xlsx?            → InvalidUpload                   │
//! │       ├── no "productos" sheet?       → InvalidUpload                   │
//! │       ├── header lacks nombre/categoria/precio? → InvalidUpload         │
//! │       ▼                                                                 │
//! │  rows 2..N (empty rows skipped)                                         │
//! │       │                                                                 │
//! │       ├── bad row  → errores += {fila, error}, continue                 │
//! │       ├── id known → update fields in place                             │
//! │       └── else     → create (given id if free, else max + 1)            │
//! │       ▼                                                                 │
//! │  ImportSummary (caller writes productos.json once)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading the actual `.xlsx` container is left to whoever builds the
//! [`Workbook`]; this crate only sees decoded cells.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, DECIMAL_PLACES};
use crate::types::{next_id, ImportRowError, ImportSummary, Product};

/// Sheet the importer reads.
pub const PRODUCTS_SHEET: &str = "productos";

/// Header columns that must be present.
pub const REQUIRED_COLUMNS: [&str; 3] = ["categoria", "nombre", "precio"];

/// Default cap on row errors echoed back.
pub const DEFAULT_ERROR_LIMIT: usize = 50;

// =============================================================================
// Workbook Abstraction
// =============================================================================

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// True for cells a spreadsheet user would see as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Falsy cells fall back to a column default.
    fn is_falsy(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Bool(b) => !b,
            Cell::Int(i) => *i == 0,
            Cell::Float(f) => *f == 0.0,
            Cell::Text(s) => s.is_empty(),
        }
    }

    /// Text rendering of the cell, untrimmed.
    fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{:.1}", f),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    fn to_number(&self, column: &str) -> Result<f64, String> {
        let value = match self {
            Cell::Empty => 0.0,
            Cell::Bool(b) => f64::from(u8::from(*b)),
            Cell::Int(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Text(s) if s.is_empty() => 0.0,
            Cell::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{column}: '{s}' no es un número"))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("{column}: valor no finito"))
        }
    }

    fn to_integer(&self, column: &str) -> Result<i64, String> {
        match self {
            Cell::Text(s) if !s.is_empty() => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("{column}: '{s}' no es un entero")),
            other => other.to_number(column).map(|f| f.trunc() as i64),
        }
    }
}

/// Read access to a decoded spreadsheet.
pub trait Workbook {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of a sheet, or `None` if the sheet does not exist.
    fn rows(&self, sheet: &str) -> Option<Vec<Vec<Cell>>>;
}

/// A named sheet of an [`InMemoryWorkbook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

/// Workbook already decoded into memory (the JSON upload format).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryWorkbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Workbook for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn rows(&self, sheet: &str) -> Option<Vec<Vec<Cell>>> {
        self.sheets
            .iter()
            .find(|s| s.name == sheet)
            .map(|s| s.rows.clone())
    }
}

/// Request body for `POST /productos/importar_excel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportUpload {
    /// Original file name, used for the `.xlsx` check.
    pub filename: String,
    pub workbook: InMemoryWorkbook,
}

// =============================================================================
// Row Mapping
// =============================================================================

/// One validated spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
struct ProductRow {
    id: Option<i64>,
    name: String,
    category: String,
    price: Money,
    cost: Money,
    stock: i64,
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Lower-cased header name → column index. Later duplicates win.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_header(header: &[Cell]) -> Self {
        let mut map = HashMap::new();
        for (i, cell) in header.iter().enumerate() {
            let name = if cell.is_falsy() {
                String::new()
            } else {
                cell.to_text().trim().to_lowercase()
            };
            map.insert(name, i);
        }
        Columns(map)
    }

    fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !self.0.contains_key(*c))
            .collect()
    }

    fn get<'a>(&self, row: &'a [Cell], column: &str) -> &'a Cell {
        self.0
            .get(column)
            .and_then(|&i| row.get(i))
            .unwrap_or(&EMPTY_CELL)
    }
}

fn too_precise(field: &str) -> String {
    format!("{field}: fuera de rango o con más de {DECIMAL_PLACES} decimales")
}

fn map_row(columns: &Columns, row: &[Cell]) -> Result<ProductRow, String> {
    let id = match columns.get(row, "id") {
        Cell::Empty => None,
        Cell::Text(s) if s.is_empty() => None,
        cell => Some(cell.to_integer("id")?),
    };

    let name = columns.get(row, "nombre").to_text().trim().to_string();
    let category = columns.get(row, "categoria").to_text().trim().to_string();
    let price = columns.get(row, "precio").to_number("precio")?;
    let cost = columns.get(row, "costo").to_number("costo")?;
    let stock = columns.get(row, "stock").to_number("stock")?.trunc() as i64;

    if name.is_empty() || category.is_empty() {
        return Err("nombre/categoria vacíos".to_string());
    }
    if price < 0.0 || cost < 0.0 || stock < 0 {
        return Err("precio/costo/stock no pueden ser negativos".to_string());
    }

    let price = Money::from_decimal(price).ok_or_else(|| too_precise("precio"))?;
    let cost = Money::from_decimal(cost).ok_or_else(|| too_precise("costo"))?;

    Ok(ProductRow {
        id,
        name,
        category,
        price,
        cost,
        stock,
    })
}

// =============================================================================
// Import
// =============================================================================

/// Applies a workbook to the product list in place.
///
/// Upload-level problems fail the whole call before any product changes.
/// Row-level problems are collected; the first `error_limit` are returned and
/// `total_errors` keeps the full count.
pub fn import_products(
    file_name: &str,
    workbook: &dyn Workbook,
    products: &mut Vec<Product>,
    error_limit: usize,
) -> CoreResult<ImportSummary> {
    if !file_name.to_lowercase().ends_with(".xlsx") {
        return Err(CoreError::InvalidUpload(
            "el archivo debe ser .xlsx".to_string(),
        ));
    }

    let rows = workbook.rows(PRODUCTS_SHEET).ok_or_else(|| {
        CoreError::InvalidUpload(format!("la hoja debe llamarse '{}'", PRODUCTS_SHEET))
    })?;

    let header = rows.first().map(Vec::as_slice).unwrap_or(&[]);
    let columns = Columns::from_header(header);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(CoreError::InvalidUpload(format!(
            "faltan columnas obligatorias: {}",
            missing.join(", ")
        )));
    }
    let width = header.len();

    let mut created = 0;
    let mut updated = 0;
    let mut errors = Vec::new();

    for (index, raw) in rows.iter().enumerate().skip(1) {
        let row_number = index + 1;
        let row = &raw[..raw.len().min(width)];

        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let parsed = match map_row(&columns, row) {
            Ok(parsed) => parsed,
            Err(error) => {
                errors.push(ImportRowError {
                    row: row_number,
                    error,
                });
                continue;
            }
        };

        let given_id = parsed.id.filter(|&id| id != 0);
        let existing = given_id.and_then(|id| products.iter_mut().find(|p| p.id == id));

        match existing {
            Some(product) => {
                product.name = parsed.name;
                product.category = parsed.category;
                product.price = parsed.price;
                product.cost = parsed.cost;
                product.stock = parsed.stock;
                updated += 1;
            }
            None => {
                let id = match given_id {
                    Some(id) => id,
                    None => next_id(products.iter().map(|p| p.id)),
                };
                products.push(Product {
                    id,
                    name: parsed.name,
                    price: parsed.price,
                    stock: parsed.stock,
                    cost: parsed.cost,
                    category: parsed.category,
                });
                created += 1;
            }
        }
    }

    let total_errors = errors.len();
    errors.truncate(error_limit);

    Ok(ImportSummary {
        ok: true,
        created,
        updated,
        errors,
        total_errors,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
