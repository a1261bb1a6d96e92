//! # Domain Types
//!
//! Core domain types used throughout Inventa.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Company      │   │    Product      │   │      Sale       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │◄──┼─────────────────┼───│  empresa_id     │        │
//! │  │  nombre         │   │  id             │◄──│  producto_id    │        │
//! │  │  rut (unique)   │   │  precio, costo  │   │  compra_id?     │        │
//! │  │  giro, email…   │   │  stock ≥ 0      │   │  cantidad, total│        │
//! │  └─────────────────┘   └─────────────────┘   │  fecha          │        │
//! │         empresas.json        productos.json  └─────────────────┘        │
//! │                                                   ventas.json           │
//! │                                                                         │
//! │  Requests:  CompanyInput, ProductInput, SaleRequest, PurchaseRequest    │
//! │  Responses: PurchaseReceipt, CashFlowReport, ImportSummary              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Names
//! Rust fields are English; the JSON keys (data files and HTTP bodies) keep
//! the Spanish names existing files and clients already use.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::timestamp::Timestamp;

// =============================================================================
// Company
// =============================================================================

/// A registered business that buys products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Company {
    /// Correlative identifier (max + 1).
    pub id: i64,

    /// Legal name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Tax id (RUT). Unique at creation time.
    #[serde(rename = "rut")]
    pub tax_id: String,

    /// Business sector.
    #[serde(rename = "giro", default)]
    pub sector: Option<String>,

    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
}

/// Create/update payload for a company.
///
/// Clients historically send the whole record, `id` included; any `id` in the
/// body is ignored and the server assigns or keeps its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyInput {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "rut")]
    pub tax_id: String,

    #[serde(rename = "giro", default)]
    pub sector: Option<String>,

    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
}

impl CompanyInput {
    /// Builds the stored record under the given id.
    pub fn into_company(self, id: i64) -> Company {
        Company {
            id,
            name: self.name,
            tax_id: self.tax_id,
            sector: self.sector,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalogued product.
///
/// Price and cost are point-in-time values: changing them does not touch
/// past sale totals, but the cash-flow report reads the current ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,

    /// Unit price.
    #[serde(rename = "precio")]
    #[ts(type = "number")]
    pub price: Money,

    /// Units on hand. Never negative after an engine operation.
    pub stock: i64,

    /// Unit cost, used for profit.
    #[serde(rename = "costo", default)]
    #[ts(type = "number")]
    pub cost: Money,

    #[serde(rename = "categoria")]
    pub category: String,
}

impl Product {
    /// Checks if `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Unit margin at the current price and cost, `None` on overflow.
    #[inline]
    pub fn unit_margin(&self) -> Option<Money> {
        self.price.checked_sub(self.cost)
    }
}

/// Create/update payload for a product. Any `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "precio")]
    #[ts(type = "number")]
    pub price: Money,

    pub stock: i64,

    #[serde(rename = "costo")]
    #[ts(type = "number")]
    pub cost: Money,

    #[serde(rename = "categoria")]
    pub category: String,
}

impl ProductInput {
    /// Builds the stored record under the given id.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            cost: self.cost,
            category: self.category,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One sale line as stored in `ventas.json`.
///
/// ## Lenient Decoding
/// Old files contain lines with missing totals or hand-edited dates. Those
/// fields default instead of failing the whole file; consumers decide what a
/// bad date means (the report skips it, a date-filtered listing rejects it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Monotonic across all sales.
    pub id: i64,

    /// Purchase group; `null` for standalone sales.
    #[serde(rename = "compra_id", default)]
    pub purchase_id: Option<i64>,

    #[serde(rename = "producto_id")]
    pub product_id: i64,

    #[serde(rename = "empresa_id")]
    pub company_id: i64,

    #[serde(rename = "cantidad", default)]
    pub quantity: i64,

    /// Price × quantity at creation time.
    #[serde(default)]
    #[ts(type = "number")]
    pub total: Money,

    /// ISO-8601 string as written.
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

impl Sale {
    /// Parses the stored date.
    ///
    /// Returns `None` when the date is absent or unparseable.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.date
            .as_deref()
            .and_then(|raw| Timestamp::parse(raw).ok())
    }
}

/// Request body for a single sale.
///
/// Legacy clients post a full sale record; `id` and `total` are ignored and
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRequest {
    #[serde(rename = "empresa_id")]
    pub company_id: i64,

    #[serde(rename = "producto_id")]
    pub product_id: i64,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    /// Optional ISO-8601 timestamp; defaults to now (UTC).
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

// =============================================================================
// Purchase
// =============================================================================

/// One line of a multi-item purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseItem {
    #[serde(rename = "producto_id")]
    pub product_id: i64,

    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

/// Request body for `POST /ventas/compra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseRequest {
    #[serde(rename = "empresa_id")]
    pub company_id: i64,

    #[serde(default)]
    pub items: Vec<PurchaseItem>,

    /// Optional ISO-8601 timestamp shared by every line.
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

/// Result of a committed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseReceipt {
    #[serde(rename = "compra_id")]
    pub purchase_id: i64,

    #[serde(rename = "empresa_id")]
    pub company_id: i64,

    /// Σ line totals.
    #[serde(rename = "total_compra")]
    #[ts(type = "number")]
    pub total: Money,

    /// Σ quantities.
    #[serde(rename = "total_items")]
    pub total_items: i64,

    /// Number of sale lines written.
    #[serde(rename = "lineas_creadas")]
    pub lines_created: usize,

    #[serde(rename = "fecha")]
    #[ts(type = "string")]
    pub date: Timestamp,
}

// =============================================================================
// Listing
// =============================================================================

/// Query filters for `GET /ventas`. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleFilter {
    #[serde(rename = "empresa_id", default)]
    pub company_id: Option<i64>,

    #[serde(rename = "producto_id", default)]
    pub product_id: Option<i64>,

    /// Inclusive lower bound (ISO-8601).
    #[serde(rename = "desde", default)]
    pub from: Option<String>,

    /// Inclusive upper bound (ISO-8601).
    #[serde(rename = "hasta", default)]
    pub to: Option<String>,
}

// =============================================================================
// Report
// =============================================================================

/// Query parameters for the cash-flow report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CashFlowQuery {
    #[serde(rename = "desde")]
    pub from: String,

    #[serde(rename = "hasta")]
    pub to: String,
}

/// Cash-flow aggregate over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CashFlowReport {
    /// Normalized lower bound.
    #[serde(rename = "fecha_inicio")]
    #[ts(type = "string")]
    pub from: Timestamp,

    /// Normalized upper bound.
    #[serde(rename = "fecha_fin")]
    #[ts(type = "string")]
    pub to: Timestamp,

    /// Σ sale totals in range.
    #[serde(rename = "ventas_totales")]
    #[ts(type = "number")]
    pub revenue: Money,

    /// Σ (current price − current cost) × quantity for surviving products.
    #[serde(rename = "ganancias_totales")]
    #[ts(type = "number")]
    pub profit: Money,

    /// Σ quantities in range.
    #[serde(rename = "productos_vendidos")]
    pub units_sold: i64,
}

// =============================================================================
// Import
// =============================================================================

/// A spreadsheet row that could not be imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportRowError {
    /// 1-based sheet row number.
    #[serde(rename = "fila")]
    pub row: usize,

    pub error: String,
}

/// Outcome of a bulk product import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportSummary {
    pub ok: bool,

    #[serde(rename = "creados")]
    pub created: usize,

    #[serde(rename = "actualizados")]
    pub updated: usize,

    /// First rows that failed (capped).
    #[serde(rename = "errores")]
    pub errors: Vec<ImportRowError>,

    /// Full count of failed rows.
    #[serde(rename = "total_errores")]
    pub total_errors: usize,
}

// =============================================================================
// Helpers
// =============================================================================

/// Next correlative id: max existing id + 1, or 1 for an empty collection.
///
/// ## Example
/// ```rust
/// use inventa_core::types::next_id;
///
/// assert_eq!(next_id(std::iter::empty()), 1);
/// assert_eq!(next_id([3, 7, 5]), 8);
/// ```
pub fn next_id(ids: impl IntoIterator<Item = i64>) -> i64 {
    ids.into_iter().max().unwrap_or(0) + 1
}

/// Parses an optional request timestamp, defaulting to `now`.
pub fn resolve_timestamp(raw: Option<&str>, now: Timestamp) -> CoreResult<Timestamp> {
    match raw {
        Some(raw) => Timestamp::parse(raw).map_err(CoreError::from),
        None => Ok(now),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_uses_spanish_keys() {
        let company = Company {
            id: 1,
            name: "Ferretería Sur".to_string(),
            tax_id: "76.123.456-7".to_string(),
            sector: Some("Ferretería".to_string()),
            phone: None,
            email: None,
            address: None,
        };
        let value = serde_json::to_value(&company).unwrap();
        assert_eq!(value["nombre"], "Ferretería Sur");
        assert_eq!(value["rut"], "76.123.456-7");
        assert_eq!(value["giro"], "Ferretería");
        assert!(value["telefono"].is_null());
    }

    #[test]
    fn test_company_input_ignores_client_id() {
        let input: CompanyInput = serde_json::from_value(json!({
            "id": 99,
            "nombre": "Acme",
            "rut": "1-9"
        }))
        .unwrap();
        let company = input.into_company(4);
        assert_eq!(company.id, 4);
        assert_eq!(company.sector, None);
    }

    #[test]
    fn test_product_decodes_decimal_money() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "nombre": "Martillo",
            "precio": 10.5,
            "stock": 5,
            "costo": 6,
            "categoria": "Herramientas"
        }))
        .unwrap();
        assert_eq!(product.price, Money::from_cents(1050));
        assert_eq!(product.cost, Money::from_cents(600));
        assert_eq!(product.unit_margin(), Some(Money::from_cents(450)));
        assert!(product.can_sell(5));
        assert!(!product.can_sell(6));
    }

    #[test]
    fn test_sale_tolerates_legacy_lines() {
        let sale: Sale = serde_json::from_value(json!({
            "id": 3,
            "producto_id": 1,
            "empresa_id": 2,
            "fecha": "hace tiempo"
        }))
        .unwrap();
        assert_eq!(sale.purchase_id, None);
        assert_eq!(sale.quantity, 0);
        assert!(sale.total.is_zero());
        assert!(sale.timestamp().is_none());
    }

    #[test]
    fn test_sale_serializes_null_purchase_id() {
        let sale = Sale {
            id: 1,
            purchase_id: None,
            product_id: 1,
            company_id: 1,
            quantity: 3,
            total: Money::from_cents(3000),
            date: Some("2026-01-05T10:00:00".to_string()),
        };
        let value = serde_json::to_value(&sale).unwrap();
        assert!(value["compra_id"].is_null());
        assert_eq!(value["total"], json!(30.0));
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(Vec::<i64>::new()), 1);
        assert_eq!(next_id([1, 2, 3]), 4);
        assert_eq!(next_id([10, 2]), 11);
    }

    #[test]
    fn test_resolve_timestamp() {
        let now = Timestamp::parse("2026-03-01T12:00:00").unwrap();
        assert_eq!(resolve_timestamp(None, now).unwrap(), now);

        let given = resolve_timestamp(Some("2026-01-01T00:00:00Z"), now).unwrap();
        assert!(given.is_aware());

        let err = resolve_timestamp(Some("mañana"), now).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
