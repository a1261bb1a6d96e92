//! # Sales & Purchase Engine
//!
//! Plans and applies stock-consuming operations against an in-memory
//! snapshot of the data files.
//!
//! ## Two-Phase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Lifecycle                                   │
//! │                                                                         │
//! │  PurchaseRequest ──► PurchasePlan::validate(&companies, &products)      │
//! │                            │                                            │
//! │                            ├── company missing?     → CompanyNotFound   │
//! │                            ├── no items?            → EmptyPurchase     │
//! │                            ├── cantidad ≤ 0?        → Validation        │
//! │                            ├── product missing?     → ProductNotFound   │
//! │                            ├── Σ cantidad > stock?  → InsufficientStock │
//! │                            └── totals overflow?     → AmountOutOfRange  │
//! │                            │                                            │
//! │                            ▼  (nothing mutated yet)                     │
//! │                     plan.commit(&mut products, &mut sales)              │
//! │                            │                                            │
//! │                            ├── compra_id = max(compra_id) + 1           │
//! │                            ├── one Sale per item, ids max + 1           │
//! │                            └── stock -= cantidad                        │
//! │                            ▼                                            │
//! │                     PurchaseReceipt (caller persists both files)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `validate` only reads; `commit` cannot fail once `validate` succeeded on
//! the same snapshot. Stock is checked against the summed demand per product,
//! so repeating a product across lines can never drive stock negative. All
//! sums are checked; a demand that overflows `i64` is reported as insufficient
//! stock.
//!
//! Single sales go through the same pair via [`SalePlan`].

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::timestamp::Timestamp;
use crate::types::{
    next_id, resolve_timestamp, Company, Product, PurchaseReceipt, PurchaseRequest, Sale,
    SaleFilter, SaleRequest,
};
use crate::validation::validate_quantity;

fn ensure_company(companies: &[Company], company_id: i64) -> CoreResult<()> {
    if companies.iter().any(|c| c.id == company_id) {
        Ok(())
    } else {
        Err(CoreError::CompanyNotFound(company_id))
    }
}

fn find_product(products: &[Product], product_id: i64) -> CoreResult<&Product> {
    products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or(CoreError::ProductNotFound(product_id))
}

fn deduct_stock(products: &mut [Product], product_id: i64, quantity: i64) {
    if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
        product.stock -= quantity;
    }
}

// =============================================================================
// Single Sale
// =============================================================================

/// A validated single-item sale, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct SalePlan {
    company_id: i64,
    product_id: i64,
    quantity: i64,
    total: Money,
    date: Timestamp,
}

impl SalePlan {
    /// Checks a sale request against the current snapshot.
    ///
    /// Checks run in order: company, product, quantity, stock, date.
    /// `now` is used when the request carries no date.
    pub fn validate(
        request: &SaleRequest,
        companies: &[Company],
        products: &[Product],
        now: Timestamp,
    ) -> CoreResult<Self> {
        ensure_company(companies, request.company_id)?;
        let product = find_product(products, request.product_id)?;
        validate_quantity(request.quantity)?;

        if !product.can_sell(request.quantity) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                available: product.stock,
                requested: request.quantity,
            });
        }

        let total = product
            .price
            .multiply_quantity(request.quantity)
            .ok_or(CoreError::AmountOutOfRange {
                product_id: product.id,
            })?;

        Ok(SalePlan {
            company_id: request.company_id,
            product_id: product.id,
            quantity: request.quantity,
            total,
            date: resolve_timestamp(request.date.as_deref(), now)?,
        })
    }

    /// Line total at the price read during validation.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Appends the sale and deducts stock. Returns the stored sale.
    pub fn commit(self, products: &mut [Product], sales: &mut Vec<Sale>) -> Sale {
        let sale = Sale {
            id: next_id(sales.iter().map(|s| s.id)),
            purchase_id: None,
            product_id: self.product_id,
            company_id: self.company_id,
            quantity: self.quantity,
            total: self.total,
            date: Some(self.date.to_string()),
        };
        sales.push(sale.clone());
        deduct_stock(products, self.product_id, self.quantity);
        sale
    }
}

// =============================================================================
// Multi-Item Purchase
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct PlannedLine {
    product_id: i64,
    quantity: i64,
    total: Money,
}

/// A validated purchase, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchasePlan {
    company_id: i64,
    lines: Vec<PlannedLine>,
    total: Money,
    total_items: i64,
    date: Timestamp,
}

impl PurchasePlan {
    /// Checks every line of a purchase before anything is touched.
    ///
    /// The first failing line decides the error, whatever its position.
    pub fn validate(
        request: &PurchaseRequest,
        companies: &[Company],
        products: &[Product],
        now: Timestamp,
    ) -> CoreResult<Self> {
        ensure_company(companies, request.company_id)?;

        if request.items.is_empty() {
            return Err(CoreError::EmptyPurchase);
        }
        for item in &request.items {
            validate_quantity(item.quantity)?;
        }

        let mut demand: HashMap<i64, i64> = HashMap::new();
        let mut lines = Vec::with_capacity(request.items.len());
        let mut total = Money::zero();
        let mut total_items: i64 = 0;

        for item in &request.items {
            let product = find_product(products, item.product_id)?;

            let requested = demand.entry(product.id).or_insert(0);
            match requested.checked_add(item.quantity) {
                Some(sum) if product.can_sell(sum) => *requested = sum,
                sum => {
                    return Err(CoreError::InsufficientStock {
                        product_id: product.id,
                        available: product.stock,
                        requested: sum.unwrap_or(i64::MAX),
                    })
                }
            }

            let out_of_range = || CoreError::AmountOutOfRange {
                product_id: product.id,
            };
            let line_total = product
                .price
                .multiply_quantity(item.quantity)
                .ok_or_else(out_of_range)?;
            total = total.checked_add(line_total).ok_or_else(out_of_range)?;
            total_items = total_items
                .checked_add(item.quantity)
                .ok_or_else(out_of_range)?;

            lines.push(PlannedLine {
                product_id: product.id,
                quantity: item.quantity,
                total: line_total,
            });
        }

        Ok(PurchasePlan {
            company_id: request.company_id,
            lines,
            total,
            total_items,
            date: resolve_timestamp(request.date.as_deref(), now)?,
        })
    }

    /// Σ line totals.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Appends one sale per line under a fresh purchase id and deducts stock.
    pub fn commit(self, products: &mut [Product], sales: &mut Vec<Sale>) -> PurchaseReceipt {
        let purchase_id = next_id(sales.iter().map(|s| s.purchase_id.unwrap_or(0)));
        let date = self.date.to_string();
        let lines_created = self.lines.len();

        for line in self.lines {
            let sale = Sale {
                id: next_id(sales.iter().map(|s| s.id)),
                purchase_id: Some(purchase_id),
                product_id: line.product_id,
                company_id: self.company_id,
                quantity: line.quantity,
                total: line.total,
                date: Some(date.clone()),
            };
            sales.push(sale);
            deduct_stock(products, line.product_id, line.quantity);
        }

        PurchaseReceipt {
            purchase_id,
            company_id: self.company_id,
            total: self.total,
            total_items: self.total_items,
            lines_created,
            date: self.date,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Parses an optional filter bound. Empty strings mean "no bound".
fn parse_bound(raw: Option<&str>) -> CoreResult<Option<Timestamp>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(Some(Timestamp::parse(raw)?)),
        None => Ok(None),
    }
}

fn compare_to_bound(sale: &Sale, date: &Timestamp, bound: &Timestamp) -> CoreResult<Ordering> {
    date.compare(bound)
        .ok_or_else(|| CoreError::IncomparableTimestamps {
            left: sale.date.clone().unwrap_or_default(),
            right: bound.to_string(),
        })
}

/// Lists sales matching every present filter.
///
/// ## Date Bounds
/// Both bounds are inclusive and compared against the stored value as is:
/// no offset normalization happens here. Comparing a naive value with an
/// aware one is rejected with [`CoreError::IncomparableTimestamps`], and a
/// stored sale without a readable date fails the listing with
/// [`CoreError::MalformedRecord`]. Id filters run first, so only sales that
/// survive them need a readable date.
pub fn filter_sales(sales: &[Sale], filter: &SaleFilter) -> CoreResult<Vec<Sale>> {
    let from = parse_bound(filter.from.as_deref())?;
    let to = parse_bound(filter.to.as_deref())?;

    let mut out = Vec::new();
    for sale in sales {
        if filter.company_id.is_some_and(|id| sale.company_id != id) {
            continue;
        }
        if filter.product_id.is_some_and(|id| sale.product_id != id) {
            continue;
        }

        if from.is_some() || to.is_some() {
            let date = sale.timestamp().ok_or_else(|| CoreError::MalformedRecord {
                entity: "sale",
                id: sale.id,
                reason: format!("unreadable fecha {:?}", sale.date),
            })?;

            if let Some(from) = &from {
                if compare_to_bound(sale, &date, from)? == Ordering::Less {
                    continue;
                }
            }
            if let Some(to) = &to {
                if compare_to_bound(sale, &date, to)? == Ordering::Greater {
                    continue;
                }
            }
        }

        out.push(sale.clone());
    }

    Ok(out)
}

/// All sales of one company, in file order.
///
/// Fails with `CompanyNotFound` for an unknown company and with
/// `NoSalesForCompany` when it has never bought anything.
pub fn history_for_company(
    company_id: i64,
    companies: &[Company],
    sales: &[Sale],
) -> CoreResult<Vec<Sale>> {
    ensure_company(companies, company_id)?;

    let history: Vec<Sale> = sales
        .iter()
        .filter(|s| s.company_id == company_id)
        .cloned()
        .collect();

    if history.is_empty() {
        return Err(CoreError::NoSalesForCompany(company_id));
    }
    Ok(history)
}

// =============================================================================
// Unit Tests
// =============================================================================
