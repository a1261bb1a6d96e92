//! # Cash-Flow Report
//!
//! Aggregates revenue, profit and units sold over an inclusive date range.
//!
//! ## Timestamp Normalization
//! ```text
//! bounds:  2026-01-01T00:00:00 .. 2026-01-31T23:59:59      (naive)
//! sale:    2026-01-10T22:00:00-03:00                        (aware)
//!            │
//!            └── awareness differs → compare wall clocks:
//!                2026-01-10T22:00:00 within range ✓
//! ```
//! When a sale and the bounds agree on awareness they are compared directly
//! (aware values by instant). When they disagree, offsets are dropped from all
//! sides and the local wall-clock readings are compared.
//!
//! Profit uses the product's *current* price and cost; sales whose product
//! has since been deleted still count toward revenue and units, but not
//! toward profit. Sums are checked: stored values that overflow them fail the
//! report with `MalformedRecord` naming the sale.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::timestamp::Timestamp;
use crate::types::{CashFlowReport, Product, Sale};

/// Report plus the sales left out for having no readable date.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlow {
    pub report: CashFlowReport,
    /// Ids of skipped sales, for the caller to log.
    pub skipped: Vec<i64>,
}

/// Parses and checks the report bounds.
///
/// Both bounds must parse, share awareness and satisfy `from <= to`.
pub fn parse_range(from: &str, to: &str) -> CoreResult<(Timestamp, Timestamp)> {
    let from_ts = Timestamp::parse(from)?;
    let to_ts = Timestamp::parse(to)?;

    match from_ts.compare(&to_ts) {
        None => Err(CoreError::IncomparableTimestamps {
            left: from.trim().to_string(),
            right: to.trim().to_string(),
        }),
        Some(Ordering::Greater) => Err(CoreError::InvalidDateRange {
            from: from_ts.to_string(),
            to: to_ts.to_string(),
        }),
        Some(_) => Ok((from_ts, to_ts)),
    }
}

fn within(date: &Timestamp, from: &Timestamp, to: &Timestamp) -> bool {
    if date.is_aware() == from.is_aware() {
        let after_start = date.compare(from).is_some_and(|o| o != Ordering::Less);
        let before_end = date.compare(to).is_some_and(|o| o != Ordering::Greater);
        after_start && before_end
    } else {
        let local = date.naive_local();
        from.naive_local() <= local && local <= to.naive_local()
    }
}

/// Builds the cash-flow report for `[from, to]`.
///
/// ## Example
/// ```rust
/// use inventa_core::money::Money;
/// use inventa_core::report::cash_flow;
/// use inventa_core::types::{Product, Sale};
///
/// let products = vec![Product {
///     id: 1,
///     name: "Martillo".into(),
///     price: Money::from_cents(1000),
///     stock: 2,
///     cost: Money::from_cents(600),
///     category: "Herramientas".into(),
/// }];
/// let sales = vec![Sale {
///     id: 1,
///     purchase_id: Some(1),
///     product_id: 1,
///     company_id: 1,
///     quantity: 3,
///     total: Money::from_cents(3000),
///     date: Some("2026-01-10T12:00:00".into()),
/// }];
///
/// let flow = cash_flow("2026-01-01", "2026-01-31T23:59:59", &sales, &products).unwrap();
/// assert_eq!(flow.report.revenue, Money::from_cents(3000));
/// assert_eq!(flow.report.profit, Money::from_cents(1200));
/// assert_eq!(flow.report.units_sold, 3);
/// ```
pub fn cash_flow(
    from: &str,
    to: &str,
    sales: &[Sale],
    products: &[Product],
) -> CoreResult<CashFlow> {
    let (from, to) = parse_range(from, to)?;

    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut revenue = Money::zero();
    let mut profit = Money::zero();
    let mut units_sold = 0i64;
    let mut skipped = Vec::new();

    for sale in sales {
        let Some(date) = sale.timestamp() else {
            skipped.push(sale.id);
            continue;
        };

        if !within(&date, &from, &to) {
            continue;
        }

        let out_of_range = || CoreError::MalformedRecord {
            entity: "sale",
            id: sale.id,
            reason: "totals out of range".to_string(),
        };
        revenue = revenue.checked_add(sale.total).ok_or_else(out_of_range)?;
        units_sold = units_sold
            .checked_add(sale.quantity)
            .ok_or_else(out_of_range)?;

        if let Some(product) = by_id.get(&sale.product_id) {
            let line_profit = product
                .unit_margin()
                .and_then(|margin| margin.multiply_quantity(sale.quantity))
                .ok_or_else(out_of_range)?;
            profit = profit.checked_add(line_profit).ok_or_else(out_of_range)?;
        }
    }

    Ok(CashFlow {
        report: CashFlowReport {
            from,
            to,
            revenue,
            profit,
            units_sold,
        },
        skipped,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn product(id: i64, price_cents: i64, cost_cents: i64) -> Product {
        Product {
            id,
            name: format!("Producto {id}"),
            price: Money::from_cents(price_cents),
            stock: 10,
            cost: Money::from_cents(cost_cents),
            category: "General".to_string(),
        }
    }

    fn sale(id: i64, product_id: i64, quantity: i64, total_cents: i64, date: Option<&str>) -> Sale {
        Sale {
            id,
            purchase_id: None,
            product_id,
            company_id: 1,
            quantity,
            total: Money::from_cents(total_cents),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = cash_flow("2026-02-01", "2026-01-01", &[], &[]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDateRange { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unparseable_or_mixed_bounds_are_rejected() {
        let err = cash_flow("ayer", "2026-01-01", &[], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = cash_flow("2026-01-01T00:00:00", "2026-01-31T00:00:00Z", &[], &[]).unwrap_err();
        assert!(matches!(err, CoreError::IncomparableTimestamps { .. }));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let products = vec![product(1, 1000, 600)];
        let sales = vec![
            sale(1, 1, 1, 1000, Some("2026-01-01T00:00:00")),
            sale(2, 1, 2, 2000, Some("2026-01-31T23:59:59")),
            sale(3, 1, 4, 4000, Some("2026-02-01T00:00:00")),
        ];

        let flow = cash_flow("2026-01-01T00:00:00", "2026-01-31T23:59:59", &sales, &products)
            .unwrap();
        assert_eq!(flow.report.revenue, Money::from_cents(3000));
        assert_eq!(flow.report.units_sold, 3);
        assert_eq!(flow.report.profit, Money::from_cents(1200));
        assert!(flow.skipped.is_empty());
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let products = vec![product(1, 1000, 600)];
        let sales = vec![
            sale(1, 1, 1, 1000, Some("2026-01-10T00:00:00")),
            sale(2, 1, 5, 5000, Some("basura")),
            sale(3, 1, 5, 5000, None),
        ];

        let flow = cash_flow("2026-01-01", "2026-01-31", &sales, &products).unwrap();
        assert_eq!(flow.report.revenue, Money::from_cents(1000));
        assert_eq!(flow.skipped, vec![2, 3]);
    }

    #[test]
    fn test_mixed_awareness_compares_wall_clock() {
        let products = vec![product(1, 1000, 600)];
        // 22:00 local at -03:00 is 01:00 UTC next day; wall clock keeps it in January.
        let sales = vec![sale(1, 1, 1, 1000, Some("2026-01-31T22:00:00-03:00"))];

        let flow = cash_flow("2026-01-01T00:00:00", "2026-01-31T23:59:59", &sales, &products)
            .unwrap();
        assert_eq!(flow.report.revenue, Money::from_cents(1000));
    }

    #[test]
    fn test_aware_bounds_compare_instants() {
        let products = vec![product(1, 1000, 600)];
        let sales = vec![sale(1, 1, 1, 1000, Some("2026-01-31T22:00:00-03:00"))];

        let flow = cash_flow("2026-01-01T00:00:00Z", "2026-01-31T23:59:59Z", &sales, &products)
            .unwrap();
        assert!(flow.report.revenue.is_zero());
        assert_eq!(flow.report.to.to_string(), "2026-01-31T23:59:59+00:00");
    }

    #[test]
    fn test_deleted_products_count_revenue_but_not_profit() {
        let products = vec![product(1, 1000, 600)];
        let sales = vec![
            sale(1, 1, 2, 2000, Some("2026-01-10T00:00:00")),
            sale(2, 99, 3, 900, Some("2026-01-11T00:00:00")),
        ];

        let flow = cash_flow("2026-01-01", "2026-01-31", &sales, &products).unwrap();
        assert_eq!(flow.report.revenue, Money::from_cents(2900));
        assert_eq!(flow.report.units_sold, 5);
        assert_eq!(flow.report.profit, Money::from_cents(800));
    }

    #[test]
    fn test_overflowing_totals_fail_the_report() {
        let products = vec![product(1, 1000, 600)];
        let sales = vec![
            sale(1, 1, 1, i64::MAX, Some("2026-01-10T00:00:00")),
            sale(2, 99, 1, i64::MAX, Some("2026-01-11T00:00:00")),
        ];

        let err = cash_flow("2026-01-01", "2026-01-31", &sales, &products).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord { id: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Internal);

        let sales = vec![sale(1, 1, i64::MAX, 1000, Some("2026-01-10T00:00:00"))];
        let err = cash_flow("2026-01-01", "2026-01-31", &sales, &products).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord { id: 1, .. }));
    }

    #[test]
    fn test_profit_uses_current_price_not_sale_total() {
        // Sold at 10.00, price since raised to 12.00.
        let products = vec![product(1, 1200, 600)];
        let sales = vec![sale(1, 1, 1, 1000, Some("2026-01-10T00:00:00"))];

        let flow = cash_flow("2026-01-01", "2026-01-31", &sales, &products).unwrap();
        assert_eq!(flow.report.revenue, Money::from_cents(1000));
        assert_eq!(flow.report.profit, Money::from_cents(600));
    }
}
