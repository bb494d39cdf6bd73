//! Invoice totals with 13% HST.

use crate::models::{BillingLineItem, InvoiceLine, InvoiceView};
use rust_decimal::{Decimal, RoundingStrategy};

/// Ontario HST, 13%.
pub const HST_RATE: Decimal = Decimal::from_parts(13, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Each figure is rounded on its own from the unrounded intermediates.
pub fn compute_totals(items: &[BillingLineItem]) -> InvoiceTotals {
    let subtotal: Decimal = items.iter().map(BillingLineItem::price).sum();
    let tax = subtotal * HST_RATE;
    let total = subtotal + tax;

    InvoiceTotals {
        subtotal: round_cents(subtotal),
        tax: round_cents(tax),
        total: round_cents(total),
    }
}

pub fn build_invoice(items: &[BillingLineItem]) -> InvoiceView {
    let totals = compute_totals(items);

    InvoiceView {
        items: items
            .iter()
            .map(|item| InvoiceLine {
                description: item.description,
                code: item.code,
                unit: item.unit,
                quantity: 1,
                unit_price: item.price(),
                total: item.price(),
            })
            .collect(),
        subtotal: totals.subtotal,
        hst: totals.tax,
        total: totals.total,
    }
}
