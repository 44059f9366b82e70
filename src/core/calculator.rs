use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

use super::catalog::TaxCatalog;
use super::types::*;

/// Recalculate the derived amounts of one line.
///
/// Blank or unparsable quantity/price count as zero. A missing tax, an
/// unknown tax id, or a tax without a rate yields a zero tax amount.
/// Amounts are not rounded, so calling this repeatedly never drifts.
/// Inputs whose product leaves `Decimal` range give zero amounts.
pub fn calculate_line(item: &LineItem, taxes: &TaxCatalog) -> LineItem {
    let quantity = item.quantity.value();
    let unit_price = item.unit_price.value();
    let amounts = line_amounts(quantity, unit_price, taxes.rate_for(item.tax_id))
        .unwrap_or_else(|| {
            warn!(
                line = %item.id,
                %quantity,
                %unit_price,
                "line amounts out of range, zeroed"
            );
            LineAmounts::default()
        });
    LineItem {
        amounts,
        ..item.clone()
    }
}

/// Subtotal, tax and total for the given inputs. `None` on overflow.
pub fn line_amounts(
    quantity: Decimal,
    unit_price: Decimal,
    rate: Option<Decimal>,
) -> Option<LineAmounts> {
    let subtotal = quantity.checked_mul(unit_price)?;
    let tax_amount = match rate {
        Some(rate) => subtotal.checked_mul(rate)?.checked_div(dec!(100))?,
        None => Decimal::ZERO,
    };
    Some(LineAmounts {
        subtotal,
        tax_amount,
        total: subtotal.checked_add(tax_amount)?,
    })
}

/// Aggregate all lines into invoice totals. All zero for no lines.
///
/// Sums that leave `Decimal` range saturate instead of panicking.
pub fn calculate_invoice_totals(items: &[LineItem]) -> InvoiceTotals {
    let subtotal = checked_sum(items.iter().map(|i| i.amounts.subtotal));
    let tax_total = checked_sum(items.iter().map(|i| i.amounts.tax_amount));
    let checked = subtotal.zip(tax_total).and_then(|(subtotal, tax_total)| {
        Some(InvoiceTotals {
            subtotal,
            tax_total,
            total: subtotal.checked_add(tax_total)?,
        })
    });
    if let Some(totals) = checked {
        return totals;
    }
    warn!(lines = items.len(), "invoice totals out of range, saturated");
    let subtotal = saturating_sum(items.iter().map(|i| i.amounts.subtotal));
    let tax_total = saturating_sum(items.iter().map(|i| i.amounts.tax_amount));
    InvoiceTotals {
        subtotal,
        tax_total,
        total: subtotal.saturating_add(tax_total),
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Round for display using half-up (commercial rounding).
pub fn round_currency(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl LineAmounts {
    /// Copy rounded to `dp` places for presentation.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            subtotal: round_currency(self.subtotal, dp),
            tax_amount: round_currency(self.tax_amount, dp),
            total: round_currency(self.total, dp),
        }
    }
}

impl InvoiceTotals {
    /// Copy rounded to `dp` places for presentation.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            subtotal: round_currency(self.subtotal, dp),
            tax_total: round_currency(self.tax_total, dp),
            total: round_currency(self.total, dp),
        }
    }
}
