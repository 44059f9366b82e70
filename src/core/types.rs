use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

/// Identifier of a tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(pub u64);

/// Identifier of an issuer business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub u64);

/// Identifier of a persisted invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub u64);

macro_rules! display_id {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

display_id!(ArticleId, TaxId, BusinessId, InvoiceId);

/// Stable identifier of a line within one draft.
///
/// Lines loaded from the server keep their server id; lines added while
/// editing get a draft id from a [`LineIdSequence`](super::LineIdSequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LineId {
    /// Row that already exists on the server.
    Persisted(u64),
    /// Row created client-side, not yet saved.
    Draft(u64),
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Draft(seq) => write!(f, "new-{seq}"),
        }
    }
}

/// Largest magnitude a typed quantity or price may have and still count as
/// a number. Keeps quantity × price × rate well inside `Decimal` range.
pub const MAX_NUMERIC_INPUT: Decimal = dec!(10000000000);

/// A quantity or price exactly as the user is typing it.
///
/// The input field may be transiently empty or hold text that does not
/// parse yet (`"12,5"`, `"abc"`). Both count as zero for calculation while
/// the original text is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NumericInput {
    /// Field is blank.
    #[default]
    Empty,
    /// Field holds a parsed decimal.
    Numeric(Decimal),
    /// Field holds text that is not (yet) a number.
    Text(String),
}

impl NumericInput {
    /// Interpret raw field text. Never fails.
    ///
    /// Numbers beyond [`MAX_NUMERIC_INPUT`] are kept as `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match Decimal::from_str(trimmed) {
            Ok(value) if value.abs() <= MAX_NUMERIC_INPUT => Self::Numeric(value),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Value used for calculation: `Empty` and `Text` are zero.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Numeric(value) => *value,
            Self::Empty | Self::Text(_) => Decimal::ZERO,
        }
    }

    /// Whether the field currently holds a usable number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for NumericInput {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.pad(""),
            Self::Numeric(value) => f.pad(&value.to_string()),
            Self::Text(raw) => f.pad(raw),
        }
    }
}

/// Derived amounts of one line. Only the calculator writes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineAmounts {
    /// quantity × unit price.
    pub subtotal: Decimal,
    /// subtotal × rate / 100, zero when exempt.
    pub tax_amount: Decimal,
    /// subtotal + tax amount.
    pub total: Decimal,
}

/// One row of an invoice being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineId,
    /// Free text, must be non-blank at save time.
    pub description: String,
    pub quantity: NumericInput,
    pub unit_price: NumericInput,
    /// Catalog article this line was filled from, if any.
    pub article_id: Option<ArticleId>,
    /// `None` means tax-exempt.
    pub tax_id: Option<TaxId>,
    /// Zero-based display and persistence order.
    pub sort_order: usize,
    /// Derived totals, recalculated on every change.
    pub amounts: LineAmounts,
}

impl LineItem {
    /// A blank line: quantity 1, price 0, no article, no tax, zero amounts.
    pub fn blank(id: LineId, sort_order: usize) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: NumericInput::Numeric(Decimal::ONE),
            unit_price: NumericInput::Numeric(Decimal::ZERO),
            article_id: None,
            tax_id: None,
            sort_order,
            amounts: LineAmounts::default(),
        }
    }

    /// Whether the description is present once whitespace is stripped.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Catalog article offered for selection on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub name: String,
    /// Accepts `"50.00"` as well as `50`.
    pub unit_price: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    /// Issuer business owning the article.
    #[serde(default)]
    pub business_id: Option<BusinessId>,
}

/// Tax rate from the reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub id: TaxId,
    /// Percentage (19 means 19 %). `None` means exempt.
    pub rate: Option<Decimal>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Tax {
    /// Label for a tax selector, e.g. "VAT (19%)" or "Exempt".
    pub fn label(&self) -> String {
        match (&self.name, self.rate) {
            (Some(name), Some(rate)) => format!("{name} ({}%)", rate.normalize()),
            (Some(name), None) => name.clone(),
            (None, Some(rate)) => format!("{}%", rate.normalize()),
            (None, None) => "Exempt".to_string(),
        }
    }
}

/// Invoice-level aggregate. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Σ line subtotal.
    pub subtotal: Decimal,
    /// Σ line tax amount.
    pub tax_total: Decimal,
    /// subtotal + tax_total.
    pub total: Decimal,
}

/// Line item as returned by the invoice API when editing an existing invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLineItem {
    pub id: u64,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub article_id: Option<ArticleId>,
    #[serde(default)]
    pub tax_id: Option<TaxId>,
    #[serde(default)]
    pub sort_order: usize,
}

impl From<PersistedLineItem> for LineItem {
    fn from(item: PersistedLineItem) -> Self {
        Self {
            id: LineId::Persisted(item.id),
            description: item.description,
            quantity: NumericInput::Numeric(item.quantity),
            unit_price: NumericInput::Numeric(item.unit_price),
            article_id: item.article_id,
            tax_id: item.tax_id,
            sort_order: item.sort_order,
            amounts: LineAmounts::default(),
        }
    }
}
