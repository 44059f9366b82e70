use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::*;

/// Body sent to the invoice API on save. Replaces the full item set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    pub items: Vec<PayloadItem>,
}

/// One line as the invoice API expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub article_id: Option<ArticleId>,
    pub tax_id: Option<TaxId>,
    pub sort_order: usize,
}

impl From<&LineItem> for PayloadItem {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity.value(),
            unit_price: item.unit_price.value(),
            article_id: item.article_id,
            tax_id: item.tax_id,
            sort_order: item.sort_order,
        }
    }
}

/// Flatten lines into the save body. Unparsable numbers become 0.
pub fn build_payload(items: &[LineItem]) -> SavePayload {
    SavePayload {
        items: items.iter().map(PayloadItem::from).collect(),
    }
}

#[cfg(feature = "json")]
impl SavePayload {
    /// Render as a JSON request body.
    pub fn to_json(&self) -> Result<String, super::error::LedgerError> {
        serde_json::to_string(self)
            .map_err(|e| super::error::LedgerError::Encoding(e.to_string()))
    }
}
