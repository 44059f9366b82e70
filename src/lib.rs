//! # belegposten
//!
//! Invoice line-item ledger for an invoicing administration client: keeps
//! per-line subtotal, tax and total consistent with what the user typed,
//! aggregates invoice totals, and links lines to catalog articles.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Stored amounts are never rounded; rounding happens only for display.
//!
//! ## Quick Start
//!
//! ```rust
//! use belegposten::core::*;
//! use rust_decimal_macros::dec;
//!
//! let catalogs = Catalogs::new(
//!     ArticleCatalog::default(),
//!     TaxCatalog::new([Tax { id: TaxId(1), rate: Some(dec!(19)), name: Some("VAT".into()) }]),
//! );
//! let mut draft = InvoiceDraft::new(catalogs, LedgerConfig::default());
//! let line = draft.items()[0].id;
//!
//! draft.update_field(line, LineChange::Description("Beratung".into())).unwrap();
//! draft.update_field(line, LineChange::Quantity(NumericInput::parse("2"))).unwrap();
//! draft.update_field(line, LineChange::UnitPrice(NumericInput::parse("50"))).unwrap();
//! draft.update_field(line, LineChange::Tax(Some(TaxId(1)))).unwrap();
//!
//! assert_eq!(draft.totals().total, dec!(119));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Ledger types, calculator, store, linkage, draft lifecycle |
//! | `json` | `SavePayload::to_json` via `serde_json` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
