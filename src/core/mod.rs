//! Line-item ledger core: types, calculation, store operations, article
//! linkage and the draft lifecycle.
//!
//! Every screen that edits invoice lines goes through these functions so
//! the arithmetic lives in exactly one place.

mod calculator;
mod catalog;
mod config;
mod draft;
mod error;
pub mod labels;
mod linkage;
mod payload;
mod store;
mod types;

pub use calculator::*;
pub use catalog::*;
pub use config::*;
pub use draft::*;
pub use error::*;
pub use labels::{LabelStore, MemoryLabelStore, StatusLabels};
pub use linkage::*;
pub use payload::*;
pub use store::*;
pub use types::*;
