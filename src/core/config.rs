use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Default generic message for a save failure without server text.
pub const DEFAULT_SAVE_ERROR_FALLBACK: &str = "The invoice could not be saved. Please try again.";

/// Default cap on lines per draft.
pub const DEFAULT_MAX_LINE_ITEMS: usize = 10_000;

/// Settings for an invoice draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Decimal places used when amounts are rounded for display.
    pub currency_decimals: u32,
    /// Adding beyond this many lines is ignored.
    pub max_line_items: usize,
    /// Message shown when a save fails without a server message.
    pub save_error_fallback: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency_decimals: 2,
            max_line_items: DEFAULT_MAX_LINE_ITEMS,
            save_error_fallback: DEFAULT_SAVE_ERROR_FALLBACK.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> LedgerConfigBuilder {
        LedgerConfigBuilder::new()
    }

    /// Check the limits a deserialized config must respect.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.currency_decimals > 10 {
            return Err(LedgerError::Config(format!(
                "currency_decimals must be at most 10, got {}",
                self.currency_decimals
            )));
        }
        if self.max_line_items == 0 {
            return Err(LedgerError::Config(
                "max_line_items must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`LedgerConfig`].
///
/// ```
/// use belegposten::core::*;
///
/// let config = LedgerConfig::builder()
///     .currency_decimals(3)
///     .save_error_fallback("Speichern fehlgeschlagen")
///     .build()
///     .unwrap();
/// assert_eq!(config.currency_decimals, 3);
/// ```
pub struct LedgerConfigBuilder {
    config: LedgerConfig,
}

impl LedgerConfigBuilder {
    /// Create a builder holding the default configuration.
    pub fn new() -> Self {
        Self {
            config: LedgerConfig::default(),
        }
    }

    /// Decimal places used for display rounding.
    pub fn currency_decimals(mut self, dp: u32) -> Self {
        self.config.currency_decimals = dp;
        self
    }

    /// Upper bound on lines per draft.
    pub fn max_line_items(mut self, max: usize) -> Self {
        self.config.max_line_items = max;
        self
    }

    /// Message shown when a failed save carries no usable text.
    pub fn save_error_fallback(mut self, message: impl Into<String>) -> Self {
        self.config.save_error_fallback = message.into();
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<LedgerConfig, LedgerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for LedgerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
