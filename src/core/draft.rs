use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::calculator::{calculate_invoice_totals, round_currency};
use super::catalog::{ArticleCatalog, Catalogs, TaxCatalog};
use super::config::LedgerConfig;
use super::error::{LedgerError, SaveError, ValidationError};
use super::linkage::is_link_stale;
use super::payload::{SavePayload, build_payload};
use super::store::{self, LineChange, LineIdSequence};
use super::types::*;

/// Where a draft is in its edit/save lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftState {
    /// New invoice with one blank line, untouched.
    Empty,
    /// Filled from an existing invoice, untouched.
    Loaded,
    /// At least one edit applied.
    Editing,
    /// Save request in flight; edits and re-submission are refused.
    Saving,
    /// Save succeeded.
    Saved,
    /// Save failed; lines are intact and the save can be retried.
    SaveFailed,
}

/// Invoice as returned by the API after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedInvoice {
    pub id: InvoiceId,
    #[serde(default)]
    pub items: Vec<PersistedLineItem>,
}

/// Port to the invoice API.
///
/// Implementations replace the invoice's full item set with the payload
/// (creating the invoice when `invoice_id` is `None`).
pub trait InvoiceGateway {
    fn save_items(
        &mut self,
        invoice_id: Option<InvoiceId>,
        payload: &SavePayload,
    ) -> Result<SavedInvoice, SaveError>;
}

/// An invoice's line items while they are being edited.
///
/// All edits go through the store functions, so derived amounts are
/// recalculated before the method returns and totals are computed from the
/// current lines on every call.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    invoice_id: Option<InvoiceId>,
    items: Vec<LineItem>,
    ids: LineIdSequence,
    catalogs: Catalogs,
    config: LedgerConfig,
    state: DraftState,
    last_error: Option<SaveError>,
}

impl InvoiceDraft {
    /// Start a new invoice with a single blank line.
    pub fn new(catalogs: Catalogs, config: LedgerConfig) -> Self {
        let mut ids = LineIdSequence::new();
        let items = vec![LineItem::blank(ids.next_id(), 0)];
        Self {
            invoice_id: None,
            items,
            ids,
            catalogs,
            config,
            state: DraftState::Empty,
            last_error: None,
        }
    }

    /// Open an existing invoice for editing.
    ///
    /// Lines are ordered by their stored `sort_order`, renumbered and
    /// calculated. An invoice without lines gets one blank line.
    pub fn load(
        invoice_id: InvoiceId,
        mut persisted: Vec<PersistedLineItem>,
        catalogs: Catalogs,
        config: LedgerConfig,
    ) -> Self {
        persisted.sort_by_key(|item| item.sort_order);
        let mut items: Vec<LineItem> = persisted.into_iter().map(LineItem::from).collect();
        let mut ids = LineIdSequence::after(&items);
        if items.is_empty() {
            items.push(LineItem::blank(ids.next_id(), 0));
        }
        let items = store::recalculate_all(&store::renumber(items), &catalogs);
        debug!(invoice = %invoice_id, lines = items.len(), "draft loaded");
        Self {
            invoice_id: Some(invoice_id),
            items,
            ids,
            catalogs,
            config,
            state: DraftState::Loaded,
            last_error: None,
        }
    }

    /// Server id, `None` until the invoice is first saved.
    pub fn invoice_id(&self) -> Option<InvoiceId> {
        self.invoice_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DraftState {
        self.state
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by id.
    pub fn line(&self, id: LineId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Articles and taxes the draft calculates against.
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Settings this draft was created with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Invoice totals from the current lines.
    pub fn totals(&self) -> InvoiceTotals {
        calculate_invoice_totals(&self.items)
    }

    /// Totals rounded to the configured currency precision.
    pub fn display_totals(&self) -> InvoiceTotals {
        self.totals().rounded(self.config.currency_decimals)
    }

    /// Line amounts rounded to the configured currency precision.
    pub fn display_amounts(&self, id: LineId) -> Option<LineAmounts> {
        self.line(id)
            .map(|item| item.amounts.rounded(self.config.currency_decimals))
    }

    /// Round an arbitrary amount the way this draft displays money.
    pub fn round(&self, value: Decimal) -> Decimal {
        round_currency(value, self.config.currency_decimals)
    }

    /// Whether the remove action should be offered.
    pub fn can_remove(&self) -> bool {
        store::can_remove(&self.items)
    }

    /// Whether a line's article link no longer matches its text or price.
    pub fn is_link_stale(&self, id: LineId) -> bool {
        self.line(id)
            .is_some_and(|item| is_link_stale(item, &self.catalogs.articles))
    }

    /// Append a blank line. Returns `None` when the line limit is reached.
    pub fn add_item(&mut self) -> Result<Option<LineId>, LedgerError> {
        self.ensure_editable()?;
        if self.items.len() >= self.config.max_line_items {
            warn!(
                max = self.config.max_line_items,
                "line limit reached, add ignored"
            );
            return Ok(None);
        }
        let id = self.ids.peek();
        self.items = store::add_item(&self.items, &mut self.ids);
        debug!(line = %id, "line added");
        self.touch();
        Ok(Some(id))
    }

    /// Remove a line. Returns `false` if nothing was removed (last line or
    /// unknown id).
    pub fn remove_item(&mut self, id: LineId) -> Result<bool, LedgerError> {
        self.ensure_editable()?;
        let before = self.items.len();
        self.items = store::remove_item(&self.items, id);
        let removed = self.items.len() < before;
        if removed {
            debug!(line = %id, "line removed");
            self.touch();
        } else {
            debug!(line = %id, "remove ignored");
        }
        Ok(removed)
    }

    /// Edit one field of a line and recalculate it. Unknown ids are ignored.
    pub fn update_field(&mut self, id: LineId, change: LineChange) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        let field = change.field();
        if self.line(id).is_none() {
            debug!(line = %id, field, "update ignored, unknown line");
            return Ok(());
        }
        self.items = store::update_field(&self.items, id, change, &self.catalogs);
        debug!(line = %id, field, "line updated");
        self.touch();
        Ok(())
    }

    /// Fill a line from a catalog article. Unknown line ids are ignored.
    pub fn select_article(
        &mut self,
        id: LineId,
        article_id: ArticleId,
    ) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        if self.line(id).is_none() {
            debug!(line = %id, article = %article_id, "selection ignored, unknown line");
            return Ok(());
        }
        if self.catalogs.articles.get(article_id).is_none() {
            debug!(line = %id, article = %article_id, "article not in catalog, link kept inert");
        }
        self.items = store::select_article(&self.items, id, article_id, &self.catalogs);
        debug!(line = %id, article = %article_id, "article selected");
        self.touch();
        Ok(())
    }

    /// Swap in a freshly fetched tax list and recalculate every line.
    pub fn replace_taxes(&mut self, taxes: TaxCatalog) {
        self.catalogs.taxes = taxes;
        self.items = store::recalculate_all(&self.items, &self.catalogs);
        debug!(taxes = self.catalogs.taxes.len(), "tax catalog replaced");
    }

    /// Swap in the articles of a newly selected issuer. Lines keep their
    /// current text, price and link.
    pub fn replace_articles(&mut self, articles: ArticleCatalog) {
        self.catalogs.articles = articles;
        debug!(
            articles = self.catalogs.articles.len(),
            "article catalog replaced"
        );
    }

    /// Save precondition: every line has a non-blank description.
    pub fn validate(&self) -> Vec<ValidationError> {
        store::missing_descriptions(&self.items)
    }

    /// Check the precondition and enter `Saving`.
    ///
    /// Returns the payload to send. Lines stay in memory until the outcome
    /// is reported through [`finish_save`](Self::finish_save).
    pub fn begin_save(&mut self) -> Result<SavePayload, LedgerError> {
        if self.state == DraftState::Saving {
            warn!("save rejected, another save is in flight");
            return Err(LedgerError::SaveInProgress);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            warn!(errors = errors.len(), "save rejected by validation");
            return Err(LedgerError::from_validation(&errors));
        }
        self.state = DraftState::Saving;
        info!(
            invoice = ?self.invoice_id,
            lines = self.items.len(),
            "saving invoice items"
        );
        Ok(build_payload(&self.items))
    }

    /// Record the outcome of the save request.
    pub fn finish_save(
        &mut self,
        outcome: Result<SavedInvoice, SaveError>,
    ) -> Result<SavedInvoice, LedgerError> {
        match outcome {
            Ok(saved) => {
                info!(invoice = %saved.id, "invoice saved");
                self.invoice_id = Some(saved.id);
                self.state = DraftState::Saved;
                self.last_error = None;
                Ok(saved)
            }
            Err(err) => {
                warn!(kind = ?err.kind, message = ?err.message, "invoice save failed");
                self.state = DraftState::SaveFailed;
                self.last_error = Some(err.clone());
                Err(LedgerError::Save(err))
            }
        }
    }

    /// Save through `gateway` in one call.
    pub fn save<G: InvoiceGateway>(
        &mut self,
        gateway: &mut G,
    ) -> Result<SavedInvoice, LedgerError> {
        let payload = self.begin_save()?;
        let outcome = gateway.save_items(self.invoice_id, &payload);
        self.finish_save(outcome)
    }

    /// The last save failure, if the most recent save failed.
    pub fn last_error(&self) -> Option<&SaveError> {
        self.last_error.as_ref()
    }

    /// User-facing text for the last save failure.
    pub fn save_error_message(&self) -> Option<&str> {
        self.last_error
            .as_ref()
            .map(|err| err.display_message(&self.config.save_error_fallback))
    }

    fn ensure_editable(&self) -> Result<(), LedgerError> {
        if self.state == DraftState::Saving {
            return Err(LedgerError::SaveInProgress);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.state = DraftState::Editing;
    }
}
