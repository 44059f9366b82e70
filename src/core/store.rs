use super::calculator::calculate_line;
use super::catalog::Catalogs;
use super::error::ValidationError;
use super::linkage::apply_article;
use super::types::*;

/// Source of draft line ids.
///
/// Ids increase monotonically in insertion order. A sequence seeded from
/// existing lines never hands out an id already present among them.
#[derive(Debug, Clone)]
pub struct LineIdSequence {
    next: u64,
}

impl Default for LineIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIdSequence {
    /// Create a new sequence starting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Create a sequence continuing after every draft id in `items`.
    pub fn after(items: &[LineItem]) -> Self {
        let last = items
            .iter()
            .filter_map(|item| match item.id {
                LineId::Draft(seq) => Some(seq),
                LineId::Persisted(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self { next: last + 1 }
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> LineId {
        let id = LineId::Draft(self.next);
        self.next += 1;
        id
    }

    /// Preview the next id without consuming it.
    pub fn peek(&self) -> LineId {
        LineId::Draft(self.next)
    }
}

/// A single field edit on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    Description(String),
    Quantity(NumericInput),
    UnitPrice(NumericInput),
    Tax(Option<TaxId>),
    /// Setting `Some` is article selection; `None` only drops the link.
    Article(Option<ArticleId>),
}

impl LineChange {
    /// Short name of the edited field, used in logs.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Description(_) => "description",
            Self::Quantity(_) => "quantity",
            Self::UnitPrice(_) => "unit_price",
            Self::Tax(_) => "tax_id",
            Self::Article(_) => "article_id",
        }
    }
}

/// Append a blank line with a fresh id at the end.
pub fn add_item(items: &[LineItem], ids: &mut LineIdSequence) -> Vec<LineItem> {
    let mut next = items.to_vec();
    next.push(LineItem::blank(ids.next_id(), items.len()));
    next
}

/// Remove the line with `id` and renumber the rest.
///
/// An invoice keeps at least one line: a single-line list comes back as is.
pub fn remove_item(items: &[LineItem], id: LineId) -> Vec<LineItem> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let kept: Vec<LineItem> = items.iter().filter(|i| i.id != id).cloned().collect();
    renumber(kept)
}

/// Whether a line can be removed from `items` at all.
pub fn can_remove(items: &[LineItem]) -> bool {
    items.len() > 1
}

/// Apply one field edit to the line with `id` and recalculate it.
///
/// Unknown ids leave the list unchanged.
pub fn update_field(
    items: &[LineItem],
    id: LineId,
    change: LineChange,
    catalogs: &Catalogs,
) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| {
            if item.id != id {
                return item.clone();
            }
            let edited = match &change {
                LineChange::Description(text) => LineItem {
                    description: text.clone(),
                    ..item.clone()
                },
                LineChange::Quantity(value) => LineItem {
                    quantity: value.clone(),
                    ..item.clone()
                },
                LineChange::UnitPrice(value) => LineItem {
                    unit_price: value.clone(),
                    ..item.clone()
                },
                LineChange::Tax(tax_id) => LineItem {
                    tax_id: *tax_id,
                    ..item.clone()
                },
                LineChange::Article(article_id) => {
                    apply_article(item, *article_id, &catalogs.articles)
                }
            };
            calculate_line(&edited, &catalogs.taxes)
        })
        .collect()
}

/// Pick a catalog article for the line with `id`.
pub fn select_article(
    items: &[LineItem],
    id: LineId,
    article_id: ArticleId,
    catalogs: &Catalogs,
) -> Vec<LineItem> {
    update_field(items, id, LineChange::Article(Some(article_id)), catalogs)
}

/// Recalculate every line, e.g. after the tax list was reloaded.
pub fn recalculate_all(items: &[LineItem], catalogs: &Catalogs) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| calculate_line(item, &catalogs.taxes))
        .collect()
}

/// Assign `sort_order` from position.
pub fn renumber(items: Vec<LineItem>) -> Vec<LineItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| LineItem {
            sort_order: index,
            ..item
        })
        .collect()
}

/// One error per line whose description is blank.
pub fn missing_descriptions(items: &[LineItem]) -> Vec<ValidationError> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.has_description())
        .map(|(index, item)| {
            ValidationError::new(
                format!("items[{index}].description"),
                format!("line {} needs a description", item.id),
            )
        })
        .collect()
}
