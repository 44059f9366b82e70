use std::collections::HashMap;

use rust_decimal::Decimal;

use super::types::*;

/// Article lookup by id, built from the list the host screen fetched for
/// the current issuer business.
#[derive(Debug, Clone, Default)]
pub struct ArticleCatalog {
    articles: HashMap<ArticleId, Article>,
}

impl ArticleCatalog {
    /// Build from a list. A later article replaces an earlier one with the same id.
    pub fn new(articles: impl IntoIterator<Item = Article>) -> Self {
        Self {
            articles: articles.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Article with `id`, if it is in the catalog.
    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(&id)
    }

    /// Number of articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether no articles are offered.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Articles sorted by name, for a selection list.
    pub fn sorted_by_name(&self) -> Vec<&Article> {
        let mut list: Vec<&Article> = self.articles.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        list
    }
}

impl FromIterator<Article> for ArticleCatalog {
    fn from_iter<I: IntoIterator<Item = Article>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Tax lookup by id.
#[derive(Debug, Clone, Default)]
pub struct TaxCatalog {
    taxes: HashMap<TaxId, Tax>,
}

impl TaxCatalog {
    /// Build from the fetched tax list.
    pub fn new(taxes: impl IntoIterator<Item = Tax>) -> Self {
        Self {
            taxes: taxes.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// Tax with `id`, if known.
    pub fn get(&self, id: TaxId) -> Option<&Tax> {
        self.taxes.get(&id)
    }

    /// Rate for `tax_id`. `None` for no tax, an unknown id, or an exempt tax.
    pub fn rate_for(&self, tax_id: Option<TaxId>) -> Option<Decimal> {
        tax_id.and_then(|id| self.get(id)).and_then(|tax| tax.rate)
    }

    /// Number of taxes.
    pub fn len(&self) -> usize {
        self.taxes.len()
    }

    /// Whether the tax list is empty.
    pub fn is_empty(&self) -> bool {
        self.taxes.is_empty()
    }
}

impl FromIterator<Tax> for TaxCatalog {
    fn from_iter<I: IntoIterator<Item = Tax>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Reference data a draft calculates against.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub articles: ArticleCatalog,
    pub taxes: TaxCatalog,
}

impl Catalogs {
    /// Bundle both catalogs.
    pub fn new(articles: ArticleCatalog, taxes: TaxCatalog) -> Self {
        Self { articles, taxes }
    }
}
