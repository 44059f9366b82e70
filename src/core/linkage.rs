//! Rules linking a line to a catalog article.
//!
//! The link is one-way: selecting an article copies its name and price
//! into the line once. Clearing the link leaves the copied text alone, and
//! editing the text or price afterwards keeps the link in place even though
//! the line no longer matches the article.

use super::catalog::ArticleCatalog;
use super::types::*;

/// Set (or clear) the article of a line.
///
/// A known article overwrites description and unit price. An unknown id is
/// still stored, but the line text and price are left as they are.
pub fn apply_article(
    item: &LineItem,
    article_id: Option<ArticleId>,
    articles: &ArticleCatalog,
) -> LineItem {
    let mut updated = LineItem {
        article_id,
        ..item.clone()
    };
    if let Some(article) = article_id.and_then(|id| articles.get(id)) {
        updated.description = article.name.clone();
        updated.unit_price = NumericInput::Numeric(article.unit_price);
    }
    updated
}

/// Whether a linked line has drifted from its article.
///
/// True when the article is gone from the catalog or the line's description
/// or unit price differ from it. Unlinked lines are never stale.
pub fn is_link_stale(item: &LineItem, articles: &ArticleCatalog) -> bool {
    let Some(article_id) = item.article_id else {
        return false;
    };
    match articles.get(article_id) {
        Some(article) => {
            item.description != article.name
                || item.unit_price != NumericInput::Numeric(article.unit_price)
        }
        None => true,
    }
}

/// Articles that may be offered for an invoice issued by `business_id`.
///
/// Articles without an owning business are not offered.
pub fn articles_for_issuer<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    business_id: BusinessId,
) -> Vec<&'a Article> {
    articles
        .into_iter()
        .filter(|a| a.business_id == Some(business_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn consulting() -> Article {
        Article {
            id: ArticleId(7),
            name: "Consulting".into(),
            unit_price: dec!(50.00),
            unit: Some("h".into()),
            business_id: Some(BusinessId(1)),
        }
    }

    #[test]
    fn selecting_known_article_overwrites() {
        let articles = ArticleCatalog::new([consulting()]);
        let line = LineItem::blank(LineId::Draft(1), 0);
        let out = apply_article(&line, Some(ArticleId(7)), &articles);
        assert_eq!(out.description, "Consulting");
        assert_eq!(out.unit_price, NumericInput::Numeric(dec!(50)));
        assert_eq!(out.article_id, Some(ArticleId(7)));
        assert!(!is_link_stale(&out, &articles));
    }

    #[test]
    fn unknown_article_keeps_text() {
        let articles = ArticleCatalog::new([consulting()]);
        let mut line = LineItem::blank(LineId::Draft(1), 0);
        line.description = "Hand typed".into();
        let out = apply_article(&line, Some(ArticleId(99)), &articles);
        assert_eq!(out.description, "Hand typed");
        assert_eq!(out.article_id, Some(ArticleId(99)));
        assert!(is_link_stale(&out, &articles));
    }

    #[test]
    fn clearing_keeps_text() {
        let articles = ArticleCatalog::new([consulting()]);
        let line = LineItem::blank(LineId::Draft(1), 0);
        let linked = apply_article(&line, Some(ArticleId(7)), &articles);
        let cleared = apply_article(&linked, None, &articles);
        assert_eq!(cleared.article_id, None);
        assert_eq!(cleared.description, "Consulting");
        assert_eq!(cleared.unit_price.value(), dec!(50));
        assert!(!is_link_stale(&cleared, &articles));
    }

    #[test]
    fn issuer_filter() {
        let other = Article {
            id: ArticleId(8),
            business_id: Some(BusinessId(2)),
            ..consulting()
        };
        let orphan = Article {
            id: ArticleId(9),
            business_id: None,
            ..consulting()
        };
        let all = [consulting(), other, orphan];
        let offered = articles_for_issuer(&all, BusinessId(1));
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].id, ArticleId(7));
    }
}
