//! Edge cases around partial input, stale references and the one-line minimum.

use belegposten::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn catalogs() -> Catalogs {
    Catalogs::new(
        ArticleCatalog::new([Article {
            id: ArticleId(7),
            name: "Consulting".into(),
            unit_price: dec!(50.00),
            unit: Some("HUR".into()),
            business_id: Some(BusinessId(1)),
        }]),
        TaxCatalog::new([
            Tax {
                id: TaxId(1),
                rate: Some(dec!(19)),
                name: None,
            },
            Tax {
                id: TaxId(4),
                rate: Some(dec!(0)),
                name: Some("Zero".into()),
            },
        ]),
    )
}

fn single() -> Vec<LineItem> {
    vec![LineItem::blank(LineId::Draft(1), 0)]
}

// ---------------------------------------------------------------------------
// Unknown ids and stale references
// ---------------------------------------------------------------------------

#[test]
fn remove_unknown_id_keeps_all_lines() {
    let mut ids = LineIdSequence::new();
    let mut items = vec![LineItem::blank(ids.next_id(), 0)];
    items = add_item(&items, &mut ids);
    let out = remove_item(&items, LineId::Draft(99));
    assert_eq!(out, items);
}

#[test]
fn stale_article_is_inert() {
    let cat = catalogs();
    let mut items = update_field(
        &single(),
        LineId::Draft(1),
        LineChange::UnitPrice(NumericInput::parse("12")),
        &cat,
    );
    items = select_article(&items, LineId::Draft(1), ArticleId(404), &cat);
    assert_eq!(items[0].article_id, Some(ArticleId(404)));
    assert_eq!(items[0].description, "");
    assert_eq!(items[0].amounts.subtotal, dec!(12));
}

#[test]
fn clearing_article_keeps_copied_values() {
    let cat = catalogs();
    let items = select_article(&single(), LineId::Draft(1), ArticleId(7), &cat);
    let items = update_field(&items, LineId::Draft(1), LineChange::Article(None), &cat);
    assert_eq!(items[0].article_id, None);
    assert_eq!(items[0].description, "Consulting");
    assert_eq!(items[0].amounts.total, dec!(50));
}

#[test]
fn article_removed_from_catalog_marks_link_stale() {
    let mut draft = InvoiceDraft::new(catalogs(), LedgerConfig::default());
    let line = draft.items()[0].id;
    draft.select_article(line, ArticleId(7)).unwrap();
    assert!(!draft.is_link_stale(line));

    draft.replace_articles(ArticleCatalog::default());
    assert!(draft.is_link_stale(line));
    assert_eq!(draft.line(line).unwrap().article_id, Some(ArticleId(7)));
    assert_eq!(draft.line(line).unwrap().description, "Consulting");
}

// ---------------------------------------------------------------------------
// Partial numeric input
// ---------------------------------------------------------------------------

#[test]
fn unparsable_price_counts_as_zero_but_keeps_text() {
    let cat = catalogs();
    let items = update_field(
        &single(),
        LineId::Draft(1),
        LineChange::UnitPrice(NumericInput::parse("12,50")),
        &cat,
    );
    assert_eq!(items[0].unit_price.to_string(), "12,50");
    assert_eq!(items[0].amounts.subtotal, Decimal::ZERO);

    let payload = build_payload(&items);
    assert_eq!(payload.items[0].unit_price, Decimal::ZERO);
}

#[test]
fn oversized_typed_price_counts_as_zero() {
    let cat = catalogs();
    let huge = "79228162514264337593543950335";
    let items = update_field(
        &single(),
        LineId::Draft(1),
        LineChange::UnitPrice(NumericInput::parse(huge)),
        &cat,
    );
    let items = update_field(
        &items,
        LineId::Draft(1),
        LineChange::Quantity(NumericInput::parse("2")),
        &cat,
    );
    assert_eq!(items[0].unit_price.to_string(), huge);
    assert!(!items[0].unit_price.is_numeric());
    assert_eq!(items[0].amounts, LineAmounts::default());
    assert_eq!(calculate_invoice_totals(&items).total, Decimal::ZERO);
}

#[test]
fn out_of_range_amounts_never_panic() {
    let cat = catalogs();
    let mut ids = LineIdSequence::new();
    let mut items = vec![LineItem::blank(ids.next_id(), 0)];
    items = add_item(&items, &mut ids);
    for id in [LineId::Draft(1), LineId::Draft(2)] {
        items = update_field(&items, id, LineChange::UnitPrice(Decimal::MAX.into()), &cat);
    }
    assert_eq!(items[0].amounts.total, Decimal::MAX);
    // Both lines fit on their own, their sum saturates.
    assert_eq!(calculate_invoice_totals(&items).total, Decimal::MAX);

    // MAX × 19 % leaves range, so the line is zeroed.
    items = update_field(&items, LineId::Draft(1), LineChange::Tax(Some(TaxId(1))), &cat);
    assert_eq!(items[0].amounts, LineAmounts::default());
    assert_eq!(calculate_invoice_totals(&items).total, Decimal::MAX);
}

#[test]
fn zero_rate_tax_is_exact_zero() {
    let cat = catalogs();
    let items = update_field(
        &single(),
        LineId::Draft(1),
        LineChange::UnitPrice(dec!(33.33).into()),
        &cat,
    );
    let items = update_field(&items, LineId::Draft(1), LineChange::Tax(Some(TaxId(4))), &cat);
    assert_eq!(items[0].amounts.tax_amount, Decimal::ZERO);
    assert_eq!(items[0].amounts.total, dec!(33.33));
}

#[test]
fn description_edit_still_recalculates() {
    let cat = catalogs();
    let mut items = single();
    // Stale derived amounts, as if written by hand.
    items[0].amounts.total = dec!(999);
    let items = update_field(
        &items,
        LineId::Draft(1),
        LineChange::Description("Recalc".into()),
        &cat,
    );
    assert_eq!(items[0].amounts.total, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Draft minimum and lifecycle corners
// ---------------------------------------------------------------------------

#[test]
fn draft_refuses_to_remove_last_line() {
    let mut draft = InvoiceDraft::new(catalogs(), LedgerConfig::default());
    let line = draft.items()[0].id;
    assert!(!draft.remove_item(line).unwrap());
    assert_eq!(draft.items().len(), 1);
    assert_eq!(draft.state(), DraftState::Empty);
}

#[test]
fn loading_invoice_without_lines_adds_blank_line() {
    let draft = InvoiceDraft::load(
        InvoiceId(3),
        Vec::new(),
        catalogs(),
        LedgerConfig::default(),
    );
    assert_eq!(draft.items().len(), 1);
    assert_eq!(draft.items()[0].id, LineId::Draft(1));
    assert_eq!(draft.state(), DraftState::Loaded);
}

#[test]
fn loading_renumbers_gappy_sort_orders() {
    let persisted = [5usize, 2, 9]
        .into_iter()
        .enumerate()
        .map(|(i, order)| PersistedLineItem {
            id: i as u64 + 1,
            description: format!("Line {}", i + 1),
            quantity: dec!(1),
            unit_price: dec!(1),
            article_id: None,
            tax_id: None,
            sort_order: order,
        })
        .collect();
    let draft = InvoiceDraft::load(InvoiceId(1), persisted, catalogs(), LedgerConfig::default());
    let ids: Vec<LineId> = draft.items().iter().map(|i| i.id).collect();
    assert_eq!(
        ids,
        [LineId::Persisted(2), LineId::Persisted(1), LineId::Persisted(3)]
    );
    let orders: Vec<usize> = draft.items().iter().map(|i| i.sort_order).collect();
    assert_eq!(orders, [0, 1, 2]);
}

#[test]
fn display_rounding_follows_config() {
    let config = LedgerConfig::builder().currency_decimals(0).build().unwrap();
    let mut draft = InvoiceDraft::new(catalogs(), config);
    let line = draft.items()[0].id;
    draft
        .update_field(line, LineChange::UnitPrice(dec!(10.50).into()))
        .unwrap();
    assert_eq!(draft.display_totals().total, dec!(11));
    assert_eq!(draft.display_amounts(line).unwrap().subtotal, dec!(11));
    assert_eq!(draft.totals().total, dec!(10.50));
}

#[test]
fn invalid_deserialized_config_is_rejected() {
    let config: LedgerConfig = serde_json::from_str(r#"{"max_line_items":0}"#).unwrap();
    assert!(matches!(config.validate(), Err(LedgerError::Config(_))));
}

// ---------------------------------------------------------------------------
// Payload snapshot
// ---------------------------------------------------------------------------

#[test]
fn payload_json_snapshot() {
    let cat = catalogs();
    let mut ids = LineIdSequence::new();
    let mut items = vec![LineItem::blank(ids.next_id(), 0)];
    items = add_item(&items, &mut ids);
    items = select_article(&items, LineId::Draft(1), ArticleId(7), &cat);
    items = update_field(&items, LineId::Draft(1), LineChange::Quantity(dec!(2).into()), &cat);
    items = update_field(&items, LineId::Draft(1), LineChange::Tax(Some(TaxId(1))), &cat);
    items = update_field(
        &items,
        LineId::Draft(2),
        LineChange::Description("Travel".into()),
        &cat,
    );
    items = update_field(
        &items,
        LineId::Draft(2),
        LineChange::Quantity(NumericInput::parse("x")),
        &cat,
    );
    items = update_field(
        &items,
        LineId::Draft(2),
        LineChange::UnitPrice(NumericInput::parse("120.5")),
        &cat,
    );

    let json = serde_json::to_string_pretty(&build_payload(&items)).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "items": [
        {
          "description": "Consulting",
          "quantity": 2.0,
          "unit_price": 50.0,
          "article_id": 7,
          "tax_id": 1,
          "sort_order": 0
        },
        {
          "description": "Travel",
          "quantity": 0.0,
          "unit_price": 120.5,
          "article_id": null,
          "tax_id": null,
          "sort_order": 1
        }
      ]
    }
    "#);
}
