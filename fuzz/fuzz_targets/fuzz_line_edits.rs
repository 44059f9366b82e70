#![no_main]

use belegposten::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let catalogs = Catalogs::new(
        ArticleCatalog::new([Article {
            id: ArticleId(1),
            name: "Item".into(),
            unit_price: Decimal::new(1999, 2),
            unit: None,
            business_id: None,
        }]),
        TaxCatalog::new([Tax {
            id: TaxId(1),
            rate: Some(Decimal::new(19, 0)),
            name: None,
        }]),
    );
    let mut ids = LineIdSequence::new();
    let mut items = vec![LineItem::blank(ids.next_id(), 0)];
    for chunk in data.chunks(2) {
        let (op, arg) = (chunk[0], chunk.get(1).copied().unwrap_or(0));
        let target = items[arg as usize % items.len()].id;
        items = match op % 5 {
            0 => add_item(&items, &mut ids),
            1 => remove_item(&items, target),
            2 => select_article(&items, target, ArticleId(u64::from(arg % 3)), &catalogs),
            3 => update_field(
                &items,
                target,
                LineChange::Tax(Some(TaxId(u64::from(arg % 2)))),
                &catalogs,
            ),
            _ => update_field(
                &items,
                target,
                LineChange::Quantity(NumericInput::parse(&arg.to_string())),
                &catalogs,
            ),
        };
        // Invariants after every edit: never empty, contiguous order.
        assert!(!items.is_empty());
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.sort_order, i);
        }
    }
    let _ = calculate_invoice_totals(&items);
    let _ = build_payload(&items);
});
