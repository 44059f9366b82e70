#![no_main]

use belegposten::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any field text must parse without panicking and keep text intact.
        let input = NumericInput::parse(s);
        assert!(input.value().abs() <= MAX_NUMERIC_INPUT);
        if let NumericInput::Text(raw) = &input {
            assert_eq!(raw, s);
        }

        // The parsed value must survive the calculator as quantity and price.
        let taxes = TaxCatalog::new([Tax {
            id: TaxId(1),
            rate: Some(Decimal::new(19, 0)),
            name: None,
        }]);
        let line = LineItem {
            quantity: input.clone(),
            unit_price: input,
            tax_id: Some(TaxId(1)),
            ..LineItem::blank(LineId::Draft(1), 0)
        };
        let line = calculate_line(&line, &taxes);
        let _ = calculate_invoice_totals(&[line.clone(), line.clone()]);
        let _ = build_payload(&[line]);
    }
});
