use belegposten::core::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

/// Pretends to be the invoice API.
struct PrintingGateway;

impl InvoiceGateway for PrintingGateway {
    fn save_items(
        &mut self,
        invoice_id: Option<InvoiceId>,
        payload: &SavePayload,
    ) -> Result<SavedInvoice, SaveError> {
        let body = payload
            .to_json()
            .map_err(|e| SaveError::with_message(SaveErrorKind::Rejected, e.to_string()))?;
        let target = invoice_id.map_or("new".to_string(), |id| id.to_string());
        println!("PUT /invoices/{target} {body}");
        Ok(SavedInvoice {
            id: invoice_id.unwrap_or(InvoiceId(1001)),
            items: Vec::new(),
        })
    }
}

fn main() -> Result<(), LedgerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let all_articles = vec![
        Article {
            id: ArticleId(7),
            name: "Consulting".into(),
            unit_price: dec!(50.00),
            unit: Some("HUR".into()),
            business_id: Some(BusinessId(1)),
        },
        Article {
            id: ArticleId(9),
            name: "Workshop".into(),
            unit_price: dec!(900),
            unit: Some("DAY".into()),
            business_id: Some(BusinessId(2)),
        },
    ];
    let offered = articles_for_issuer(&all_articles, BusinessId(1));
    let catalogs = Catalogs::new(
        offered.into_iter().cloned().collect(),
        TaxCatalog::new([
            Tax {
                id: TaxId(1),
                rate: Some(dec!(19)),
                name: Some("VAT".into()),
            },
            Tax {
                id: TaxId(2),
                rate: None,
                name: Some("Exempt".into()),
            },
        ]),
    );

    let mut draft = InvoiceDraft::new(catalogs, LedgerConfig::default());
    let consulting = draft.items()[0].id;
    draft.select_article(consulting, ArticleId(7))?;
    draft.update_field(consulting, LineChange::Quantity(NumericInput::parse("2")))?;
    draft.update_field(consulting, LineChange::Tax(Some(TaxId(1))))?;

    if let Some(travel) = draft.add_item()? {
        draft.update_field(travel, LineChange::Description("Travel".into()))?;
        draft.update_field(travel, LineChange::UnitPrice(NumericInput::parse("30")))?;
        draft.update_field(travel, LineChange::Tax(Some(TaxId(2))))?;
    }

    for line in draft.items() {
        let amounts = draft.display_amounts(line.id).unwrap_or_default();
        println!(
            "  {:<12} {:>6} x {:>8} = {:>8} (+{} tax)",
            line.description, line.quantity, line.unit_price, amounts.total, amounts.tax_amount
        );
    }
    let totals = draft.display_totals();
    println!("Subtotal: {}", totals.subtotal);
    println!("Tax:      {}", totals.tax_total);
    println!("Total:    {}", totals.total);

    let saved = draft.save(&mut PrintingGateway)?;
    println!("Saved as invoice {} ({:?})", saved.id, draft.state());
    Ok(())
}
