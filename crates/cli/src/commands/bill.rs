use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Args;
use tally::{discounts::Discount, products::Product, receipt::format_money};
use tally_app::{billing::BillingSession, context::AppContext, printing::ReceiptPrinter};
use tracing::{info, warn};

use crate::{
    commands::{PrintArgs, output::cart_table},
    errors::CliError,
    script::{BillScript, LineTarget, ScriptLine},
};

#[derive(Debug, Args)]
pub(crate) struct BillArgs {
    /// YAML bill script
    script: PathBuf,

    #[command(flatten)]
    print: PrintArgs,
}

pub(crate) async fn run(args: BillArgs, context: &AppContext) -> Result<(), CliError> {
    let script = BillScript::from_yaml_file(&args.script)?;

    let printer = ReceiptPrinter::new(
        args.print.surface(),
        args.print.template,
        context.store.clone(),
    );

    let mut session = context.billing_session().with_printer(printer);

    for (index, line) in script.lines.iter().enumerate() {
        let product = resolve(&session, index + 1, line).await?;

        if !product.in_stock() {
            warn!(product = %product.id, stock = product.stock, "billing a product with no stock");
        }

        session.add(&product);

        if line.quantity.get() > 1 {
            session.update_quantity(&product.id, i64::from(line.quantity.get() - 1));
        }

        if let Some(price) = line.price {
            session.update_price(&product.id, price);
        }
    }

    session.set_customer(script.customer.name.as_deref(), &script.customer.phone);
    session.set_payment_mode(script.payment_mode);

    if let Some(discount) = &script.discount {
        session.set_discount(Discount::from(discount));
    }

    {
        let mut handle = io::stdout().lock();

        writeln!(
            handle,
            "{}",
            cart_table(session.cart(), session.totals(), &context.store)
        )?;
    }

    let invoice = session.checkout().await?;

    info!(invoice = %invoice.invoice_number, "bill settled");

    let mut handle = io::stdout().lock();

    writeln!(
        handle,
        "Invoice {} created, {} paid by {}",
        invoice.invoice_number,
        format_money(invoice.net_amount, context.store.currency()),
        invoice.payment_mode
    )?;

    Ok(())
}

/// Find the product a script line names.
///
/// `id` lines go through catalog search, which has no lookup by id.
async fn resolve(
    session: &BillingSession,
    number: usize,
    line: &ScriptLine,
) -> Result<Product, CliError> {
    match line.target(number)? {
        LineTarget::Id(id) => session
            .search(id.as_str(), usize::MAX)
            .await?
            .into_iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| CliError::ScriptLine {
                line: number,
                reason: format!("catalog search for `{id}` returned no product with that id"),
            }),
        LineTarget::Search(term) => session
            .search(term, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CliError::ScriptLine {
                line: number,
                reason: format!("no product matches {term:?}"),
            }),
    }
}
