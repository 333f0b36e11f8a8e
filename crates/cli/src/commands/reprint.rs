use clap::Args;
use tally_app::{context::AppContext, ledger::Ledger, printing::print_receipt};
use tracing::info;

use crate::{commands::PrintArgs, errors::CliError};

#[derive(Debug, Args)]
pub(crate) struct ReprintArgs {
    /// Invoice number, e.g. INV-2026-000185
    invoice_number: String,

    #[command(flatten)]
    print: PrintArgs,
}

pub(crate) async fn run(args: ReprintArgs, context: &AppContext) -> Result<(), CliError> {
    let invoice = context.ledger.invoice(args.invoice_number.trim()).await?;

    print_receipt(
        args.print.surface().as_ref(),
        args.print.template,
        &invoice,
        &context.store,
    )?;

    info!(invoice = %invoice.invoice_number, template = %args.print.template, "receipt reprinted");

    Ok(())
}
