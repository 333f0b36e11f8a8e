use std::io::{self, Write};

use clap::Args;
use tally_app::{context::AppContext, ledger::Ledger};

use crate::{commands::output::invoices_table, errors::CliError};

#[derive(Debug, Args)]
pub(crate) struct HistoryArgs {
    /// Maximum number of invoices to show
    #[arg(short = 'n', long, default_value_t = 20)]
    limit: usize,
}

pub(crate) async fn run(args: HistoryArgs, context: &AppContext) -> Result<(), CliError> {
    let mut invoices = context.ledger.invoices().await?;

    invoices.truncate(args.limit);

    let mut handle = io::stdout().lock();

    if invoices.is_empty() {
        writeln!(handle, "no invoices yet")?;

        return Ok(());
    }

    writeln!(handle, "{}", invoices_table(&invoices, &context.store))?;

    Ok(())
}
