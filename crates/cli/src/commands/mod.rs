//! Subcommands

use std::{path::PathBuf, sync::Arc};

use clap::{Args, Subcommand};
use tally::receipt::Template;
use tally_app::{
    context::AppContext,
    printing::{PrintSurface, SpoolDirectory},
};

use crate::{commands::output::ConsoleSurface, errors::CliError};

mod bill;
mod history;
mod output;
mod reprint;
mod search;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Search the product catalog
    Search(search::SearchArgs),

    /// Bill a cart described by a YAML script and check it out
    Bill(bill::BillArgs),

    /// List recent invoices
    History(history::HistoryArgs),

    /// Print an existing invoice again
    Reprint(reprint::ReprintArgs),
}

/// Where and how receipts are printed.
#[derive(Debug, Args)]
pub(crate) struct PrintArgs {
    /// Receipt layout (tax-invoice, thermal-receipt)
    #[arg(long, default_value_t = Template::TaxInvoice)]
    template: Template,

    /// Write receipts into this directory instead of stdout
    #[arg(long)]
    spool: Option<PathBuf>,
}

impl PrintArgs {
    fn surface(&self) -> Arc<dyn PrintSurface> {
        match &self.spool {
            Some(dir) => Arc::new(SpoolDirectory::new(dir)),
            None => Arc::new(ConsoleSurface),
        }
    }
}

pub(crate) async fn run(command: Command, context: &AppContext) -> Result<(), CliError> {
    match command {
        Command::Search(args) => search::run(args, context).await,
        Command::Bill(args) => bill::run(args, context).await,
        Command::History(args) => history::run(args, context).await,
        Command::Reprint(args) => reprint::run(args, context).await,
    }
}
