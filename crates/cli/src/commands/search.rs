use std::io::{self, Write};

use clap::Args;
use tally_app::{billing::DEFAULT_SEARCH_LIMIT, context::AppContext};

use crate::{commands::output::products_table, errors::CliError};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Product name or code
    query: String,

    /// Maximum number of rows to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    limit: usize,
}

pub(crate) async fn run(args: SearchArgs, context: &AppContext) -> Result<(), CliError> {
    let products = context
        .billing_session()
        .search(&args.query, args.limit)
        .await?;

    let mut handle = io::stdout().lock();

    if products.is_empty() {
        writeln!(handle, "no products match {:?}", args.query.trim())?;

        return Ok(());
    }

    writeln!(handle, "{}", products_table(&products))?;

    Ok(())
}
