//! Authorize command implementation.

use crate::app::App;
use crate::cli::AuthorizeArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the authorize command.
pub async fn execute_authorize(
    args: AuthorizeArgs,
    app: &App,
    formatter: &Formatter,
) -> Result<()> {
    let grant = app.access.authorize(&args.token).await?;
    println!("{}", formatter.grant(&grant)?);
    Ok(())
}
