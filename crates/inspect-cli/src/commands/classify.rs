//! Classify command implementation.

use crate::app::App;
use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the classify command.
pub async fn execute_classify(args: ClassifyArgs, app: &App, formatter: &Formatter) -> Result<()> {
    let verdict = app.classifier.classify(&args.input, args.ip).await?;
    println!("{}", formatter.verdict(&verdict)?);
    Ok(())
}
