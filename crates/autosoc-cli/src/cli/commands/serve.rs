//! `autosoc serve` - Serve snapshots over the read API.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::ServeArgs;
use crate::server;

pub async fn execute(ctx: Context, args: ServeArgs) -> Result<()> {
    let source = ctx.source()?;

    println!(
        "{} Serving {} on {}",
        "🛡".bold(),
        source.describe().cyan(),
        format!("http://{}/api/v1", args.listen).cyan()
    );
    println!("Press Ctrl-C to stop.");

    server::serve(args.listen, source).await
}
