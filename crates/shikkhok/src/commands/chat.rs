//! Chat command - interactive REPL mode.

use anyhow::Result;
use clap::Args;

use super::Context;
use super::repl::Repl;

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Speak every answer aloud (saves mp3 clips)
    #[arg(long)]
    pub speak: bool,
}

/// Run the chat command (REPL).
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let resolver = ctx.build_resolver()?;
    let mut repl = Repl::new(resolver, ctx.clone(), args.speak)?;
    repl.run().await
}
