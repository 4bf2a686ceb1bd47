//! Ask command - one-shot question to the resolver.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::Context;
use shikkhok_types::Conversation;

/// Arguments for the ask command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(required = true)]
    pub prompt: String,

    /// Speak the answer aloud (saves an mp3 clip)
    #[arg(long)]
    pub speak: bool,
}

/// Run the ask command.
pub async fn run(args: AskArgs, ctx: &Context) -> Result<()> {
    let resolver = ctx.build_resolver()?;
    let dim = Style::new().dim();

    if ctx.verbose {
        println!(
            "{}",
            dim.apply_to(format!(
                "Knowledge base: {}",
                ctx.config.knowledge.dir.display()
            ))
        );
        println!();
    }

    let resolution = resolver.resolve(&args.prompt, &Conversation::new()).await?;

    println!("{}", resolution.text);
    println!("{}", dim.apply_to(format!("[{}]", resolution.display_label)));

    if args.speak {
        super::speak_answer(&resolution.text, &ctx.config.speech.default_lang).await;
    }

    Ok(())
}
