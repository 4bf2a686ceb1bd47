//! Kb command - knowledge base status.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::Context;
use shikkhok_kb::KnowledgeBase;

/// Arguments for the kb command.
#[derive(Args, Debug)]
pub struct KbArgs {
    /// List every loaded question
    #[arg(long)]
    pub list: bool,
}

/// Run the kb command.
pub fn run(args: KbArgs, ctx: &Context) -> Result<()> {
    let kb = KnowledgeBase::load_dir(&ctx.config.knowledge.dir);
    let stats = kb.stats();
    let dim = Style::new().dim();

    println!("Knowledge base: {}", ctx.config.knowledge.dir.display());
    println!("  files:   {}", stats.files);
    println!("  entries: {}", stats.entries);
    if stats.skipped_lines > 0 || stats.skipped_files > 0 {
        println!(
            "{}",
            dim.apply_to(format!(
                "  skipped: {} lines, {} files",
                stats.skipped_lines, stats.skipped_files
            ))
        );
    }

    if args.list {
        println!();
        for entry in kb.entries() {
            println!("  {}", entry.question);
        }
    }

    Ok(())
}
