//! REPL (Read-Eval-Print Loop) implementation for interactive chat.

use anyhow::Result;
use console::Style;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use shikkhok_resolver::Resolver;
use shikkhok_types::Conversation;

use super::Context;

enum ControlFlow {
    Continue,
    Exit,
}

/// REPL state and configuration.
pub struct Repl {
    resolver: Resolver,
    conversation: Conversation,
    editor: Editor<(), DefaultHistory>,
    ctx: Context,
    speak: bool,
}

impl Repl {
    /// Create a new REPL instance.
    pub fn new(resolver: Resolver, ctx: Context, speak: bool) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let editor = Editor::with_config(config)?;

        Ok(Self {
            resolver,
            conversation: Conversation::new(),
            editor,
            ctx,
            speak,
        })
    }

    /// Run the REPL loop.
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            match self.editor.readline("shikkhok> ") {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_slash_command(line) {
                            ControlFlow::Continue => continue,
                            ControlFlow::Exit => break,
                        }
                    }

                    if let Err(e) = self.answer(line).await {
                        self.print_error(&format!("Error: {}", e));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - don't exit
                    println!();
                    self.print_dim("(Interrupted - type /quit to exit)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(e) => {
                    self.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        self.print_dim("Goodbye!");
        Ok(())
    }

    /// Resolve one query and append the exchange to the conversation.
    async fn answer(&mut self, query: &str) -> Result<()> {
        let resolution = self.resolver.resolve(query, &self.conversation).await?;

        let dim = Style::new().dim();
        println!("{}", resolution.text);
        println!("{}", dim.apply_to(format!("[{}]", resolution.display_label)));
        println!();

        // Appending the turn pair is the caller's job, not the resolver's
        self.conversation.push_exchange(query, resolution.text.clone());

        if self.speak {
            super::speak_answer(&resolution.text, &self.ctx.config.speech.default_lang).await;
        }

        Ok(())
    }

    fn handle_slash_command(&mut self, input: &str) -> ControlFlow {
        match input.split_whitespace().next().unwrap_or("") {
            "/quit" | "/exit" | "/q" => ControlFlow::Exit,
            "/clear" => {
                self.conversation.clear();
                self.print_dim("Conversation cleared.");
                ControlFlow::Continue
            }
            "/help" => {
                self.print_help();
                ControlFlow::Continue
            }
            other => {
                self.print_error(&format!("Unknown command: {} (try /help)", other));
                ControlFlow::Continue
            }
        }
    }

    fn print_welcome(&self) {
        let bold = Style::new().bold();
        println!("{}", bold.apply_to("Shikkhok - your study companion"));
        self.print_dim("Ask anything. /help for commands, /quit to leave.");
        println!();
    }

    fn print_help(&self) {
        self.print_dim("/clear  - clear the conversation");
        self.print_dim("/help   - show this help");
        self.print_dim("/quit   - exit");
    }

    fn print_dim(&self, text: &str) {
        let dim = Style::new().dim();
        println!("{}", dim.apply_to(text));
    }

    fn print_error(&self, text: &str) {
        let red = Style::new().red();
        eprintln!("{}", red.apply_to(text));
    }
}
