//! # CLI Layer
//!
//! One client of the excerpt library. This is the only place that touches the
//! terminal: it parses arguments, reads the clipboard or stdin, opens the
//! editor, prints results and sets up logging.
//!
//! Handlers follow one shape: build inputs, call `ExcerptApi`, print the
//! returned `CmdResult`. Errors bubble up to `main`, which prints them to
//! stderr and exits with status 1.

use super::print::{print_config, print_messages};
use super::setup::{CardArgs, Cli, Commands};
use clap::Parser;
use excerpt::api::{CardOverrides, ConfigAction};
use excerpt::card::FontChoice;
use excerpt::clipboard::read_from_clipboard;
use excerpt::editor::{EditorContent, edit_content};
use excerpt::error::Result;
use excerpt::init::{ExcerptContext, initialize};
use excerpt::model::{Excerpt, ExcerptKind};
use excerpt::paste::PasteOutcome;
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// Filter directives for logging, e.g. `EXCERPT_LOG=excerpt=debug`.
const LOG_ENV: &str = "EXCERPT_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize(needs_system_fonts(&cli.command))?;

    match cli.command {
        Commands::Card(args) => handle_card(&mut ctx, args),
        Commands::Parse { stdin, json } => handle_parse(&ctx, stdin, json),
        Commands::Kind { kind } => handle_kind(&mut ctx, kind),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Scanning installed fonts is slow; skip it when the bundled font was asked for.
fn needs_system_fonts(command: &Commands) -> bool {
    match command {
        Commands::Card(args) => !matches!(
            args.font.as_deref().map(FontChoice::parse),
            Some(FontChoice::Builtin)
        ),
        _ => false,
    }
}

fn read_source(from_stdin: bool) -> Result<String> {
    if from_stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        read_from_clipboard()
    }
}

fn handle_card(ctx: &mut ExcerptContext, args: CardArgs) -> Result<()> {
    let mut excerpt = ctx.api.new_excerpt()?;

    if let Some(kind) = args.kind {
        ctx.api.set_kind(&mut excerpt, kind)?;
    }

    if args.paste || args.stdin {
        let raw = read_source(args.stdin)?;
        let result = ctx.api.paste(&mut excerpt, &raw)?;
        print_messages(&result.messages);
    }

    if let Some(content) = args.content {
        excerpt.content = content;
    }
    if let Some(book) = args.book {
        excerpt.title = book;
    }
    if let Some(author) = args.author {
        excerpt.author = author;
    }

    if args.edit {
        let edited = edit_content(&EditorContent::from_excerpt(&excerpt))?;
        excerpt = edited.into_excerpt(excerpt.kind);
    }

    let overrides = CardOverrides {
        width: args.width,
        scale: args.scale,
        font: args.font,
    };
    let result = ctx.api.write_card(&excerpt, &overrides, &args.output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_parse(ctx: &ExcerptContext, from_stdin: bool, json: bool) -> Result<()> {
    let raw = read_source(from_stdin)?;
    let mut excerpt = Excerpt::empty(ExcerptKind::default());
    let result = ctx.api.paste(&mut excerpt, &raw)?;

    if result.paste_outcome != Some(PasteOutcome::Applied) {
        print_messages(&result.messages);
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&excerpt)?);
    } else {
        println!("{}", EditorContent::from_excerpt(&excerpt).to_buffer());
    }
    Ok(())
}

fn handle_kind(ctx: &mut ExcerptContext, kind: Option<ExcerptKind>) -> Result<()> {
    let result = match kind {
        Some(kind) => {
            let mut excerpt = ctx.api.new_excerpt()?;
            ctx.api.set_kind(&mut excerpt, kind)?
        }
        None => ctx.api.kind()?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &ExcerptContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if key.is_none()
        && let Some(config) = &result.config
    {
        print_config(&config.list_all());
    }
    print_messages(&result.messages);
    Ok(())
}
