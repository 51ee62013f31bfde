use afiend::api::{AfiendApi, CmdMessage, MessageLevel};
use afiend::config::AfiendPaths;
use afiend::generator::alias_line;
use afiend::store::sqlite_backend::SqliteBackend;
use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::Parser;
use colored::*;
use std::io::{self, Write};

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = match Cli::try_parse_from(args::normalize_flags(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

struct AppContext {
    api: AfiendApi<SqliteBackend>,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add { name, command }) => handle_add(&mut ctx, &name, &command),
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Delete { name }) => handle_delete(&mut ctx, &name),
        Some(Commands::Source { silent, reminders }) => handle_source(&mut ctx, silent, reminders),
    }
}

fn init_context() -> Result<AppContext> {
    let paths = AfiendPaths::resolve()?;
    let api = AfiendApi::open(paths).context("Failed to open alias database for a-fiend")?;
    Ok(AppContext { api })
}

fn handle_add(ctx: &mut AppContext, name: &str, command: &str) -> Result<()> {
    let result = ctx.api.add_alias(name, command).context("Failed to save the alias")?;
    print_messages(&result.messages);
    refresh_source_file(ctx)
}

fn handle_delete(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx
        .api
        .delete_alias(name)
        .with_context(|| format!("Failed to delete the alias {}", name))?;
    print_messages(&result.messages);
    refresh_source_file(ctx)
}

fn refresh_source_file(ctx: &mut AppContext) -> Result<()> {
    ctx.api
        .refresh_source_file()
        .context("Failed to create source file")
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_aliases().context("Failed to read alias database")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &result.listed_aliases {
        writeln!(out, "{}", alias_line(&record.name, &record.command))?;
    }
    Ok(())
}

fn handle_source(ctx: &mut AppContext, silent: bool, reminders: Option<TimeDelta>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mirror: Option<&mut dyn Write> = if silent { None } else { Some(&mut out) };

    let result = ctx
        .api
        .source(reminders, mirror)
        .context("Failed to generate source file")?;

    // stdout carries the script itself, so notes go to stderr.
    for message in &result.messages {
        eprintln!("{}", styled(message));
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", styled(message));
    }
}

fn styled(message: &CmdMessage) -> ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
    }
}
