use afiend::duration::parse_duration;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "a-fiend", version)]
#[command(about = "Keep your shell aliases in one place and get reminded of new ones", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save an alias (replaces an existing alias with the same name)
    Add {
        /// Alias name
        name: String,

        /// Command the alias expands to
        #[arg(allow_hyphen_values = true)]
        command: String,
    },

    /// Print every alias
    #[command(alias = "ls")]
    List,

    /// Remove an alias
    #[command(alias = "rm")]
    Delete {
        /// Alias name
        name: String,
    },

    /// Regenerate the source file
    Source {
        /// Don't print source to stdout
        #[arg(long)]
        silent: bool,

        /// Duration to remind the user of new aliases (e.g. 168h0m0s)
        #[arg(long, allow_hyphen_values = true, value_parser = parse_reminders)]
        reminders: Option<TimeDelta>,
    },
}

fn parse_reminders(s: &str) -> Result<TimeDelta, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

// Long flags that are also accepted with a single dash (`-silent`).
const SINGLE_DASH_FLAGS: &[&str] = &["silent", "reminders", "verbose", "help", "version"];

/// Rewrite `-silent` / `-reminders=1h` into their `--` form.
///
/// Only arguments before the subcommand or after `source` are touched. The
/// command text of `add NAME COMMAND` is fenced behind `--`, so an alias such
/// as `add hh -h` stores `-h` instead of being read as a flag.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut subcommand: Option<String> = None;
    let mut add_name_seen = false;
    let mut verbatim = false;
    let mut normalized = Vec::new();

    for (position, arg) in args.into_iter().map(Into::into).enumerate() {
        if position == 0 || verbatim {
            normalized.push(arg);
            continue;
        }
        if add_name_seen {
            verbatim = true;
            if arg != "--" {
                normalized.push(OsString::from("--"));
            }
            normalized.push(arg);
            continue;
        }

        let text = arg.to_str().map(str::to_owned);
        match text {
            Some(text) if accepts_flags(subcommand.as_deref()) && is_single_dash_long(&text) => {
                normalized.push(OsString::from(format!("-{}", text)));
            }
            Some(text) if !text.starts_with('-') => {
                match subcommand.as_deref() {
                    None => subcommand = Some(text),
                    Some("add") => add_name_seen = true,
                    Some(_) => {}
                }
                normalized.push(arg);
            }
            _ => normalized.push(arg),
        }
    }

    normalized
}

fn accepts_flags(subcommand: Option<&str>) -> bool {
    matches!(subcommand, None | Some("source"))
}

fn is_single_dash_long(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(body) if !body.starts_with('-') => {
            let name = body.split('=').next().unwrap_or(body);
            SINGLE_DASH_FLAGS.contains(&name)
        }
        _ => false,
    }
}
