//! Command-line surface and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::builder::{BuildError, BuilderRegistry};
use crate::catalog;
use crate::config::{ConfigStore, Settings};
use crate::crud::{CrudEngine, CrudError, UpdateOutcome};

/// Author integration records for the gateway.
#[derive(Parser, Debug)]
#[command(name = "gatecfg", version, about = "Author gateway integration records")]
pub struct Cli {
    /// Integrations file to operate on.
    #[arg(long, short = 'f', global = true, env = "GATECFG_FILE")]
    pub file: Option<PathBuf>,

    /// Settings file (default: ~/.config/gatecfg/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands. Any other word is treated as a provider name:
/// `gatecfg <provider> [flags...]` builds a record and adds it.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print integration names in stored order.
    List {
        /// Print a JSON array instead of one name per line.
        #[arg(long)]
        json: bool,
    },
    /// Print one integration as YAML.
    Show {
        /// Integration name (case-insensitive).
        name: String,
    },
    /// Delete an integration; succeeds when it does not exist.
    Delete {
        /// Integration name (case-insensitive).
        name: String,
    },
    /// Build a record with a provider and insert or replace it.
    #[command(disable_help_flag = true)]
    Update {
        /// Provider name (see `gatecfg providers`).
        provider: String,
        /// Provider flags, e.g. `-token xoxb-... -name ops-slack`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List available providers.
    Providers,
    #[command(external_subcommand)]
    Provider(Vec<String>),
}

/// Resolves settings and the store, then dispatches `cli.command`.
pub fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let store = ConfigStore::new(settings.store_path(cli.file.as_deref()));
    let registry = BuilderRegistry::with_catalog();
    let engine = CrudEngine::new(&store, &registry).with_locking(settings.store.lock);

    tracing::debug!(path = %store.path().display(), "using integrations file");

    let mut stdout = io::stdout().lock();
    execute(cli.command, &engine, &registry, &mut stdout)
}

/// Executes one command, writing user-facing output to `out`.
pub fn execute(
    command: Command,
    engine: &CrudEngine<'_>,
    registry: &BuilderRegistry,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::List { json } => {
            let names = engine.list()?;
            if json {
                writeln!(out, "{}", serde_json::to_string(&names)?)?;
            } else {
                for name in names {
                    writeln!(out, "{}", name)?;
                }
            }
        }
        Command::Show { name } => {
            let record = engine.show(&name)?;
            write!(out, "{}", serde_yaml::to_string(&record)?)?;
        }
        Command::Delete { name } => {
            if engine.delete(&name)? {
                writeln!(out, "deleted {}", name.to_lowercase())?;
            } else {
                writeln!(out, "{} not found, nothing deleted", name.to_lowercase())?;
            }
        }
        Command::Update { provider, args } => {
            match with_help(out, engine.update_from_args(&provider, &args))? {
                Some((record, UpdateOutcome::Replaced)) => {
                    writeln!(out, "updated {}", record.name)?
                }
                Some((record, UpdateOutcome::Inserted)) => {
                    writeln!(out, "added {}", record.name)?
                }
                None => {}
            }
        }
        Command::Providers => {
            for name in registry.list_names() {
                let summary = catalog::find(&name).map(|p| p.summary).unwrap_or("");
                writeln!(out, "{:<12} {}", name, summary)?;
            }
        }
        Command::Provider(raw) => {
            let Some((provider, args)) = raw.split_first() else {
                bail!("missing provider name");
            };
            if let Some(record) = with_help(out, engine.add_from_args(provider, args))? {
                writeln!(out, "added {}", record.name)?;
            }
        }
    }
    Ok(())
}

/// Turns a builder help request into printed usage and `Ok(None)`.
fn with_help<T>(out: &mut dyn Write, result: Result<T, CrudError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CrudError::Build(BuildError::HelpRequested { usage })) => {
            write!(out, "{}", usage)?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gatecfg").chain(args.iter().copied()))
            .expect("valid command line")
    }

    fn exec(dir: &TempDir, args: &[&str]) -> Result<String> {
        let store = ConfigStore::new(dir.path().join("integrations.yaml"));
        let registry = BuilderRegistry::with_catalog();
        let engine = CrudEngine::new(&store, &registry);
        let mut out = Vec::new();
        execute(parse(args).command, &engine, &registry, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn provider_word_becomes_external_subcommand() {
        let cli = parse(&["slack", "-token", "xoxb"]);
        match cli.command {
            Command::Provider(raw) => assert_eq!(raw, vec!["slack", "-token", "xoxb"]),
            other => panic!("expected provider command, got {other:?}"),
        }
    }

    #[test]
    fn update_keeps_hyphenated_args() {
        let cli = parse(&["update", "github", "-token", "ghp", "-h"]);
        match cli.command {
            Command::Update { provider, args } => {
                assert_eq!(provider, "github");
                assert_eq!(args, vec!["-token", "ghp", "-h"]);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn global_file_flag_before_command() {
        let cli = parse(&["--file", "/tmp/x.yaml", "list"]);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.yaml")));
    }

    #[test]
    fn add_list_update_delete_flow() {
        let dir = TempDir::new().unwrap();

        assert_eq!(exec(&dir, &["slack", "-token", "xoxb", "-name", "Ops"]).unwrap(), "added ops\n");
        assert_eq!(exec(&dir, &["list"]).unwrap(), "ops\n");
        assert_eq!(
            exec(&dir, &["update", "slack", "-token", "new", "-name", "OPS"]).unwrap(),
            "updated ops\n"
        );
        assert_eq!(exec(&dir, &["list", "--json"]).unwrap(), "[\"ops\"]\n");
        assert_eq!(exec(&dir, &["delete", "Ops"]).unwrap(), "deleted ops\n");
        assert_eq!(exec(&dir, &["list"]).unwrap(), "");
    }

    #[test]
    fn provider_help_prints_usage_without_touching_store() {
        let dir = TempDir::new().unwrap();
        let output = exec(&dir, &["github", "-h"]).unwrap();
        assert!(output.contains("Usage of github:"));
        assert!(!dir.path().join("integrations.yaml").exists());
    }

    #[test]
    fn show_prints_yaml() {
        let dir = TempDir::new().unwrap();
        exec(&dir, &["openai", "-token", "sk-1"]).unwrap();
        let output = exec(&dir, &["show", "OPENAI"]).unwrap();
        assert!(output.contains("name: openai"));
        assert!(output.contains("destination: https://api.openai.com"));
    }

    #[test]
    fn providers_lists_catalog_sorted() {
        let dir = TempDir::new().unwrap();
        let output = exec(&dir, &["providers"]).unwrap();
        let names: Vec<_> = output
            .lines()
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(names.first(), Some(&"anthropic"));
        assert_eq!(names.last(), Some(&"zendesk"));
        assert_eq!(names.len(), catalog::PROVIDERS.len());
    }
}
