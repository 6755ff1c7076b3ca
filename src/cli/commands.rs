use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::session::Session;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::traverse::TraversalMode;
use crate::tree::Tree;
use crate::tree_traits::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config_dir.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        None | Some(Commands::Session) => _session(settings),
        Some(Commands::Build {
            values,
            delete,
            mode,
        }) => _build(values, delete, mode.unwrap_or(settings.traversal)),
        Some(Commands::Config { command }) => _config(command, &settings, cli.config_dir.as_deref()),
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

#[instrument(skip(settings))]
fn _session(settings: Settings) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(settings, stdin.lock(), stdout.lock()).run()
}

#[instrument]
fn _build(values: &[i64], delete: &[i64], mode: TraversalMode) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    build_report(values, delete, mode, &mut stdout)?;
    Ok(())
}

/// Inserts `values`, deletes `delete`, then writes the traversal, the
/// maximum and the rendered tree to `out`.
pub fn build_report(
    values: &[i64],
    delete: &[i64],
    mode: TraversalMode,
    out: &mut dyn Write,
) -> CliResult<Tree<i64>> {
    let err = |e: io::Error| CliError::io("write report", e);
    let mut tree: Tree<i64> = values.iter().copied().collect();

    for value in delete {
        match tree.find_node(value) {
            Some(id) => tree.delete_node(id)?,
            None => output::warning(out, &format!("{value} is not in the tree")).map_err(err)?,
        }
    }

    match tree.traverse_with(tree.root(), mode) {
        Ok(mut values) => output::action(out, &mode.to_string(), &values.join(", ")).map_err(err)?,
        Err(_) => output::action(out, &mode.to_string(), "(empty)").map_err(err)?,
    }
    match tree.maximum_value() {
        Some(max) => output::action(out, "maximum", max).map_err(err)?,
        None => output::action(out, "maximum", "none").map_err(err)?,
    }
    write!(out, "{}", tree.to_tree_string()).map_err(err)?;
    Ok(tree)
}

fn _config(command: &ConfigCommands, settings: &Settings, config_dir: Option<&Path>) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    let err = |e: io::Error| CliError::io("write config", e);
    match command {
        ConfigCommands::Show => output::info(&mut stdout, &settings.to_toml()?).map_err(err),
        ConfigCommands::Template => output::info(&mut stdout, &Settings::template()).map_err(err),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::action(&mut stdout, "global", &p.display()).map_err(err)?,
                None => output::action(&mut stdout, "global", "unavailable").map_err(err)?,
            }
            if let Some(dir) = config_dir {
                output::action(&mut stdout, "local", &local_config_path(dir).display()).map_err(err)?;
            }
            Ok(())
        }
    }
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
