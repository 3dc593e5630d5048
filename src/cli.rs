//! Command line interface.
//!
//! ```text
//! inspector [FILES...] [--<PluginName> <command> ['<json-config>']]... [--config PATH] [-v]
//! ```
//!
//! One `--<PluginName>` flag is generated per registered plugin, so an unknown
//! plugin name is reported by clap like any other unknown flag.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::config::InspectorConfig;
use crate::display::{Inspector, Viewer};
use crate::error::Result;
use crate::plugins::PluginRegistry;

const FILES: &str = "files";
const CONFIG: &str = "config";
const VERBOSE: &str = "verbose";

/// One `--<PluginName> <command> [config]` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCall {
    pub plugin: String,
    pub command: String,
    pub config: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub files: Vec<PathBuf>,
    /// Plugin calls in command-line order.
    pub plugin_calls: Vec<PluginCall>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

/// Build the clap command for the plugins in `registry`.
pub fn command(registry: &PluginRegistry) -> Command {
    let mut cmd = Command::new("inspector")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive inspector for numeric and time series")
        .arg(
            Arg::new(FILES)
                .value_name("FILES")
                .help("JSON data files to load")
                .num_args(0..)
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(CONFIG)
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: ~/.inspector/config.yaml)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(VERBOSE)
                .short('v')
                .long("verbose")
                .help("Debug logging")
                .action(ArgAction::SetTrue),
        );

    for plugin in registry.iter() {
        let example = serde_json::to_string(&plugin.example_config()).unwrap_or_default();
        let help = format!(
            "{} (commands: {}; example: '{}')",
            plugin.description(),
            plugin.commands().join(", "),
            example
        );
        cmd = cmd.arg(
            Arg::new(plugin.name())
                .long(plugin.name())
                .value_names(["COMMAND", "JSON"])
                .num_args(1..=2)
                .action(ArgAction::Append)
                .help(help),
        );
    }
    cmd
}

/// Parse `args` (including the program name) against `registry`.
pub fn parse_from<I, T>(
    registry: &PluginRegistry,
    args: I,
) -> std::result::Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command(registry).try_get_matches_from(args)?;
    Ok(from_matches(registry, &matches))
}

fn from_matches(registry: &PluginRegistry, matches: &ArgMatches) -> CliArgs {
    let files = matches
        .get_many::<PathBuf>(FILES)
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let mut calls: Vec<(usize, PluginCall)> = Vec::new();
    for name in registry.names() {
        let (Some(occurrences), Some(indices)) = (
            matches.get_occurrences::<String>(name),
            matches.indices_of(name),
        ) else {
            continue;
        };
        let mut indices = indices;
        for occ in occurrences {
            let values: Vec<&String> = occ.collect();
            // position of the first value orders calls across plugins
            let pos = indices.next().unwrap_or(usize::MAX);
            for _ in 1..values.len() {
                indices.next();
            }
            let Some(command) = values.first() else {
                continue;
            };
            calls.push((
                pos,
                PluginCall {
                    plugin: name.to_string(),
                    command: command.to_string(),
                    config: values.get(1).map(|s| s.to_string()),
                },
            ));
        }
    }
    calls.sort_by_key(|(pos, _)| *pos);

    CliArgs {
        files,
        plugin_calls: calls.into_iter().map(|(_, c)| c).collect(),
        config: matches.get_one::<PathBuf>(CONFIG).cloned(),
        verbose: matches.get_flag(VERBOSE),
    }
}

/// Load everything named on the command line and show it with `viewer`.
///
/// All inputs are loaded and validated before the viewer is called, so a bad
/// file or plugin call never opens a window.
pub fn run<V: Viewer>(args: CliArgs, registry: PluginRegistry, viewer: V) -> Result<()> {
    let config = match &args.config {
        Some(path) => InspectorConfig::load_from_path(path)?,
        None => InspectorConfig::load_or_default(),
    };
    let mut ins = Inspector::with_viewer(viewer)
        .with_plugins(registry)
        .with_config(config);

    for path in args.files.iter() {
        ins.load_file(path)?;
    }
    for call in args.plugin_calls.iter() {
        ins.load_from_plugin(&call.plugin, &call.command, call.config.as_deref())?;
    }
    tracing::info!("Loaded {} items", ins.model().len());
    ins.show()
}
