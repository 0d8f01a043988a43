mod debug_report;
mod manifest;

use clap::{ArgAction, Parser};
use manifest::{Manifest, ManifestError};
use phrasetype::{ConfigError, MergedResource, Options, process_verbose, tokenize};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Resolve the argument types of ICU MessageFormat resources across locale folders.
///
/// Exit codes: 0 success, 1 parse issues or resolution failures found,
/// 2 invalid arguments or unreadable input.
#[derive(Debug, Parser)]
#[command(name = "phrasetype", version)]
struct Cli {
    /// TOML manifest with `[[public]]` declarations and `[[folders.<folder>]]` resources.
    #[arg(required_unless_present = "pattern", conflicts_with = "pattern")]
    manifest: Option<PathBuf>,

    /// Tokenize a single pattern and print its tokens.
    #[arg(long, value_name = "TEXT")]
    pattern: Option<String>,

    /// Options file (TOML): base_folder, resource_type, choice_policy.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long, overrides_with = "color")]
    no_color: bool,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("no manifest or --pattern given")]
    MissingInput,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = if cli.no_color {
        false
    } else {
        cli.color || io::stdout().is_terminal()
    };

    match run(&cli, color) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// `Ok(false)` when the input was readable but something did not resolve.
fn run(cli: &Cli, color: bool) -> Result<bool, CliError> {
    let options = load_options(cli.config.as_deref())?;

    if let Some(pattern) = &cli.pattern {
        return Ok(match tokenize(pattern) {
            Ok(tokens) => {
                debug_report::print_tokens(pattern, &tokens, color);
                true
            }
            Err(err) => {
                debug_report::print_pattern_error(pattern, &err, color);
                false
            }
        });
    }

    let path = cli.manifest.as_deref().ok_or(CliError::MissingInput)?;
    let manifest = Manifest::load(path)?;
    let output = process_verbose(&manifest.inputs, &manifest.public, &options);
    debug_report::print_run(&output, color);

    Ok(output.resources.iter().all(MergedResource::is_clean))
}

fn load_options(path: Option<&Path>) -> Result<Options, CliError> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let source =
        std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig { path: path.to_path_buf(), source })?;
    Ok(Options::from_toml_str(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn manifest_or_pattern_is_required() {
        assert!(Cli::try_parse_from(["phrasetype"]).is_err());
        assert!(Cli::try_parse_from(["phrasetype", "strings.toml", "--pattern", "{x}"]).is_err());

        let cli = Cli::try_parse_from(["phrasetype", "--pattern", "{x}", "-vv", "--no-color"]).unwrap();
        assert_eq!(cli.pattern.as_deref(), Some("{x}"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }
}
