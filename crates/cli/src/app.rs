use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use project::{ConfigLoader, FsConfigLoader};
use resolver::{ImportRemapper, PathResolver, ResolvedImport, StrategyKind};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_CONFIG_FILE, OutputFormat, SolResolveConfig};

/// Standard exit codes for scripting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,    // Every import resolved
    Unresolved = 1, // At least one import did not resolve
    UsageError = 2, // Bad arguments or configuration
}

impl ExitCode {
    /// Convert to process exit code
    pub fn as_code(&self) -> i32 {
        *self as i32
    }

    /// Exit the process with this code
    pub fn exit(&self) -> ! {
        std::process::exit(self.as_code())
    }
}

/// One line of `resolve` output
#[derive(Debug, Serialize)]
struct ResolutionReport {
    import: String,
    resolved_path: Option<PathBuf>,
    strategy: Option<&'static str>,
}

impl ResolutionReport {
    fn new(import: String, resolved: Option<ResolvedImport>) -> Self {
        match resolved {
            Some(resolved) => Self {
                import,
                resolved_path: Some(resolved.resolved_path),
                strategy: Some(resolved.strategy),
            },
            None => Self {
                import,
                resolved_path: None,
                strategy: None,
            },
        }
    }
}

/// Command line front end
#[derive(Debug, Default)]
pub struct CliApp;

impl CliApp {
    pub fn new() -> Self {
        Self
    }

    /// Run with the process arguments, writing to stdout and exiting with a
    /// non-zero code on failure
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.run_with_args(std::env::args_os(), &mut out) {
            Ok(ExitCode::Success) => Ok(()),
            Ok(code) => {
                out.flush()?;
                code.exit()
            }
            Err(e) => {
                if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                    clap_err.exit();
                }
                out.flush()?;
                eprintln!("Error: {:#}", e);
                ExitCode::UsageError.exit()
            }
        }
    }

    pub fn build_command() -> Command {
        Command::new("solresolve")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Resolve Solidity import paths to files")
            .subcommand_required(true)
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .help("Configuration file (default: .solresolve.yml if present)")
                    .value_name("FILE")
                    .global(true),
            )
            .subcommand(
                Command::new("resolve")
                    .about("Resolve imports as written in a source file")
                    .arg(
                        Arg::new("from")
                            .help("The file containing the imports")
                            .required(true)
                            .value_name("FROM_FILE"),
                    )
                    .arg(
                        Arg::new("imports")
                            .help("Import paths, without quotes unless --literal is given")
                            .required(true)
                            .num_args(1..)
                            .value_name("IMPORT"),
                    )
                    .arg(
                        Arg::new("format")
                            .short('f')
                            .long("format")
                            .help("Output format")
                            .value_parser(["json", "console"]),
                    )
                    .arg(
                        Arg::new("ceiling")
                            .long("ceiling")
                            .help("Do not search above this directory")
                            .value_name("DIR"),
                    )
                    .arg(
                        Arg::new("strategy")
                            .short('s')
                            .long("strategy")
                            .help("Only use these strategies (repeatable)")
                            .value_parser(PossibleValuesParser::new(StrategyKind::ALL.map(StrategyKind::name)))
                            .action(ArgAction::Append),
                    )
                    .arg(
                        Arg::new("literal")
                            .long("literal")
                            .help("Imports are quoted string literals")
                            .action(ArgAction::SetTrue),
                    )
                    .arg(
                        Arg::new("no-cache")
                            .long("no-cache")
                            .help("Re-read remapping files for every import")
                            .action(ArgAction::SetTrue),
                    ),
            )
            .subcommand(
                Command::new("remappings")
                    .about("Show the remappings declared in a directory, in priority order")
                    .arg(
                        Arg::new("dir")
                            .help("Directory holding remappings.txt and/or foundry.toml")
                            .default_value(".")
                            .value_name("DIR"),
                    )
                    .arg(
                        Arg::new("import")
                            .long("import")
                            .help("Also show how this import path would be rewritten")
                            .value_name("IMPORT"),
                    ),
            )
            .subcommand(
                Command::new("init-config")
                    .about("Write a default configuration file")
                    .arg(
                        Arg::new("path")
                            .default_value(DEFAULT_CONFIG_FILE)
                            .value_name("FILE"),
                    ),
            )
    }

    pub fn run_with_args<I, T>(&self, args: I, out: &mut dyn Write) -> Result<ExitCode>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::build_command().try_get_matches_from(args)?;

        match matches.subcommand() {
            Some(("resolve", sub)) => {
                let config_path = sub.get_one::<String>("config").map(PathBuf::from);
                let config = SolResolveConfig::load_from_defaults_and_file(config_path.as_deref())?;
                self.resolve(&config, sub, out)
            }
            Some(("remappings", sub)) => self.remappings(sub, out),
            Some(("init-config", sub)) => {
                let path = sub
                    .get_one::<String>("path")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
                SolResolveConfig::create_default_config_file(&path)?;
                writeln!(out, "Wrote default configuration to {}", path.display())?;
                Ok(ExitCode::Success)
            }
            _ => unreachable!("subcommand_required is set"),
        }
    }

    fn resolve(
        &self,
        config: &SolResolveConfig,
        matches: &ArgMatches,
        out: &mut dyn Write,
    ) -> Result<ExitCode> {
        let mut config = config.clone();
        if let Some(ceiling) = matches.get_one::<String>("ceiling") {
            config.resolver.ceiling = Some(PathBuf::from(ceiling));
        }
        if let Some(names) = matches.get_many::<String>("strategy") {
            let mut kinds = Vec::new();
            for kind in names.filter_map(|name| StrategyKind::from_name(name)) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            config.resolver.strategies = kinds;
        }
        if matches.get_flag("no-cache") {
            config.resolver.cache_config = false;
        }
        if let Some(format) = matches.get_one::<String>("format") {
            config.output.format = OutputFormat::from_name(format).unwrap_or_default();
        }
        config.validate()?;

        let from_file = matches
            .get_one::<String>("from")
            .map(PathBuf::from)
            .context("missing FROM_FILE")?;
        if !from_file.is_file() {
            tracing::warn!(
                "{} is not a file; resolving relative to its parent directory anyway",
                from_file.display()
            );
        }

        let literal = matches.get_flag("literal");
        let resolver = config.to_resolver();
        let reports: Vec<ResolutionReport> = matches
            .get_many::<String>("imports")
            .into_iter()
            .flatten()
            .map(|import| resolve_one(&resolver, import, &from_file, literal))
            .collect();

        let unresolved = reports.iter().filter(|r| r.resolved_path.is_none()).count();
        tracing::info!(
            "Resolved {}/{} import(s) from {}",
            reports.len() - unresolved,
            reports.len(),
            from_file.display()
        );

        match config.output.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &reports)?;
                writeln!(out)?;
            }
            OutputFormat::Console => {
                for report in &reports {
                    match (&report.resolved_path, report.strategy) {
                        (Some(path), Some(strategy)) => {
                            writeln!(out, "{} -> {} ({})", report.import, path.display(), strategy)?
                        }
                        _ => writeln!(out, "{} -> <not found>", report.import)?,
                    }
                }
            }
        }

        Ok(if unresolved == 0 {
            ExitCode::Success
        } else {
            ExitCode::Unresolved
        })
    }

    fn remappings(&self, matches: &ArgMatches, out: &mut dyn Write) -> Result<ExitCode> {
        let dir = matches
            .get_one::<String>("dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let loader = FsConfigLoader::default();
        let remapper = ImportRemapper::new(loader.remappings(&dir).iter().cloned());

        if remapper.remappings().is_empty() {
            writeln!(out, "No remappings declared in {}", dir.display())?;
        }
        for remapping in remapper.remappings() {
            writeln!(out, "{}", remapping)?;
        }

        if let Some(import) = matches.get_one::<String>("import") {
            match remapper.matching(import) {
                Some(remapping) => writeln!(
                    out,
                    "{} -> {} (via {})",
                    import,
                    remapper.remap(import),
                    remapping
                )?,
                None => writeln!(out, "{} -> {} (no remapping applies)", import, import)?,
            }
        }

        Ok(ExitCode::Success)
    }
}

fn resolve_one(resolver: &PathResolver, import: &str, from_file: &Path, literal: bool) -> ResolutionReport {
    let resolved = if literal {
        resolver.resolve_literal(import, from_file)
    } else {
        resolver.resolve(import, from_file)
    };
    ResolutionReport::new(import.to_string(), resolved)
}
