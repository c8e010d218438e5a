use crate::config::{resolve_config, CONFIG_FILE_NAMES};
use crate::logging::{init_logging_with_config, LogConfig};
use crate::metadata::{load_module, ModuleSet};
use crate::policy::FrameworkVersion;
use crate::query::{AmbiguousPrefixPolicy, AnalysisOptions};
use crate::report::{analyze_module, write_report, OutputFormat};
use crate::search::find_files;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command-line interface for routelens
///
/// Reconstructs web application route tables from compiled module metadata.
#[derive(Parser)]
#[command(name = "routelens")]
#[command(about = "Static route table reconstruction", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overrides ROUTELENS_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconstruct the route tables of matching metadata dumps
    Analyze {
        /// Glob patterns, relative to the search root
        #[arg(required = true, num_args = 1..)]
        globs: Vec<String>,

        /// Search root
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Routing configuration document (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Force a framework version instead of detecting it per module
        #[arg(long, value_enum)]
        framework: Option<FrameworkArg>,

        /// Handling of controllers declaring several route prefixes
        #[arg(long, value_enum, default_value_t = AmbiguityArg::Skip)]
        on_ambiguous_prefix: AmbiguityArg,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FrameworkArg {
    /// System.Web based applications
    Legacy,
    /// ASP.NET Core applications
    Modern,
}

impl From<FrameworkArg> for FrameworkVersion {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Legacy => FrameworkVersion::Legacy,
            FrameworkArg::Modern => FrameworkVersion::Modern,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AmbiguityArg {
    /// Warn and leave the controller out
    Skip,
    /// Fail the analysis
    Abort,
}

impl From<AmbiguityArg> for AmbiguousPrefixPolicy {
    fn from(arg: AmbiguityArg) -> Self {
        match arg {
            AmbiguityArg::Skip => AmbiguousPrefixPolicy::Skip,
            AmbiguityArg::Abort => AmbiguousPrefixPolicy::Abort,
        }
    }
}

/// Parse arguments, install logging and write the report to stdout
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::from_env()
    };
    init_logging_with_config(&log_config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Execute a parsed command, writing its report to `out`
///
/// # Errors
///
/// Returns an error if:
/// - The search root or a glob is invalid, or nothing matches
/// - A metadata dump or configuration document cannot be loaded
/// - A controller has an ambiguous prefix under the `abort` policy
/// - The report cannot be written
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Analyze {
            globs,
            dir,
            config,
            format,
            framework,
            on_ambiguous_prefix,
        } => {
            let options = AnalysisOptions {
                on_ambiguous_prefix: (*on_ambiguous_prefix).into(),
                framework: framework.map(Into::into),
            };
            analyze(
                globs,
                dir,
                config.as_deref(),
                (*format).into(),
                options,
                out,
            )
        }
    }
}

fn analyze<W: Write>(
    globs: &[String],
    dir: &Path,
    config: Option<&Path>,
    format: OutputFormat,
    options: AnalysisOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let paths: Vec<PathBuf> = find_files(dir, globs)
        .with_context(|| format!("Failed to search '{}'", dir.display()))?
        .into_iter()
        .filter(|p| !is_config_file(p))
        .collect();
    if paths.is_empty() {
        bail!(
            "No metadata files under '{}' match {}",
            dir.display(),
            globs.join(", ")
        );
    }

    // All dumps share one set so base types resolve across modules.
    let mut set = ModuleSet::default();
    for path in &paths {
        let module = load_module(path)
            .with_context(|| format!("Failed to load metadata '{}'", path.display()))?;
        set.push(module);
    }
    debug!(modules_count = set.len(), "Metadata loaded");

    let mut modules = Vec::with_capacity(paths.len());
    for (view, path) in set.views().zip(&paths) {
        let routing = resolve_config(config, Some(dir), path)
            .context("Failed to load routing configuration")?;
        let module = analyze_module(&view, Some(path.as_path()), routing.as_ref(), options)
            .with_context(|| format!("Failed to analyze '{}'", path.display()))?;
        modules.push(module);
    }

    info!(modules_count = modules.len(), "Analysis complete");
    write_report(&modules, format, out).context("Failed to write report")?;
    Ok(())
}

fn is_config_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| CONFIG_FILE_NAMES.contains(&n))
}
