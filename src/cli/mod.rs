//! # CLI Module
//!
//! Command-line front end of `routelens`.
//!
//! ## Commands
//!
//! ### `analyze`
//!
//! Reconstruct the route table of every metadata dump matching the given
//! globs under a search root:
//!
//! ```bash
//! routelens analyze "bin/**/*.json" --dir ./publish --format text
//! ```
//!
//! Options:
//! - `-d, --dir <DIR>` - Search root (default: current directory)
//! - `-c, --config <FILE>` - Routing configuration document
//! - `-f, --format <FORMAT>` - `json` (default), `yaml` or `text`
//! - `--framework <VERSION>` - Force `legacy` or `modern` routing rules
//! - `--on-ambiguous-prefix <POLICY>` - `skip` (default) or `abort`
//!
//! Without `--config` the search root and then each dump's ancestor
//! directories are probed for `routelens.json`.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use clap::Parser;
//! use routelens::cli::{run, Cli};
//!
//! let cli = Cli::parse();
//! run(&cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{run, run_cli, AmbiguityArg, Cli, Commands, FormatArg, FrameworkArg};
