//! autocap command line
//!
//! Argument definitions and command execution for the `autocap` binary.
//! Output goes to a caller-supplied writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autocap::dom_tree::DomTree;
use autocap::{CaptureConfig, DomElement, ElementFilter, Fingerprinter, chain_matches};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "autocap")]
#[command(version, about = "Element fingerprints for autocapture", long_about = None)]
#[command(after_help = "EXAMPLES:
    autocap fingerprint page.html --id signup           Fingerprint #signup
    autocap fingerprint page.html --tag li --index 2 --chain
    autocap match page.html --id buy --filters f.json   Test a filter list")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the fingerprint of an element as JSON
    Fingerprint {
        #[command(flatten)]
        target: Target,

        /// Print the capture chain (target and ancestors) instead
        #[arg(long)]
        chain: bool,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Check an element's capture chain against a JSON filter list
    Match {
        #[command(flatten)]
        target: Target,

        /// JSON file holding an array of element filters
        #[arg(long, value_name = "JSON")]
        filters: PathBuf,
    },
}

#[derive(Args)]
pub struct Target {
    /// HTML input file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Select the element by its id attribute
    #[arg(long, conflicts_with = "tag", required_unless_present = "tag")]
    pub id: Option<String>,

    /// Select the element by tag name
    #[arg(long)]
    pub tag: Option<String>,

    /// 0-based index among elements with --tag, in document order
    #[arg(long, requires = "tag")]
    pub index: Option<usize>,

    /// JSON capture configuration
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,
}

/// Execute a command, writing its JSON or `true`/`false` result to `out`
///
/// Returns whether the command succeeded; `match` returns `false` when the
/// chain does not match.
pub fn run<W: Write>(command: Command, out: &mut W) -> Result<bool> {
    match command {
        Command::Fingerprint {
            target,
            chain,
            pretty,
        } => {
            let (tree, fingerprinter) = load(&target)?;
            let element = select(&tree, &target)?;

            let json = if chain {
                let chain = fingerprinter.capture_chain(&element)?;
                to_json(&chain, pretty)?
            } else {
                let fp = fingerprinter.fingerprint(&element)?;
                to_json(&fp, pretty)?
            };
            writeln!(out, "{json}")?;
            Ok(true)
        }
        Command::Match { target, filters } => {
            let (tree, fingerprinter) = load(&target)?;
            let element = select(&tree, &target)?;

            let filters: Vec<ElementFilter> = serde_json::from_str(&read(&filters)?)
                .with_context(|| format!("invalid filter list in {}", filters.display()))?;
            let chain = fingerprinter.capture_chain(&element)?;

            let matched = chain_matches(&chain, &filters);
            writeln!(out, "{matched}")?;
            Ok(matched)
        }
    }
}

fn load(target: &Target) -> Result<(DomTree, Fingerprinter)> {
    let config = match &target.config {
        Some(path) => CaptureConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CaptureConfig::default(),
    };
    if config.max_text_len == 0 {
        tracing::warn!("max_text_len is 0; element text will always be empty");
    }

    let html = read(&target.file)?;
    let tree = autocap::html::parse(&html)
        .with_context(|| format!("failed to parse {}", target.file.display()))?;
    Ok((tree, Fingerprinter::new(config)))
}

fn select<'a>(tree: &'a DomTree, target: &Target) -> Result<DomElement<'a>> {
    let element = match (&target.id, &target.tag) {
        (Some(id), _) => DomElement::by_id(tree, id)?,
        (None, Some(tag)) => DomElement::by_tag(tree, tag, target.index.unwrap_or(0))?,
        (None, None) => anyhow::bail!("either --id or --tag is required"),
    };
    tracing::debug!(node = element.id().index(), "selected element");
    Ok(element)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
