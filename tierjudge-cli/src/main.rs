mod config;
mod input;
mod output;
mod parse;
mod prompt;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tierjudge_core::{Signal, Tier, TierList, TierSequencer};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::{Action, KeyBindings};
use crate::parse::{InlineItem, TierSpec};

#[derive(Parser)]
#[command(name = "tierjudge", version, about = "Rank tier list items by answering pairwise comparisons")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sort the items of each tier by answering "which is better" questions
    Sort(SortArgs),
    /// Create a default config file at ~/.config/tierjudge/config.toml
    Init,
}

#[derive(Parser)]
struct SortArgs {
    /// A tier, best tier first. LABEL=FILE loads the tier's items from FILE
    /// (one per line, or a JSON array of strings); LABEL alone adds an empty tier.
    #[arg(long = "tier", value_name = "LABEL[=FILE]", required = true, value_parser = parse::parse_tier_spec)]
    tiers: Vec<TierSpec>,

    /// Inline item for a tier given with --tier (repeatable)
    #[arg(long = "item", value_name = "LABEL=NAME", value_parser = parse::parse_inline_item)]
    inline_items: Vec<InlineItem>,

    /// Name shown above the results
    #[arg(long, default_value = "My Tier List")]
    name: String,

    /// Read choices from a file, one per line, instead of stdin
    #[arg(long)]
    choices: Option<PathBuf>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log each step to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/tierjudge/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort(args) => run_sort(args),
        Commands::Init => config::create_default_config().map(|path| {
            println!("Created config at {}", path.display());
            println!("Edit it to change key bindings and output defaults.");
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// RUST_LOG wins; otherwise warnings only, or everything from debug up with --verbose.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_sort(args: SortArgs) -> Result<()> {
    init_logging(args.verbose);

    // Load config file, merge with CLI args (CLI wins)
    let config_path = match args.config.clone() {
        Some(path) => path,
        None => config::config_path()?,
    };
    let cfg = config::load_config(&config_path)?;
    debug!(path = %config_path.display(), "config loaded");

    let json = args.json || cfg.json.unwrap_or(false);
    let keys = KeyBindings::from_config(&cfg)?;
    let width = cfg.progress_width.unwrap_or(prompt::DEFAULT_PROGRESS_WIDTH);

    let mut list = build_tier_list(&args.name, &args.tiers, &args.inline_items)?;
    if !list.sortable() {
        warn!("no tier has two or more items, nothing to compare");
    }

    let (mut sequencer, signals) = list.start_sorting()?;
    report(&signals, sequencer.tiers());

    let complete = match args.choices {
        Some(ref path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open choices file {}", path.display()))?;
            run_comparisons(&mut sequencer, BufReader::new(file), &keys, width)?
        }
        None => run_comparisons(&mut sequencer, io::stdin().lock(), &keys, width)?,
    };

    list.apply_sorted(sequencer);

    if json {
        println!("{}", output::render_json(&list, complete)?);
    } else {
        print!("{}", output::render_table(&list));
        if !complete {
            println!("(sorting stopped early; unfinished tiers keep their original order)");
        }
    }
    Ok(())
}

/// Build a tier list from `--tier` and `--item` arguments.
fn build_tier_list(name: &str, tiers: &[TierSpec], inline_items: &[InlineItem]) -> Result<TierList> {
    let mut list = TierList::new("1", name);
    let mut tier_ids: Vec<(String, String)> = Vec::with_capacity(tiers.len());

    for spec in tiers {
        let tier_id = list.add_tier(&spec.label)?.id.clone();
        if let Some(ref path) = spec.items {
            let names = parse::load_items(path)?;
            debug!(tier = %spec.label, count = names.len(), "items loaded");
            for item_name in names {
                let item_id = list.add_item(&item_name)?.id.clone();
                list.assign_to_tier(&item_id, &tier_id)?;
            }
        }
        tier_ids.push((spec.label.clone(), tier_id));
    }

    for inline in inline_items {
        let tier_id = tier_ids
            .iter()
            .find(|(label, _)| *label == inline.tier_label)
            .map(|(_, id)| id.clone())
            .with_context(|| format!("--item refers to unknown tier \"{}\"", inline.tier_label))?;
        let item_id = list.add_item(&inline.name)?.id.clone();
        list.assign_to_tier(&item_id, &tier_id)?;
    }

    Ok(list)
}

/// Drive the sequencer from `input` until every tier is ranked.
///
/// Returns false if the user quit early. Running out of input before the
/// end is an error; the unfinished tier keeps its original order.
fn run_comparisons(
    sequencer: &mut TierSequencer,
    mut input: impl BufRead,
    keys: &KeyBindings,
    width: usize,
) -> Result<bool> {
    let mut line = String::new();

    while let Some(session) = sequencer.session() {
        let label = sequencer.current_tier().map(|t| t.label.clone()).unwrap_or_default();
        eprint!("{}", prompt::build_prompt(&label, session, width, keys));
        io::stderr().flush()?;

        line.clear();
        if input.read_line(&mut line).context("Failed to read choice")? == 0 {
            bail!("Input ended before ranking finished (tier \"{label}\" left unsorted)");
        }

        match keys.resolve(&line) {
            Some(Action::Pick(pick)) => {
                let signals = sequencer.pick(pick)?;
                report(&signals, sequencer.tiers());
            }
            Some(Action::Restart) => {
                eprintln!("Restarting {label} tier.");
                sequencer.restart_tier();
            }
            Some(Action::Quit) => {
                info!(tier = %label, "sorting stopped by user");
                return Ok(false);
            }
            None => eprintln!("Unrecognized choice \"{}\". {}", line.trim(), keys.hint()),
        }
    }

    Ok(true)
}

fn report(signals: &[Signal], tiers: &[Tier]) {
    for signal in signals {
        match signal {
            Signal::Progress { tier, fraction } => {
                debug!(tier, fraction, "progress");
            }
            Signal::TierComplete { tier, items } => {
                let label = tiers.get(*tier).map(|t| t.label.as_str()).unwrap_or("?");
                if items.len() >= 2 {
                    eprintln!("{}", prompt::tier_complete_message(label));
                } else {
                    debug!(tier = label, "skipped, fewer than two items");
                }
            }
            Signal::AllComplete => info!("ranking complete"),
        }
    }
}
