//! bel-keen CLI: BEL graph → KEEN triple tables.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use bel_keen::config::KeenConfig;
use bel_keen::export::{read_table, write_summary, write_table};
use bel_keen::graph::BelGraph;
use bel_keen::paths::KeenPaths;
use bel_keen::rules::{Emit, EntityPattern, ModifierPattern, Orientation, RelationSelector, RuleSet};
use bel_keen::source::{JsonGraphProvider, SourceCache};
use bel_keen::summary::summarize;
use bel_keen::table::Converter;

#[derive(Parser)]
#[command(name = "bel-keen", version, about = "Convert BEL graphs to KEEN triple tables")]
struct Cli {
    /// Data directory for cached graphs and tables (overrides config and KEEN_DATA).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to $XDG_CONFIG_HOME/bel-keen/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a node-link BEL graph to a KEEN TSV.
    Convert {
        /// Node-link JSON graph.
        #[arg(long)]
        graph: PathBuf,

        /// Output TSV path.
        #[arg(long)]
        output: PathBuf,

        /// Also write a JSON summary here.
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Classify edges in parallel.
        #[arg(long)]
        parallel: bool,
    },

    /// Print the summary of a KEEN TSV as JSON.
    Summarize {
        /// KEEN TSV file.
        path: PathBuf,
    },

    /// Build (or reuse) the cached KEEN table for a named source.
    Ensure {
        /// Source name, used for cache file names.
        name: String,

        /// Node-link JSON graph the source is built from.
        #[arg(long)]
        graph: PathBuf,

        /// Ignore cached graph snapshots and tables.
        #[arg(long)]
        rebuild: bool,
    },

    /// List cached KEEN tables.
    Sources,

    /// Show the conversion rule chain in evaluation order.
    Rules,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => KeenConfig::load(path)?,
        None => KeenConfig::resolve(&KeenPaths::resolve()?)?,
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Convert {
            graph,
            output,
            summary,
            parallel,
        } => {
            let graph = BelGraph::from_json_path(&graph)?;
            let rules = RuleSet::standard();
            let conversion = Converter::new(&rules)
                .parallel(parallel || config.parallel)
                .sample_limit(config.unhandled_sample_limit)
                .convert(&graph)?;

            if let Some(path) = summary {
                write_summary(&summarize(&conversion.table), &path)?;
            }
            if write_table(&conversion.table, &output)? {
                println!(
                    "Wrote {} triples to {} ({} unhandled edges)",
                    conversion.table.len(),
                    output.display(),
                    conversion.unhandled.count
                );
            } else {
                println!(
                    "No triples produced; {} left untouched ({} unhandled edges)",
                    output.display(),
                    conversion.unhandled.count
                );
                for sample in &conversion.unhandled.samples {
                    println!("  unhandled: {sample}");
                }
            }
        }

        Commands::Summarize { path } => {
            let table = read_table(&path)?;
            let json = serde_json::to_string_pretty(&summarize(&table)).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Ensure {
            name,
            graph,
            rebuild,
        } => {
            let provider = JsonGraphProvider::new(name.clone(), graph);
            match SourceCache::new(&config).ensure(&provider, rebuild)? {
                Some(path) => println!("{name}: {}", path.display()),
                None => {
                    println!("{name}: no statements generated");
                    std::process::exit(1);
                }
            }
        }

        Commands::Sources => {
            let paths = SourceCache::new(&config).source_paths()?;
            if paths.is_empty() {
                println!("No KEEN tables in {}", config.data_dir.display());
            }
            for path in paths {
                println!("{}", path.display());
            }
        }

        Commands::Rules => {
            let rules = RuleSet::standard();
            println!("Rule chain \"{}\" ({} rules):", rules.name, rules.len());
            for (i, rule) in rules.iter().enumerate() {
                let relations: Vec<String> = rule
                    .arms
                    .iter()
                    .map(|arm| {
                        let selector = match &arm.selector {
                            RelationSelector::Is(r) => r.to_string(),
                            RelationSelector::Correlative => "<correlative>".into(),
                        };
                        let emit = match &arm.emit {
                            Emit::Predicate(p) => p.to_string(),
                            Emit::PassThrough => "<relation>".into(),
                            Emit::AssociationType => "<association type>".into(),
                        };
                        format!("{selector} => {emit}")
                    })
                    .collect();
                println!(
                    "{:>3}. {:<28} {} -> {} [{}]{}",
                    i + 1,
                    rule.name,
                    pattern(rule.subject),
                    pattern(rule.object),
                    modifier(rule.modifier),
                    if rule.orientation == Orientation::Inverted {
                        " (inverted)"
                    } else {
                        ""
                    }
                );
                for rel in relations {
                    println!("       {rel}");
                }
            }
        }
    }

    Ok(())
}

fn pattern(p: EntityPattern) -> String {
    match p {
        EntityPattern::Any => "*".into(),
        EntityPattern::Is(kind) => kind.to_string(),
    }
}

fn modifier(m: ModifierPattern) -> &'static str {
    match m {
        ModifierPattern::Any => "any",
        ModifierPattern::Activity => "activity",
        ModifierPattern::Absent => "amount",
    }
}
