use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use folio::index::{build_index, load_searcher, stats::show_stats};
use folio::server::MISSING_QUERY_MESSAGE;
use folio::utils::{get_index_dir, remove_index, AppConfig};
use folio::{output, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Case-insensitive snippet search over a single text corpus")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Serve options (when no subcommand is given)
    #[command(flatten)]
    serve: ServeArgs,

    /// Config file (defaults to config.json in the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Options shared by every command that reads the corpus
#[derive(Args)]
struct CorpusArgs {
    /// Text file to search
    #[arg(long, env = "FOLIO_CORPUS")]
    corpus: Option<PathBuf>,

    /// Bytes of context around each match group
    #[arg(long)]
    lookaround: Option<usize>,
}

impl CorpusArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(corpus) = &self.corpus {
            config.corpus_path = corpus.clone();
        }
        if let Some(lookaround) = self.lookaround {
            config.lookaround = lookaround;
        }
    }
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Directory served at /
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Build the index in memory even if a persisted one exists
    #[arg(long)]
    no_persisted_index: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the search API and static files (default)
    Serve(ServeArgs),
    /// Search once and print the snippets
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Print the JSON array the HTTP API would return
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Build and persist the suffix array for faster startup
    Index {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Show corpus and index statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Remove the persisted index
    Remove {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, None | Some(Commands::Serve(_)));
    init_logging(if serving { "info" } else { "warn" });

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        None => serve(config, cli.serve)?,
        Some(Commands::Serve(args)) => serve(config, args)?,
        Some(Commands::Search {
            query,
            corpus,
            json,
            no_color,
        }) => {
            corpus.apply(&mut config);

            let query = query.join(" ");
            if query.is_empty() {
                bail!(MISSING_QUERY_MESSAGE);
            }

            let index_dir = get_index_dir(&config.corpus_path)?;
            let searcher = load_searcher(
                &config.corpus_path,
                Some(&index_dir),
                config.search_options(),
            )?;
            let snippets = searcher.search(&query);

            if json {
                output::print_json(&snippets)?;
            } else if snippets.is_empty() {
                eprintln!("No matches for \"{}\"", query);
            } else {
                output::print_snippets(&snippets, searcher.highlight(), !no_color)?;
            }
        }
        Some(Commands::Index { corpus }) => {
            corpus.apply(&mut config);
            let index_dir = get_index_dir(&config.corpus_path)?;
            let path = build_index(&config.corpus_path, &index_dir)?;
            println!("Wrote {}", path.display());
        }
        Some(Commands::Stats { corpus }) => {
            corpus.apply(&mut config);
            let index_dir = get_index_dir(&config.corpus_path)?;
            show_stats(&config.corpus_path, &index_dir)?;
        }
        Some(Commands::Remove { corpus }) => {
            corpus.apply(&mut config);
            if remove_index(&config.corpus_path)? {
                println!("Removed index for: {}", config.corpus_path.display());
            } else {
                println!("No index for: {}", config.corpus_path.display());
            }
        }
    }

    Ok(())
}

fn serve(mut config: AppConfig, args: ServeArgs) -> Result<()> {
    args.corpus.apply(&mut config);
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }

    let index_dir = if args.no_persisted_index {
        None
    } else {
        Some(get_index_dir(&config.corpus_path)?)
    };

    // Nothing is served until the corpus and index are fully loaded
    let searcher = load_searcher(
        &config.corpus_path,
        index_dir.as_deref(),
        config.search_options(),
    )?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(server::run(searcher, &config))
}

fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
