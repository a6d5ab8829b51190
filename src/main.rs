//! Dinedash CLI
//!
//! Command-line dashboard for restaurant operators:
//! - Overview cards and charts
//! - Deal analytics, comparison and ratings
//! - Bookings table with filters and paging
//! - Selecting and remembering a restaurant
//! - Live `watch` mode

use anyhow::{anyhow, bail, Context as _};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dinedash::config::{generate_default_config, Config, LoggingConfig};
use dinedash::render::{
    render_bookings, render_comparison, render_overview, render_ratings, render_stats,
    BookingTableOptions, Format,
};
use dinedash::view::{
    bookings_panel, comparison_panel, overview_panel, ratings_panel, stats_panel, DashboardView,
};
use dinedash::{
    resolve_identifier, BookingFilter, BookingStatus, FileStore, HttpTransport, IdentifierStore,
    PanelState, RestaurantContext, RestaurantId, Services,
};

#[derive(Parser)]
#[command(name = "dinedash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Restaurant dashboard in the terminal")]
#[command(long_about = "Dinedash shows revenue, deal analytics, ratings and bookings for a restaurant.\nSelect a restaurant once with `dinedash use <ID>` or pass --restaurant.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Restaurant id (default: the saved one)
    #[arg(short, long, global = true)]
    pub restaurant: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Overview cards, monthly revenue and bookings by weekday
    Dashboard,

    /// Monthly deal analytics
    Analytics,

    /// Compare bookings of the first two deals by day
    Compare,

    /// Average rating per month and the yearly average
    Ratings,

    /// Bookings table
    Bookings {
        /// Only show this status (pending, confirmed, cancelled, completed, no-show)
        #[arg(short, long)]
        status: Option<String>,
        /// Case-insensitive search over customer name and requests
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page
        #[arg(long, default_value = "10")]
        per_page: usize,
    },

    /// Remember a restaurant id for later commands
    Use {
        /// Restaurant id
        id: String,
    },

    /// Forget the remembered restaurant id
    Forget,

    /// Print the effective restaurant id
    Current,

    /// Live dashboard; reads restaurant ids and commands from stdin
    Watch,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);

    let format: Format = cli.format.parse().map_err(|e: String| anyhow!(e))?;
    let file_store = Arc::new(FileStore::new(&config.session.state_file));
    let store: Arc<dyn IdentifierStore> = file_store.clone();
    let explicit = match cli.restaurant.as_deref() {
        Some(raw) => Some(
            RestaurantId::new(raw).ok_or_else(|| anyhow!("Restaurant id must not be blank"))?,
        ),
        None => None,
    };

    match &cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
        Commands::Use { id } => {
            let id = RestaurantId::new(id)
                .ok_or_else(|| anyhow!("Restaurant id must not be blank"))?;
            store.save(&id)?;
            println!(
                "Using restaurant {} (saved to {})",
                id,
                file_store.path().display()
            );
            return Ok(());
        }
        Commands::Forget => {
            store.clear()?;
            println!("Forgot saved restaurant");
            return Ok(());
        }
        Commands::Current => {
            match resolve_identifier(explicit.as_ref(), store.as_ref()) {
                Some(id) => println!("{}", id),
                None => println!("No restaurant selected"),
            }
            return Ok(());
        }
        _ => {}
    }

    let watching = matches!(cli.command, Commands::Watch);
    if !watching && resolve_identifier(explicit.as_ref(), store.as_ref()).is_none() {
        eprintln!(
            "No restaurant selected; showing an empty dashboard. \
             Run `dinedash use <ID>` or pass --restaurant."
        );
    }

    let transport = HttpTransport::new(config.api.transport())?;
    let services = Services::new(Arc::new(transport));
    let context = RestaurantContext::new(explicit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Dashboard => {
            let state = overview_panel(&context, store, &services).settled().await;
            render_overview(&mut out, &state, format)?;
        }
        Commands::Analytics => {
            let state = stats_panel(&context, store, &services).settled().await;
            render_stats(&mut out, &state, format)?;
        }
        Commands::Compare => {
            let state = comparison_panel(&context, store, &services).settled().await;
            render_comparison(&mut out, &state, format)?;
        }
        Commands::Ratings => {
            let state = ratings_panel(&context, store, &services).settled().await;
            render_ratings(&mut out, &state, format)?;
        }
        Commands::Bookings {
            status,
            search,
            page,
            per_page,
        } => {
            let mut filter = BookingFilter::default();
            if let Some(status) = status {
                filter = filter.status(status.parse::<BookingStatus>()?);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }
            let options = BookingTableOptions {
                filter,
                page,
                per_page,
            };

            let state = bookings_panel(&context, store, &services).settled().await;
            render_bookings(&mut out, &state, &options, format)?;
            if state.error.is_some() {
                bail!("Bookings could not be loaded");
            }
        }
        Commands::Watch => {
            drop(out);
            let view = DashboardView::spawn(&context, store, &services);
            watch(&view, &context, format).await?;
        }
        Commands::Config { .. } | Commands::Use { .. } | Commands::Forget | Commands::Current => {}
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dinedash={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print each panel as it settles while reading commands from stdin
async fn watch(
    view: &DashboardView,
    context: &RestaurantContext,
    format: Format,
) -> anyhow::Result<()> {
    let mut overview = view.overview.subscribe();
    let mut stats = view.stats.subscribe();
    let mut comparison = view.comparison.subscribe();
    let mut ratings = view.ratings.subscribe();
    let mut bookings = view.bookings.subscribe();
    let options = BookingTableOptions::default();

    eprintln!("Type a restaurant id to switch, `r` to refresh, `clear` to use the saved id, `q` to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => {}
                    "q" | "quit" | "exit" => break,
                    "r" | "refresh" => view.refresh(),
                    "clear" => context.set(None),
                    raw => context.set(RestaurantId::new(raw)),
                }
            }
            Ok(()) = overview.changed() => {
                let state = overview.borrow_and_update().clone();
                show("Overview", &state, |out| render_overview(out, &state, format))?;
            }
            Ok(()) = stats.changed() => {
                let state = stats.borrow_and_update().clone();
                show("Analytics", &state, |out| render_stats(out, &state, format))?;
            }
            Ok(()) = comparison.changed() => {
                let state = comparison.borrow_and_update().clone();
                show("Deal comparison", &state, |out| render_comparison(out, &state, format))?;
            }
            Ok(()) = ratings.changed() => {
                let state = ratings.borrow_and_update().clone();
                show("Ratings", &state, |out| render_ratings(out, &state, format))?;
            }
            Ok(()) = bookings.changed() => {
                let state = bookings.borrow_and_update().clone();
                show("Bookings", &state, |out| render_bookings(out, &state, &options, format))?;
            }
        }
    }

    Ok(())
}

fn show<T>(
    title: &str,
    state: &PanelState<T>,
    render: impl FnOnce(&mut dyn Write) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if state.loading {
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let id = state
        .restaurant_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    writeln!(out, "\n== {} [{}] ==", title, id)?;
    render(&mut out)?;
    out.flush()?;
    Ok(())
}
