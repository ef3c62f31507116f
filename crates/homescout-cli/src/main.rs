use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homescout_core::{Config, FilterCriteria, Listing, ListingStore, PriceRange, RemoteSource};

#[derive(Parser)]
#[command(name = "homescout")]
#[command(version, about = "Terminal-based property listing browser", long_about = None)]
struct Cli {
    /// Listings endpoint (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch listings and show the ones matching the given filters
    Search {
        /// Free-text search over name, address, id, city, state
        #[arg(short, long)]
        query: Option<String>,

        /// Category id (repeat for more than one)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Bedroom count token: 1-4, or "5+" for five or more
        #[arg(long = "bedrooms")]
        bedrooms: Vec<String>,

        /// Bathroom count token: 1-3, or "4+" for four or more
        #[arg(long = "bathrooms")]
        bathrooms: Vec<String>,

        /// Furnishing label (repeat for more than one)
        #[arg(long = "furnishing")]
        furnishing: Vec<String>,

        /// Lower price bound
        #[arg(long)]
        min_price: Option<f64>,

        /// Upper price bound
        #[arg(long)]
        max_price: Option<f64>,

        /// Emit the matching listings as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let endpoint = cli.endpoint.unwrap_or(config.api.endpoint);

    match cli.command {
        Some(Commands::Search {
            query,
            categories,
            bedrooms,
            bathrooms,
            furnishing,
            min_price,
            max_price,
            json,
        }) => {
            let criteria = FilterCriteria {
                search_query: query.unwrap_or_default(),
                categories,
                bedrooms,
                bathrooms,
                furnishing,
                price_range: PriceRange {
                    min: min_price,
                    max: max_price,
                },
                ..Default::default()
            };

            run_search(&endpoint, criteria, json).await?;
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

async fn run_search(
    endpoint: &str,
    criteria: FilterCriteria,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = ListingStore::new(Box::new(RemoteSource::new(endpoint)));

    tracing::info!(endpoint, "loading listings");
    store.load_listings().await;

    // No retry loop here; re-running the command is the retry
    if let Some(message) = store.state().error() {
        anyhow::bail!("failed to load listings: {}", message);
    }

    store.apply_all(criteria);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(store.filtered_listings())?
        );
        return Ok(());
    }

    for listing in store.filtered_listings() {
        print_listing(listing);
    }

    println!(
        "{} of {} listings match ({} active filters)",
        store.filtered_listings().len(),
        store.state().data.len(),
        store.active_filter_count(),
    );

    Ok(())
}

fn print_listing(listing: &Listing) {
    println!(
        "{:<12} {:<30} {}bd/{}ba  {:<20} {:>12.0}  {}, {}, {}",
        listing.id,
        listing.name,
        listing.bed_rooms,
        listing.bath_rooms,
        listing.furnishing_label(),
        listing.price,
        listing.address,
        listing.city,
        listing.state,
    );
}
