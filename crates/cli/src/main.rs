//! Command-line front end for the restaurant list.
//!
//! Usage:
//!     bitelist list --cuisine indian --min-rating 4 --sort rating-desc
//!     bitelist add "Elmina" --cuisine Ghanaian --must-try "Jollof rice" --city Reston --state Virginia
//!     bitelist delete 1700000000000
//!     bitelist normalize "FiLLi Cafe | Chantilly - Virginia"

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bitelist_backend::{JsonFileBackend, JsonFileConfig};
use bitelist_location::Normalizer;
use bitelist_model::{NormalizedLocation, Restaurant};
use bitelist_query::{display_label, restaurant_query, GoogleMaps};
use bitelist_store::{
    DeleteOutcome, FilterCriteria, RestaurantDraft, RestaurantStore, SortOrder, StoreConfig,
    DEFAULT_STORAGE_KEY,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "bitelist")]
#[command(about = "Keep a list of favourite restaurants")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data file holding saved restaurants
    #[arg(long, global = true, default_value = "bitelist.json")]
    data_file: PathBuf,

    /// Key the user restaurants are stored under
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants
    List {
        /// Free-text search over name, cuisine, must-try and location
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only this cuisine
        #[arg(short, long, default_value = "")]
        cuisine: String,

        /// Minimum star rating
        #[arg(short = 'r', long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=5))]
        min_rating: u8,

        /// City or state substring
        #[arg(short, long, default_value = "")]
        location: String,

        /// Sort order (name-asc, name-desc, rating-desc, rating-asc)
        #[arg(long, default_value = "name-asc")]
        sort: SortOrder,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a restaurant
    Add(FormArgs),

    /// Edit a restaurant; omitted fields keep their current value
    Edit {
        id: u64,

        #[command(flatten)]
        form: EditArgs,
    },

    /// Delete a restaurant
    Delete {
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show how a location string is interpreted
    Normalize {
        text: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the map link for a restaurant
    Link { id: u64 },

    /// List the cuisines in use
    Cuisines,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct FormArgs {
    name: String,

    #[arg(short, long)]
    cuisine: String,

    /// Dishes worth ordering
    #[arg(short, long)]
    must_try: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long, default_value = "")]
    state: String,

    /// Map link; generated from name, city and state when omitted
    #[arg(long, default_value = "")]
    link: String,

    /// Star rating
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=5))]
    rating: u8,
}

impl From<FormArgs> for RestaurantDraft {
    fn from(args: FormArgs) -> Self {
        RestaurantDraft::new(args.name, args.cuisine, args.must_try)
            .with_city(args.city)
            .with_state(args.state)
            .with_link(args.link)
            .with_rating(args.rating)
    }
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(short, long)]
    cuisine: Option<String>,

    #[arg(short, long)]
    must_try: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    link: Option<String>,

    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=5))]
    rating: Option<u8>,
}

impl EditArgs {
    fn apply(self, mut draft: RestaurantDraft) -> RestaurantDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(cuisine) = self.cuisine {
            draft.cuisine = cuisine;
        }
        if let Some(must_try) = self.must_try {
            draft.must_try = must_try;
        }
        if let Some(city) = self.city {
            draft.city = city;
        }
        if let Some(state) = self.state {
            draft.state = state;
        }
        if let Some(link) = self.link {
            draft.link = link;
        }
        match self.rating {
            Some(rating) => draft.with_rating(rating),
            None => draft,
        }
    }
}

type Store = RestaurantStore<JsonFileBackend>;

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bitelist=info".parse()?),
        )
        .init();

    let Cli {
        command,
        data_file,
        storage_key,
    } = Cli::parse();
    let normalizer = Normalizer::default();
    let open = || open_store(&data_file, &storage_key);

    match command {
        Commands::List {
            search,
            cuisine,
            min_rating,
            location,
            sort,
            format,
        } => {
            let criteria = FilterCriteria {
                search,
                cuisine,
                min_rating,
                location,
            };
            run_list(&open()?, &normalizer, &criteria, sort, format)?;
        }
        Commands::Add(form) => {
            run_add(&mut open()?, form.into())?;
        }
        Commands::Edit { id, form } => {
            run_edit(&mut open()?, &normalizer, id, form)?;
        }
        Commands::Delete { id, yes } => {
            run_delete(&mut open()?, id, yes)?;
        }
        Commands::Normalize { text, format } => {
            run_normalize(&normalizer, &text, format)?;
        }
        Commands::Link { id } => {
            run_link(&open()?, &normalizer, id)?;
        }
        Commands::Cuisines => {
            run_cuisines(&open()?);
        }
    }

    Ok(())
}

fn open_store(data_file: &Path, storage_key: &str) -> Result<Store> {
    let backend = JsonFileBackend::open(JsonFileConfig::new(data_file))
        .context("failed to open data file")?;
    let config = StoreConfig {
        storage_key: storage_key.to_string(),
    };
    Ok(RestaurantStore::load(backend, config)?)
}

/// A restaurant as printed by `list --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedRestaurant<'a> {
    #[serde(flatten)]
    restaurant: &'a Restaurant,
    normalized: NormalizedLocation,
    location_label: Option<String>,
    map_url: String,
}

impl<'a> ListedRestaurant<'a> {
    fn new(restaurant: &'a Restaurant, normalizer: &Normalizer) -> Self {
        let normalized = restaurant
            .location_text()
            .map(|l| normalizer.normalize(l))
            .unwrap_or_default();
        let location_label = display_label(&restaurant.name, &normalized.display());
        let map_url = restaurant_query(restaurant, normalizer).url(&GoogleMaps);

        Self {
            restaurant,
            normalized,
            location_label,
            map_url,
        }
    }
}

fn run_list(
    store: &Store,
    normalizer: &Normalizer,
    criteria: &FilterCriteria,
    sort: SortOrder,
    format: OutputFormat,
) -> Result<()> {
    let listed: Vec<ListedRestaurant> = store
        .select(criteria, sort, normalizer)
        .into_iter()
        .map(|r| ListedRestaurant::new(r, normalizer))
        .collect();

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for (i, item) in listed.iter().enumerate() {
        let r = item.restaurant;
        println!("\n{}. {} (#{})", i + 1, r.name.trim(), r.id);
        println!(
            "   Cuisine: {} | Rating: {}",
            r.cuisine,
            r.rating.as_deref().unwrap_or("unrated")
        );
        if let Some(label) = &item.location_label {
            println!("   Location: {}", label);
        }
        if !r.must_try.trim().is_empty() {
            println!("   Must try: {}", r.must_try.trim());
        }
        println!("   Map: {}", item.map_url);
    }

    println!("\n---");
    println!(
        "{} restaurant{} found",
        listed.len(),
        if listed.len() == 1 { "" } else { "s" }
    );

    Ok(())
}

fn run_add(store: &mut Store, draft: RestaurantDraft) -> Result<()> {
    let id = store.add(draft.into_fields()?)?;
    println!("Added restaurant #{}", id);
    Ok(())
}

fn run_edit(store: &mut Store, normalizer: &Normalizer, id: u64, form: EditArgs) -> Result<()> {
    let current = store
        .get(id)
        .with_context(|| format!("no restaurant with id {}", id))?;
    let draft = form.apply(RestaurantDraft::from_restaurant(current, normalizer));

    let updated = store.update(id, draft.into_fields()?)?;
    println!("Updated {} (#{})", updated.name, updated.id);
    if !updated.is_user_record() {
        println!("Note: built-in restaurants are not saved; this change lasts for this run only");
    }
    Ok(())
}

fn run_delete(store: &mut Store, id: u64, yes: bool) -> Result<()> {
    let outcome = store.delete(id, |r| yes || confirm_delete(r))?;
    match outcome {
        DeleteOutcome::Deleted(r) => println!("Deleted {}", r.name),
        DeleteOutcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}

fn confirm_delete(restaurant: &Restaurant) -> bool {
    print!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone. [y/N] ",
        restaurant.name
    );
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read confirmation");
            false
        }
    }
}

fn run_link(store: &Store, normalizer: &Normalizer, id: u64) -> Result<()> {
    let restaurant = store
        .get(id)
        .with_context(|| format!("no restaurant with id {}", id))?;
    println!("{}", restaurant_query(restaurant, normalizer).url(&GoogleMaps));
    Ok(())
}

fn run_normalize(normalizer: &Normalizer, text: &str, format: OutputFormat) -> Result<()> {
    let location = normalizer.normalize(text);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&location)?),
        OutputFormat::Text => {
            println!("City:    {}", location.city);
            println!("State:   {}", location.state);
            println!("Display: {}", location.display());
        }
    }
    Ok(())
}

fn run_cuisines(store: &Store) {
    for entry in store.cuisines() {
        println!("{} {}", entry.emoji, entry.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_arguments() {
        let cli = Cli::parse_from([
            "bitelist", "list", "--cuisine", "indian", "-r", "4", "--sort", "rating-desc",
        ]);
        match cli.command {
            Commands::List {
                cuisine,
                min_rating,
                sort,
                ..
            } => {
                assert_eq!(cuisine, "indian");
                assert_eq!(min_rating, 4);
                assert_eq!(sort, SortOrder::RatingDesc);
            }
            _ => panic!("expected list"),
        }
        assert_eq!(cli.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["bitelist", "list", "-r", "6"]).is_err());
    }

    #[test]
    fn test_edit_keeps_omitted_fields() {
        let cli = Cli::parse_from(["bitelist", "edit", "13", "--must-try", "Kulfi", "-r", "4"]);
        let Commands::Edit { id, form } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 13);

        let current = RestaurantDraft::new("Filli cafe", "Other", "").with_city("Chantilly");
        let draft = form.apply(current);
        assert_eq!(draft.name, "Filli cafe");
        assert_eq!(draft.city, "Chantilly");
        assert_eq!(draft.must_try, "Kulfi");
        assert_eq!(draft.rating, 4);
    }
}
