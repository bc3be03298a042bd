//! Sadok CLI - drive the storefront and back-office clients from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! sadok catalog list --search "туя"
//! sadok catalog show <product-id>
//!
//! # Drive the guest cart
//! sadok cart add <product-id> --quantity 2
//! sadok cart list
//! sadok cart clear
//!
//! # Wishlist and comparison
//! sadok wishlist toggle <product-id>
//! sadok compare add <product-id>
//!
//! # Checkout address lookup (debounced city search)
//! sadok cities "Київ" --warehouses
//!
//! # Back-office
//! sadok admin login -u admin -p <password>
//! sadok admin stats
//! ```
//!
//! # Environment Variables
//!
//! - `SADOK_API_BASE_URL` - Base URL of the nursery backend
//! - `NOVA_POSHTA_API_KEY` - Nova Poshta address API key
//! - `SADOK_STATE_DIR` - Directory for persisted client state

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sadok")]
#[command(author, version, about = "Sadok storefront and back-office CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the guest cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the guest wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the comparison list
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },
    /// Search delivery cities and their warehouses
    Cities {
        /// City name to search for
        query: String,

        /// Also list the warehouses of the first match
        #[arg(short, long)]
        warehouses: bool,
    },
    /// Show an order and its payment status
    Order {
        /// Order ID
        id: String,
    },
    /// Show the public site settings
    Settings,
    /// Back-office commands (require login)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// List the cart with totals
    List,
    /// Change an item's quantity
    Update {
        /// Cart item ID
        id: String,

        /// New quantity (values below 1 are ignored)
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove an item
    Remove {
        /// Cart item ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Toggle a product in the wishlist
    Toggle {
        /// Product ID
        id: String,
    },
    /// List wishlisted products
    List,
}

#[derive(Subcommand)]
enum CompareAction {
    /// Add a product to the comparison
    Add {
        /// Product ID
        id: String,
    },
    /// List compared products
    List,
    /// Remove a product from the comparison
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the comparison
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in and persist the session token
    Login {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
    /// Show dashboard statistics
    Stats,
    /// List orders
    Orders {
        /// Filter by status (pending, confirmed, processing, shipped,
        /// delivered, cancelled)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Forget the persisted session
    Logout,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { search, category } => {
                commands::catalog::list(&ctx, search, category).await?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, &id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => commands::cart::add(&ctx, &id, quantity).await?,
            CartAction::List => commands::cart::list(&ctx).await,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&ctx, &id, quantity).await;
            }
            CartAction::Remove { id } => commands::cart::remove(&ctx, &id).await,
            CartAction::Clear => commands::cart::clear(&ctx).await,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&ctx, &id).await,
            WishlistAction::List => commands::wishlist::list(&ctx).await,
        },
        Commands::Compare { action } => match action {
            CompareAction::Add { id } => commands::compare::add(&ctx, &id).await?,
            CompareAction::List => commands::compare::list(&ctx),
            CompareAction::Remove { id } => commands::compare::remove(&ctx, &id),
            CompareAction::Clear => commands::compare::clear(&ctx),
        },
        Commands::Cities { query, warehouses } => {
            commands::checkout::cities(&ctx, &query, warehouses).await?;
        }
        Commands::Order { id } => commands::checkout::order(&ctx, &id).await?,
        Commands::Settings => commands::catalog::settings(&ctx).await,
        Commands::Admin { action } => match action {
            AdminAction::Login { username, password } => {
                commands::admin::login(&ctx, &username, &password).await?;
            }
            AdminAction::Stats => commands::admin::stats(&ctx).await?,
            AdminAction::Orders { status } => {
                commands::admin::orders(&ctx, status.as_deref()).await?;
            }
            AdminAction::Logout => commands::admin::logout(&ctx),
        },
    }
    Ok(())
}
