//! FarmLink CLI
//!
//! Drives the storefront against a file-backed store:
//! - Log in and out
//! - Add, remove and list cart items
//! - Check out and list order history
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use farmlink::config::{generate_default_config, Config, LoggingConfig};
use farmlink::{
    CartItem, CartView, FileStore, OrderHistoryView, Price, Reaction, Storefront, UiEvent,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "farmlink")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FarmLink storefront: cart, checkout and order history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with an email address
    Login {
        email: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show navbar state (greeting, links, cart badge)
    Nav,

    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },

    /// Place an order for the current cart
    Checkout,

    /// Show order history
    Orders,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product
    Add {
        /// Product name
        name: String,
        /// Display price, e.g. "₹120 / kg"
        price: Price,
        /// Image URL
        #[arg(default_value = "")]
        image: String,
    },

    /// Remove every product with this exact name
    Remove {
        name: String,
    },

    /// List cart items and totals
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    // Config decides the log setup, so loading reports through a stderr
    // subscriber of its own.
    let mut config = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        match &cli.config {
            Some(path) => Config::load_with_env(path),
            None => Ok(Config::load_default()),
        }
    })?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config.logging);

    let data_path = config.storage.data_path();
    tracing::debug!("Data directory: {:?}", data_path);

    let store = FileStore::open(&data_path)
        .with_context(|| format!("opening data directory {:?}", data_path))?;
    let mut shop = Storefront::new(store, config.checkout.clone());

    run(cli.command, &mut shop, cli.format == "json")
}

fn run(command: Commands, shop: &mut Storefront<FileStore>, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Login { email } => {
            let reaction = shop.handle(UiEvent::LoginSubmitted { email })?;
            if reaction.is_none() {
                eprintln!("Email must not be empty");
                std::process::exit(1);
            }
            print_reaction(&reaction, json)?;
        }

        Commands::Logout => {
            let reaction = shop.handle(UiEvent::LogoutClicked)?;
            print_reaction(&reaction, json)?;
        }

        Commands::Whoami => match shop.current_user() {
            Some(user) if json => println!("{}", serde_json::to_string_pretty(&user)?),
            Some(user) => println!("{}", user.email),
            None => {
                eprintln!("Not logged in");
                std::process::exit(1);
            }
        },

        Commands::Nav => {
            let nav = shop.navbar();
            if json {
                println!("{}", serde_json::to_string_pretty(&nav)?);
            } else {
                let links: Vec<&str> = nav.links.iter().map(|l| l.label).collect();
                println!("FarmLink | {}", links.join(" | "));
                match &nav.greeting {
                    Some(greeting) => println!("{} (logout)", greeting),
                    None => println!("Login"),
                }
                println!("Cart: {}", nav.cart_count);
            }
        }

        Commands::Cart { action } => match action {
            CartCommand::Add { name, price, image } => {
                let item = CartItem::new(name, price, image);
                let reaction = shop.handle(UiEvent::AddToCartClicked(item))?;
                print_reaction(&reaction, json)?;
            }
            CartCommand::Remove { name } => {
                shop.handle(UiEvent::RemoveFromCartClicked { name })?;
                print_cart(&shop.cart_view(), json)?;
            }
            CartCommand::Show => print_cart(&shop.cart_view(), json)?,
        },

        Commands::Checkout => {
            let reaction = shop.handle(UiEvent::CheckoutSubmitted)?;
            print_reaction(&reaction, json)?;
            if reaction.order.is_none() {
                std::process::exit(1);
            }
        }

        Commands::Orders => print_orders(&shop.order_history(), json)?,

        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish()
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("farmlink={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_reaction(reaction: &Reaction, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reaction)?);
        return Ok(());
    }

    if let Some(notice) = &reaction.notice {
        println!("{}", notice);
    }
    if let Some(order) = &reaction.order {
        println!(
            "Order #{} placed {} ({}), est. delivery {}",
            order.order_id, order.date, order.status, order.delivery_estimate
        );
    }
    if let Some(count) = reaction.cart_count {
        println!("Cart: {} item(s)", count);
    }
    if let Some(page) = reaction.navigate {
        println!("-> {}", page.path());
    }
    Ok(())
}

fn print_cart(view: &CartView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    match view {
        CartView::Empty => println!("{}", view.message().unwrap_or_default()),
        CartView::Items { items, summary } => {
            println!("{:<30} {:<20} {}", "Name", "Price", "Image");
            println!("{}", "-".repeat(70));
            for item in items {
                println!("{:<30} {:<20} {}", item.name, item.price.to_string(), item.image);
            }

            let currency = items
                .first()
                .map(|i| i.price.currency())
                .unwrap_or_default();
            println!();
            println!("Subtotal   {}{:.2}", currency, summary.subtotal);
            println!("Tax        {}{:.2}", currency, summary.tax);
            println!("Total      {}{:.2}", currency, summary.total);
        }
    }
    Ok(())
}

fn print_orders(view: &OrderHistoryView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    match view {
        OrderHistoryView::Orders(orders) => {
            for order in orders {
                println!(
                    "#{}  placed {}  {}  est. delivery {}",
                    order.order_id, order.date, order.status, order.delivery_estimate
                );
                for item in &order.items {
                    println!("    {} - {}", item.name, item.price);
                }
            }
        }
        _ => println!("{}", view.message().unwrap_or_default()),
    }
    Ok(())
}
