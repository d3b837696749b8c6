use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xeriwo::account::Account;
use xeriwo::admin::AdminDashboard;
use xeriwo::catalog::{Catalog, CatalogFilters, PageItem, PriceRange, SortBy};
use xeriwo::chat::{ChatMessage, ChatWidget, Sender};
use xeriwo::config::Config;
use xeriwo::downloads::{BrowserOpener, Downloader, PrintOpener, UrlOpener};
use xeriwo::home::{Home, quick_search};
use xeriwo::notify::Notice;
use xeriwo::sdk::{
    CategoryForm, Client, FileStorage, MemoryStorage, Navigator, Product, ProductForm,
    StorageAdapter, View,
};

#[derive(Parser, Debug)]
#[command(name = "xeriwo")]
#[command(about = "Browse and download WordPress themes and plugins from the Xeriwo marketplace")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Featured products and site numbers
    Home {
        /// Print the catalog link for a quick search instead
        #[arg(long)]
        search: Option<String>,
    },
    /// Browse the catalog
    Products(ProductArgs),
    /// Your download quota
    Stats,
    /// Download a product
    Download {
        product_id: String,
    },
    /// Talk to the assistant
    Chat {
        /// Send one message and exit
        #[arg(short, long)]
        message: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Confirm a registration with the emailed code
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    Logout,
    /// Marketplace administration
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct ProductArgs {
    #[arg(short, long)]
    search: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(long = "type")]
    product_type: Option<String>,
    /// latest, popular, downloads, rating, name-asc or name-desc
    #[arg(long)]
    sort: Option<SortBy>,
    /// all, free or premium
    #[arg(long)]
    price: Option<PriceRange>,
    #[arg(short, long)]
    page: Option<u32>,
    /// Start from a shared products link query, e.g. "search=seo&page=2"
    #[arg(long)]
    query: Option<String>,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Products, categories and totals
    Dashboard,
    /// Create a product, or update one with --id
    SaveProduct {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        preview_url: String,
        #[arg(long)]
        download_url: String,
        #[arg(long, default_value_t = false)]
        featured: bool,
    },
    DeleteProduct {
        id: String,
    },
    /// Create a category, or update one with --id
    SaveCategory {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    DeleteCategory {
        id: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("xeriwo=info,xeriwo_sdk=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_storage(config: &Config) -> Arc<dyn StorageAdapter> {
    let storage = match &config.storage_path {
        Some(path) => FileStorage::at(path),
        None => FileStorage::new("xeriwo"),
    };
    match storage {
        Some(storage) => Arc::new(storage),
        None => {
            tracing::warn!("No writable session file; the session will not persist");
            Arc::new(MemoryStorage::new())
        }
    }
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        println!("{}", notice);
    }
}

fn print_products(products: &[&Product]) {
    for product in products {
        println!(
            "{:<26} {:<40} {:<20} ⬇ {}",
            product.id, product.title, product.category, product.downloads
        );
    }
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    println!("{}> {}", who, message.text);
    for card in &message.cards {
        println!("{}", card);
    }
    for product in &message.products {
        println!("   • {} [{}] ⬇ {}", product.title, product.id, product.downloads);
    }
    for suggestion in &message.suggestions {
        println!("   ? {}", suggestion);
    }
    if !message.quick_actions.is_empty() {
        let actions: Vec<String> = message
            .quick_actions
            .iter()
            .map(|a| format!("{} (/{})", a.text, a.action))
            .collect();
        println!("   {}", actions.join("  "));
    }
}

fn json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn filters_from(args: ProductArgs) -> CatalogFilters {
    let mut filters = args
        .query
        .as_deref()
        .map(CatalogFilters::from_query_string)
        .unwrap_or_default();
    if let Some(search) = args.search {
        filters.search = search;
    }
    if let Some(category) = args.category {
        filters.category = category;
    }
    if let Some(product_type) = args.product_type {
        filters.product_type = product_type;
    }
    if let Some(sort) = args.sort {
        filters.sort = sort;
    }
    if let Some(price) = args.price {
        filters.price = price;
    }
    if let Some(page) = args.page {
        filters.page = page.max(1);
    }
    filters
}

async fn run_chat(widget: &mut ChatWidget, message: Option<String>) -> anyhow::Result<()> {
    widget.open().await;
    if let Some(message) = message {
        widget.send(&message).await;
        if let Some(last) = widget.messages().last() {
            print_message(last);
        }
        print_notices(widget.take_notices());
        return Ok(());
    }

    for message in widget.messages() {
        print_message(message);
    }
    println!("({}) type a message, /download <id>, /preview <id>, /<action>, or /quit", widget.header_subtitle());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let seen = widget.messages().len();

        match line.trim().split_once(' ').unwrap_or((line.trim(), "")) {
            ("/quit", _) | ("/exit", _) => break,
            ("/download", id) | ("/preview", id) if widget.product(id.trim()).is_none() => {
                println!("No product '{}' in this conversation", id.trim());
                continue;
            }
            ("/download", id) => {
                if let Some(product) = widget.product(id.trim()).cloned() {
                    widget.download(&product).await;
                }
            }
            ("/preview", id) => {
                if let Some(product) = widget.product(id.trim()).cloned() {
                    widget.preview(&product);
                }
            }
            (cmd, _) if cmd.starts_with('/') => {
                widget.quick_action(cmd.trim_start_matches('/')).await;
            }
            _ => widget.send(&line).await,
        }

        for message in &widget.messages()[seen..] {
            if message.sender == Sender::Bot {
                print_message(message);
            }
        }
        print_notices(widget.take_notices());
    }
    widget.close();
    Ok(())
}

async fn run_admin(client: Client, command: AdminCommand, as_json: bool) -> anyhow::Result<()> {
    let mut admin = AdminDashboard::new(client.clone());

    let ok = match command {
        AdminCommand::Login { email, password } => admin.login(&email, &password).await,
        AdminCommand::Logout => {
            admin.logout();
            true
        }
        AdminCommand::Dashboard => {
            admin.refresh().await;
            if client.navigator().current() == View::AdminLogin {
                print_notices(admin.take_notices());
                bail!("Admin login required");
            }
            if as_json {
                json(&serde_json::json!({
                    "stats": admin.stats(),
                    "products": admin.products(),
                    "categories": admin.category_rows(),
                }))?;
            } else {
                let stats = admin.stats();
                println!(
                    "Products: {}  Downloads: {}  Categories: {}",
                    stats.total_products, stats.total_downloads, stats.total_categories
                );
                print_products(&admin.products().iter().collect::<Vec<_>>());
                for row in admin.category_rows() {
                    let state = if row.category.is_active { "" } else { " (inactive)" };
                    println!(
                        "{}{} [{}] {} products{}",
                        "  ".repeat(row.depth),
                        row.category.name,
                        row.category.id,
                        row.category.product_count,
                        state
                    );
                }
            }
            true
        }
        AdminCommand::SaveProduct {
            id,
            title,
            category,
            image_url,
            preview_url,
            download_url,
            featured,
        } => {
            admin.refresh().await;
            if let Some(id) = id.as_deref() {
                if admin.edit_product(id).is_none() {
                    bail!("No product with id '{}'", id);
                }
            }
            let form = ProductForm {
                title,
                category,
                image_url,
                preview_url,
                download_url,
                featured,
            };
            admin.submit_product(&form).await
        }
        AdminCommand::DeleteProduct { id } => admin.delete_product(&id).await,
        AdminCommand::SaveCategory {
            id,
            name,
            parent,
            inactive,
        } => {
            admin.refresh().await;
            if let Some(id) = id.as_deref() {
                if admin.edit_category(id).is_none() {
                    bail!("No category with id '{}'", id);
                }
            }
            let form = CategoryForm::new(name, parent.as_deref(), !inactive);
            admin.submit_category(&form).await
        }
        AdminCommand::DeleteCategory { id } => {
            admin.refresh().await;
            admin.delete_category(&id).await
        }
    };

    print_notices(admin.take_notices());
    if !ok {
        bail!("Admin action failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env();

    let navigator = Navigator::default();
    let client = Client::new(config.client_config(), open_storage(&config), navigator.clone())
        .context("Failed to build API client")?;
    let opener: Arc<dyn UrlOpener> = if config.open_browser {
        Arc::new(BrowserOpener)
    } else {
        Arc::new(PrintOpener)
    };
    let downloader = Downloader::new(client.clone(), opener);

    match cli.command {
        Command::Home { search: Some(term) } => match quick_search(&term) {
            Some(link) => println!("{}", link),
            None => bail!("Enter something to search for"),
        },
        Command::Home { search: None } => {
            navigator.navigate(View::Home);
            let mut home = Home::new(client, downloader);
            home.load().await;
            if cli.json {
                json(&serde_json::json!({ "stats": home.stats(), "featured": home.featured() }))?;
            } else {
                let stats = home.stats();
                println!(
                    "{} products · {} downloads · {} users · ★ {:.1}",
                    stats.total_products, stats.total_downloads, stats.total_users, stats.avg_rating
                );
                print_products(&home.featured().iter().collect::<Vec<_>>());
            }
            print_notices(home.take_notices());
        }
        Command::Products(args) => {
            navigator.navigate(View::Products);
            let filters = filters_from(args);
            let mut catalog = Catalog::new(client, downloader).with_filters(filters);
            catalog.load().await;
            if cli.json {
                json(&catalog.visible())?;
            } else {
                println!("{}", catalog.filters.summary());
                print_products(&catalog.visible());
                let pager: Vec<String> = catalog
                    .page_window()
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(n) if n == catalog.filters.page => format!("[{}]", n),
                        PageItem::Page(n) => n.to_string(),
                        PageItem::Gap => "…".to_string(),
                    })
                    .collect();
                println!("Pages: {}", pager.join(" "));
                let link = catalog.filters.to_query_string();
                if !link.is_empty() {
                    println!("Link: {}?{}", View::Products.path(), link);
                }
            }
            print_notices(catalog.take_notices());
        }
        Command::Stats => {
            if client.current_user().is_none() {
                bail!("Please login to view your download statistics");
            }
            let Some(quota) = downloader.refresh_quota().await else {
                bail!("Unable to load your statistics right now");
            };
            if cli.json {
                json(&quota)?;
            } else {
                println!("{}", xeriwo::chat::Card::Stats(quota));
            }
        }
        Command::Download { product_id } => {
            navigator.navigate(View::Products);
            let mut catalog = Catalog::new(client, downloader);
            let report = catalog.download(&product_id).await;
            print_notices(catalog.take_notices());
            if let Some(quota) = report.quota {
                println!(
                    "{}/{} downloads left today",
                    quota.daily.remaining, quota.daily.limit
                );
            }
            if !report.outcome.is_started() {
                bail!("Download did not start");
            }
        }
        Command::Chat { message } => {
            let mut widget = ChatWidget::new(client, downloader);
            run_chat(&mut widget, message).await?;
        }
        Command::Login { email, password } => {
            navigator.navigate(View::Login);
            let mut account = Account::new(client);
            let ok = account.login(&email, &password).await;
            print_notices(account.take_notices());
            if !ok {
                bail!("Login failed");
            }
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            navigator.navigate(View::Register);
            let mut account = Account::new(client);
            let ok = account
                .register(&name, &email, &password, &confirm_password)
                .await;
            print_notices(account.take_notices());
            if !ok {
                bail!("Registration failed");
            }
            println!("Check your inbox, then run: xeriwo verify --email {} --otp <code>", email);
        }
        Command::Verify { email, otp } => {
            navigator.navigate(View::Register);
            let mut account = Account::new(client);
            let ok = account.verify_otp(&email, &otp).await;
            print_notices(account.take_notices());
            if !ok {
                bail!("Verification failed");
            }
        }
        Command::Logout => {
            let mut account = Account::new(client);
            account.logout();
            print_notices(account.take_notices());
        }
        Command::Admin(command) => {
            navigator.navigate(View::Admin);
            run_admin(client, command, cli.json).await?;
        }
    }

    Ok(())
}
