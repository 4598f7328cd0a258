mod autocomplete;
mod books;
mod catalog;
mod config;
mod detail;
mod logging;
mod nav;
mod rating;
mod review;
mod tui;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use crate::books::{BookSearch, BookSummary, GoogleBooksClient, SearchRequest, search_summaries};
use crate::catalog::{CATEGORIES, Shelf, find_category};
use crate::config::{AppConfig, CliOverrides};
use crate::detail::load_detail;
use crate::rating::{star_line, summary_text};
use crate::tui::TuiApp;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "readlog",
    version,
    about = "Search, browse and review books (TUI/CLI)"
)]
struct Cli {
    /// Google Books `volumes` endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level (error,warn,info,debug,trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Config file to use instead of the global one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run a full search and print the matches
    Search {
        query: String,
        /// Maximum number of results (defaults to catalog.search_results)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the details of one book
    Show { id: String },
    /// List the books of a category
    Browse { category: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = AppConfig::resolve(CliOverrides {
        base_url: cli.base_url.clone(),
        log_level: cli.log_level.clone(),
        config: cli.config.clone(),
    })?;
    logging::init_logging(&cfg.log_level, &cfg.log_file)?;
    info!(?cfg, "app config");

    let client = GoogleBooksClient::new(cfg.base_url.clone())
        .context("build books client")?
        .with_http_config(&cfg.http);
    let books: Arc<dyn BookSearch> = Arc::new(client);

    match cli.command {
        None => run_tui(cfg, books).await,
        Some(Command::Search { query, limit }) => {
            let limit = limit.unwrap_or(cfg.catalog.search_results);
            run_search(books.as_ref(), &query, limit).await
        }
        Some(Command::Show { id }) => run_show(books.as_ref(), &id).await,
        Some(Command::Browse { category }) => run_browse(books.as_ref(), &cfg, &category).await,
    }
}

async fn run_tui(cfg: AppConfig, books: Arc<dyn BookSearch>) -> Result<()> {
    let mut app = TuiApp::new("readlog", cfg, books);
    app.run().await
}

fn print_books(books: &[BookSummary]) {
    for b in books {
        println!("{}  {} by {}", b.id, b.display_title(), b.display_authors());
    }
}

async fn run_search(books: &dyn BookSearch, query: &str, limit: usize) -> Result<()> {
    if query.trim().is_empty() {
        bail!("{}", autocomplete::EMPTY_SEARCH_NOTICE);
    }
    let found = search_summaries(books, &SearchRequest::new(query.trim(), limit)).await;
    if found.is_empty() {
        println!("No books found for \"{}\".", query.trim());
    }
    print_books(&found);
    Ok(())
}

async fn run_show(books: &dyn BookSearch, id: &str) -> Result<()> {
    let book = load_detail(books, Some(id)).await?;
    println!("{}", book.title);
    println!("{}", book.authors);
    println!("Year: {}   Categories: {}", book.year, book.categories);
    println!(
        "{} {}",
        star_line(book.average_rating),
        summary_text(book.average_rating, book.ratings_count)
    );
    if let Some(cover) = &book.cover {
        println!("Cover: {cover}");
    }
    println!();
    println!("{}", book.description);
    Ok(())
}

async fn run_browse(books: &dyn BookSearch, cfg: &AppConfig, slug: &str) -> Result<()> {
    let Some(category) = find_category(slug) else {
        let known: Vec<&str> = CATEGORIES.iter().map(|c| c.slug).collect();
        bail!("unknown category '{slug}' (known: {})", known.join(", "));
    };
    let Shelf {
        heading,
        books: found,
        message,
    } = catalog::browse(books, category, &cfg.catalog).await;
    println!("{heading}");
    match message {
        Some(msg) => println!("{msg}"),
        None => print_books(&found),
    }
    Ok(())
}
