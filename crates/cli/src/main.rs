use anyhow::Context;
use bookstore_app::client::CatalogClient;
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Bookstore catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Query a running service and print the JSON it returns
    Fetch {
        /// Override `client.base_url`
        #[arg(long, global = true)]
        base_url: Option<String>,
        #[command(subcommand)]
        query: Query,
    },
}

#[derive(Debug, Subcommand)]
enum Query {
    /// Every book, keyed by ISBN
    All,
    /// One book by ISBN
    Isbn { isbn: String },
    /// Every book by an author
    Author { author: String },
    /// The first book with a title
    Title { title: String },
    /// Reviews of one book
    Reviews { isbn: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load().with_context(|| "failed to load bookstore settings")?;
    bookstore_telemetry::init_stderr(&settings.telemetry)?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            tracing::info!(env = ?settings.environment, "bookstore serve starting");
            bookstore_app::run(settings).await
        }
        Command::Fetch { base_url, query } => {
            let base_url = base_url.unwrap_or(settings.client.base_url);
            let client = CatalogClient::new(&base_url)?;
            fetch(&client, query).await.map_err(|err| {
                tracing::error!(%base_url, error = %err, "fetch failed");
                err
            })
        }
    }
}

async fn fetch(client: &CatalogClient, query: Query) -> anyhow::Result<()> {
    match query {
        Query::All => print_json(&client.all_books().await?),
        Query::Isbn { isbn } => print_json(
            &client
                .book_by_isbn(&isbn)
                .await
                .with_context(|| format!("error fetching book with ISBN {isbn}"))?,
        ),
        Query::Author { author } => print_json(
            &client
                .books_by_author(&author)
                .await
                .with_context(|| format!("error fetching books by {author}"))?,
        ),
        Query::Title { title } => print_json(
            &client
                .book_by_title(&title)
                .await
                .with_context(|| format!("error fetching book with title \"{title}\""))?,
        ),
        Query::Reviews { isbn } => print_json(
            &client
                .reviews(&isbn)
                .await
                .with_context(|| format!("error fetching reviews for ISBN {isbn}"))?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render response")?;
    println!("{rendered}");
    Ok(())
}
