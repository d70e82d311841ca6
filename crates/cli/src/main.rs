use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use mse_api::{HISTORICAL_DATA_PATH, ISSUERS_PATH, MseClient};
use mse_types::{ColumnSchema, DEFAULT_PAGE_SIZE, FetchState, PAGE_SIZE_OPTIONS};
use mse_view::{TableDescription, TableView, ViewConfig};
use tracing::Level;

#[derive(Parser)]
#[command(name = "mse", about = "Macedonian Stock Exchange data viewer", version)]
struct Cli {
    /// Override the API base URL (takes precedence over MSE_API_BASE).
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the issuer code list
    Issuers {
        /// Page to print, 0-based
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Rows per page (10, 25, 50 or 100)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Print the historical trading data table
    History {
        /// Page to print, 0-based
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Rows per page (10, 25, 50 or 100)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let client = match cli.base_url.as_deref() {
        Some(base_url) => MseClient::with_base_url(base_url)?,
        None => MseClient::new_from_env()?,
    };

    // No subcommand => TUI
    match cli.command {
        None => mse_tui::run(client).await,
        Some(Command::Issuers { page, page_size }) => {
            print_table(&client, ISSUERS_PATH, ColumnSchema::issuers(), page, page_size).await
        }
        Some(Command::History { page, page_size }) => {
            print_table(&client, HISTORICAL_DATA_PATH, ColumnSchema::historical_data(), page, page_size).await
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Fetch one collection and print the requested page through the same view
/// state the TUI uses.
async fn print_table(client: &MseClient, endpoint: &str, schema: ColumnSchema, page: usize, page_size: usize) -> Result<()> {
    let mut view = TableView::new(ViewConfig {
        endpoint: endpoint.into(),
        schema,
        auto_fetch_on_enter: true,
    });
    if !view.set_page_size(page_size) {
        bail!("page size must be one of {:?}", PAGE_SIZE_OPTIONS);
    }

    view.begin_fetch();
    let result = client.fetch_records(view.endpoint()).await;
    view.complete_fetch(result);

    if let FetchState::Error(reason) = view.state() {
        bail!("fetch failed: {reason}");
    }
    if !view.set_page(page) {
        bail!("page {} is out of bounds ({} pages)", page, view.page_count());
    }

    print_description(&view.render());
    Ok(())
}

/// Column-aligned plain text output of a rendered table.
fn print_description(table: &TableDescription) {
    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    let print_row = |cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", line.join("  ").trim_end());
    };

    print_row(&table.headers);
    for row in &table.rows {
        print_row(row);
    }

    let info = &table.page_info;
    if info.total == 0 {
        println!("\nNo data found.");
    } else {
        println!(
            "\nPage {} of {} ({} records, rows {}-{})",
            info.page + 1,
            info.total_pages(),
            info.total,
            info.first_row(),
            info.last_row()
        );
    }
}
