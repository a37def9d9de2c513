//! Finnza report CLI
//!
//! Prints a page of movements or the contract board using the same client
//! core as the web views.

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finnza_client::{
    ApiClient, BomControleSource, ContractApi, MovementRequest, MovementService, MovementSource,
    OmieSource,
};
use finnza_core::clock::SystemClock;
use finnza_core::contract::KanbanBoard;
use finnza_core::date_range::DateRange;
use finnza_core::movement::{MovementCache, MovementFilter, MovementKind};
use finnza_shared::AppConfig;
use finnza_shared::config::MovementSourceKind;
use finnza_shared::types::{Money, PageRequest};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Source {
    Omie,
    Bomcontrole,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Kind {
    Revenue,
    Expense,
}

#[derive(Parser, Debug)]
#[command(name = "finnza-report", version, about = "Finnza movement and contract reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One page of movements with the period totals.
    Movements {
        /// First day (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
        /// Last day (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
        /// Upstream; defaults to the configured one.
        #[arg(long, value_enum)]
        source: Option<Source>,
        /// Revenue or expense only.
        #[arg(long, value_enum)]
        kind: Option<Kind>,
        /// Exact category.
        #[arg(long)]
        category: Option<String>,
        /// Text matched against name, counterparty and note.
        #[arg(long)]
        search: Option<String>,
        /// Page to print (1-indexed).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Contract board column counts and values.
    Contracts {
        /// Backend page (0-indexed).
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Contracts per page.
        #[arg(long, default_value_t = 100)]
        size: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finnza=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let api = ApiClient::from_config(&config)?;
    info!(base_url = %config.backend.base_url, "Backend configured");

    match cli.command {
        Command::Movements {
            start,
            end,
            source,
            kind,
            category,
            search,
            page,
        } => {
            let range = DateRange::parse(
                start.as_deref().unwrap_or_default(),
                end.as_deref().unwrap_or_default(),
            )?;
            let request = MovementRequest {
                range,
                filter: MovementFilter {
                    kind: kind.map(|k| match k {
                        Kind::Revenue => MovementKind::Revenue,
                        Kind::Expense => MovementKind::Expense,
                    }),
                    category,
                    search_text: search,
                },
                page: PageRequest::new(page, config.movements.page_size),
            };
            let source = source.unwrap_or(match config.movements.source {
                MovementSourceKind::Omie => Source::Omie,
                MovementSourceKind::BomControle => Source::Bomcontrole,
            });
            match source {
                Source::Omie => print_movements(OmieSource::new(api), &config, &request).await,
                Source::Bomcontrole => {
                    print_movements(BomControleSource::new(api), &config, &request).await
                }
            }
        }
        Command::Contracts { page, size } => {
            let contracts = ContractApi::new(api).list(page, size, None).await?;
            let board = KanbanBoard::build(&contracts.content, Utc::now().date_naive());
            print_board(&board);
            println!(
                "{} of {} contracts (page {} of {})",
                contracts.content.len(),
                contracts.total_elements,
                contracts.number + 1,
                contracts.total_pages.max(1)
            );
            Ok(())
        }
    }
}

async fn print_movements<S: MovementSource>(
    source: S,
    config: &AppConfig,
    request: &MovementRequest,
) -> anyhow::Result<()> {
    let cache = MovementCache::from_config(&config.cache, SystemClock);
    let service = MovementService::new(source, cache, config.movements.fetch_page_size);
    let view = service.load(request).await?;

    for movement in &view.page.data {
        let signed = if movement.is_debit {
            -movement.amount
        } else {
            movement.amount
        };
        println!(
            "{:<12} {:<40} {:<24} {:>16}",
            movement
                .due_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            movement.name,
            movement.category,
            Money::brl(signed).format_brl()
        );
    }

    let meta = &view.page.meta;
    println!(
        "\npage {} of {} ({} movements)",
        meta.page,
        meta.total_pages.max(1),
        meta.total
    );
    println!("Receitas: {}", Money::brl(view.totals.revenue).format_brl());
    println!("Despesas: {}", Money::brl(view.totals.expense).format_brl());
    println!("Saldo:    {}", Money::brl(view.totals.net).format_brl());
    Ok(())
}

fn print_board(board: &KanbanBoard) {
    for column in &board.columns {
        println!(
            "{:<14} {:>5}  {:>18}",
            column.category.label(),
            column.total.count,
            Money::brl(column.total.value).format_brl()
        );
    }
}
