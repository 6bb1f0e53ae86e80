//! # comptoir-report
//!
//! Prints a paginated sales listing with the period statistics.
//!
//! ## Usage
//! ```bash
//! # First page, settings from ~/.config/comptoir/comptoir.toml
//! comptoir-report ventes.json
//!
//! # Soap sales, most profitable first, page 2
//! comptoir-report ventes.json --query savon --sort-by profit --order desc --page 2
//!
//! # Add the pricing sheet of the catalogue
//! comptoir-report ventes.json --products produits.json --margin 35
//! ```
//!
//! ## Environment
//! - `COMPTOIR_CONFIG`: config file used when `--config` is absent
//! - `COMPTOIR_*`: per-setting overrides, see `ComptoirConfig`
//! - `RUST_LOG`: log filter (logs go to stderr)

mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comptoir_core::{Paginator, Product, Sale, SortOrder, DEFAULT_DESIRED_MARGIN};
use comptoir_runtime::{init_tracing, ComptoirConfig};
use serde_json::from_str;
use tracing::info;

use crate::report::{render_page, render_pricing, render_summary, ReportQuery, SalesReport, SortField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Order {
    Asc,
    Desc,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Asc => SortOrder::Asc,
            Order::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Rapport des ventes Comptoir")]
struct Args {
    /// JSON file holding an array of sales.
    sales: PathBuf,

    /// JSON file holding an array of products, for the pricing sheet.
    #[arg(long)]
    products: Option<PathBuf>,

    /// Search text (product, client or price).
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(long, value_enum)]
    sort_by: Option<SortField>,

    #[arg(long, value_enum, default_value_t = Order::Asc)]
    order: Order,

    /// Page to print, clamped to the last page.
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page; defaults to the configured page size.
    #[arg(long)]
    page_size: Option<usize>,

    /// Margin aimed for in the pricing sheet, in percent.
    #[arg(long, default_value_t = DEFAULT_DESIRED_MARGIN)]
    margin: f64,

    /// Config file path.
    #[arg(short, long, env = "COMPTOIR_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = ComptoirConfig::load(args.config.clone()).context("Invalid configuration")?;
    let fmt = config.formatter();

    let sales: Vec<Sale> = read_json(&args.sales)?;
    info!(count = sales.len(), path = ?args.sales, "Sales loaded");
    let report = SalesReport::new(sales);

    let query = ReportQuery {
        text: args.query.clone(),
        sort: args.sort_by,
        order: args.order.into(),
        min_chars: config.listing.filter_min_chars,
    };
    let selected = report.select(&query);

    let mut paginator = Paginator::new(args.page_size.unwrap_or(config.listing.page_size));
    paginator.set_total_items(selected.len());
    paginator.go_to_page(args.page);
    let page = paginator.apply(&selected);

    print!("{}", render_page(&page, &fmt));
    println!();
    print!("{}", render_summary(&report, &fmt));

    if let Some(path) = &args.products {
        let products: Vec<Product> = read_json(path)?;
        println!();
        print!("{}", render_pricing(&products, args.margin, &fmt));
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}
