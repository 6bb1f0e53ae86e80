//! # Sales Report
//!
//! Turns a sales export into the listing shown by the report CLI.
//!
//! ## Pipeline
//! ```text
//! Vec<Sale> ──► SalesReport::new ──► valid lines + statistics
//!                                        │
//!                    ReportQuery ───────►│ select: filter → sort
//!                                        ▼
//!                                 Vec<&Sale> ──► Paginator ──► render_page
//! ```
//! Lines with non-finite or negative prices, or a quantity that is not
//! strictly positive, are dropped before anything is computed.

use clap::ValueEnum;
use comptoir_core::calculation::{
    calculate_inventory_value, calculate_profit, calculate_sales_statistics,
    validate_calculation_input, ProductPricing,
};
use comptoir_core::format::truncate_text;
use comptoir_core::shaping::{FieldAccessor, FieldValue, SortKey, SortValue};
use comptoir_core::{
    filter_items, sort_items, DateStyle, Formatter, Page, Product, Sale, SalesStatistics,
    SortOrder,
};
use tracing::{debug, warn};

/// Widest product label before it is cut with an ellipsis.
const PRODUCT_COLUMN: usize = 24;

// =============================================================================
// Query
// =============================================================================

/// Column the listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Date,
    Product,
    Quantity,
    Revenue,
    Profit,
}

impl SortField {
    fn key(self) -> SortKey<Sale> {
        match self {
            SortField::Date => by_date,
            SortField::Product => by_product,
            SortField::Quantity => by_quantity,
            SortField::Revenue => by_revenue,
            SortField::Profit => by_profit,
        }
    }
}

fn by_date(sale: &Sale) -> SortValue<'_> {
    SortValue::opt_date(sale.date)
}

fn by_product(sale: &Sale) -> SortValue<'_> {
    SortValue::text(product_label(sale))
}

fn by_quantity(sale: &Sale) -> SortValue<'_> {
    SortValue::Number(sale.quantity)
}

fn by_revenue(sale: &Sale) -> SortValue<'_> {
    SortValue::Number(sale.selling_price * sale.quantity)
}

fn by_profit(sale: &Sale) -> SortValue<'_> {
    SortValue::Number(calculate_profit(
        sale.selling_price,
        sale.purchase_price,
        sale.quantity,
    ))
}

/// Search, sort and filter settings of one listing.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub text: String,
    pub sort: Option<SortField>,
    pub order: SortOrder,
    pub min_chars: usize,
}

/// Fields the search box looks into.
const SEARCH_FIELDS: [FieldAccessor<Sale>; 4] = [
    search_product_name,
    search_product_id,
    search_client_id,
    search_price,
];

fn search_product_name(sale: &Sale) -> FieldValue<'_> {
    FieldValue::opt_text(sale.product_name.as_deref())
}

fn search_product_id(sale: &Sale) -> FieldValue<'_> {
    FieldValue::text(&sale.product_id)
}

fn search_client_id(sale: &Sale) -> FieldValue<'_> {
    FieldValue::opt_text(sale.client_id.as_deref())
}

fn search_price(sale: &Sale) -> FieldValue<'_> {
    FieldValue::Number(sale.selling_price)
}

fn product_label(sale: &Sale) -> &str {
    sale.product_name.as_deref().unwrap_or(&sale.product_id)
}

// =============================================================================
// Report
// =============================================================================

/// Validated sales of a period with their statistics.
#[derive(Debug, Clone)]
pub struct SalesReport {
    sales: Vec<Sale>,
    skipped: usize,
    statistics: SalesStatistics,
}

impl SalesReport {
    pub fn new(sales: Vec<Sale>) -> Self {
        let total = sales.len();
        let sales: Vec<Sale> = sales
            .into_iter()
            .filter(|sale| {
                let valid = validate_calculation_input(sale);
                if !valid {
                    warn!(sale_id = %sale.id, "Skipping sale with invalid prices or quantity");
                }
                valid
            })
            .collect();
        let statistics = calculate_sales_statistics(&sales);
        debug!(total, kept = sales.len(), "Sales report built");

        SalesReport {
            skipped: total - sales.len(),
            sales,
            statistics,
        }
    }

    pub fn statistics(&self) -> SalesStatistics {
        self.statistics
    }

    /// Lines dropped because their figures were unusable.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sales matching `query`, in display order.
    pub fn select(&self, query: &ReportQuery) -> Vec<&Sale> {
        let mut matched = filter_items(&self.sales, &query.text, &SEARCH_FIELDS, query.min_chars);
        sort_items::<Sale, _>(&mut matched, query.sort.map(SortField::key), query.order);
        matched
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// One page of the listing followed by its position line.
pub fn render_page(page: &Page<'_, &Sale>, fmt: &Formatter) -> String {
    let mut table = Table::new(&[
        ("Date", Align::Left),
        ("Produit", Align::Left),
        ("Qté", Align::Right),
        ("Prix unitaire", Align::Right),
        ("Chiffre", Align::Right),
        ("Bénéfice", Align::Right),
    ]);

    for sale in page.items {
        let date = match sale.date {
            Some(date) => fmt.date(&date, DateStyle::Short),
            None => "-".to_string(),
        };
        let decimals = if sale.quantity.fract() == 0.0 { 0 } else { 2 };
        table.push(vec![
            date,
            truncate_text(product_label(sale), PRODUCT_COLUMN),
            fmt.number(sale.quantity, decimals),
            fmt.currency(sale.selling_price),
            fmt.currency(sale.selling_price * sale.quantity),
            fmt.currency(calculate_profit(
                sale.selling_price,
                sale.purchase_price,
                sale.quantity,
            )),
        ]);
    }

    let mut out = table.render();
    if page.items.is_empty() {
        out.push_str("Aucune vente ne correspond à la recherche.\n");
    }
    out.push_str(&format!(
        "Page {}/{} · {} vente(s)\n",
        page.page, page.total_pages, page.total_items
    ));
    out
}

/// Totals and averages of the whole period.
pub fn render_summary(report: &SalesReport, fmt: &Formatter) -> String {
    let stats = report.statistics();
    let mut out = String::new();
    out.push_str(&format!("Chiffre d'affaires : {}\n", fmt.currency(stats.total_revenue())));
    out.push_str(&format!("Bénéfice total     : {}\n", fmt.currency(stats.total_profit())));
    out.push_str(&format!("Bénéfice moyen     : {}\n", fmt.currency(stats.average_profit())));
    out.push_str(&format!("Panier moyen       : {}\n", fmt.currency(stats.average_revenue())));
    out.push_str(&format!(
        "Marge              : {}\n",
        fmt.percentage(stats.margin() / 100.0, 1)
    ));
    if report.skipped() > 0 {
        out.push_str(&format!("Lignes ignorées    : {}\n", report.skipped()));
    }
    out
}

/// Pricing sheet of every product plus the stock value.
pub fn render_pricing(products: &[Product], desired_margin: f64, fmt: &Formatter) -> String {
    let mut table = Table::new(&[
        ("Produit", Align::Left),
        ("Coût complet", Align::Right),
        ("Prix conseillé", Align::Right),
        ("Prix actuel", Align::Right),
        ("Marge", Align::Right),
    ]);
    for product in products {
        let pricing = ProductPricing::for_product(product, desired_margin);
        table.push(vec![
            truncate_text(&product.name, PRODUCT_COLUMN),
            fmt.currency(pricing.total_cost),
            fmt.currency(pricing.recommended_price),
            fmt.currency(product.selling_price),
            fmt.percentage(pricing.actual_margin / 100.0, 1),
        ]);
    }

    let mut out = table.render();
    out.push_str(&format!(
        "Valeur du stock : {}\n",
        fmt.currency(calculate_inventory_value(products))
    ));
    out
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Plain-text table whose columns grow to their widest cell.
struct Table {
    columns: Vec<(&'static str, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(columns: &[(&'static str, Align)]) -> Self {
        Table {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, (title, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| display_width(cell))
                    .fold(display_width(title), usize::max)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<&str> = self.columns.iter().map(|(title, _)| *title).collect();
        self.render_line(&mut out, &header, &widths);
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.render_line(&mut out, &cells, &widths);
        }
        out
    }

    fn render_line(&self, out: &mut String, cells: &[&str], widths: &[usize]) {
        let columns = cells.iter().zip(widths).zip(&self.columns);
        for (i, ((cell, width), (_, align))) in columns.enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            let fill = " ".repeat(width.saturating_sub(display_width(cell)));
            match align {
                Align::Left => {
                    out.push_str(cell);
                    out.push_str(&fill);
                }
                Align::Right => {
                    out.push_str(&fill);
                    out.push_str(cell);
                }
            }
        }
        out.push('\n');
    }
}

/// Terminal columns taken by `text`; combining marks take none.
fn display_width(text: &str) -> usize {
    text.chars().filter(|c| !is_combining_mark(*c)).count()
}

fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use comptoir_core::{paginate, Currency, Locale};

    fn sale(id: &str, name: &str, selling: f64, purchase: f64, quantity: f64) -> Sale {
        Sale {
            id: id.into(),
            product_id: format!("p-{id}"),
            product_name: Some(name.into()),
            client_id: None,
            selling_price: selling,
            purchase_price: purchase,
            quantity,
            profit: None,
            date: None,
        }
    }

    fn fixture() -> Vec<Sale> {
        vec![
            sale("1", "Savon d'Alep", 100.0, 60.0, 2.0),
            sale("2", "Bougie parfumée", 200.0, 120.0, 1.0),
            sale("3", "Savon noir", 10.0, 4.0, 5.0),
            sale("4", "Cassé", f64::NAN, 1.0, 1.0),
            sale("5", "Offert", 10.0, 5.0, 0.0),
        ]
    }

    fn us() -> Formatter {
        Formatter::new(Locale::EnUs, Currency::Usd)
    }

    #[test]
    fn test_invalid_lines_are_skipped() {
        let report = SalesReport::new(fixture());
        assert_eq!(report.len(), 3);
        assert_eq!(report.skipped(), 2);

        let stats = report.statistics();
        assert_eq!(stats.total_profit(), 190.0);
        assert_eq!(stats.total_revenue(), 450.0);
    }

    #[test]
    fn test_select_filters_then_sorts() {
        let report = SalesReport::new(fixture());
        let query = ReportQuery {
            text: "savon".into(),
            sort: Some(SortField::Profit),
            order: SortOrder::Desc,
            min_chars: 3,
        };

        let ids: Vec<&str> = report.select(&query).into_iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_short_query_keeps_everything_in_input_order() {
        let report = SalesReport::new(fixture());
        let query = ReportQuery {
            text: "sa".into(),
            min_chars: 3,
            ..ReportQuery::default()
        };

        let ids: Vec<&str> = report.select(&query).into_iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_by_product_name() {
        let report = SalesReport::new(fixture());
        let query = ReportQuery {
            sort: Some(SortField::Product),
            ..ReportQuery::default()
        };

        let names: Vec<&str> = report.select(&query).into_iter().map(product_label).collect();
        assert_eq!(names, vec!["Bougie parfumée", "Savon d'Alep", "Savon noir"]);
    }

    #[test]
    fn test_render_page() {
        let mut sales = vec![sale("1", "Savon d'Alep", 100.0, 60.0, 2.0)];
        sales[0].date = Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
        let report = SalesReport::new(sales);
        let selected = report.select(&ReportQuery::default());
        let page = paginate(&selected, 20, 1);

        let text = render_page(&page, &us());
        assert!(text.contains("01/15/2024"));
        assert!(text.contains("$200.00"));
        assert!(text.contains("$80.00"));
        assert!(text.ends_with("Page 1/1 · 1 vente(s)\n"));
    }

    fn table_lines(text: &str) -> Vec<&str> {
        text.lines()
            .take_while(|line| !line.starts_with("Page ") && !line.starts_with("Valeur "))
            .collect()
    }

    #[test]
    fn test_render_page_columns_line_up() {
        let sales = vec![
            // decomposed accent: e + U+0301
            sale("1", "Bouge\u{301}e", 12.5, 10.0, 3.0),
            sale("2", "Crème", 1_234_567.0, 1.0, 120.0),
            sale("3", "Thé vert", 4.0, 2.0, 1.5),
        ];
        let report = SalesReport::new(sales);
        let selected = report.select(&ReportQuery::default());
        let page = paginate(&selected, 20, 1);

        for fmt in [us(), Formatter::default()] {
            let text = render_page(&page, &fmt);
            let lines = table_lines(&text);
            assert_eq!(lines.len(), 4);
            let width = display_width(lines[0]);
            for line in &lines {
                assert_eq!(display_width(line), width, "{text}");
            }
            // the quantity column ends where its header ends
            let qty_end = lines[0].find("Qté").unwrap() + "Qté".len();
            let header_cols = display_width(&lines[0][..qty_end]);
            for line in &lines[1..] {
                let prefix: String = line
                    .chars()
                    .filter(|c| !is_combining_mark(*c))
                    .take(header_cols)
                    .collect();
                assert!(!prefix.ends_with(' '), "{text}");
            }
        }
    }

    #[test]
    fn test_render_pricing_columns_line_up() {
        let product = |name: &str, selling: f64| Product {
            id: "p".into(),
            name: name.into(),
            description: None,
            category: None,
            purchase_price: 100.0,
            selling_price: selling,
            customs_tax: 0.0,
            vat: 20.0,
            other_fees: 0.0,
            stock: 1,
        };
        let products = vec![
            product("Savon", 150.0),
            product("Huile d'argan bio extra vierge", 9_999_999.0),
        ];

        let text = render_pricing(&products, 30.0, &Formatter::default());
        let lines = table_lines(&text);
        assert_eq!(lines.len(), 3);
        let width = display_width(lines[0]);
        assert!(lines.iter().all(|line| display_width(line) == width), "{text}");
    }

    #[test]
    fn test_display_width_ignores_combining_marks() {
        assert_eq!(display_width("Qté"), 3);
        assert_eq!(display_width("Qte\u{301}"), 3);
        assert_eq!(display_width("1\u{202f}234,00\u{a0}€"), 10);
    }

    #[test]
    fn test_render_empty_page() {
        let report = SalesReport::new(Vec::new());
        let selected = report.select(&ReportQuery::default());
        let page = paginate(&selected, 20, 1);

        let text = render_page(&page, &Formatter::default());
        assert!(text.contains("Aucune vente"));
        assert!(text.contains("Page 1/1 · 0 vente(s)"));
    }

    #[test]
    fn test_render_summary() {
        let report = SalesReport::new(fixture());
        let text = render_summary(&report, &us());
        assert!(text.contains("$450.00"));
        assert!(text.contains("$190.00"));
        assert!(text.contains("Lignes ignorées    : 2"));

        let euros = render_summary(&report, &Formatter::default());
        assert!(euros.contains("190,00\u{a0}€"));
    }

    #[test]
    fn test_render_pricing() {
        let products = vec![Product {
            id: "p1".into(),
            name: "Savon".into(),
            description: None,
            category: None,
            purchase_price: 100.0,
            selling_price: 150.0,
            customs_tax: 10.0,
            vat: 20.0,
            other_fees: 5.0,
            stock: 3,
        }];

        let text = render_pricing(&products, 30.0, &us());
        assert!(text.contains("$135.00"));
        assert!(text.contains("$175.50"));
        assert!(text.contains("Valeur du stock : $300.00"));
    }
}
