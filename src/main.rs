use analytics::AnalyticsEngine;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{init_tracing, load_config, Config, LogFormat};
use core_types::Year;
use dashboard::{selectors, DashboardContext, Figure};
use loader::SpreadsheetSource;
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the Global Superstore dashboard.
#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; it only feeds `SUPERSTORE__*` overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = init_tracing(&config.logging)?;

    let ctx = load_dashboard(&config)?;

    match cli.command {
        Commands::Serve(_) => {
            let (host, port) = config.server.bind_target();
            web_server::run_server(host, port, Arc::new(ctx)).await?;
        }
        Commands::Summary(args) => handle_summary(&ctx, &config, args.year)?,
        Commands::Chart(args) => handle_chart(&ctx, args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Interactive sales dashboard over the Global Superstore order table.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. A missing file means all defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides `data.path`: the spreadsheet (xlsx, xls, ods or csv) to load.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Overrides `data.sheet`.
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Overrides `logging.format`.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data and serve the dashboard over HTTP and WebSocket.
    Serve(ServeArgs),
    /// Print the aggregated views as tables.
    Summary(SummaryArgs),
    /// Write one chart as Plotly JSON.
    Chart(ChartArgs),
}

#[derive(Parser)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SummaryArgs {
    /// The year for the category tables. Defaults to the earliest year.
    #[arg(long)]
    year: Option<Year>,
}

#[derive(Parser)]
struct ChartArgs {
    #[arg(value_enum)]
    chart: ChartKind,

    /// Defaults to the earliest year. Ignored by `top-products`.
    #[arg(long)]
    year: Option<Year>,

    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKind {
    WorldMap,
    TopProducts,
    Category,
    SubCategory,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.data {
            config.data.path = path.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.data.sheet = sheet.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Commands::Serve(args) = &self.command {
            if let Some(host) = &args.host {
                config.server.host = host.clone();
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Reads the order table and materialises every view. Any bad row aborts
/// startup.
fn load_dashboard(config: &Config) -> Result<DashboardContext> {
    let source = SpreadsheetSource::new(&config.data.path, &config.data.sheet);
    let transactions = source
        .load()
        .with_context(|| format!("Failed to load orders from {}", config.data.path.display()))?;

    let engine = AnalyticsEngine::new(config.analytics.top_n)?;
    let ctx = DashboardContext::from_transactions(&engine, &transactions);
    tracing::info!(years = ?ctx.years(), "Dashboard ready.");
    Ok(ctx)
}

fn resolve_year(ctx: &DashboardContext, year: Option<Year>) -> Result<Year> {
    match year.or_else(|| ctx.initial_year()) {
        Some(year) => Ok(year),
        None => bail!("The dataset holds no years"),
    }
}

fn handle_summary(ctx: &DashboardContext, config: &Config, year: Option<Year>) -> Result<()> {
    let year = resolve_year(ctx, year)?;
    let views = ctx.views();

    let years: Vec<String> = ctx.years().iter().map(Year::to_string).collect();
    println!("Years: {}", years.join(", "));

    let mut products = Table::new();
    products
        .load_preset(UTF8_FULL)
        .set_header(vec!["Product", "Name", "Sales", "Profit", "Quantity"]);
    for product in views.products.iter().take(config.analytics.top_n) {
        products.add_row(vec![
            product.label(),
            product.product_name.clone(),
            product.sales.round_dp(2).to_string(),
            product.profit.round_dp(2).to_string(),
            product.quantity.to_string(),
        ]);
    }
    println!("\nTop {} products, all years", config.analytics.top_n);
    println!("{products}");

    for (title, rows) in [
        ("Category", &views.category_year),
        ("Sub-Category", &views.sub_category_year),
    ] {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![title, "Sales"]);
        for segment in selectors::segments_for_year(rows, year) {
            table.add_row(vec![segment.name, segment.sales.round_dp(2).to_string()]);
        }
        println!("\nSales by {} in {}", title.to_lowercase(), year);
        println!("{table}");
    }

    Ok(())
}

fn handle_chart(ctx: &DashboardContext, args: ChartArgs) -> Result<()> {
    let figure: Figure = match args.chart {
        ChartKind::TopProducts => ctx.top_products_bar(),
        ChartKind::WorldMap => ctx.world_map(resolve_year(ctx, args.year)?),
        ChartKind::Category => ctx.category_pie(resolve_year(ctx, args.year)?),
        ChartKind::SubCategory => ctx.sub_category_pie(resolve_year(ctx, args.year)?),
    };
    let json = serde_json::to_string_pretty(&figure)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote chart.");
        }
        None => println!("{json}"),
    }
    Ok(())
}
