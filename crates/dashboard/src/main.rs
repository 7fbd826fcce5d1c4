use dotenvy::dotenv;
use tracing::{debug, error, info, warn};

use common::error::DealError;
use common::logger;
use storage::{ReportWriter, to_json_bytes};
use strategy::{build_view, chart_series};

use crate::config::DashboardConfig;
use crate::services::session::SessionCache;

mod config;
mod services;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let mut config = DashboardConfig::from_env();
    let mut session = SessionCache::new();
    debug!("Session {} starting with {:?}", session.id(), config.source);

    let book = match session.get(&config.source).await {
        Ok(book) => book,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };

    if book.is_empty() {
        let notice = DealError::EmptyDataset;
        warn!("{}", notice);
        println!("{}", notice);
    }

    let max_buy_days = book.table.max_buy_days();
    if config.filter.min_buy_days > max_buy_days {
        info!(
            "MIN_BUY_DAYS {} exceeds the table maximum, using {}",
            config.filter.min_buy_days, max_buy_days
        );
        config.filter.min_buy_days = max_buy_days;
    }

    let view = build_view(&book.table, &config.filter, config.view_size);
    info!(
        "{} of {} symbols in view ({})",
        view.len(),
        book.table.len(),
        config.view_size
    );

    if config.json {
        println!("{}", String::from_utf8_lossy(&to_json_bytes(&view)?));
    } else {
        println!("Smart Money Bulk Deal Dashboard");
        println!("{}", ui::controls_line(&config.filter, config.view_size, max_buy_days));
        println!();
        print!("{}", ui::table::render_table(&view));
        let chart = ui::chart::render_chart(&chart_series(&view, config.chart_top_n));
        if !chart.is_empty() {
            println!();
            print!("{}", chart);
        }
    }

    let written = ReportWriter::new(config.output_dir.clone()).write(&view)?;
    info!(
        "Report saved: {} / {}",
        written.csv_path.display(),
        written.xlsx_path.display()
    );

    println!();
    println!("{}", ui::DISCLAIMER);

    Ok(())
}
