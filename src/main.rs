//! Dashboard entry point.
//!
//! Loads configuration, fetches all three backend endpoints once, and
//! prints the shaped tables: summary counters, the first page of routes,
//! the detailed statistics grid, and the sample quota grid. A failed
//! endpoint prints an inline error line; the others still render.
//!
//! `--verify` runs the live endpoint verification report instead.

use std::error::Error;
use std::path::Path;
use std::process;

use dmv_dashboard::analysis::aggregate;
use dmv_dashboard::config::load_config;
use dmv_dashboard::dashboard::DashboardState;
use dmv_dashboard::logging::{self, Endpoint, LogLevel};
use dmv_dashboard::render::{self, GridRow};
use dmv_dashboard::{ingest, verify};

const CONFIG_PATH: &str = "dashboard.toml";

fn main() {
    if let Err(e) = run() {
        eprintln!("Fatal: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let config = load_config(Path::new(CONFIG_PATH))?;
    logging::init_logger(
        LogLevel::from_name(&config.log_level),
        config.log_file.as_deref(),
    );
    logging::info(
        Endpoint::System,
        &format!("Starting dashboard against {}", config.api_base_url),
    );

    if std::env::args().any(|arg| arg == "--verify") {
        let report = verify::run_full_verification(&config.api_base_url)?;
        verify::print_summary(&report);
        return Ok(());
    }

    let client = ingest::build_client(config.timeout)?;
    let mut state = DashboardState::default();
    state.refresh(&client, &config.api_base_url);

    print_route_table(&state);
    print_statistics(&state);
    print_samples(&state);

    Ok(())
}

fn print_route_table(state: &DashboardState) {
    println!("═══════════════════════════════════════════════════════════");
    println!("公路客運路線");
    println!("═══════════════════════════════════════════════════════════");

    if let Some(err) = state.routes_slot.error() {
        println!("{}", render::error_line("路線資料", err));
        return;
    }

    let summary = state.store.summary();
    println!(
        "共 {} 條路線（一般公路 {}、國道客運 {}），{} 個監理所",
        summary.total, summary.local_routes, summary.hwy_routes, summary.districts
    );

    let rows = render::route_rows(state.current_page_records());
    if rows.is_empty() {
        println!("{}", render::NO_MATCH_MESSAGE);
        return;
    }

    for row in &rows {
        println!(
            "{:<10} {:<6} {:<14} {:<8} {:<24} {:>10} {:>10} {:>6} {:>6} {:>6}",
            row.district,
            row.route_type,
            row.operator,
            row.route_number,
            row.route_name,
            row.distance_outbound,
            row.distance_return,
            row.frequency,
            row.vehicle_count,
            row.stops_outbound
        );
    }

    if let Some(window) = state.nav_window() {
        println!(
            "第 {} 頁 / 共 {} 頁  (頁籤 {}-{})",
            state.page.current_page,
            state.page.page_count(),
            window.first,
            window.last
        );
    }
}

fn print_grid(rows: &[GridRow]) {
    for row in rows {
        let district = row
            .district
            .as_ref()
            .map(|(label, _)| label.as_str())
            .unwrap_or("");
        let cells: Vec<String> = row.cells.iter().map(|c| format!("{:>6}", c)).collect();
        println!("{:<14} {:<16} {}", district, row.label, cells.join(" "));
    }
}

fn print_statistics(state: &DashboardState) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("各監理所路線統計");
    println!("═══════════════════════════════════════════════════════════");

    match state.statistics_slot.ready() {
        Some(stats) => {
            let table = aggregate::group(&stats.by_district);
            print_grid(&render::stat_grid(&table));
        }
        None => {
            if let Some(err) = state.statistics_slot.error() {
                println!("{}", render::error_line("統計資料", err));
            }
            // Derive the grid locally when the route listing is available.
            if !state.store.full().is_empty() {
                let table = aggregate::group(&aggregate::route_counts(state.store.full()));
                print_grid(&render::stat_grid(&table));
            }
        }
    }
}

fn print_samples(state: &DashboardState) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("車輛抽樣數量表");
    println!("═══════════════════════════════════════════════════════════");

    match state.samples_slot.ready() {
        Some(samples) => {
            let table = aggregate::group(&samples.by_district);
            print_grid(&render::sample_grid(&table));
        }
        None => {
            if let Some(err) = state.samples_slot.error() {
                println!("{}", render::error_line("樣本表", err));
            }
            if !state.store.full().is_empty() {
                let table = aggregate::group(&aggregate::sample_quotas(state.store.full()));
                print_grid(&render::sample_grid(&table));
            }
        }
    }
}
