// attend-client/examples/employee_dashboard.rs
// Log in, optionally check in, and print this month's attendance

use attend_client::{AttendanceClient, ClientConfig, Outcome, Route, RoleRoutes};
use shared::{LoginRequest, MonthFilter, TeamFilters};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    attend_client::logger::init_logger(&log_level, false, None)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <email> <password> [--check-in]", args[0]);
        println!("  Example: {} a@b.com secret --check-in", args[0]);
        return Ok(());
    }

    let config = ClientConfig::from_env();
    let client = AttendanceClient::from_config(&config)?;
    let session = client.session();

    if !session.is_authenticated() {
        if let Outcome::Rejected(msg) = session.login(&LoginRequest::new(&args[1], &args[2])).await {
            tracing::error!("Login failed: {}", msg);
            return Ok(());
        }
    }

    let Some(identity) = session.identity() else {
        return Ok(());
    };
    tracing::info!("Logged in as {} ({})", identity.name, identity.role);
    let nav: Vec<&str> = identity.role.nav_routes().iter().map(Route::path).collect();
    tracing::info!("Navigation: {}", nav.join(" | "));

    if identity.is_manager() {
        let attendance = client.attendance();
        tokio::join!(
            attendance.fetch_manager_overview(),
            attendance.fetch_team_records(TeamFilters::today())
        );
        let state = attendance.snapshot();
        if let Some(overview) = &state.overview {
            tracing::info!(
                "Team today: {} employees, {} present, {} late, {} absent",
                overview.total_employees,
                overview.present,
                overview.late,
                overview.absent
            );
        }
        for record in &state.team_records {
            let name = record.owner.as_ref().map(|o| o.name.as_str()).unwrap_or("?");
            tracing::info!("  {:<20} {:<9} {:.2}h", name, record.status.as_str(), record.total_hours);
        }
        return Ok(());
    }

    let attendance = client.attendance();
    if args.iter().any(|a| a == "--check-in") {
        match attendance.check_in().await {
            Outcome::Fulfilled => {
                let msg = attendance.snapshot().message.unwrap_or_default();
                tracing::info!("{}", msg);
            }
            Outcome::Rejected(msg) => tracing::warn!("Check-in: {}", msg),
            Outcome::Superseded => {}
        }
    }

    let month = MonthFilter::current();
    tokio::join!(attendance.fetch_summary(), attendance.fetch_history(Some(month)));

    let state = attendance.snapshot();
    let summary = &state.summary;
    tracing::info!(
        "Summary: {} present, {} late, {} half-day, {} absent, {:.1}h",
        summary.present,
        summary.late,
        summary.half_day,
        summary.absent,
        summary.total_hours
    );
    tracing::info!("History for {}: {} records", month, state.history.len());
    for record in &state.history {
        tracing::info!("  {} {:<9} {:.2}h", record.date, record.status.as_str(), record.total_hours);
    }

    Ok(())
}
