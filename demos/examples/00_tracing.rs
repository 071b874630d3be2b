use std::sync::Arc;

use outbreak::{Dashboard, Outbreak};
use outbreak_demos::common::{get_connector, selection_of};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,outbreak=trace,outbreak_disease_sh=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Create connector (mock in CI when OUTBREAK_DEMOS_USE_MOCK is set) and build router
    let connector = get_connector()?;
    let outbreak = Outbreak::builder()
        .with_connector(connector)
        .history_days(90)
        .build()?;

    // Catalog
    let _ = outbreak.countries().await?;

    // Worldwide history
    let _ = outbreak.global_history(30).await?;

    // One dashboard batch
    let dashboard = Dashboard::new(Arc::new(outbreak));
    dashboard
        .select(selection_of(&[("France", "FR"), ("Japan", "JP")])?)
        .await;
    let state = dashboard.settled().await;
    tracing::info!(phase = ?state.phase, snapshots = state.snapshots.len(), "batch settled");

    Ok(())
}
