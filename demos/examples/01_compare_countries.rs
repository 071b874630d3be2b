use std::sync::Arc;

use outbreak::{ChartMode, Dashboard, MetricKey, Outbreak, Phase};
use outbreak_core::format::{format_compact, format_number, format_percentage};
use outbreak_demos::common::{get_connector, selection_of};

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: Option<u64>) -> Option<f64> {
    whole.filter(|w| *w > 0).map(|w| part as f64 / w as f64)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Setup the orchestrator and a dashboard over it.
    let outbreak = Outbreak::builder()
        .with_connector(get_connector()?)
        .history_days(365)
        .build()?;
    let dashboard = Dashboard::new(Arc::new(outbreak));

    // 2. Select the countries to compare and wait for the batch.
    let selection = selection_of(&[("France", "FR"), ("Germany", "DE"), ("Italy", "IT")])?;
    println!("Loading {} countries...", selection.len());
    dashboard.select(selection).await;
    let state = dashboard.settled().await;
    if let Some(msg) = &state.error_message {
        println!("warning: {msg}");
    }
    if state.phase == Phase::Failure {
        return Ok(());
    }

    // 3. Print the snapshots in a comparison table.
    println!("\n## Snapshot Comparison");
    println!(
        "{:<15} | {:>14} | {:>12} | {:>10} | {:>12}",
        "Country", "Cases", "Deaths", "Fatality", "Vaccinations"
    );
    println!("{:-<16}|{:-<16}|{:-<14}|{:-<12}|{:-<13}", "", "", "", "", "");
    for s in &state.snapshots {
        println!(
            "{:<15} | {:>14} | {:>12} | {:>10} | {:>12}",
            s.country,
            format_number(Some(s.cases)),
            format_number(Some(s.deaths)),
            format_percentage(ratio(s.deaths, Some(s.cases)), 2),
            format_compact(s.vaccinations),
        );
    }
    if let Some(summary) = state.summary() {
        println!(
            "\nTotal cases: {} (average {} per country)",
            format_number(Some(summary.total_cases)),
            format_compact(Some(summary.average_cases)),
        );
    }

    // 4. Rank by deaths.
    dashboard.set_selected_metric(MetricKey::Deaths);
    let bars = dashboard.comparison_chart();
    println!("\n## Ranking: {}", bars.label);
    for (i, bar) in bars.ranking.iter().enumerate() {
        println!("{}. {:<15} {}", i + 1, bar.country, format_number(Some(bar.value)));
    }

    // 5. Weekly new cases over the last few weeks.
    dashboard.set_selected_metric(MetricKey::Cases);
    let trend = dashboard.trend_chart(ChartMode::Daily);
    println!("\n## Weekly new cases (last 4 weeks)");
    let skip = trend.labels.len().saturating_sub(4);
    for (week, label) in trend.labels.iter().enumerate().skip(skip) {
        let row: Vec<String> = trend
            .datasets
            .iter()
            .map(|d| format!("{}={}", d.code, format_compact(d.values.get(week).copied())))
            .collect();
        println!("{label}: {}", row.join(", "));
    }

    Ok(())
}
