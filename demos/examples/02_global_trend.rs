use outbreak::{ChartMode, MetricKey, Outbreak};
use outbreak_core::build_trend_chart;
use outbreak_core::format::{format_compact, format_date};
use outbreak_demos::common::get_connector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let outbreak = Outbreak::builder().with_connector(get_connector()?).build()?;

    let global = outbreak.global_history(56).await?;
    if let (Some(first), Some(last)) = (global.points.first(), global.points.last()) {
        println!(
            "Worldwide, {} to {}",
            format_date(first.date, true),
            format_date(last.date, true)
        );
    }

    let chart = build_trend_chart(&[global], MetricKey::Cases, ChartMode::Daily);
    let Some(line) = chart.datasets.first() else {
        println!("no data");
        return Ok(());
    };
    for (label, value) in chart.labels.iter().zip(&line.values) {
        println!("{label:<26} {:>8}", format_compact(Some(*value)));
    }
    Ok(())
}
