use oddsline::Session;
use oddsline_demos::common::{btc, get_connector, side};
use oddsline_mock::{BTC_70K_NO, BTC_70K_YES};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,oddsline=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let session = Session::builder()
        .with_connector(get_connector())
        .secondary(btc()?)
        .build()?;

    // Select both sides; the second select is a cache hit for the overlay.
    let _ = session.select(side("yes", "BTC > 70k (Yes)", BTC_70K_YES)?).await?;
    let _ = session.select(side("no", "BTC > 70k (No)", BTC_70K_NO)?).await?;

    // A forced failure rolls back only that selection.
    let _ = session.select(side("broken", "Broken", "FAIL")?).await;

    tracing::info!(keys = ?session.selected_keys().await, "done");
    Ok(())
}
