use oddsline::Session;
use oddsline_demos::common::{get_connector, print_rows, side};
use oddsline_mock::{BTC_70K_NO, BTC_70K_YES};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::builder().with_connector(get_connector()).build()?;

    session
        .select(side("yes", "BTC > 70k (Yes)", BTC_70K_YES)?)
        .await?;
    let view = session
        .select(side("no", "BTC > 70k (No)", BTC_70K_NO)?)
        .await?;

    // Both sides of a binary market should sum to ~1 at every aligned timestamp.
    print_rows(&view, 12);

    let worst = view
        .rows
        .iter()
        .filter_map(oddsline::AlignedRow::sum)
        .map(|s| (s - 1.0).abs())
        .fold(0.0_f64, f64::max);
    println!("max |sum - 1| = {worst:.6}");
    Ok(())
}
