use oddsline::Session;
use oddsline_demos::common::{btc, get_connector, print_rows, side};
use oddsline_mock::{BTC_70K_YES, ETH_FLIP_YES};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::builder()
        .with_connector(get_connector())
        .secondary(btc()?)
        .build()?;

    let view = session
        .select(side("btc70k", "BTC > 70k", BTC_70K_YES)?)
        .await?;
    println!("coverage after first market:  {:?}", view.coverage);

    // The second market starts two hours later and ends two hours later, so
    // only the right-hand delta of the overlay is fetched.
    let view = session
        .select(side("ethflip", "ETH flips", ETH_FLIP_YES)?)
        .await?;
    println!("coverage after second market: {:?}", view.coverage);

    // Switching the overlay invalidates the cache and fetches the whole span.
    let eth = oddsline::SecondaryKind::new("ETHUSDT")?.with_label("ETH")?;
    let view = session.set_secondary(Some(eth)).await?;
    println!("coverage after switching kind: {:?}", view.coverage);

    print_rows(&view, 8);
    Ok(())
}
