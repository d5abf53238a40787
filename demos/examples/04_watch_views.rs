use std::sync::Arc;

use oddsline::{Phase, Session};
use oddsline_demos::common::{get_connector, side};
use oddsline_mock::{BTC_70K_NO, BTC_70K_YES};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = Arc::new(Session::builder().with_connector(get_connector()).build()?);
    let mut rx = session.subscribe();

    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let view = rx.borrow_and_update().clone();
            let phase = match &view.phase {
                Phase::Idle => "idle".to_string(),
                Phase::Loading(keys) => format!("loading {keys:?}"),
                Phase::Ready => "ready".to_string(),
            };
            println!(
                "generation {:>2}: {phase}, {} rows, error: {:?}",
                view.generation,
                view.rows.len(),
                view.last_error
            );
        }
    });

    let yes = side("yes", "Yes", BTC_70K_YES)?;
    let no = side("no", "No", BTC_70K_NO)?;
    let (yes, no) = tokio::join!(session.select(yes), session.select(no));
    yes?;
    no?;
    if let Err(e) = session.select(side("missing", "Missing", "unknown-token")?).await {
        println!("select failed: {e}");
    }
    session.deselect(&oddsline::SeriesKey::new("yes")?).await;

    drop(session);
    watcher.await?;
    Ok(())
}
