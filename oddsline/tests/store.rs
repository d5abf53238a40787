mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use helpers::{MockConnector, entry, key, s};
use oddsline::{OddslineConnector, OddslineError, SeriesStore};
use tokio::time::Duration;

#[tokio::test]
async fn request_normalizes_and_memoizes() {
    let conn = MockConnector::builder()
        .returns_series(&[(
            "a",
            s(&[(600, 0.3), (0, 0.1), (600, 0.9), (300, f64::NAN), (1200, 0.5)]),
        )])
        .build();
    let provider = conn.as_series_provider().expect("series provider");
    let store = SeriesStore::new();

    let first = store.request(provider, &entry("a"), 0, 10).await.expect("ok");
    assert_eq!(&first[..], &s(&[(0, 0.1), (600, 0.3), (1200, 0.5)])[..]);

    let second = store.request(provider, &entry("a"), 0, 10).await.expect("ok");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(conn.series_calls_for("a"), 1);
    assert_eq!(store.len().await, 1);
    assert!(store.contains(&key("a")).await);
}

#[tokio::test]
async fn request_passes_since_and_fidelity() {
    let conn = MockConnector::builder()
        .returns_series(&[("tok-1", s(&[(0, 0.1)]))])
        .build();
    let provider = conn.as_series_provider().expect("series provider");
    let store = SeriesStore::new();

    let e = entry("a").source_id("tok-1");
    store.request(provider, &e, 1_700_000_000, 5).await.expect("ok");
    assert_eq!(
        conn.series_calls(),
        vec![("tok-1".to_string(), 1_700_000_000, 5)]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_share_one_fetch() {
    let conn = MockConnector::builder()
        .delay(Duration::from_millis(50))
        .returns_series(&[("a", s(&[(0, 0.1)]))])
        .build();
    let store = Arc::new(SeriesStore::new());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let conn = Arc::clone(&conn);
        handles.push(tokio::spawn(async move {
            let provider = conn.as_series_provider().expect("series provider");
            store.request(provider, &entry("a"), 0, 10).await
        }));
    }
    for h in handles {
        let got = h.await.expect("join").expect("ok");
        assert_eq!(got.len(), 1);
    }
    assert_eq!(conn.series_calls_for("a"), 1);
}

#[tokio::test]
async fn failure_leaves_key_empty_and_retry_refetches() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&attempts);
    let conn = MockConnector::builder()
        .with_series_fn(move |_, _, _| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(OddslineError::connector("mock", "503"))
            } else {
                Ok(s(&[(0, 0.4)]))
            }
        })
        .build();
    let provider = conn.as_series_provider().expect("series provider");
    let store = SeriesStore::new();

    let err = store
        .request(provider, &entry("a"), 0, 10)
        .await
        .expect_err("first attempt fails");
    assert_eq!(err.fetch_target(), Some("a"));
    assert!(matches!(err, OddslineError::FetchFailed { .. }));
    assert!(store.is_empty().await);
    assert!(store.get(&key("a")).await.is_none());

    let got = store.request(provider, &entry("a"), 0, 10).await.expect("retry");
    assert_eq!(&got[..], &s(&[(0, 0.4)])[..]);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn distinct_keys_do_not_share_entries() {
    let conn = MockConnector::builder()
        .returns_series(&[("a", s(&[(0, 0.2)])), ("b", s(&[(0, 0.8)]))])
        .build();
    let provider = conn.as_series_provider().expect("series provider");
    let store = SeriesStore::new();

    let entry_a = entry("a");
    let entry_b = entry("b");
    let (a, b) = tokio::join!(
        store.request(provider, &entry_a, 0, 10),
        store.request(provider, &entry_b, 0, 10),
    );
    assert_eq!(a.expect("a")[0].p, 0.2);
    assert_eq!(b.expect("b")[0].p, 0.8);
    assert_eq!(store.len().await, 2);
}
