use oddsline_core::{AlignConfig, SUM_COLUMN, Sample, SecondaryOverlay, SeriesKey, build_rows};

fn key(s: &str) -> SeriesKey {
    SeriesKey::new(s).unwrap()
}

fn series(pts: &[(i64, f64)]) -> Vec<Sample> {
    pts.iter().copied().map(Sample::from).collect()
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

#[test]
fn sum_requires_every_selected_series() {
    let (ka, kb) = (key("A"), key("B"));
    let a = series(&[(10, 0.3), (20, 0.4)]);
    let b = series(&[(10, 0.6)]);
    // Tolerance smaller than the 10s gap so B is absent at t=20.
    let cfg = AlignConfig {
        primary_tolerance_secs: 5,
        secondary_tolerance_secs: 5,
    };

    let rows = build_rows([(&ka, a.as_slice()), (&kb, b.as_slice())], None, &cfg);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].timestamp, 10);
    assert!(approx(rows[0].sum(), 0.9));
    assert_eq!(rows[1].timestamp, 20);
    assert_eq!(rows[1].get("A"), Some(0.4));
    assert_eq!(rows[1].get("B"), None);
    assert_eq!(rows[1].sum(), None);
}

#[test]
fn single_series_never_has_sum() {
    let ka = key("A");
    let a = series(&[(0, 0.2), (600, 0.25)]);
    let rows = build_rows([(&ka, a.as_slice())], None, &AlignConfig::default());
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.get(SUM_COLUMN).is_none()));
}

#[test]
fn two_sides_of_one_market_sum_to_one() {
    let (ka, kb) = (key("A"), key("B"));
    let a = series(&[(0, 0.2), (600, 0.25)]);
    let b = series(&[(0, 0.8), (600, 0.75)]);
    let rows = build_rows(
        [(&ka, a.as_slice()), (&kb, b.as_slice())],
        None,
        &AlignConfig::default(),
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("A"), Some(0.2));
    assert_eq!(rows[0].get("B"), Some(0.8));
    assert!(approx(rows[0].sum(), 1.0));
    assert_eq!(rows[1].timestamp, 600);
    assert!(approx(rows[1].sum(), 1.0));
}

#[test]
fn nearby_timestamps_are_matched_within_primary_tolerance() {
    let (ka, kb) = (key("A"), key("B"));
    let a = series(&[(0, 0.5)]);
    let b = series(&[(200, 0.4)]);
    let rows = build_rows(
        [(&ka, a.as_slice()), (&kb, b.as_slice())],
        None,
        &AlignConfig::default(),
    );
    // Both timestamps become rows and each sees the other within 270s.
    assert_eq!(rows.len(), 2);
    for r in &rows {
        assert!(approx(r.sum(), 0.9));
    }
}

#[test]
fn secondary_uses_its_own_tighter_tolerance() {
    let ka = key("A");
    let a = series(&[(0, 0.5), (600, 0.6)]);
    let btc = series(&[(0, 64_000.0), (300, 64_100.0), (600, 64_200.0), (900, 64_300.0)]);
    let rows = build_rows(
        [(&ka, a.as_slice())],
        Some(SecondaryOverlay {
            label: "BTC",
            series: &btc,
        }),
        &AlignConfig::default(),
    );
    let ts: Vec<i64> = rows.iter().map(|r| r.timestamp).collect();
    assert_eq!(ts, vec![0, 300, 600, 900]);
    assert_eq!(rows[1].get("BTC"), Some(64_100.0));
    // 300 is 300s away from both primary samples: beyond 270s.
    assert_eq!(rows[1].get("A"), None);
    assert_eq!(rows[3].get("A"), None);
    assert_eq!(rows[2].get("A"), Some(0.6));
}

#[test]
fn secondary_outside_tolerance_is_absent() {
    let ka = key("A");
    let a = series(&[(1_000, 0.5)]);
    let btc = series(&[(850, 1.0)]);
    let rows = build_rows(
        [(&ka, a.as_slice())],
        Some(SecondaryOverlay {
            label: "BTC",
            series: &btc,
        }),
        &AlignConfig::default(),
    );
    assert_eq!(rows.len(), 2);
    let at_1000 = rows.iter().find(|r| r.timestamp == 1_000).unwrap();
    assert_eq!(at_1000.get("BTC"), None);
    let at_850 = rows.iter().find(|r| r.timestamp == 850).unwrap();
    assert_eq!(at_850.get("A"), Some(0.5));
    assert_eq!(at_850.get("BTC"), Some(1.0));
}

#[test]
fn no_inputs_produce_no_rows() {
    let rows = build_rows(std::iter::empty::<(&SeriesKey, &[Sample])>(), None, &AlignConfig::default());
    assert!(rows.is_empty());
}
