use oddsline_core::Sample;

/// Candle spacing of the fixture klines, in seconds.
pub const KLINE_STEP_SECS: i64 = 300;

fn base_price(symbol: &str) -> Option<f64> {
    match symbol {
        "BTCUSDT" => Some(69_000.0),
        "ETHUSDT" => Some(2_450.0),
        "SOLUSDT" => Some(165.0),
        _ => None,
    }
}

/// Close price of the candle opening at `t` (a multiple of the step).
fn close_at(base: f64, t: i64) -> f64 {
    // Two-hour saw wave of +-1% around the base price.
    let phase = t.div_euclid(KLINE_STEP_SECS).rem_euclid(24) - 12;
    let p = base * (1.0 + 0.01 * phase as f64 / 12.0);
    (p * 100.0).round() / 100.0
}

/// Up to `limit` candles for `symbol` with `start <= t <= end`, ascending.
pub fn page(symbol: &str, start: i64, end: i64, limit: usize) -> Option<Vec<Sample>> {
    let base = base_price(symbol)?;
    let first = start.div_euclid(KLINE_STEP_SECS) * KLINE_STEP_SECS;
    let first = if first < start { first + KLINE_STEP_SECS } else { first };
    let mut out = Vec::new();
    let mut t = first;
    while t <= end && out.len() < limit {
        out.push(Sample::new(t, close_at(base, t)));
        t += KLINE_STEP_SECS;
    }
    Some(out)
}
