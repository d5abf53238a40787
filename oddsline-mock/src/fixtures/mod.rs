pub mod klines;
pub mod markets;
