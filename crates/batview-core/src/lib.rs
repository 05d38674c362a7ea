// Library root for the stat store, aggregation engine, chart model,
// configuration, and dataset loading.

pub mod chart;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod stats;
