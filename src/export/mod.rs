//! Export utilities for round histories

pub mod history_csv;

pub use history_csv::HistoryCsvObserver;
