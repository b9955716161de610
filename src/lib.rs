//! Native dashboard over a JSON table of observations: category and date
//! filters, a value trend, per-category totals, a correlation scatter and
//! the raw rows.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
pub mod views;
