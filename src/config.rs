use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_FILE: &str = "GDOS-10-9-1-28.json";

/// Compare metrics across categories and time.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gdos-dashboard", version, about)]
pub struct Config {
    /// JSON file holding an array of records
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Window title
    #[arg(long, default_value = "GDOS Data Visualization Dashboard")]
    pub title: String,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}
