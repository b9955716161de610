use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use gdos_dashboard::config::DEFAULT_DATA_FILE;
use gdos_dashboard::data::loader::parse_dataset;

#[derive(Serialize)]
struct SampleRow {
    category: &'static str,
    date: String,
    value: f64,
    units: i64,
    region: &'static str,
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

    // Fixed seed so the sample file is reproducible.
    let mut rng = StdRng::seed_from_u64(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    // (category, baseline, weekly growth)
    let categories = [
        ("Donations", 1200.0, 15.0),
        ("Volunteers", 300.0, 4.0),
        ("Events", 800.0, -6.0),
    ];
    let regions = ["North", "South", "East", "West"];

    let mut rows = Vec::new();
    for week in 0..52u64 {
        let date = start
            .checked_add_days(Days::new(week * 7))
            .context("date out of range")?;
        for (c, &(category, base, growth)) in categories.iter().enumerate() {
            let noise = base * rng.gen_range(-0.12..0.12);
            let value = (base + growth * week as f64 + noise).max(0.0);
            let units = (value / 25.0 + rng.gen_range(-4.0..4.0)).round().max(0.0) as i64;
            rows.push(SampleRow {
                category,
                date: date.format("%Y-%m-%d").to_string(),
                value: (value * 100.0).round() / 100.0,
                units,
                region: regions[(week as usize + c) % regions.len()],
            });
        }
    }

    let json = serde_json::to_string_pretty(&rows).context("serializing sample rows")?;
    let dataset = parse_dataset(&json).context("sample data does not load")?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} rows with columns {:?} to {output_path}",
        dataset.len(),
        dataset.column_names
    );
    Ok(())
}
