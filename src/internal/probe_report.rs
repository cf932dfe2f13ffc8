#![allow(
    clippy::cast_precision_loss,
    clippy::arithmetic_side_effects,
    clippy::missing_docs_in_private_items
)]

use std::error::Error;

use log::info;
use plotters::prelude::*;
use probemap::{MAX_LOAD_FACTOR, MIN_LOAD_FACTOR, ProbeMode, ProbingHashTable, TableConfig};
use rand::Rng;

// Initial slot count of every measured table
const TABLE_SIZE: usize = 1 << 14;
// Load factors from MIN_LOAD_FACTOR to MAX_LOAD_FACTOR
const NUM_LOAD_FACTORS: usize = 8;
// Lookups of absent keys per measurement
const MISS_SAMPLES: usize = 1_000;

const MODES: [(ProbeMode, &str); 2] =
    [(ProbeMode::FullScan, "Full scan"), (ProbeMode::EarlyExit, "Early exit")];

const COLORS: [RGBColor; 2] = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

/// Probe statistics for one table filled right up to its resize threshold
#[derive(Debug, Clone, Copy)]
struct Measurement {
    load_factor: f64,
    avg_hit: f64,
    worst_hit: usize,
    avg_miss: f64,
}

fn average(total: usize, samples: usize) -> f64 {
    if samples == 0 { 0.0 } else { total as f64 / samples as f64 }
}

fn measure(probe_mode: ProbeMode, load_factor: f64, rng: &mut impl Rng) -> Measurement {
    let config = TableConfig::new(TABLE_SIZE, load_factor).with_probe_mode(probe_mode);
    let mut table = ProbingHashTable::with_config(config);

    // One entry short of the threshold, so the table never grows
    let target = table.resize_threshold().saturating_sub(1);
    let mut keys = Vec::with_capacity(target);
    while table.len() < target {
        let key: u64 = rng.random();
        table.put(key, ());
        keys.push(key);
    }

    let hits: Vec<usize> = keys.iter().map(|key| table.probe_count(key)).collect();
    let misses: Vec<usize> = (0..MISS_SAMPLES)
        .map(|_| rng.random::<u64>())
        .filter(|key| !table.contains_key(key))
        .map(|key| table.probe_count(&key))
        .collect();

    Measurement {
        load_factor: table.load_factor(),
        avg_hit: average(hits.iter().sum(), hits.len()),
        worst_hit: hits.iter().copied().max().unwrap_or(0),
        avg_miss: average(misses.iter().sum(), misses.len()),
    }
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[(&str, Vec<(f64, f64)>)],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .fold(1.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .right_y_label_area_size(10)
        .build_cartesian_2d(MIN_LOAD_FACTOR - 0.05..MAX_LOAD_FACTOR + 0.05, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (idx, (name, points)) in series.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| {
            MIN_LOAD_FACTOR +
                (MAX_LOAD_FACTOR - MIN_LOAD_FACTOR) * (i as f64) /
                    ((NUM_LOAD_FACTORS - 1) as f64)
        })
        .collect();
    info!("load factors: {load_factors:?}");

    let mut rng = rand::rng();
    let mut hit_series = Vec::new();
    let mut miss_series = Vec::new();

    for (probe_mode, name) in MODES {
        let mut hit_points = Vec::with_capacity(load_factors.len());
        let mut miss_points = Vec::with_capacity(load_factors.len());

        for &load_factor in &load_factors {
            let m = measure(probe_mode, load_factor, &mut rng);
            info!(
                "{name} @ {:.3}: avg hit = {:.2}, worst hit = {}, avg miss = {:.2}",
                m.load_factor, m.avg_hit, m.worst_hit, m.avg_miss
            );
            hit_points.push((m.load_factor, m.avg_hit));
            miss_points.push((m.load_factor, m.avg_miss));
        }

        hit_series.push((name, hit_points));
        miss_series.push((name, miss_points));
    }

    plot("hit_probes.png", "Average Probes per Successful Lookup", "Probes", &hit_series)?;
    plot("miss_probes.png", "Average Probes per Failed Lookup", "Probes", &miss_series)?;
    info!("wrote hit_probes.png and miss_probes.png");

    Ok(())
}
