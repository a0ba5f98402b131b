#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::print_stdout)]

//! Inserts random keys into both table variants under both reference hash functions
//! and charts how load factor and empty buckets evolve as the tables grow.

use log::info;
use plotters::prelude::*;
use primehash::{ChainedTable, HashFn, HashTable, OpenAddressingTable, hash_function_1, hash_function_2};
use rand::Rng;

const INITIAL_CAPACITY: usize = 53;
const KEY_COUNT: usize = 1_000;
const REPORT_EVERY: usize = 25;

/// Table variant and hash function combinations to profile
const PROFILES: [&str; 4] = [
    "Open addressing / hash_function_1",
    "Open addressing / hash_function_2",
    "Chaining / hash_function_1",
    "Chaining / hash_function_2",
];

/// Samples taken after every insert
struct Samples {
    table_load: Vec<f64>,
    empty_ratio: Vec<f64>,
}

fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.random_range(3..12);
    (0..len).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

/// Puts every key into `table`, sampling after each insert and printing a summary
/// line every `REPORT_EVERY` inserts
fn profile<T: HashTable<usize>>(
    name: &str,
    mut table: T,
    keys: &[String],
) -> Result<Samples, Box<dyn std::error::Error>> {
    let mut samples = Samples {
        table_load: Vec::with_capacity(keys.len()),
        empty_ratio: Vec::with_capacity(keys.len()),
    };

    println!("{name}");
    for (i, key) in keys.iter().enumerate() {
        table.put(key.clone(), i)?;
        samples.table_load.push(table.table_load());
        samples.empty_ratio.push(table.empty_buckets() as f64 / table.capacity() as f64);

        if i % REPORT_EVERY == REPORT_EVERY - 1 {
            println!(
                "  empty_buckets = {:>5}, table_load = {:.2}, len = {:>5}, capacity = {:>5}",
                table.empty_buckets(),
                table.table_load(),
                table.len(),
                table.capacity()
            );
        }
    }
    info!("{name}: final capacity {}", table.capacity());
    Ok(samples)
}

/// Draws one line per profile into `path`
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),
        RGBColor(50, 90, 220),
        RGBColor(50, 180, 50),
        RGBColor(180, 50, 180),
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flat_map(|v| v.iter()).fold(0.0_f64, |max, &y| max.max(y)) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..KEY_COUNT, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (index, (name, points)) in PROFILES.iter().zip(series).enumerate() {
        let line_style = ShapeStyle::from(&colors[index % colors.len()]).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                points.iter().enumerate().map(|(i, &y)| (i + 1, y)),
                line_style,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..KEY_COUNT).map(|_| random_key(&mut rng)).collect();

    let hashers: [HashFn; 2] = [hash_function_1, hash_function_2];
    let mut all_samples = Vec::with_capacity(PROFILES.len());
    for (index, name) in PROFILES.iter().enumerate() {
        let hasher = hashers[index % 2];
        let samples = if index < 2 {
            profile(name, OpenAddressingTable::new(INITIAL_CAPACITY, hasher), &keys)?
        } else {
            profile(name, ChainedTable::new(INITIAL_CAPACITY, hasher), &keys)?
        };
        all_samples.push(samples);
    }

    let loads: Vec<Vec<f64>> = all_samples.iter().map(|s| s.table_load.clone()).collect();
    let empties: Vec<Vec<f64>> = all_samples.iter().map(|s| s.empty_ratio.clone()).collect();

    draw_chart("table_load.png", "Load Factor While Growing", "len / capacity", &loads)?;
    draw_chart(
        "empty_buckets.png",
        "Empty Buckets While Growing",
        "empty buckets / capacity",
        &empties,
    )?;

    println!("Generated plot images: table_load.png, empty_buckets.png");
    Ok(())
}
