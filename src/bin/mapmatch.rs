use chrono::Local;
use clap::Parser;
use mapmatch_core::model::geometry::Point2D;
use mapmatch_core::{build_network, match_trajectory, NamedPolyline, TrajectorySample};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// runs the map-matching engine against a JSON road network and a JSON
/// trajectory, realizing the crate's in-memory input shapes as files on
/// disk.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct CliArgs {
    /// path to a JSON array of `{ "name", "polyline": [[x, y], ...] }`
    #[arg(long)]
    network: PathBuf,

    /// path to a JSON array of `{ "x", "y", "timestamp" }`
    #[arg(long)]
    trajectory: PathBuf,

    /// where to write the matched labels; defaults to stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
struct NetworkRecord {
    name: String,
    polyline: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct SampleRecord {
    x: f64,
    y: f64,
    timestamp: i64,
}

#[derive(Serialize)]
struct LabeledSample {
    sample_index: usize,
    label: String,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = CliArgs::parse();

    let network_records: Vec<NetworkRecord> = read_json(&args.network)?;
    let polylines: Vec<NamedPolyline> = network_records
        .into_iter()
        .map(|record| {
            let points = record
                .polyline
                .into_iter()
                .map(|[x, y]| Point2D::new(x, y))
                .collect();
            NamedPolyline::new(record.name, points)
        })
        .collect();

    let build_start = Local::now();
    let network = build_network(&polylines)?;
    let build_duration = (Local::now() - build_start).num_milliseconds();
    log::info!(
        "built network with {} segments in {}ms",
        network.segment_count(),
        build_duration
    );

    let sample_records: Vec<SampleRecord> = read_json(&args.trajectory)?;
    let samples: Vec<TrajectorySample> = sample_records
        .into_iter()
        .map(|record| TrajectorySample::new(Point2D::new(record.x, record.y), record.timestamp))
        .collect();

    let match_start = Local::now();
    let labels = match_trajectory(&network, &samples);
    let match_duration = (Local::now() - match_start).num_milliseconds();
    log::info!(
        "matched {} samples in {}ms",
        samples.len(),
        match_duration
    );

    let output: Vec<LabeledSample> = labels
        .into_iter()
        .enumerate()
        .map(|(sample_index, label)| LabeledSample { sample_index, label })
        .collect();
    let rendered = serde_json::to_string_pretty(&output)?;

    match args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{}", rendered),
    }

    Ok(())
}
