mod options;

use anyhow::{anyhow, Context, Error as AnyError};
use clap::Parser;
use geo::geometry::Coord;
use log::warn;
use options::{Cli, Command as CliCmd};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};
use waveform::{Footprint, Point, RhMetrics, Waveform, WaveformError};

const CIRCLE_SEGMENTS: usize = 64;

/// One footprint record from the input file.
struct FootprintRecord {
    id: String,
    center: Coord<f64>,
    radius: Option<f64>,
}

#[derive(Serialize)]
struct RhEntry {
    percentile: u8,
    height: f64,
}

#[derive(Serialize)]
struct FootprintReport {
    id: String,
    selected_points: usize,
    rh: Vec<RhEntry>,
}

fn main() -> Result<(), AnyError> {
    env_logger::init();
    let cli = Cli::parse();

    let points = load_points(&cli.points)?;
    let footprints = load_footprints(&cli.footprints)?;
    let class_filter = cli.classes.as_ref().map(|classes| classes.0.as_slice());

    // Footprints are independent; failures are logged and skipped so one
    // bad footprint never aborts the batch.
    let reports: Vec<FootprintReport> = footprints
        .par_iter()
        .filter_map(|record| match simulate(record, &points, &cli, class_filter) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!("footprint {}: {err}; skipping", record.id);
                None
            }
        })
        .collect();

    match cli.cmd {
        CliCmd::Display => display(&reports),
        CliCmd::Json => json(&reports),
    }
}

fn simulate(
    record: &FootprintRecord,
    points: &[Point],
    cli: &Cli,
    class_filter: Option<&[u8]>,
) -> Result<FootprintReport, WaveformError> {
    let footprint = Footprint::circle(
        record.center,
        record.radius.unwrap_or(cli.radius),
        CIRCLE_SEGMENTS,
    );
    let heights = footprint.select_heights(points, class_filter);
    let selected_points = heights.len();

    let waveform = Waveform::builder()
        .heights(heights)
        .bin_size(cli.bin_size)
        .pulse_width(cli.pulse_width)
        .build()?;
    let rh = RhMetrics::from_waveform(&waveform, &cli.percentiles.0)?;

    Ok(FootprintReport {
        id: record.id.clone(),
        selected_points,
        rh: rh
            .iter()
            .map(|(percentile, height)| RhEntry { percentile, height })
            .collect(),
    })
}

fn load_points(path: &Path) -> Result<Vec<Point>, AnyError> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut points = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',');
        let (Some(x), Some(y), Some(z), Some(class)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(anyhow!(
                "{}:{}: expected x,y,z,classification",
                path.display(),
                index + 1
            ));
        };
        points.push(Point::new(
            x.trim().parse()?,
            y.trim().parse()?,
            z.trim().parse()?,
            class.trim().parse()?,
        ));
    }
    Ok(points)
}

fn load_footprints(path: &Path) -> Result<Vec<FootprintRecord>, AnyError> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut footprints = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',');
        let (Some(id), Some(x), Some(y)) = (fields.next(), fields.next(), fields.next()) else {
            return Err(anyhow!(
                "{}:{}: expected id,x,y[,radius]",
                path.display(),
                index + 1
            ));
        };
        let radius = fields.next().map(|r| r.trim().parse()).transpose()?;
        footprints.push(FootprintRecord {
            id: id.trim().to_string(),
            center: Coord {
                x: x.trim().parse()?,
                y: y.trim().parse()?,
            },
            radius,
        });
    }
    Ok(footprints)
}

fn display(reports: &[FootprintReport]) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    for report in reports {
        write!(stdout, "{} ({} points):", report.id, report.selected_points)?;
        for entry in &report.rh {
            write!(stdout, " rh{}={:.2}", entry.percentile, entry.height)?;
        }
        writeln!(stdout)?;
    }
    Ok(())
}

fn json(reports: &[FootprintReport]) -> Result<(), AnyError> {
    let json = serde_json::to_string(reports)?;
    println!("{}", json);
    Ok(())
}
