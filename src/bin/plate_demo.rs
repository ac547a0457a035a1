//! plate-demo: Encode a demonstration scene into a plate, then replay it
//!
//! Usage:
//!   plate-demo --scenario spiral --out frames.json
//!   plate-demo --config demo.json --parallel --ply engraved.ply

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mirror_plate::config::DemoConfig;
use mirror_plate::core::{Scenario, SceneRecord};
use mirror_plate::io::{save_engraved_ply, save_frames};
use mirror_plate::render::{project_frame, Frame};
use mirror_plate::util::Timed;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliScenario {
    #[value(name = "spiral")]
    Spiral,
    #[value(name = "sine")]
    Sine,
}

impl From<CliScenario> for Scenario {
    fn from(value: CliScenario) -> Self {
        match value {
            CliScenario::Spiral => Scenario::Spiral,
            CliScenario::Sine => Scenario::Sine,
        }
    }
}

/// Reflective plate demo: engrave a scene, then decode every perspective
#[derive(Parser, Debug)]
#[command(name = "plate-demo", version, about)]
struct Cli {
    /// JSON config file (missing fields use defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scene to encode (overrides the config file)
    #[arg(long, value_enum)]
    scenario: Option<CliScenario>,

    /// Decode tolerance in radians (overrides the config file)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Encode and decode with rayon
    #[arg(long)]
    parallel: bool,

    /// Write decoded frames as JSON
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Write engraved cells as a PLY point cloud
    #[arg(long, value_name = "FILE")]
    ply: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> anyhow::Result<DemoConfig> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DemoConfig::default(),
    };

    if let Some(scenario) = cli.scenario {
        config.scenario = scenario.into();
    }
    if let Some(tolerance) = cli.tolerance {
        config.angle_tolerance = tolerance;
    }
    config.parallel |= cli.parallel;

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();
    log::info!("plate-demo v{}", mirror_plate::VERSION);

    let config = load_config(&cli)?;
    log::info!(
        "Plate {}x{} at ({}, {}), scenario {:?}, tolerance {} rad{}",
        config.plate.size_x,
        config.plate.size_y,
        config.plate.start_x,
        config.plate.start_y,
        config.scenario,
        config.angle_tolerance,
        if config.parallel { ", parallel" } else { "" }
    );

    let mut plate = config.plate.build().context("Invalid plate configuration")?;

    // Encode: the sequential path streams the scenario without collecting it
    let stats = {
        let _t = Timed::info("Encoding");
        if config.parallel {
            let records: Vec<SceneRecord> = config.scenario.records().collect();
            plate.encode_par(&records)
        } else {
            plate.encode(config.scenario.records())
        }
    };
    log::info!(
        "Encoded {} records: {} of {} keypoints engraved, {} off-plate, {} degenerate",
        stats.records,
        stats.written,
        stats.keypoints,
        stats.dropped,
        stats.degenerate
    );

    // Decode every perspective the scenario was encoded from
    let frames: Vec<Frame> = {
        let _t = Timed::info("Decoding all perspectives");
        config
            .scenario
            .records()
            .enumerate()
            .map(|(i, record)| {
                let _t = Timed::debug(format!("Decoded perspective {i}"));
                let perspective = record.perspective();
                let cells = if config.parallel {
                    plate.decode_par(&perspective.source, &perspective.camera, config.angle_tolerance)
                } else {
                    plate.decode(&perspective.source, &perspective.camera, config.angle_tolerance)
                };
                let frame = project_frame(&plate, &perspective, cells);
                log::debug!("Perspective {i}: {} visible cells", frame.visible_count());
                frame
            })
            .collect()
    };

    let total_visible: usize = frames.iter().map(Frame::visible_count).sum();
    log::info!(
        "Decoded {} perspectives, {:.1} visible cells on average",
        frames.len(),
        total_visible as f64 / frames.len().max(1) as f64
    );

    if let Some(path) = &cli.out {
        save_frames(path, &frames)
            .with_context(|| format!("Failed to write frames to {}", path.display()))?;
    }
    if let Some(path) = &cli.ply {
        save_engraved_ply(&plate, path)
            .with_context(|| format!("Failed to write PLY to {}", path.display()))?;
    }

    Ok(())
}
