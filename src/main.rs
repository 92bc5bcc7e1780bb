use std::path::{Path, PathBuf};

use karman::{AnalysisRecorder, ImageExporter, SimConfig, Simulation};

const DEFAULT_FRAMES: usize = 500;
const IMAGE_SCALE: u32 = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Usage: `karman [CONFIG.json] [FRAMES] [OUTPUT_DIR]`
fn run() -> karman::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1).filter(|a| a.as_str() != "-") {
        Some(path) => SimConfig::from_json_file(Path::new(path))?,
        None => SimConfig::default(),
    };
    let frames = args
        .get(2)
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let output_dir = args.get(3).map(PathBuf::from);

    let mut simulation = Simulation::new(config)?;
    let exporter = ImageExporter::new(
        simulation.config().grid_width as u32 * IMAGE_SCALE,
        simulation.config().grid_height as u32 * IMAGE_SCALE,
    );
    let mut recorder = AnalysisRecorder::new();

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    recorder.record(&simulation.macroscopic_view(), 0).log_summary();

    for frame in 1..=frames {
        simulation.frame();

        if let Some(dir) = &output_dir {
            let path = dir.join(format!("speed_{:04}.png", frame));
            exporter.export_speed_png(&simulation.macroscopic_view(), &path)?;
        }

        if frame % 50 == 0 || frame == frames {
            let diagnostics = simulation.diagnostics();
            log::info!(
                "frame {frame}: step {}, max speed {:.4}, Re_eff {:.1}, tau {:.4}",
                diagnostics.step,
                diagnostics.max_speed,
                diagnostics.effective_reynolds,
                diagnostics.tau
            );
            let metrics = recorder.record(&simulation.macroscopic_view(), diagnostics.step);
            if !metrics.is_finite() {
                log::warn!("flow field is no longer finite at step {}", diagnostics.step);
                break;
            }
        }
    }

    recorder.log_trends();
    Ok(())
}
