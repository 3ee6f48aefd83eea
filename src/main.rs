use std::path::PathBuf;

use clap::Parser as _;
use log::{error, warn};

use russclip::config::{DEFAULT_FIELD_OF_VIEW, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use russclip::prelude::*;
use russclip::snapshot;

/// Walk through a field of flat-shaded cubes.
///
/// Arrows drive and turn, N/M roll, A/Z pitch, D/C move up and down,
/// keypad -/+ zoom, F/S change speed, P saves a snapshot, Esc quits.
#[derive(Debug, clap::Parser)]
#[command(author, about, version)]
struct Args {
    /// Frame buffer width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Frame buffer height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Field-of-view scale; 2.0 shows 90 degrees across the wider axis.
    #[arg(long, default_value_t = DEFAULT_FIELD_OF_VIEW)]
    fov: f64,

    /// Directory snapshots are written to.
    #[arg(long, default_value = ".")]
    snapshot_dir: PathBuf,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = RenderConfig {
        width: args.width,
        height: args.height,
        field_of_view: args.fov,
        ..RenderConfig::default()
    };

    let mut engine = Engine::new(config, Scene::demo()).map_err(|e| e.to_string())?;
    let mut window = Window::new("3D clipping demo", config.width, config.height)?;
    let mut limiter = FrameLimiter::new(&window);
    let mut snapshot_counter = 0;

    loop {
        let input = window.poll_events();
        if input.quit {
            break;
        }

        if let Some((w, h)) = input.resize {
            // Too small or too tall: keep drawing at the old size
            if engine.resize(w, h).is_ok() {
                window.resize(w, h)?;
            }
        }

        engine.run_frame(&input.controls, &mut window)?;

        if input.snapshot {
            let path = snapshot::next_snapshot_path(&args.snapshot_dir, &mut snapshot_counter);
            if let Err(e) = snapshot::save_png(engine.framebuffer(), window.palette(), &path) {
                error!("snapshot to {} failed: {e}", path.display());
            }
        }

        let delta = limiter.wait_and_get_delta(&window);
        if delta > 4 * FRAME_TARGET_TIME as u64 {
            warn!("slow frame: {delta} ms");
        }
    }

    Ok(())
}
