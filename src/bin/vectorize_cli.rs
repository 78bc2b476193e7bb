//! Demo binary: loads a PNG, vectorizes it, prints the curve set as JSON.
//!
//! Wiring only — it does not rasterize the result anywhere (the rendering
//! collaborator described in spec §6 is out of scope for this crate).

use std::env;
use std::process::ExitCode;

use pixelvec::{vectorize, RasterImage};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: vectorize_cli <image.png>");
        return ExitCode::FAILURE;
    };

    let img = match image::open(&path) {
        Ok(img) => img.into_rgb8(),
        Err(e) => {
            eprintln!("failed to load {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let raster = RasterImage::from(&img);

    let curves = match vectorize(&raster) {
        Ok(curves) => curves,
        Err(e) => {
            eprintln!("vectorization failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string(&curves) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to serialize curves: {e}");
            ExitCode::FAILURE
        }
    }
}
