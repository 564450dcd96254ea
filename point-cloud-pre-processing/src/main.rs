//! Converts LAS/LAZ/PLY scans into the recentred PLY the particle engine loads.
mod args;
mod bounds;
mod converter;
mod error;
mod laz;
mod ply;
mod settings;

use args::ConvertArgs;
use converter::PointCloudConverter;
use std::env;

fn main() {
    let args = match ConvertArgs::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Usage: point-cloud-pre-processing <input.las|laz|ply> [--max-points N] [--output DIR]");
            std::process::exit(2);
        }
    };

    let converter = PointCloudConverter::new(&args);
    if let Err(e) = converter.convert() {
        eprintln!("Conversion failed: {e}");
        std::process::exit(1);
    }
}
