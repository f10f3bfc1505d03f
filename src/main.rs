use std::path::PathBuf;

use anyhow::Result;

use meshview::{logging, ViewerApp};

/// Sample models shown when no paths are given on the command line.
const DEFAULT_MODEL_PATHS: [&str; 2] = ["data/BabyYoda.stl", "data/cube_gears.3mf"];

fn main() -> Result<()> {
    logging::init();

    let mut paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        paths = DEFAULT_MODEL_PATHS.iter().map(PathBuf::from).collect();
    }

    ViewerApp::new(&paths)?.run()
}
