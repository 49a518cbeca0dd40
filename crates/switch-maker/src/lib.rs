pub mod batch;
pub mod error;
pub mod geometry;
pub mod kicad;
pub mod maker;
pub mod switches;
pub mod types;

pub use batch::{make_switches, BatchOptions, Configuration, Variant};
pub use maker::FootprintMaker;
pub use switches::SwitchType;

use error::MakerError;
use std::path::Path;
use types::Footprint;

/// Build a single footprint with the default maker.
pub fn make_switch(types: &[SwitchType], size: f64) -> Result<Footprint, MakerError> {
    FootprintMaker::default().make_switch(&Configuration::new(types.to_vec(), size))
}

/// Read a `.kicad_mod` file back into the footprint model.
pub fn inspect(path: &Path) -> Result<Footprint, MakerError> {
    let data = std::fs::read(path)?;
    kicad::reader::parse(&data)
}
