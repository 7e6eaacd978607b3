/// Export backends. Rendering grids to images is left to downstream tools;
/// the generator only writes data.
pub mod json;

pub use json::{biome_colors, export_json, world_json};
