//! Image operations
//!
//! - `params`: parameter schema and the single resolution step every operation goes through
//! - `registry`: the name-to-transform table
//! - `catalog`: the client-facing description of that table
//! - `dispatcher`: lookup, resolution, channel conventions and output naming
//! - `presets`: fixed operation sequences
//! - the remaining modules are the transforms themselves, grouped by kind

pub mod blur;
pub mod catalog;
pub mod color;
pub mod denoise;
pub mod dispatcher;
pub mod edges;
pub mod geometry;
pub mod kernel;
pub mod params;
pub mod presets;
pub mod registry;
pub mod sharpen;
pub mod threshold;
pub mod tone;
