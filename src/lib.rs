#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod params;
pub mod render;
pub mod seed;
pub mod server;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CanvasConfig, ServeConfig};
pub use error::{RenderError, TemplateError};
pub use geometry::{FishPoints, compute_fish};
pub use params::{FishParams, from_barcode, sample};
pub use render::{FishTemplate, render_svg};
pub use seed::{FishSource, Seed};

/// Path (without its leading slash) to finished SVG.
pub fn render_path(path: &str, template: &FishTemplate) -> Result<String, RenderError> {
    render_svg(&FishSource::from_path(path).params(), template)
}
