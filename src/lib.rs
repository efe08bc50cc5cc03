pub mod assets;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod project;
pub mod render;
pub mod scene_dump;
pub mod style;

pub use assets::ImageAsset;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, load_config};
pub use error::{CardError, CardResult};
pub use ir::{
    CableInfo, CardImages, CardTransforms, DataSlot, InsetBox, InsetBoxes, InsetLabels, PhotoKey,
    RenderRequest, TemplateId, Transform,
};
pub use layout::{Scene, compose_card};
pub use project::ProjectSnapshot;
pub use render::{RasterFormat, encode_raster, render_svg};
pub use style::Style;

/// Compose and serialize a card in one call.
pub fn render_card(request: &RenderRequest) -> String {
    render_svg(&compose_card(request))
}
