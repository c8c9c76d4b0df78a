use crate::config::CanvasConfig;
use crate::error::{RenderError, TemplateError};
use crate::geometry::{FishPoints, compute_fish};
use crate::params::FishParams;
use std::borrow::Cow;

/// The fish drawing shipped with the binary.
pub const FISH_SVG: &str = include_str!("../templates/fish.svg");

const MAIN_HUE: &str = "__MAIN_HUE__";
const ACCENT_HUE: &str = "__ACCENT_HUE__";
const BODY_POINTS: &str = "__BODY_POINTS__";
const MOUTH_POINTS: &str = "__MOUTH_POINTS__";
const EYE_POINTS: &str = "__EYE_POINTS__";
const TAIL_POINTS: &str = "__TAIL_POINTS__";

const PLACEHOLDERS: [&str; 6] = [
    MAIN_HUE,
    ACCENT_HUE,
    BODY_POINTS,
    MOUTH_POINTS,
    EYE_POINTS,
    TAIL_POINTS,
];

/// SVG markup with placeholders for the hues and the four point lists.
///
/// Checked once when built and read-only afterwards, so one instance can be
/// shared by every worker.
#[derive(Debug, Clone)]
pub struct FishTemplate {
    source: Cow<'static, str>,
}

impl FishTemplate {
    pub fn parse(source: impl Into<Cow<'static, str>>) -> Result<Self, TemplateError> {
        let source = source.into();
        if let Some(missing) = PLACEHOLDERS.iter().find(|p| !source.contains(**p)) {
            return Err(TemplateError::MissingPlaceholder(*missing));
        }
        Ok(Self { source })
    }

    pub fn embedded() -> Result<Self, TemplateError> {
        Self::parse(FISH_SVG)
    }

    pub fn render(&self, fish: &FishPoints) -> Result<String, RenderError> {
        for (shape, quad) in fish.shapes() {
            if let Some((index, value)) = quad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(RenderError::NonFinite {
                    shape,
                    index,
                    value: *value,
                });
            }
        }

        Ok(self
            .source
            .replace(MAIN_HUE, &fish.main_hue.to_string())
            .replace(ACCENT_HUE, &fish.accent_hue.to_string())
            .replace(BODY_POINTS, &coords_to_string(&fish.body))
            .replace(MOUTH_POINTS, &coords_to_string(&fish.mouth))
            .replace(EYE_POINTS, &coords_to_string(&fish.eye))
            .replace(TAIL_POINTS, &coords_to_string(&fish.tail)))
    }
}

/// `x1,y1,x2,y2,..` with each number in its shortest round-trip form.
pub fn coords_to_string(coords: &[f64]) -> String {
    coords
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn render_svg(params: &FishParams, template: &FishTemplate) -> Result<String, RenderError> {
    let fish = compute_fish(params, &CanvasConfig::default());
    template.render(&fish)
}
