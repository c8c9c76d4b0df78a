use crate::config::CanvasConfig;
use crate::params::FishParams;

/// A closed four-point polygon, stored flat as `x1, y1, .. x4, y4`.
pub type Quad = [f64; 8];

#[derive(Debug, Clone, PartialEq)]
pub struct FishPoints {
    pub main_hue: f64,
    pub accent_hue: f64,
    pub body: Quad,
    pub mouth: Quad,
    pub eye: Quad,
    pub tail: Quad,
}

impl FishPoints {
    pub fn shapes(&self) -> [(&'static str, &Quad); 4] {
        [
            ("body", &self.body),
            ("mouth", &self.mouth),
            ("eye", &self.eye),
            ("tail", &self.tail),
        ]
    }
}

/// Right, top, left, bottom. The bottom vertex is pulled in by
/// `belly_up_ratio`, which gives the body its belly.
pub fn diamond(center_x: f64, center_y: f64, width: f64, height: f64, belly_up_ratio: f64) -> Quad {
    [
        center_x + width / 2.0,
        center_y,
        center_x,
        center_y - height / 2.0,
        center_x - width / 2.0,
        center_y,
        center_x,
        center_y + height / 2.0 / belly_up_ratio,
    ]
}

pub fn compute_fish(params: &FishParams, canvas: &CanvasConfig) -> FishPoints {
    let cx = canvas.center_x;
    let cy = canvas.center_y;
    let length = canvas.fish_length;
    let height = length * params.height_ratio;

    let body = diamond(cx, cy, length, height, params.belly_up_ratio);

    let mouth_width = length * params.mouth_size_ratio;
    let mouth_height = length * params.mouth_size_ratio * params.mouth_open_ratio;
    let nose = cx - length / 2.0;
    let mouth = [
        nose - 1.0,
        cy,
        nose,
        cy - mouth_height / 2.0,
        nose + mouth_width,
        cy,
        nose,
        cy + mouth_height / 2.0,
    ];

    let eye_side = length / 10.0 * params.eye_size;
    let eye = diamond(cx - length * 0.18, cy - height * 0.2, eye_side, eye_side, 1.0);

    let tail_root = cx + length / 2.0 - params.tail_inset_ratio * length;
    let tail_reach = length / 2.0 * params.tail_length_ratio;
    let tail_half_height = height / 2.0 * params.tail_height_ratio;
    let tail = [
        tail_root,
        cy,
        tail_root + tail_reach,
        cy - tail_half_height,
        tail_root + tail_reach * (1.0 - params.tail_concavity),
        cy,
        tail_root + tail_reach,
        cy + tail_half_height,
    ];

    FishPoints {
        main_hue: params.main_hue,
        accent_hue: params.accent_hue,
        body,
        mouth,
        eye,
        tail,
    }
}
