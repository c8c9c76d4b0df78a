use rand::Rng;
use serde::Serialize;

/// Number of digits in a barcode path.
pub const BARCODE_LEN: usize = 11;

/// Stand-in for a zero digit on shape rows. Keeps divisors positive while
/// still reading as "almost nothing".
pub const ZERO_DIGIT: f64 = 0.003;

/// Heights above this multiple of the belly-up ratio invert the body.
pub const MAX_HEIGHT_TO_BELLY: f64 = 2.0;

/// Hues closer than this are pushed apart so the accent stays visible.
pub const MIN_HUE_SEPARATION: f64 = 5.0;
const HUE_NUDGE: i32 = 10;

/// Floor for a sampled mouth size of exactly zero.
const MOUTH_SIZE_FLOOR: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FishParams {
    pub main_hue: f64,
    pub accent_hue: f64,
    pub height_ratio: f64,
    pub belly_up_ratio: f64,
    pub mouth_size_ratio: f64,
    pub mouth_open_ratio: f64,
    pub eye_size: f64,
    pub tail_concavity: f64,
    pub tail_inset_ratio: f64,
    pub tail_height_ratio: f64,
    pub tail_length_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MainHue,
    AccentHue,
    HeightRatio,
    BellyUpRatio,
    MouthSizeRatio,
    MouthOpenRatio,
    EyeSize,
    TailConcavity,
    TailInsetRatio,
    TailHeightRatio,
    TailLengthRatio,
}

impl FishParams {
    fn field_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::MainHue => &mut self.main_hue,
            Field::AccentHue => &mut self.accent_hue,
            Field::HeightRatio => &mut self.height_ratio,
            Field::BellyUpRatio => &mut self.belly_up_ratio,
            Field::MouthSizeRatio => &mut self.mouth_size_ratio,
            Field::MouthOpenRatio => &mut self.mouth_open_ratio,
            Field::EyeSize => &mut self.eye_size,
            Field::TailConcavity => &mut self.tail_concavity,
            Field::TailInsetRatio => &mut self.tail_inset_ratio,
            Field::TailHeightRatio => &mut self.tail_height_ratio,
            Field::TailLengthRatio => &mut self.tail_length_ratio,
        }
    }

    /// Caps the belly-up ratio so `height / belly_up` never exceeds 2.
    /// Really tall fish with a low belly turn into spikes otherwise.
    pub fn clamp_belly(&mut self) {
        if self.height_ratio / self.belly_up_ratio > MAX_HEIGHT_TO_BELLY {
            self.belly_up_ratio = self.height_ratio / MAX_HEIGHT_TO_BELLY;
        }
    }
}

/// One barcode position and the field it drives:
/// `value = digit / 10 * scale + offset`.
#[derive(Debug, Clone, Copy)]
pub struct DigitRule {
    pub position: usize,
    pub field: Field,
    pub scale: f64,
    pub offset: f64,
    /// Read a zero digit as [`ZERO_DIGIT`].
    pub guard_zero: bool,
}

const fn rule(position: usize, field: Field, scale: f64, offset: f64, guard_zero: bool) -> DigitRule {
    DigitRule {
        position,
        field,
        scale,
        offset,
        guard_zero,
    }
}

pub const BARCODE_RULES: [DigitRule; BARCODE_LEN] = [
    rule(10, Field::MainHue, 360.0, 0.0, false),
    // offset so equal digits still give two colors
    rule(4, Field::AccentHue, 360.0, 12.0, false),
    rule(8, Field::HeightRatio, 1.2, 0.5, true),
    rule(0, Field::BellyUpRatio, 3.5, 0.5, true),
    rule(1, Field::EyeSize, 0.5, 0.8, true),
    rule(9, Field::TailConcavity, 0.7, 0.0, true),
    rule(3, Field::TailInsetRatio, 0.3, 0.05, true),
    rule(6, Field::TailHeightRatio, 0.95, 0.05, true),
    rule(5, Field::TailLengthRatio, 1.0, 0.5, true),
    rule(7, Field::MouthSizeRatio, 0.8, 0.0, true),
    // divided by the mouth size once the table is applied
    rule(2, Field::MouthOpenRatio, 0.9, 0.1, true),
];

impl DigitRule {
    pub fn apply(&self, digit: u8) -> f64 {
        let value = if digit == 0 && self.guard_zero {
            ZERO_DIGIT
        } else {
            f64::from(digit)
        };
        value / 10.0 * self.scale + self.offset
    }
}

/// Derives parameters from an 11-digit barcode.
///
/// Returns `None` when `barcode` is not exactly eleven ASCII digits.
pub fn from_barcode(barcode: impl AsRef<[u8]>) -> Option<FishParams> {
    let digits = barcode.as_ref();
    if digits.len() != BARCODE_LEN || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let mut params = FishParams::default();
    for rule in &BARCODE_RULES {
        *params.field_mut(rule.field) = rule.apply(digits[rule.position] - b'0');
    }
    params.clamp_belly();
    // Little mouths can open real wide
    params.mouth_open_ratio /= params.mouth_size_ratio;
    Some(params)
}

/// Samples a fish from `rng`. The same generator state always yields the
/// same fish.
pub fn sample<R: Rng>(rng: &mut R) -> FishParams {
    let main_hue: i32 = rng.random_range(0..360);
    let mut accent_hue: i32 = rng.random_range(0..360);
    if f64::from((accent_hue - main_hue).abs()) < MIN_HUE_SEPARATION {
        accent_hue = (accent_hue + HUE_NUDGE) % 360;
    }

    let height_ratio = rng.random::<f64>() * 1.2 + 0.5;
    let belly_up_ratio = if rng.random::<f64>() > 0.1 {
        rng.random::<f64>() * 0.8 + 0.7
    } else {
        rng.random::<f64>() * 4.5 + 0.5
    };

    let mut mouth_size_ratio = rng.random::<f64>() * 0.75;
    if rng.random::<f64>() > 0.5 {
        mouth_size_ratio = rng.random::<f64>() * 0.3;
    }
    let mouth_size_ratio = mouth_size_ratio.max(MOUTH_SIZE_FLOOR);
    let mouth_open_ratio = (rng.random::<f64>() * 0.9 + 0.1) / mouth_size_ratio;

    let mut params = FishParams {
        main_hue: f64::from(main_hue),
        accent_hue: f64::from(accent_hue),
        height_ratio,
        belly_up_ratio,
        mouth_size_ratio,
        mouth_open_ratio,
        eye_size: rng.random::<f64>() * 0.4 + 1.1,
        tail_concavity: rng.random::<f64>() * 0.7,
        tail_inset_ratio: rng.random::<f64>() * 0.3 + 0.05,
        tail_height_ratio: rng.random::<f64>() * 0.95 + 0.05,
        tail_length_ratio: rng.random::<f64>() + 0.5,
    };
    params.clamp_belly();
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// Generator stuck at zero: every float draw is exactly 0.0.
    struct Zeros;

    impl RngCore for Zeros {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn rules_cover_every_position_once() {
        let mut seen = [false; BARCODE_LEN];
        for rule in &BARCODE_RULES {
            assert!(!seen[rule.position], "position {} reused", rule.position);
            seen[rule.position] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn all_zero_barcode() {
        let params = from_barcode("00000000000").unwrap();
        assert_eq!(params.main_hue, 0.0);
        assert_eq!(params.accent_hue, 12.0);
        assert_close(params.height_ratio, 0.5 + 0.0003 * 1.2);
        assert_close(params.belly_up_ratio, 0.5 + 0.0003 * 3.5);
        assert_close(params.eye_size, 0.8 + 0.0003 * 0.5);
        assert_close(params.tail_concavity, 0.0003 * 0.7);
        assert_close(params.mouth_size_ratio, 0.0003 * 0.8);
        assert_close(
            params.mouth_open_ratio,
            (0.0003 * 0.9 + 0.1) / (0.0003 * 0.8),
        );
        assert!(params.mouth_open_ratio.is_finite());
    }

    #[test]
    fn all_nine_barcode() {
        let params = from_barcode("99999999999").unwrap();
        assert_close(params.main_hue, 324.0);
        assert_close(params.accent_hue, 336.0);
        assert_close(params.height_ratio, 1.58);
        assert_close(params.belly_up_ratio, 3.65);
        assert_close(params.tail_length_ratio, 1.4);
        assert_close(params.mouth_open_ratio, 0.91 / 0.72);
    }

    #[test]
    fn barcode_positions_drive_their_fields() {
        // only position 4 differs: accent hue alone should move
        let base = from_barcode("11111111111").unwrap();
        let bumped = from_barcode("11115111111").unwrap();
        assert_close(bumped.accent_hue, 5.0 * 36.0 + 12.0);
        assert_eq!(bumped.main_hue, base.main_hue);
        assert_eq!(bumped.height_ratio, base.height_ratio);
        assert_eq!(bumped.tail_length_ratio, base.tail_length_ratio);
    }

    #[test]
    fn every_digit_in_every_position_is_finite() {
        for rule in &BARCODE_RULES {
            for digit in 0..=9u8 {
                let mut barcode = [b'5'; BARCODE_LEN];
                barcode[rule.position] = b'0' + digit;
                let barcode = std::str::from_utf8(&barcode).unwrap();
                let params = from_barcode(barcode).unwrap();
                assert!(params.mouth_open_ratio.is_finite(), "{barcode}");
                assert!(params.mouth_size_ratio > 0.0, "{barcode}");
                assert!(params.height_ratio / params.belly_up_ratio <= MAX_HEIGHT_TO_BELLY);
            }
        }
    }

    #[test]
    fn tall_barcode_fish_is_clamped() {
        // height digit 9 (1.58), belly digit 0 (~0.5)
        let params = from_barcode("00000000900").unwrap();
        assert_close(params.belly_up_ratio, params.height_ratio / 2.0);
    }

    #[test]
    fn rejects_non_barcodes() {
        assert!(from_barcode("0000000000").is_none());
        assert!(from_barcode("000000000000").is_none());
        assert!(from_barcode("0000000000a").is_none());
        assert!(from_barcode("").is_none());
    }

    #[test]
    fn sampling_is_reproducible() {
        let a = sample(&mut Pcg64Mcg::seed_from_u64(7));
        let b = sample(&mut Pcg64Mcg::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_draws_take_every_guard() {
        let params = sample(&mut Zeros);
        assert_eq!(params.main_hue, 0.0);
        // equal hues are nudged apart
        assert_eq!(params.accent_hue, 10.0);
        // 0.0 is not > 0.1, so the wide belly range is used
        assert_eq!(params.belly_up_ratio, 0.5);
        assert_eq!(params.height_ratio, 0.5);
        assert_eq!(params.mouth_size_ratio, MOUTH_SIZE_FLOOR);
        assert!(params.mouth_open_ratio.is_finite());
        assert_close(params.mouth_open_ratio, 0.1 / MOUTH_SIZE_FLOOR);
    }

    #[test]
    fn sampled_params_hold_invariants() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x5eed);
        for _ in 0..5000 {
            let params = sample(&mut rng);
            assert!(params.height_ratio / params.belly_up_ratio <= MAX_HEIGHT_TO_BELLY);
            assert!((params.accent_hue - params.main_hue).abs() >= MIN_HUE_SEPARATION);
            assert!((0.0..360.0).contains(&params.main_hue));
            assert!((0.0..360.0).contains(&params.accent_hue));
            assert!(params.mouth_size_ratio > 0.0);
            assert!(params.mouth_open_ratio.is_finite());
            assert!((0.0..=0.7).contains(&params.tail_concavity));
            assert!((1.1..=1.5).contains(&params.eye_size));
        }
    }
}
