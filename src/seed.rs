//! Turning a request path into something a fish can be grown from.

use crate::params::{self, FishParams, BARCODE_LEN};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use regex::bytes::Regex;
use sha1::{Digest, Sha1};

static BARCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// 128 bits of generator seed, kept as two words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Seed from the first 16 bytes of the SHA-1 of `input`, big-endian.
    pub fn from_hash(input: &[u8]) -> Self {
        let digest = Sha1::digest(input);
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&digest[0..8]);
        lo.copy_from_slice(&digest[8..16]);
        Self(u64::from_be_bytes(hi), u64::from_be_bytes(lo))
    }

    pub fn random() -> Self {
        Self(rand::random(), rand::random())
    }

    pub fn rng(self) -> Pcg64Mcg {
        Pcg64Mcg::new((u128::from(self.0) << 64) | u128::from(self.1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FishSource {
    /// Parameters read straight off an 11-digit path.
    Barcode(FishParams),
    /// Hashed from a non-empty path.
    Seeded(Seed),
    /// Empty path.
    Random(Seed),
}

impl FishSource {
    /// Dispatches on the raw path bytes with the leading slash removed.
    pub fn from_path(path: impl AsRef<[u8]>) -> Self {
        let path = path.as_ref();
        if path.len() == BARCODE_LEN
            && BARCODE_RE.is_match(path)
            && let Some(params) = params::from_barcode(path)
        {
            Self::Barcode(params)
        } else if path.is_empty() {
            Self::Random(Seed::random())
        } else {
            Self::Seeded(Seed::from_hash(path))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Barcode(_) => "barcode",
            Self::Seeded(_) => "seeded",
            Self::Random(_) => "random",
        }
    }

    pub fn params(&self) -> FishParams {
        match self {
            Self::Barcode(params) => *params,
            Self::Seeded(seed) | Self::Random(seed) => params::sample(&mut seed.rng()),
        }
    }
}
