/// Coherent-noise base elevation.
///
/// The pipeline only talks to noise through [`NoiseSource`]; the default
/// [`PerlinNoise`] stacks octaves of Perlin noise the same way the fBm helper
/// always has, but with tunable persistence and lacunarity and a final
/// normalisation into `[0, 1]`.
use crate::grid::Grid;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Smallest usable noise scale; anything at or below zero is replaced by it.
pub const MIN_SCALE: f32 = 0.0001;

/// How raw octave sums are mapped into `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// Rescale by the min/max actually present in this field.
    Local,
    /// Rescale by the theoretical octave amplitude sum, so neighbouring
    /// fields generated with different offsets line up.
    Global,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    pub scale: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub offset: [f32; 2],
    pub normalize_mode: NormalizeMode,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            scale: 60.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: [0.0, 0.0],
            normalize_mode: NormalizeMode::Global,
        }
    }
}

/// Deterministic 2-D noise generator. Identical inputs must give identical grids,
/// with every value in `[0, 1]`.
pub trait NoiseSource {
    fn noise_map(&self, width: usize, height: usize, seed: u32, settings: &NoiseSettings) -> Grid<f32>;
}

/// Octave-stacked Perlin noise.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerlinNoise;

impl NoiseSource for PerlinNoise {
    fn noise_map(&self, width: usize, height: usize, seed: u32, settings: &NoiseSettings) -> Grid<f32> {
        generate_noise_map(width, height, seed, settings)
    }
}

/// Any plain function with the right shape can stand in as a noise source.
impl<F> NoiseSource for F
where
    F: Fn(usize, usize, u32, &NoiseSettings) -> Grid<f32>,
{
    fn noise_map(&self, width: usize, height: usize, seed: u32, settings: &NoiseSettings) -> Grid<f32> {
        self(width, height, seed, settings)
    }
}

/// Generate a `width × height` noise field normalised into `[0, 1]`.
///
/// * `seed`    : each octave samples its own Perlin permutation (`seed + octave`).
/// * `settings`: scale, octave count, persistence, lacunarity, sample offset
///   and normalisation mode.
pub fn generate_noise_map(width: usize, height: usize, seed: u32, settings: &NoiseSettings) -> Grid<f32> {
    let octaves: Vec<Perlin> = (0..settings.octaves)
        .map(|i| Perlin::new(seed.wrapping_add(i)))
        .collect();

    let scale = f64::from(if settings.scale <= 0.0 { MIN_SCALE } else { settings.scale });
    let persistence = settings.persistence as f64;
    let lacunarity = settings.lacunarity as f64;
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    let [off_x, off_y] = settings.offset.map(f64::from);

    let mut max_possible = 0.0f64;
    let mut amplitude = 1.0f64;
    for _ in 0..settings.octaves {
        max_possible += amplitude;
        amplitude *= persistence;
    }

    let raw = Grid::par_from_fn(width, height, |x, y| {
        let mut amplitude = 1.0f64;
        let mut frequency = 1.0f64;
        let mut value = 0.0f64;

        for perlin in &octaves {
            let sx = (x as f64 - half_w + off_x) / scale * frequency;
            let sy = (y as f64 - half_h - off_y) / scale * frequency;
            value += perlin.get([sx, sy]) * amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }
        value as f32
    });

    match settings.normalize_mode {
        NormalizeMode::Local => {
            let (min, max) = raw
                .as_slice()
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            let range = max - min;
            Grid::par_from_fn(width, height, |x, y| {
                if range > 0.0 { (raw.at(x, y) - min) / range } else { 0.0 }
            })
        }
        NormalizeMode::Global => {
            let denom = (max_possible / 0.9) as f32;
            Grid::par_from_fn(width, height, |x, y| {
                if denom > 0.0 {
                    ((raw.at(x, y) + 1.0) / denom).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            })
        }
    }
}
