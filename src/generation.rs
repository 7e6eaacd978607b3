/// Seed-to-biome pipeline.
///
/// Stage order: noise & falloff → elevation → equator band → temperature →
/// precipitation → biome. Each stage reads earlier grids and allocates a new
/// one; nothing is mutated after it is handed on.
use std::time::Instant;

use crate::biome::{self, Biome, BiomeRule, Thresholds};
use crate::elevation;
use crate::equator;
use crate::error::ParameterError;
use crate::falloff::generate_falloff_map;
use crate::noise::{NoiseSource, PerlinNoise};
use crate::precipitation::generate_precipitation_map;
use crate::temperature::generate_temperature_map;
use crate::world::{GenerationParameters, World};

/// Run the full pipeline with the built-in Perlin noise.
pub fn generate_world(params: &GenerationParameters, rules: &[BiomeRule]) -> Result<World, ParameterError> {
    generate_world_with(&PerlinNoise, params, rules)
}

/// Run the full pipeline with a caller-supplied noise source.
pub fn generate_world_with(
    noise: &impl NoiseSource,
    params: &GenerationParameters,
    rules: &[BiomeRule],
) -> Result<World, ParameterError> {
    params.validate()?;
    for rule in rules {
        rule.validate()?;
    }

    let (w, h) = (params.width, params.height);
    let started = Instant::now();

    let original_height = noise.noise_map(w, h, params.seed, &params.noise);
    if original_height.width() != w || original_height.height() != h {
        return Err(ParameterError::invalid(
            "noise",
            format!(
                "source returned a {}x{} field for a {w}x{h} map",
                original_height.width(),
                original_height.height()
            ),
        ));
    }
    let falloff = generate_falloff_map(w, h, &params.falloff);
    log::debug!("noise + falloff: {:?}", started.elapsed());

    let stage = Instant::now();
    let height_map = elevation::combine(&original_height, &falloff, params.sea_level);
    log::debug!("elevation: {:?}", stage.elapsed());

    let band = equator::detect(&height_map, params.sea_level);
    log::debug!(
        "equator band rows {}..={} (true equator: {})",
        band.top_row,
        band.bottom_row,
        params.use_true_equator
    );

    let stage = Instant::now();
    let temperature = generate_temperature_map(&height_map, band, params.use_true_equator, &params.temperature);
    log::debug!("temperature: {:?}", stage.elapsed());

    let stage = Instant::now();
    let precipitation =
        generate_precipitation_map(&original_height, &temperature, band, params.use_true_equator, &params.humidity);
    log::debug!("precipitation: {:?}", stage.elapsed());

    let stage = Instant::now();
    let thresholds = Thresholds {
        sea_level: params.sea_level,
        spread: params.humidity.spread,
        spread_threshold: params.humidity.spread_threshold,
    };
    let biome = biome::classify(&height_map, &temperature, &precipitation, rules, thresholds);
    log::debug!("biome: {:?}", stage.elapsed());

    let unclassified = biome.as_slice().iter().filter(|&&b| b == Biome::Unclassified).count();
    if unclassified > 0 {
        log::warn!("{unclassified} land cells matched no biome rule");
    }
    log::info!("generated {w}x{h} world (seed {}) in {:?}", params.seed, started.elapsed());

    Ok(World {
        width: w,
        height: h,
        seed: params.seed,
        sea_level: params.sea_level,
        equator: band,
        original_height,
        falloff,
        height_map,
        temperature,
        precipitation,
        biome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::default_rules;
    use crate::equator::EquatorBand;
    use crate::grid::Grid;
    use crate::noise::NoiseSettings;

    fn small(seed: u32) -> GenerationParameters {
        let mut params = GenerationParameters { width: 48, height: 40, seed, ..Default::default() };
        params.noise.scale = 15.0;
        params
    }

    #[test]
    fn deterministic_for_same_seed() {
        let rules = default_rules();
        let a = generate_world(&small(42), &rules).unwrap();
        let b = generate_world(&small(42), &rules).unwrap();
        assert_eq!(a, b);
        let bits = |g: &Grid<f32>| g.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.temperature), bits(&b.temperature));
        assert_eq!(bits(&a.precipitation), bits(&b.precipitation));
    }

    #[test]
    fn all_grids_share_dimensions() {
        let world = generate_world(&small(7), &default_rules()).unwrap();
        assert!(world.original_height.same_shape(&world.falloff));
        assert!(world.original_height.same_shape(&world.height_map));
        assert!(world.original_height.same_shape(&world.temperature));
        assert!(world.original_height.same_shape(&world.precipitation));
        assert!(world.original_height.same_shape(&world.biome));
        assert_eq!((world.height_map.width(), world.height_map.height()), (48, 40));
    }

    #[test]
    fn heights_bounded_and_ocean_is_water() {
        let params = small(1234);
        let world = generate_world(&params, &default_rules()).unwrap();
        for x in 0..params.width {
            for y in 0..params.height {
                let h = world.height_map.at(x, y);
                assert!((params.sea_level..=1.0).contains(&h));
                if h == params.sea_level {
                    assert_eq!(world.biome.at(x, y), Biome::Water);
                } else {
                    assert_ne!(world.biome.at(x, y), Biome::Water);
                }
            }
        }
    }

    #[test]
    fn invalid_parameters_are_rejected_up_front() {
        let params = GenerationParameters { width: 0, ..Default::default() };
        let calls = std::cell::Cell::new(0);
        let counting = |w: usize, h: usize, _: u32, _: &NoiseSettings| {
            calls.set(calls.get() + 1);
            Grid::filled(w, h, 0.5f32)
        };
        assert!(generate_world_with(&counting, &params, &default_rules()).is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn overflowing_dimensions_are_rejected_before_noise() {
        let params = GenerationParameters { width: usize::MAX / 2 + 1, height: 2, ..Default::default() };
        let calls = std::cell::Cell::new(0);
        let counting = |w: usize, h: usize, _: u32, _: &NoiseSettings| {
            calls.set(calls.get() + 1);
            Grid::filled(w, h, 0.5f32)
        };
        assert!(matches!(
            generate_world_with(&counting, &params, &default_rules()),
            Err(ParameterError::InvalidParameter { name: "width", .. })
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn invalid_rule_is_rejected() {
        let rules = vec![BiomeRule::new("bad", (1.0, 0.0), (0.0, 1.0), [0, 0, 0])];
        assert!(generate_world(&small(1), &rules).is_err());
    }

    #[test]
    fn mismatched_noise_field_is_rejected() {
        let wrong = |_: usize, _: usize, _: u32, _: &NoiseSettings| Grid::filled(2, 2, 0.5f32);
        assert!(generate_world_with(&wrong, &small(1), &default_rules()).is_err());
    }

    #[test]
    fn constant_land_scenario() {
        // a = 0 flattens the falloff to 0.5, so noise 1.0 gives height 0.5 everywhere
        let mut params = GenerationParameters { width: 4, height: 4, sea_level: 0.3, ..Default::default() };
        params.falloff.a = 0.0;
        let noise = |w: usize, h: usize, _: u32, _: &NoiseSettings| Grid::filled(w, h, 1.0f32);
        let world = generate_world_with(&noise, &params, &default_rules()).unwrap();
        assert!(world.height_map.as_slice().iter().all(|&h| h == 0.5));
        assert_eq!(world.equator, EquatorBand { top_row: 0, bottom_row: 3 });
        assert!(world.biome.as_slice().iter().all(|&b| b != Biome::Water));
    }

    #[test]
    fn all_sea_scenario() {
        let params = GenerationParameters { width: 4, height: 4, sea_level: 0.3, ..Default::default() };
        let noise = |w: usize, h: usize, _: u32, _: &NoiseSettings| Grid::filled(w, h, 0.0f32);
        let world = generate_world_with(&noise, &params, &default_rules()).unwrap();
        assert_eq!(world.equator, EquatorBand::full(4));
        assert!(world.biome.as_slice().iter().all(|&b| b == Biome::Water));
        assert_eq!(world.land_fraction(), 0.0);
    }

    #[test]
    fn polar_override_with_zero_spread() {
        let mut params = GenerationParameters { width: 4, height: 4, sea_level: 0.3, ..Default::default() };
        params.falloff.a = 0.0;
        params.humidity.spread = 0.0;
        params.humidity.spread_threshold = 1.0e6;
        let noise = |w: usize, h: usize, _: u32, _: &NoiseSettings| Grid::filled(w, h, 1.0f32);
        let world = generate_world_with(&noise, &params, &default_rules()).unwrap();
        assert!(world.biome.as_slice().iter().all(|&b| b == Biome::Polar));
    }

    #[test]
    fn default_map_has_land_and_sea() {
        let mut params = GenerationParameters { width: 96, height: 96, seed: 5, ..Default::default() };
        params.noise.scale = 30.0;
        let world = generate_world(&params, &default_rules()).unwrap();
        let land = world.land_fraction();
        assert!(land > 0.0 && land < 1.0, "land fraction {land}");
        let counts = world.biome_counts(&default_rules());
        assert_eq!(counts.values().sum::<usize>(), 96 * 96);
    }
}
