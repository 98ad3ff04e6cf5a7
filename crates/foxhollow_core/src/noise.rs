use foxhollow_data::NoiseParams;
use noise::{NoiseFn, Perlin};

/// A multi-octave Perlin field sampled once per grid cell.
///
/// Identical parameters always produce identical samples; the permutation
/// table is derived from `NoiseParams::seed`.
#[derive(Clone)]
pub struct NoiseField {
    params: NoiseParams,
    perlin: Perlin,
    amplitude_sum: f64,
}

impl NoiseField {
    #[must_use]
    pub fn new(params: NoiseParams) -> Self {
        let amplitude_sum = (0..params.octaves.max(1))
            .map(|i| params.persistence.powi(i as i32))
            .sum::<f64>();
        Self {
            params,
            perlin: Perlin::new(params.seed),
            amplitude_sum,
        }
    }

    #[must_use]
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Samples the field at `(x, y)`. The result lies in `[-1, 1]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let nx = x / self.params.scale;
        let ny = y / self.params.scale;

        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.params.octaves.max(1) {
            total += amplitude * self.perlin.get([nx * frequency, ny * frequency]);
            amplitude *= self.params.persistence;
            frequency *= self.params.lacunarity;
        }

        if self.amplitude_sum > 0.0 {
            (total / self.amplitude_sum).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// Samples every cell of a `width` x `height` grid, row-major.
    #[must_use]
    pub fn grid(&self, width: u32, height: u32) -> Vec<f64> {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(self.sample(f64::from(x), f64::from(y)));
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_params_give_identical_samples() {
        let a = NoiseField::new(NoiseParams::default());
        let b = NoiseField::new(NoiseParams::default());
        for (x, y) in [(3.0, 7.0), (120.5, 44.25), (959.0, 749.0)] {
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn test_samples_stay_in_unit_range() {
        let field = NoiseField::new(NoiseParams {
            scale: 13.0,
            octaves: 6,
            persistence: 0.9,
            lacunarity: 2.0,
            seed: 7,
        });
        for v in field.grid(64, 64) {
            assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
        }
    }

    #[test]
    fn test_seed_changes_field() {
        let a = NoiseField::new(NoiseParams::default().with_seed(1)).grid(32, 32);
        let b = NoiseField::new(NoiseParams::default().with_seed(2)).grid(32, 32);
        assert!(a.iter().zip(&b).any(|(x, y)| x != y));
    }

    #[test]
    fn test_larger_scale_is_smoother() {
        let roughness = |scale: f64| {
            let field = NoiseField::new(NoiseParams {
                scale,
                octaves: 1,
                ..Default::default()
            });
            let grid = field.grid(64, 1);
            grid.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>()
        };
        assert!(roughness(200.0) < roughness(8.0));
    }

    #[test]
    fn test_grid_is_row_major() {
        let field = NoiseField::new(NoiseParams {
            scale: 10.0,
            ..Default::default()
        });
        let grid = field.grid(5, 4);
        assert_eq!(grid.len(), 20);
        assert_eq!(grid[2 * 5 + 3], field.sample(3.0, 2.0));
    }
}
