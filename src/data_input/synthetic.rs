// src/data_input/synthetic.rs

// Demonstration series used by the chart templates.

use ndarray::Array1;

use crate::constants::{SAMPLE_COUNT, SAMPLE_X_END, SAMPLE_X_START};

/// `count` evenly spaced samples from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> Array1<f64> {
    Array1::linspace(start, end, count)
}

/// The shared x grid of the templates: 100 samples over [0, 10].
pub fn sample_grid() -> Array1<f64> {
    linspace(SAMPLE_X_START, SAMPLE_X_END, SAMPLE_COUNT)
}

/// sin(x + step * i) for i in 0..count.
pub fn phase_shifted_sines(x: &Array1<f64>, count: usize, step: f64) -> Vec<Array1<f64>> {
    (0..count)
        .map(|i| x.mapv(|v| (v + step * i as f64).sin()))
        .collect()
}

/// sin(x) * i for i in 1..=count.
pub fn scaled_sines(x: &Array1<f64>, count: usize) -> Vec<Array1<f64>> {
    let base = x.mapv(f64::sin);
    (1..=count).map(|i| &base * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_grid_endpoints() {
        let x = sample_grid();
        assert_eq!(x.len(), 100);
        assert_eq!(x[0], 0.0);
        assert!((x[99] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_phase_shifted_sines() {
        let x = linspace(0.0, 1.0, 3);
        let ys = phase_shifted_sines(&x, 6, 0.5);
        assert_eq!(ys.len(), 6);
        assert!((ys[0][0] - 0.0).abs() < 1e-12);
        assert!((ys[2][0] - 1.0f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_sines() {
        let x = linspace(0.0, 2.0, 5);
        let ys = scaled_sines(&x, 4);
        assert_eq!(ys.len(), 4);
        assert!((ys[3][2] - 4.0 * 1.0f64.sin()).abs() < 1e-12);
        assert!(scaled_sines(&x, 0).is_empty());
    }
}
