// tests/figure_sizing_test.rs

use pubplot::{create_figure, FigureSize, PlotError, StyleConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_figure_size_in_inches() {
        let fig = create_figure(8.0, 4.0 / 3.0, &StyleConfig::research());
        assert!((fig.size.width_in - 3.1496).abs() < 1e-4);
        assert!((fig.size.width_in - 8.0 / 2.54).abs() < 1e-6);
        assert!((fig.size.height_in - 2.3622).abs() < 1e-4);
        assert!((fig.size.height_in - 8.0 / 2.54 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_factory_is_idempotent() {
        let style = StyleConfig::scientific();
        let a = create_figure(12.5, 1.5, &style);
        let b = create_figure(12.5, 1.5, &style);
        assert_eq!(a.size, b.size);
    }

    #[test]
    fn test_pixels_at_dpi() {
        let size = FigureSize::from_cm(8.0, 4.0 / 3.0);
        assert_eq!(size.pixels(300.0).unwrap(), (945, 709));
    }

    #[test]
    fn test_non_positive_size_fails_at_allocation() {
        let size = FigureSize::from_cm(0.0, 4.0 / 3.0);
        assert!(matches!(
            size.pixels(300.0),
            Err(PlotError::InvalidFigureSize { .. })
        ));
        let size = FigureSize::from_cm(8.0, 0.0);
        assert!(size.pixels(300.0).is_err());
    }
}
