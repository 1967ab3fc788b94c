// tests/style_cycling_test.rs

use pubplot::palette::{cycle_index, StylePalettes};
use pubplot::{create_figure, StyleConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_first_series_reuses_fifth_color() {
        assert_eq!(cycle_index(20, 16), Some(4));
        let palettes = StylePalettes::default();
        assert_eq!(
            palettes.style_for(20, false).color,
            palettes.style_for(4, false).color
        );
    }

    #[test]
    fn test_palettes_have_fixed_lengths() {
        let palettes = StylePalettes::default();
        assert_eq!(palettes.colors.len(), 16);
        assert_eq!(palettes.line_styles.len(), 8);
        assert_eq!(palettes.markers.len(), 10);
    }

    #[test]
    fn test_zero_series_has_no_legend_entries() {
        let fig = create_figure(8.0, 4.0 / 3.0, &StyleConfig::research());
        assert!(fig.axes.series.is_empty());
        assert!(fig.axes.legend_entries().is_empty());
    }
}
