// src/font_config.rs

// Font selection and per-role text sizes for figure rendering.
// Every text element of a figure gets its family and size from here so the
// style configuration stays the single source of truth.

use std::sync::OnceLock;

use plotters::style::{IntoFont, TextStyle, BLACK};
use svg2pdf::usvg::fontdb::{Database, Family, Query};

use crate::style_config::StyleConfig;

/// Generic family used when no font at all is installed.
pub const FONT_FAMILY_FALLBACK: &str = "serif";

/// A font family plus a size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRole {
    pub family: String,
    pub size_pt: f64,
}

impl FontRole {
    /// Size in pixels at `px_per_pt`.
    pub fn size_px(&self, px_per_pt: f64) -> f64 {
        self.size_pt * px_per_pt
    }

    /// Black text style scaled for the output resolution.
    pub fn text_style(&self, px_per_pt: f64) -> TextStyle<'_> {
        (self.family.as_str(), self.size_px(px_per_pt))
            .into_font()
            .color(&BLACK)
    }
}

/// Fonts for every text element of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRoles {
    pub title: FontRole,
    pub axis_label: FontRole,
    pub xtick_label: FontRole,
    pub ytick_label: FontRole,
    pub legend: FontRole,
    pub base: FontRole,
}

impl FontRoles {
    pub fn from_style(style: &StyleConfig, family: &str) -> Self {
        let role = |size_pt: f64| FontRole {
            family: family.to_string(),
            size_pt,
        };
        Self {
            title: role(style.axes_title_size),
            axis_label: role(style.axes_label_size),
            xtick_label: role(style.xtick_label_size),
            ytick_label: role(style.ytick_label_size),
            legend: role(style.legend_font_size),
            base: role(style.font_size),
        }
    }
}

/// Installed families tried, in order, when no preference is available.
const FALLBACK_FAMILIES: [&str; 7] = [
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
    "FreeSerif",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];

const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// System fonts, loaded once. The same database backs PDF conversion, so a
/// family accepted here is one the converter can also draw.
pub fn system_fonts() -> &'static Database {
    static FONTS: OnceLock<Database> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        db
    })
}

fn family_available(db: &Database, family: &str) -> bool {
    let families = [Family::Name(family)];
    db.query(&Query {
        families: &families,
        ..Query::default()
    })
    .is_some()
}

/// First installed family of the fallback list, else any installed family.
/// `serif` when the database is empty.
pub fn fallback_family(db: &Database) -> String {
    if let Some(family) = FALLBACK_FAMILIES.iter().find(|f| family_available(db, f)) {
        return family.to_string();
    }
    db.faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| FONT_FAMILY_FALLBACK.to_string())
}

/// First family in `preferences` installed in `db`. Generic names such as
/// `serif` resolve to the installed fallback family.
pub fn resolve_font_family_in(db: &Database, preferences: &[String]) -> String {
    for family in preferences {
        if GENERIC_FAMILIES.contains(&family.to_ascii_lowercase().as_str()) {
            break;
        }
        if family_available(db, family) {
            log::debug!("Using font family '{family}'");
            return family.clone();
        }
        log::warn!("Font family '{family}' unavailable, trying next preference");
    }
    let fallback = fallback_family(db);
    log::debug!("Using fallback font family '{fallback}'");
    fallback
}

/// First installed family in `preferences`, checked against the system fonts.
pub fn resolve_font_family(preferences: &[String]) -> String {
    resolve_font_family_in(system_fonts(), preferences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_follow_style_sizes() {
        let style = StyleConfig::research();
        let roles = FontRoles::from_style(&style, "serif");
        assert_eq!(roles.axis_label.size_pt, 12.0);
        assert_eq!(roles.xtick_label.size_pt, 10.0);
        assert_eq!(roles.legend.family, "serif");
        assert!((roles.axis_label.size_px(300.0 / 72.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_empty_preferences_falls_back() {
        let db = system_fonts();
        assert_eq!(resolve_font_family_in(db, &[]), fallback_family(db));
    }

    #[test]
    fn test_unknown_family_resolves_to_installed_fallback() {
        let db = system_fonts();
        let resolved = resolve_font_family_in(db, &["No Such Family Zzz".to_string()]);
        assert_ne!(resolved, "No Such Family Zzz");
        assert_eq!(resolved, fallback_family(db));
    }

    #[test]
    fn test_generic_name_uses_fallback() {
        let db = system_fonts();
        let prefs = ["serif".to_string(), "No Such Family Zzz".to_string()];
        assert_eq!(resolve_font_family_in(db, &prefs), fallback_family(db));
    }

    #[test]
    fn test_empty_database_falls_back_to_generic() {
        let db = Database::new();
        let prefs = ["Times New Roman".to_string()];
        assert_eq!(resolve_font_family_in(&db, &prefs), FONT_FAMILY_FALLBACK);
    }

    #[test]
    fn test_installed_family_is_kept() {
        let db = system_fonts();
        let installed = fallback_family(db);
        if installed != FONT_FAMILY_FALLBACK {
            assert_eq!(resolve_font_family_in(db, &[installed.clone()]), installed);
        }
    }
}
