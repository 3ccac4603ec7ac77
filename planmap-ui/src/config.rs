//! Map configuration registry.
//!
//! Each entry names a background image, its natural size and the region
//! dataset drawn over it.

use planmap_core::{ConfigError, RegionError, RegionSet, ViewerConfig};

/// Base URL prepended to media paths. Set `PLANMAP_MEDIA_URL` at build time to
/// serve images from another origin.
pub fn media_base_url() -> &'static str {
    option_env!("PLANMAP_MEDIA_URL").unwrap_or("")
}

/// Join a media base URL and a path with exactly one `/` between them.
/// An empty base leaves the path untouched.
pub fn media_url(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Static description of one map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Path of the background image below the media base URL. `None` draws
    /// a grid placeholder instead.
    pub image_path: Option<&'static str>,
    pub image_width: f64,
    pub image_height: f64,
    pub max_scale: f64,
    /// JSON array of regions.
    pub regions_json: &'static str,
}

impl MapConfig {
    pub fn image_src(&self) -> Option<String> {
        self.image_path
            .map(|path| media_url(media_base_url(), path))
    }

    pub fn viewer_config(&self) -> Result<ViewerConfig, ConfigError> {
        let config = ViewerConfig::default()
            .with_image_size(self.image_width, self.image_height)
            .with_max_scale(self.max_scale);
        config.validate()?;
        Ok(config)
    }

    pub fn regions(&self) -> Result<RegionSet, RegionError> {
        RegionSet::from_json(self.regions_json)
    }
}

pub static MAP_CONFIGS: &[MapConfig] = &[
    MapConfig {
        id: "site-plan",
        display_name: "Plan de masse",
        image_path: Some("/images/img-maps.jpg"),
        image_width: 2560.0,
        image_height: 1974.0,
        max_scale: 5.0,
        regions_json: include_str!("../assets/regions.json"),
    },
    MapConfig {
        id: "grid",
        display_name: "Grille de test",
        image_path: None,
        image_width: 2000.0,
        image_height: 2000.0,
        max_scale: 4.0,
        regions_json: r#"[
            {"id": "a", "title": "Zone A", "coords": [100, 100, 500, 100, 500, 500, 100, 500]},
            {"id": "b", "title": "Zone B", "coords": [900, 900, 1400, 1000, 1100, 1500]}
        ]"#,
    },
];

pub fn get_config(id: &str) -> Option<&'static MapConfig> {
    MAP_CONFIGS.iter().find(|c| c.id == id)
}

/// The site plan, shown when no other map is requested.
pub fn default_config() -> &'static MapConfig {
    &MAP_CONFIGS[0]
}
