use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use ratatui::style::Modifier;
use serde::Deserialize;
use tracing::info;

use crate::error::{CurveNavError, CurveNavResult};
use crate::item::ItemSpec;
use crate::navigation::Direction;
use crate::units::Argb;

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time so a missing config file never
/// stops the widget from starting.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// curvenav-demo: a curved bottom navigation bar for the terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "curvenav-demo", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Layout direction: ltr / rtl (overrides config file)
    #[arg(short, long)]
    pub direction: Option<Direction>,

    /// Base animation duration in milliseconds (overrides config file)
    #[arg(long)]
    pub duration: Option<u64>,

    /// Disable selection animations
    #[arg(long)]
    pub no_animation: bool,

    /// Target FPS for the render loop (overrides config file)
    #[arg(long)]
    pub fps: Option<u16>,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration, parsed from TOML and then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: String,

    /// Target FPS
    pub fps: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Base duration of a selection move (ms); each crossed cell adds 100ms
    pub duration_ms: u64,

    /// Enable animations
    pub enabled: bool,

    /// Fire the click listener even when tapping the selected item
    pub call_listener_when_selected: bool,
}

/// Sizes are density-independent; `density` converts them to cells.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub density: f32,
    pub cell_height: f32,
    pub circle_size: f32,
    pub icon_size: f32,
    pub icon_padding: f32,
    pub title_text_size: f32,
    pub bezier_shadow_height: f32,
    pub bezier_outer_width: f32,
    pub bezier_outer_height: f32,
    pub bezier_inner_width: f32,
    pub bezier_inner_height: f32,
    /// Text modifier for badge counts: "bold", "italic", "dim", …
    pub count_typeface: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub default_icon: Argb,
    pub selected_icon: Argb,
    pub background: Argb,
    pub circle: Argb,
    pub shadow: Argb,
    pub count_text: Argb,
    pub count_background: Argb,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // The embedded TOML ships with the crate
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            fps: 60,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 200,
            enabled: true,
            call_listener_when_selected: false,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            density: 1.0,
            cell_height: 90.0,
            circle_size: 48.0,
            icon_size: 48.0,
            icon_padding: 0.0,
            title_text_size: 16.0,
            bezier_shadow_height: 8.0,
            bezier_outer_width: 72.0,
            bezier_outer_height: 8.0,
            bezier_inner_width: 124.0,
            bezier_inner_height: 0.0,
            count_typeface: None,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            default_icon: Argb::WHITE,
            selected_icon: Argb::WHITE,
            background: Argb(0xFF00_95B9),
            circle: Argb(0xFF00_95B9),
            shadow: Argb(0x5F21_2121),
            count_text: Argb::WHITE,
            count_background: Argb(0xFFEF_6C00),
        }
    }
}

/// Parse a badge typeface name into a text modifier.
/// `"none"` / `"normal"` clear it.
pub fn parse_typeface(s: &str) -> Result<Option<Modifier>, String> {
    match s.trim().to_lowercase().as_str() {
        "" | "none" | "normal" => Ok(None),
        "bold" => Ok(Some(Modifier::BOLD)),
        "italic" => Ok(Some(Modifier::ITALIC)),
        "bold_italic" | "bold-italic" => Ok(Some(Modifier::BOLD | Modifier::ITALIC)),
        "dim" => Ok(Some(Modifier::DIM)),
        "underlined" => Ok(Some(Modifier::UNDERLINED)),
        other => Err(format!("unknown typeface: {other}")),
    }
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/curvenav/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("curvenav")
            .join("config.toml")
    }

    /// Convenience: tick interval from FPS
    pub fn tick_rate(&self) -> Duration {
        let fps = self.general.fps.max(1);
        Duration::from_millis(1000 / fps as u64)
    }

    /// Check if animations are enabled
    pub fn animations(&self) -> bool {
        self.animation.enabled
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If the file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
pub fn load(cli: &CliArgs) -> CurveNavResult<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = load_from(&config_path)?;

    // ── CLI overrides ───────────────────────────────────────────────
    if let Some(direction) = cli.direction {
        config.layout.direction = direction;
    }
    if let Some(duration) = cli.duration {
        config.animation.duration_ms = duration;
    }
    if cli.no_animation {
        config.animation.enabled = false;
    }
    if let Some(fps) = cli.fps {
        config.general.fps = fps;
    }
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }

    Ok(config)
}

/// Read a config file, bootstrapping it from the embedded default first if
/// it does not exist yet.
pub fn load_from(config_path: &Path) -> CurveNavResult<Config> {
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CurveNavError::Config(format!(
                    "Failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        std::fs::write(config_path, DEFAULT_CONFIG_TOML).map_err(|e| {
            CurveNavError::Config(format!(
                "Failed to write default config to {}: {e}",
                config_path.display()
            ))
        })?;
        info!("Created default config at {}", config_path.display());
    }

    let toml_str = std::fs::read_to_string(config_path)?;
    Ok(toml::from_str(&toml_str)?)
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_default_parses() {
        let config = Config::default();
        assert_eq!(config.animation.duration_ms, 200);
        assert!(config.animations());
        assert!(!config.items.is_empty());
        assert_eq!(config.colors.shadow, Argb(0x5F21_2121));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[animation]\nenabled = false\n").unwrap();
        assert!(!config.animation.enabled);
        assert_eq!(config.animation.duration_ms, 200);
        assert_eq!(config.layout.direction, Direction::Ltr);
        assert_eq!(config.colors.background, Argb(0xFF00_95B9));
        assert!(config.items.is_empty());
    }

    #[test]
    fn direction_accepts_codes_and_names() {
        let by_code: Config = toml::from_str("[layout]\ndirection = 1\n").unwrap();
        let by_name: Config = toml::from_str("[layout]\ndirection = \"rtl\"\n").unwrap();
        assert_eq!(by_code.layout.direction, Direction::Rtl);
        assert_eq!(by_name.layout.direction, Direction::Rtl);
        assert!(toml::from_str::<Config>("[layout]\ndirection = 7\n").is_err());
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        let err = toml::from_str::<Config>("[colors]\ncircle = \"#zzz\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn items_parse_with_optional_fields() {
        let config: Config = toml::from_str(
            r#"
            [[items]]
            title = "Home"
            icon = "H"
            selected = true

            [[items]]
            title = "Inbox"
            icon = "I"
            badge = "12"
            padding = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.items.len(), 2);
        assert!(config.items[0].selected);
        assert_eq!(config.items[1].badge.as_deref(), Some("12"));
        assert_eq!(config.items[1].padding, 2.0);
    }

    #[test]
    fn load_bootstraps_missing_file_and_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cli = CliArgs {
            config: Some(path.clone()),
            direction: Some(Direction::Rtl),
            duration: Some(350),
            no_animation: true,
            fps: Some(20),
            ..CliArgs::default()
        };

        let config = load(&cli).unwrap();
        assert!(path.exists());
        assert_eq!(config.layout.direction, Direction::Rtl);
        assert_eq!(config.animation.duration_ms, 350);
        assert!(!config.animation.enabled);
        assert_eq!(config.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn load_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[animation\n").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(CurveNavError::ConfigParse(_))
        ));
    }

    #[test]
    fn typefaces() {
        assert_eq!(parse_typeface("Bold"), Ok(Some(Modifier::BOLD)));
        assert_eq!(parse_typeface("none"), Ok(None));
        assert!(parse_typeface("comic-sans").is_err());
    }
}
