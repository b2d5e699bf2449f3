//! Viewer configuration: an optional TOML file overlaid by command-line flags.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use deck3d_cards::Theme;

const DEFAULT_TITLE: &str = "deck3d";
const DEFAULT_SIZE: (u32, u32) = (1280, 800);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid window size {0:?}, expected WIDTHxHEIGHT")]
    Size(String),
}

/// Which scene the viewer opens.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerMode {
    /// Main, active and discard piles with the theme panel.
    #[default]
    Table,
    /// Six cards fanned over a floor grid.
    Fan,
}

/// 3D playing-card viewer.
#[derive(Parser, Debug, Default)]
#[command(name = "deck3d", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scene to open (overrides config)
    #[arg(short, long, value_enum)]
    pub mode: Option<ViewerMode>,

    /// Window title (overrides config)
    #[arg(long)]
    pub title: Option<String>,

    /// Window size in logical pixels, e.g. 1280x800 (overrides config)
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Log filter in env_logger syntax (overrides config and RUST_LOG)
    #[arg(long, env = "DECK3D_LOG")]
    pub log: Option<String>,

    /// Render every card texture of the selected mode to PNG files in DIR and exit
    #[arg(long, value_name = "DIR")]
    pub dump_textures: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Font files tried in order before the system candidates.
    pub fonts: Vec<PathBuf>,
    pub front_template: Option<PathBuf>,
    pub back_template: Option<PathBuf>,
}

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub window: WindowConfig,
    pub mode: Option<ViewerMode>,
    pub log: Option<String>,
    pub assets: AssetsConfig,
    pub initial_theme: Option<String>,
    /// Extra presets appended after the built-in ones.
    pub themes: Vec<Theme>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything the viewer needs after merging file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    pub size: (u32, u32),
    pub mode: ViewerMode,
    pub log: Option<String>,
    pub assets: AssetsConfig,
    pub themes: Vec<Theme>,
    /// Index into `themes`.
    pub initial_theme: usize,
    pub dump_textures: Option<PathBuf>,
    /// Problems found while resolving; logged once the logger is up.
    pub warnings: Vec<String>,
}

impl Settings {
    /// Reads the config file named by `cli` (if any) and applies the flags on top.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, cli))
    }

    pub fn resolve(file: FileConfig, cli: Cli) -> Self {
        let size = cli.size.unwrap_or((
            file.window.width.unwrap_or(DEFAULT_SIZE.0),
            file.window.height.unwrap_or(DEFAULT_SIZE.1),
        ));

        let mut themes = Theme::presets();
        for extra in file.themes {
            let extra = extra.sanitized();
            match themes.iter_mut().find(|t| t.name.eq_ignore_ascii_case(&extra.name)) {
                Some(existing) => *existing = extra,
                None => themes.push(extra),
            }
        }

        let mut warnings = Vec::new();
        let initial_theme = match &file.initial_theme {
            Some(name) => themes
                .iter()
                .position(|t| t.name.eq_ignore_ascii_case(name))
                .unwrap_or_else(|| {
                    warnings.push(format!("unknown initial theme {name:?}, using {}", themes[0].name));
                    0
                }),
            None => 0,
        };

        Self {
            title: cli.title.or(file.window.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            size: (size.0.max(1), size.1.max(1)),
            mode: cli.mode.or(file.mode).unwrap_or_default(),
            log: cli.log.or(file.log),
            assets: file.assets,
            themes,
            initial_theme,
            dump_textures: cli.dump_textures,
            warnings,
        }
    }
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(u32, u32), ConfigError> {
    let err = || ConfigError::Size(s.to_string());
    let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(err)?;
    let w: u32 = w.trim().parse().map_err(|_| err())?;
    let h: u32 = h.trim().parse().map_err(|_| err())?;
    if w == 0 || h == 0 {
        return Err(err());
    }
    Ok((w, h))
}
