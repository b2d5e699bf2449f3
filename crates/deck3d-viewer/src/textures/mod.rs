//! Card face and back rasters, painted on the CPU and uploaded as textures.

pub mod canvas;
pub mod fan;
pub mod skull;
pub mod suits;
pub mod table;

use std::path::{Path, PathBuf};

use deck3d_cards::{fan_deck, table_deck, Theme};
use deck3d_engine::text::{FontId, FontSystem};
use resvg::tiny_skia::Pixmap;

use crate::config::{AssetsConfig, ViewerMode};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Alloc { width: u32, height: u32 },
    #[error("card outline is degenerate")]
    Shape,
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to parse skull svg: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create {path}: {source}")]
    Dir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Optional background images for table cards, decoded once at startup.
#[derive(Default)]
pub struct Templates {
    pub front: Option<Pixmap>,
    pub back: Option<Pixmap>,
}

impl Templates {
    /// Loads the configured templates. A template that fails to load is
    /// logged and replaced by the generated one.
    pub fn load(assets: &AssetsConfig) -> Self {
        let load = |path: &Option<PathBuf>| {
            let path = path.as_deref()?;
            match canvas::load_image(path) {
                Ok(pm) => {
                    log::info!("loaded card template {}", path.display());
                    Some(pm)
                }
                Err(e) => {
                    log::warn!("{e}; using the generated template");
                    None
                }
            }
        };
        Self { front: load(&assets.front_template), back: load(&assets.back_template) }
    }
}

/// What the painters need besides the card itself.
pub struct CardArt<'a> {
    pub fonts: &'a FontSystem,
    /// Rank text is omitted when no font could be loaded.
    pub font: Option<FontId>,
    pub templates: &'a Templates,
}

/// Every texture a mode shows, keyed by a file-friendly name.
pub fn mode_textures(mode: ViewerMode, theme: &Theme, art: &CardArt<'_>) -> Result<Vec<(String, Pixmap)>, TextureError> {
    let mut out = Vec::new();
    match mode {
        ViewerMode::Table => {
            for card in table_deck() {
                out.push((format!("table-front-{:02}", card.id.0), table::front(&card, art)?));
            }
            let back = table::back(&theme.colors, art)?;
            out.push((format!("table-back-{}", theme.name), back.color));
            out.push((format!("table-back-{}-emissive", theme.name), back.emissive));
        }
        ViewerMode::Fan => {
            for card in fan_deck() {
                out.push((format!("fan-front-{:02}", card.id.0), fan::front(&card, art)?));
            }
            out.push(("fan-back".to_string(), fan::back()?));
        }
    }
    Ok(out)
}

/// Writes every texture of `mode` as PNG into `dir`, returning the written paths.
pub fn dump_textures(dir: &Path, mode: ViewerMode, theme: &Theme, art: &CardArt<'_>) -> Result<Vec<PathBuf>, TextureError> {
    std::fs::create_dir_all(dir).map_err(|source| TextureError::Dir { path: dir.to_path_buf(), source })?;

    let mut written = Vec::new();
    for (name, pixmap) in mode_textures(mode, theme, art)? {
        let path = dir.join(format!("{name}.png"));
        canvas::to_image(&pixmap)
            .save(&path)
            .map_err(|source| TextureError::Write { path: path.clone(), source })?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_mode_lists_six_fronts_and_one_back() {
        let fonts = FontSystem::new();
        let templates = Templates::default();
        let art = CardArt { fonts: &fonts, font: None, templates: &templates };
        let names: Vec<String> =
            mode_textures(ViewerMode::Fan, &Theme::classic(), &art).unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "fan-front-00");
        assert_eq!(names[6], "fan-back");
    }

    #[test]
    fn table_dump_writes_pngs() {
        let fonts = FontSystem::new();
        let templates = Templates::default();
        let art = CardArt { fonts: &fonts, font: None, templates: &templates };
        let dir = std::env::temp_dir().join(format!("deck3d-dump-{}", std::process::id()));
        let written = dump_textures(&dir, ViewerMode::Table, &Theme::classic(), &art).unwrap();
        assert_eq!(written.len(), 12);
        assert!(written.iter().all(|p| p.exists()));
        assert!(dir.join("table-back-classic-emissive.png").exists());

        let img = image::open(dir.join("table-front-00.png")).unwrap();
        assert_eq!((img.width(), img.height()), (table::WIDTH, table::HEIGHT));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_templates_fall_back() {
        let assets = AssetsConfig {
            front_template: Some(PathBuf::from("/nonexistent/front.png")),
            ..AssetsConfig::default()
        };
        let t = Templates::load(&assets);
        assert!(t.front.is_none() && t.back.is_none());
    }
}
