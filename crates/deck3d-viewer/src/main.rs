mod app;
mod config;
mod modes;
mod render;
mod textures;
mod world;

use anyhow::Context;
use clap::Parser;
use deck3d_engine::device::GpuInit;
use deck3d_engine::logging::{init_logging, LoggingConfig};
use deck3d_engine::text::FontSystem;
use deck3d_engine::window::{Runtime, RuntimeConfig};

use app::ViewerApp;
use config::{Cli, Settings};
use textures::{dump_textures, CardArt, Templates};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(Cli::parse()).context("failed to load configuration")?;
    init_logging(LoggingConfig::default().with_filter(settings.log.clone()));
    for warning in &settings.warnings {
        log::warn!("{warning}");
    }

    let mut fonts = FontSystem::new();
    let font = fonts.load_first_available(settings.assets.fonts.as_slice());
    if font.is_none() {
        log::warn!("no usable font found; card ranks and panel text will not be drawn");
    }
    let templates = Templates::load(&settings.assets);

    if let Some(dir) = &settings.dump_textures {
        let theme = settings.themes.get(settings.initial_theme).cloned().unwrap_or_default();
        let art = CardArt { fonts: &fonts, font, templates: &templates };
        let written = dump_textures(dir, settings.mode, &theme, &art)
            .with_context(|| format!("failed to dump textures into {}", dir.display()))?;
        log::info!("wrote {} textures to {}", written.len(), dir.display());
        return Ok(());
    }

    let (width, height) = settings.size;
    let window = RuntimeConfig::default()
        .with_title(settings.title.clone())
        .with_size(width as f64, height as f64);
    let app = ViewerApp::new(&settings, fonts, font, templates);

    Runtime::run(window, GpuInit::default(), app)
}
