use anyhow::{Context, Result};
use glam::Vec2;
use image::{ImageOutputFormat, Rgba, RgbaImage};
use log::info;
use std::io::Cursor;

use sky_speaker::engine::assets::{ArchiveBuilder, AssetLoader, AssetSource, MemoryAssetSource};
use sky_speaker::engine::conductor::{Conductor, ConductorConfig};
use sky_speaker::engine::renderer::{DrawQueue, TextureManager};
use sky_speaker::game::characters::gf_sky::{GF_SKY_PAGES, GF_SKY_PROFILE};
use sky_speaker::game::characters::{CharacterManager, GfSky};
use sky_speaker::game::stage::{EventChart, StageContext};

/// Environment variable pointing at an extracted disc image directory
const DISC_ENV: &str = "SKY_SPEAKER_DISC";

/// Bars simulated per stage
const DEMO_BARS: u32 = 4;

/// Speaker bumps for the charted stage, packed (high bit = right)
const DEMO_CHART: [u16; 9] = [
    0x0000, 0x8004, 0x0008, 0x800A, 0x000C, 0x800C, 0x0014, 0x801C, EventChart::TERMINATOR,
];

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Sky Speaker...");

    let mut source: Box<dyn AssetSource> = match std::env::var(DISC_ENV) {
        Ok(path) => {
            info!("Reading character data from {}", path);
            Box::new(AssetLoader::new(path))
        }
        Err(_) => {
            info!("{} not set, using a generated demo disc", DISC_ENV);
            Box::new(demo_disc()?)
        }
    };

    let config = ConductorConfig {
        bpm: 150,
        ..ConductorConfig::default()
    };

    let stepped = StageContext::new(4);
    run_stage("step stage", stepped, config, source.as_mut())?;

    let chart = EventChart::from_packed(&DEMO_CHART);
    let charted = StageContext::new(4).with_chart(&chart);
    run_stage("chart stage", charted, config, source.as_mut())?;

    info!("Done");
    Ok(())
}

/// Simulate a few bars of one stage with GF standing in it
fn run_stage(
    label: &str,
    stage: StageContext<'_>,
    config: ConductorConfig,
    source: &mut dyn AssetSource,
) -> Result<()> {
    let gf = GfSky::new(Vec2::new(0.0, -8.0), source, stage.timing_source())
        .with_context(|| format!("Failed to create GF for {}", label))?;

    let mut characters = CharacterManager::new();
    characters.spawn(Box::new(gf));

    let mut conductor = Conductor::new(config);
    let mut textures = TextureManager::new();
    let mut queue = DrawQueue::new();

    let ticks_per_bar = config.tick_rate as u64 * 60 * 4 / config.bpm.max(1) as u64;
    let total_ticks = ticks_per_bar * DEMO_BARS as u64
        + config.tick_rate as u64 * 60 * config.preroll_steps.max(0) as u64
            / (config.bpm.max(1) as u64 * 4);

    let mut draws = 0;
    let mut boundaries = 0;
    for _ in 0..total_ticks {
        let timing = conductor.tick();
        if timing.just_step {
            boundaries += 1;
        }

        characters.tick_all(&timing, &mut textures, &mut queue);
        draws += queue.drain().len();
    }

    info!(
        "{}: {} ticks, {} step boundaries, {} draws, {} texture uploads",
        label,
        total_ticks,
        boundaries,
        draws,
        textures.upload_count()
    );
    Ok(())
}

/// Build an in-memory disc holding a GF archive of flat-coloured pages
fn demo_disc() -> Result<MemoryAssetSource> {
    const COLORS: [[u8; 4]; 5] = [
        [230, 90, 120, 255],
        [200, 70, 110, 255],
        [90, 120, 230, 255],
        [70, 110, 200, 255],
        [120, 120, 120, 255],
    ];

    let mut builder = ArchiveBuilder::new();
    for (name, color) in GF_SKY_PAGES.iter().zip(COLORS) {
        builder = builder.add_file(name, demo_page(color)?);
    }

    Ok(MemoryAssetSource::new().with_file(GF_SKY_PROFILE.archive_path, builder.build()))
}

fn demo_page(color: [u8; 4]) -> Result<Vec<u8>> {
    let img = RgbaImage::from_pixel(256, 256, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png)
        .context("Failed to encode demo texture page")?;
    Ok(out.into_inner())
}
