//! Reference render: two spheres at 800x450, 64 spp, depth 16.
//!
//! Usage: `cargo run --release --example two_spheres -- [output.png|output.ppm] [--serial]`

use anyhow::{Context, Result};
use rt_render::{render, two_sphere_scene, Image, Parallel, RenderConfig, Scheduler, Serial};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut output = String::from("two_spheres.png");
    let mut serial = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--serial" => serial = true,
            _ => output = arg,
        }
    }

    let scene = two_sphere_scene();
    let config = RenderConfig::reference();
    let scheduler: Box<dyn Scheduler> = if serial {
        Box::new(Serial)
    } else {
        Box::new(Parallel::available())
    };

    let (image, stats) = render(&scene, &config, scheduler.as_ref()).context("Render failed")?;
    log::info!(
        "{} scheduler finished {} units in {:?}",
        stats.scheduler,
        stats.units_submitted,
        stats.elapsed
    );

    let path = Path::new(&output);
    match path.extension().and_then(|e| e.to_str()) {
        Some("ppm") => save_ppm(&image, path)?,
        _ => save_png(image, path)?,
    }
    log::info!("Saved to {}", path.display());

    Ok(())
}

fn save_png(image: Image, path: &Path) -> Result<()> {
    let (width, height) = (image.width, image.height);
    let buffer = image::RgbImage::from_raw(width, height, image.into_bytes())
        .context("Image buffer does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn save_ppm(image: &Image, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;
    writer.write_all(image.as_bytes())?;
    writer.flush()?;

    Ok(())
}
