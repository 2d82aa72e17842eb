//! Simple OCR check - run with: cargo run -p glance-ocr --bin probe_ocr -- <image>

use anyhow::{Context, Result};
use glance_config::Config;
use glance_ocr::{TesseractRecognizer, TextRecognizer, probe_image};
use glance_types::{ImageHandle, ImageOrigin};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(std::path::PathBuf::from)
        .context("usage: probe_ocr <image>")?;

    let (width, height) = probe_image(&path).context("Failed to read image")?;
    tracing::info!("{} ({}x{})", path.display(), width, height);

    let mut config = Config::default();
    config.apply_env_overrides()?;
    let recognizer = TesseractRecognizer::new(&config.ocr);
    let handle = ImageHandle::new(path, ImageOrigin::Gallery, width, height);

    let start = std::time::Instant::now();
    let text = recognizer.recognize(&handle).await?;
    tracing::info!(
        "{:?} - {} chars ({})",
        start.elapsed(),
        text.len(),
        recognizer.language()
    );

    for line in text.lines().take(5) {
        println!("> {line}");
    }

    Ok(())
}
