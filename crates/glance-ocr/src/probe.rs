use std::path::Path;

/// Pixel dimensions of an image file, reading only its header
pub fn probe_image(path: &Path) -> image::ImageResult<(u32, u32)> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_png_dimensions() {
        let path = fixtures::sample_png("probe");
        assert_eq!(probe_image(&path).unwrap(), (8, 5));
    }

    #[test]
    fn rejects_non_images() {
        let path = std::env::temp_dir().join(format!("glance-not-image-{}.txt", std::process::id()));
        std::fs::write(&path, b"just text").unwrap();
        assert!(probe_image(&path).is_err());
        let _ = std::fs::remove_file(path);
    }
}
