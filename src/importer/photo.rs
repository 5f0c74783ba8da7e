//! Decodificación, redimensionado y recodificación de fotos

use crate::error::{FleetError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ImageReader, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Formato de salida de las fotos procesadas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Webp,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(OutputFormat::Webp),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(format!("Formato desconocido: {}. Usa webp o jpeg", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Webp => write!(f, "webp"),
            OutputFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub max_width: u32,
    pub quality: u8,
    pub format: OutputFormat,
    /// Prefijo web, ej. `/machinery`
    pub public_prefix: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: 80,
            format: OutputFormat::Webp,
            public_prefix: "/machinery".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub file_name: String,
    pub public_path: String,
    pub width: u32,
    pub height: u32,
}

/// Tamaño final: si el ancho supera `max_width`, se escala proporcionalmente
/// con el alto truncado hacia abajo.
pub fn scaled_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let new_height = (u64::from(height) * u64::from(max_width) / u64::from(width)) as u32;
    (max_width, new_height.max(1))
}

pub fn output_file_name(ordinal: usize, format: OutputFormat) -> String {
    format!("image-{}.{}", ordinal, format.extension())
}

pub fn public_path(prefix: &str, slug: &str, file_name: &str) -> String {
    format!("{}/{}/{}", prefix.trim_end_matches('/'), slug, file_name)
}

pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(img.into_rgb8())
}

/// Solo lee la cabecera para validar la foto sin decodificarla completa
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    let dims = ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dims)
}

pub fn resize_to_fit(img: RgbImage, max_width: u32) -> RgbImage {
    let (width, height) = scaled_size(img.width(), img.height(), max_width);
    if width == img.width() && height == img.height() {
        return img;
    }
    image::imageops::resize(&img, width, height, FilterType::Lanczos3)
}

pub fn encode(img: &RgbImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Webp => {
            let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
            let memory = encoder
                .encode_simple(false, f32::from(quality))
                .map_err(|e| FleetError::ImageEncode(format!("webp: {:?}", e)))?;
            Ok(memory.to_vec())
        }
        OutputFormat::Jpeg => {
            let mut buffer = Vec::new();
            JpegEncoder::new_with_quality(&mut buffer, quality)
                .encode_image(img)
                .map_err(|e| FleetError::ImageEncode(e.to_string()))?;
            Ok(buffer)
        }
    }
}

/// Procesa una foto y la escribe como `image-<ordinal>.<ext>` en `dest_dir`
pub fn process_image(
    source: &Path,
    dest_dir: &Path,
    slug: &str,
    ordinal: usize,
    options: &ImageOptions,
) -> Result<ProcessedImage> {
    let img = resize_to_fit(load_rgb(source)?, options.max_width);
    let bytes = encode(&img, options.format, options.quality)?;

    let file_name = output_file_name(ordinal, options.format);
    std::fs::create_dir_all(dest_dir)?;
    std::fs::write(dest_dir.join(&file_name), bytes)?;

    tracing::debug!(
        source = %source.display(),
        width = img.width(),
        height = img.height(),
        "foto escrita"
    );

    Ok(ProcessedImage {
        public_path: public_path(&options.public_prefix, slug, &file_name),
        file_name,
        width: img.width(),
        height: img.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_size_keeps_small_images() {
        assert_eq!(scaled_size(1920, 1080, 1920), (1920, 1080));
        assert_eq!(scaled_size(800, 600, 1920), (800, 600));
    }

    #[test]
    fn test_scaled_size_rounds_down() {
        assert_eq!(scaled_size(4000, 3000, 1920), (1920, 1440));
        assert_eq!(scaled_size(2500, 1001, 1920), (1920, 768));
        assert_eq!(scaled_size(1921, 1080, 1920), (1920, 1079));
    }

    #[test]
    fn test_scaled_size_never_zero_height() {
        assert_eq!(scaled_size(5000, 1, 1920), (1920, 1));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("WEBP".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_public_path() {
        assert_eq!(
            public_path("/machinery/", "retro-jcb", "image-1.webp"),
            "/machinery/retro-jcb/image-1.webp"
        );
        assert_eq!(output_file_name(3, OutputFormat::Jpeg), "image-3.jpg");
    }

    #[test]
    fn test_encode_jpeg_header() {
        let img = RgbImage::from_pixel(16, 8, image::Rgb([200, 100, 50]));
        let bytes = encode(&img, OutputFormat::Jpeg, 80).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_webp_header() {
        let img = RgbImage::from_pixel(16, 8, image::Rgb([200, 100, 50]));
        let bytes = encode(&img, OutputFormat::Webp, 80).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_webp_too_tall_is_error() {
        // libwebp no acepta lados mayores a 16383 px
        let img = RgbImage::from_pixel(10, 17000, image::Rgb([10, 10, 10]));
        let result = encode(&img, OutputFormat::Webp, 80);
        assert!(matches!(result, Err(FleetError::ImageEncode(_))));
    }
}
