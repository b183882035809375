use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::{Result, TrayError};

/// A decoded tray photo together with the file it came from.
#[derive(Debug, Clone)]
pub struct TrayImage {
    path: PathBuf,
    format: ImageFormat,
    pixels: DynamicImage,
}

impl TrayImage {
    /// Decode a JPEG or PNG file. Other raster formats are rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = ImageReader::open(path)?.with_guessed_format()?;

        let format = match reader.format() {
            Some(f @ (ImageFormat::Jpeg | ImageFormat::Png)) => f,
            Some(other) => {
                return Err(TrayError::InvalidInput(format!(
                    "{}: unsupported image format {:?}, expected JPEG or PNG",
                    path.display(),
                    other
                )));
            }
            None => {
                return Err(TrayError::InvalidInput(format!(
                    "{}: not a recognisable image",
                    path.display()
                )));
            }
        };

        let pixels = reader.decode()?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
            pixels,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}
