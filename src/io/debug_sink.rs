//! Destinations for the intermediate images produced in debug mode.
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::RgbaImage;
use tracing::info;

use crate::error::{Error, Result};
use crate::io::writers::jpeg::write_rgba_jpeg;

/// Receives intermediate images (`prescale`, `edge`, `skin`, `saturation`,
/// `features`, `final`) at fixed checkpoints of the analysis.
pub trait DebugSink: Send + Sync {
    fn emit(&self, tag: &str, image: &RgbaImage) -> Result<()>;
}

/// Writes every checkpoint to `<dir>/<prefix>_<tag>.jpg`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "smartcrop".to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, tag: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.jpg", self.prefix, tag))
    }
}

impl DebugSink for DirectorySink {
    fn emit(&self, tag: &str, image: &RgbaImage) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(tag);
        write_rgba_jpeg(&path, image)?;
        info!("Debug image written: {:?}", path);
        Ok(())
    }
}

/// Keeps emitted images in memory, in emission order. Clones share storage.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    images: Arc<Mutex<Vec<(String, RgbaImage)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> Vec<String> {
        self.images
            .lock()
            .map(|v| v.iter().map(|(t, _)| t.clone()).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, tag: &str) -> Option<RgbaImage> {
        self.images
            .lock()
            .ok()?
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, img)| img.clone())
    }
}

impl DebugSink for MemorySink {
    fn emit(&self, tag: &str, image: &RgbaImage) -> Result<()> {
        let mut images = self.images.lock().map_err(Error::debug_sink)?;
        images.push((tag.to_string(), image.clone()));
        Ok(())
    }
}
