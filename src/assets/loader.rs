//! Background loader and its pending handles.

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use super::font::FontData;
use super::texture::TextureData;
use crate::core::{Error, Result};

/// Result of a load that has not been observed yet.
///
/// The completion is delivered at most once: after [`PendingAsset::poll`]
/// returns `Some`, the handle is spent.
pub struct PendingAsset<T> {
    label: String,
    rx: Option<oneshot::Receiver<Result<T>>>,
}

impl<T> PendingAsset<T> {
    /// A handle that is already complete.
    pub fn ready(label: impl Into<String>, value: Result<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(value);
        Self { label: label.into(), rx: Some(rx) }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True once the result has been taken.
    pub fn is_spent(&self) -> bool {
        self.rx.is_none()
    }

    /// Take the result if the load has finished.
    pub fn poll(&mut self) -> Option<Result<T>> {
        let rx = self.rx.as_mut()?;
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(Error::Asset(format!("{}: loader went away", self.label))),
        };
        self.rx = None;
        Some(outcome)
    }

    /// Run `on_done` with the result if the load has finished. Returns
    /// whether it ran.
    pub fn poll_complete(&mut self, on_done: impl FnOnce(Result<T>)) -> bool {
        match self.poll() {
            Some(result) => {
                on_done(result);
                true
            }
            None => false,
        }
    }

    /// Block the calling thread until the load finishes.
    ///
    /// Must not be called from inside the loader's runtime.
    pub fn wait(mut self) -> Result<T> {
        let rx = self
            .rx
            .take()
            .ok_or_else(|| Error::Asset(format!("{}: result already taken", self.label)))?;
        rx.blocking_recv()
            .unwrap_or_else(|_| Err(Error::Asset(format!("{}: loader went away", self.label))))
    }
}

/// Owns the runtime that performs file reads and decodes.
pub struct AssetLoader {
    runtime: Runtime,
}

impl AssetLoader {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("meadow-assets")
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    /// Read and decode an image file in the background.
    pub fn load_texture(&self, path: impl AsRef<Path>) -> PendingAsset<TextureData> {
        log::debug!("Loading texture {}", path.as_ref().display());
        self.load_with(path, TextureData::decode)
    }

    /// Read and parse a typeface JSON file in the background.
    pub fn load_font(&self, path: impl AsRef<Path>) -> PendingAsset<FontData> {
        log::debug!("Loading font {}", path.as_ref().display());
        self.load_with(path, FontData::decode)
    }

    fn load_with<T, F>(&self, path: impl AsRef<Path>, decode: F) -> PendingAsset<T>
    where
        T: Send + 'static,
        F: FnOnce(&[u8]) -> Result<T> + Send + 'static,
    {
        let path: PathBuf = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        let (tx, rx) = oneshot::channel();

        self.runtime.spawn(async move {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => tokio::task::spawn_blocking(move || decode(&bytes))
                    .await
                    .unwrap_or_else(|e| Err(Error::Asset(format!("decode task failed: {}", e)))),
                Err(e) => Err(Error::Io(e)),
            };
            let _ = tx.send(result);
        });

        PendingAsset { label, rx: Some(rx) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blade.png");
        image::RgbaImage::from_pixel(4, 8, image::Rgba([0, 200, 0, 255])).save(&path).unwrap();

        let loader = AssetLoader::new().unwrap();
        let tex = loader.load_texture(&path).wait().unwrap();
        assert_eq!((tex.width, tex.height), (4, 8));
        assert_eq!(&tex.rgba[..4], &[0, 200, 0, 255]);
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new().unwrap();
        let result = loader.load_texture(dir.path().join("missing.jpg")).wait();
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_font_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title.typeface.json");
        std::fs::write(&path, r#"{"resolution": 1000, "glyphs": {"k": {"ha": 500, "o": "m 0 0"}}}"#).unwrap();

        let loader = AssetLoader::new().unwrap();
        let font = loader.load_font(&path).wait().unwrap();
        assert!(font.covers("k"));

        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(loader.load_font(&path).wait(), Err(Error::Json(_))));
    }

    #[test]
    fn test_completion_delivered_once() {
        let mut pending = PendingAsset::ready("test", Ok(7u32));
        let mut seen = Vec::new();
        assert!(pending.poll_complete(|r| seen.push(r.unwrap())));
        assert!(!pending.poll_complete(|r| seen.push(r.unwrap())));
        assert_eq!(seen, vec![7]);
        assert!(pending.is_spent());
    }

    #[test]
    fn test_poll_until_done() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255])).save(&path).unwrap();
        let loader = AssetLoader::new().unwrap();
        let mut pending = loader.load_texture(&path);
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        let result = loop {
            if let Some(r) = pending.poll() {
                break r;
            }
            assert!(std::time::Instant::now() < deadline, "load never completed");
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(result.is_ok());
        assert!(pending.poll().is_none());
    }
}
