//! Loading card artwork for export.
//!
//! ## Key Types
//!
//! - `ArtworkSource`: async loader from a reference string to a decoded image
//! - `ArtworkResolver`: picks the reference for a card face
//!
//! Loaders report every failure as an `ArtworkError`; the exporter turns
//! each one into a tinted fallback for that slot only.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use rustc_hash::FxHashMap;

use crate::cards::CardFace;
use crate::error::ArtworkError;

/// Something that can fetch artwork by reference.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    async fn load(&self, reference: &str) -> Result<DynamicImage, ArtworkError>;
}

/// Load with an optional timeout. A timeout counts as a load failure.
pub async fn load_with_timeout(
    source: &dyn ArtworkSource,
    reference: &str,
    timeout_ms: Option<u64>,
) -> Result<DynamicImage, ArtworkError> {
    match timeout_ms {
        None => source.load(reference).await,
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), source.load(reference))
            .await
            .map_err(|_| ArtworkError::Timeout(ms))?,
    }
}

/// Chooses the artwork reference for a face.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtworkResolver {
    base: Option<String>,
}

impl ArtworkResolver {
    #[must_use]
    pub fn new(base: Option<String>) -> Self {
        Self { base }
    }

    /// The face's own image if it has one, else `{base}/{title}.png` with
    /// the title URL-encoded, else nothing.
    #[must_use]
    pub fn resolve(&self, face: &CardFace) -> Option<String> {
        if let Some(image) = face.image.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return Some(image.to_string());
        }
        let base = self.base.as_deref()?;
        if face.title.trim().is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}.png",
            base.trim_end_matches('/'),
            urlencoding::encode(face.title.trim())
        ))
    }
}

/// Artwork from a directory.
///
/// References are paths relative to the root; percent-escapes are decoded,
/// so `%E6%82%B2%E8%A7%82.png` reads `悲观.png`.
#[derive(Clone, Debug)]
pub struct FsArtworkSource {
    root: PathBuf,
}

impl FsArtworkSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &str) -> PathBuf {
        let decoded = urlencoding::decode(reference)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| reference.to_string());
        self.root.join(decoded.trim_start_matches('/'))
    }
}

#[async_trait]
impl ArtworkSource for FsArtworkSource {
    async fn load(&self, reference: &str) -> Result<DynamicImage, ArtworkError> {
        let path = self.path_for(reference);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArtworkError::NotFound(path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Artwork over HTTP. References are absolute URLs.
#[derive(Clone, Debug, Default)]
pub struct HttpArtworkSource {
    client: reqwest::Client,
}

impl HttpArtworkSource {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    async fn load(&self, reference: &str) -> Result<DynamicImage, ArtworkError> {
        let response = self.client.get(reference).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ArtworkError::NotFound(reference.to_string()));
        }
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Preloaded artwork, keyed by reference.
#[derive(Clone, Debug, Default)]
pub struct MemoryArtworkSource {
    images: FxHashMap<String, DynamicImage>,
}

impl MemoryArtworkSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image (builder pattern).
    #[must_use]
    pub fn with_image(mut self, reference: impl Into<String>, image: DynamicImage) -> Self {
        self.insert(reference, image);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, image: DynamicImage) {
        self.images.insert(reference.into(), image);
    }
}

#[async_trait]
impl ArtworkSource for MemoryArtworkSource {
    async fn load(&self, reference: &str) -> Result<DynamicImage, ArtworkError> {
        self.images
            .get(reference)
            .cloned()
            .ok_or_else(|| ArtworkError::NotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardColor;
    use image::{ImageFormat, RgbaImage};

    fn face(title: &str) -> CardFace {
        CardFace::new(title, "x", 1, CardColor::Red)
    }

    #[test]
    fn test_resolver() {
        let none = ArtworkResolver::default();
        assert_eq!(none.resolve(&face("悲观")), None);
        assert_eq!(
            none.resolve(&face("悲观").with_image("https://cdn/a.png")),
            Some("https://cdn/a.png".to_string())
        );

        let based = ArtworkResolver::new(Some("https://cdn/cards/".to_string()));
        assert_eq!(
            based.resolve(&face("悲观")),
            Some("https://cdn/cards/%E6%82%B2%E8%A7%82.png".to_string())
        );
        assert_eq!(
            based.resolve(&face("a b").with_image("  ")),
            Some("https://cdn/cards/a%20b.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemoryArtworkSource::new().with_image("a", DynamicImage::new_rgba8(2, 3));
        assert_eq!(source.load("a").await.unwrap().width(), 2);
        assert!(matches!(source.load("b").await, Err(ArtworkError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fs_source_decodes_reference() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::new(4, 4)
            .save_with_format(dir.path().join("悲观.png"), ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let source = FsArtworkSource::new(dir.path());
        let image = source.load("/%E6%82%B2%E8%A7%82.png").await.unwrap();
        assert_eq!(image.height(), 4);

        assert!(matches!(source.load("missing.png").await, Err(ArtworkError::NotFound(_))));
        assert!(matches!(source.load("broken.png").await, Err(ArtworkError::Decode(_))));
    }

    struct Never;

    #[async_trait]
    impl ArtworkSource for Never {
        async fn load(&self, _reference: &str) -> Result<DynamicImage, ArtworkError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let result = load_with_timeout(&Never, "x", Some(10)).await;
        assert!(matches!(result, Err(ArtworkError::Timeout(10))));
    }
}
