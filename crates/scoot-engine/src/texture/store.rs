use std::fmt;
use std::path::Path;

/// Error returned by [`ImageStore::load_file`].
#[derive(Debug, Clone)]
pub struct ImageLoadError(pub String);

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image load error: {}", self.0)
    }
}

impl std::error::Error for ImageLoadError {}

/// Opaque handle to an image loaded into an [`ImageStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) usize);

/// Decoded RGBA8 pixels ready for GPU upload.
#[derive(Debug, Clone)]
pub struct CpuImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Owns a collection of decoded images.
///
/// Images are immutable after loading. The store is owned by the application
/// and passed to the sprite renderer each frame so new textures can be
/// uploaded on demand.
#[derive(Default)]
pub struct ImageStore {
    images: Vec<CpuImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Decodes an image file (PNG) to RGBA8 and stores it.
    ///
    /// Returns the `TextureId` that identifies the image in draw commands.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<TextureId, ImageLoadError> {
        let path = path.as_ref();
        log::debug!("loading image from {path:?}");

        let img = image::open(path)
            .map_err(|e| ImageLoadError(format!("{}: {e}", path.display())))?;

        Ok(self.insert(img))
    }

    fn insert(&mut self, img: image::DynamicImage) -> TextureId {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::info!("loaded image {width}x{height}");

        let id = TextureId(self.images.len());
        self.images.push(CpuImage {
            pixels: rgba.into_raw(),
            width,
            height,
        });
        id
    }

    /// Returns the decoded image, if `id` is valid.
    pub fn get(&self, id: TextureId) -> Option<&CpuImage> {
        self.images.get(id.0)
    }
}
