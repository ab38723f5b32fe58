//! CPU-side image storage.
//!
//! Images are decoded to RGBA8 once at load time and uploaded to the GPU
//! lazily by the sprite renderer on first draw (the device only exists after
//! window creation).

mod store;

pub use store::{CpuImage, ImageLoadError, ImageStore, TextureId};
