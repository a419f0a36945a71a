//! Photo preview loading
//!
//! Reads the selected photo off the UI thread, decodes it with `image` and
//! hands a downsampled thumbnail back to the event loop tagged with the
//! generation it was requested for.

mod error;
mod loader;
mod source;
mod thumbnail;
mod traits;

pub use error::PreviewError;
pub use loader::{PreviewLoader, PreviewMessage};
pub use source::FsPhotoSource;
pub use thumbnail::{decode_preview, PreviewImage};
pub use traits::PhotoSource;

#[cfg(test)]
pub use traits::MockPhotoSource;
