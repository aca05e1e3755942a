//! Image module - the artwork seam
//!
//! Decoding, scaling, and slicing pictures into per-tile artwork is an
//! external collaborator's job. The engine only tracks which image is
//! selected and hands geometry to the source; artwork flows back as the
//! opaque payload type the board was instantiated with.

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Identifier of the selected artwork image
///
/// Built-in images are referenced by number, external ones by an opaque
/// token. Both persist under the same settings key; the numeric form is
/// tried first when reading it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Builtin(u32),
    Token(String),
}

/// Supplier of tile artwork for a selected image
pub trait ImageSource {
    /// Artwork payload delivered to tiles
    type Art;

    /// Pixel dimensions (width, height) of the full image
    fn image_size(&mut self, id: &ImageId) -> Result<(u32, u32), ImageError>;

    /// Scale the image to `(tile_w * size, tile_h * size)` and slice it
    /// into `size * size` row-major pieces
    ///
    /// The last piece corresponds to the blank's home cell; sources may
    /// substitute a placeholder for it.
    fn slice(
        &mut self,
        id: &ImageId,
        size: usize,
        tile_w: u32,
        tile_h: u32,
    ) -> Result<Vec<Self::Art>, ImageError>;
}
