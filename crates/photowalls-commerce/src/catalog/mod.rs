//! Product catalog module.
//!
//! Contains the product type, imagery, the category filter and the catalog itself.

mod category;
mod listing;
mod media;
mod product;

pub use category::{CategoryFilter, ALL_CATEGORIES};
pub use listing::Catalog;
pub use media::{is_image_media_type, ImageSource, UploadedImage};
pub use product::Product;
