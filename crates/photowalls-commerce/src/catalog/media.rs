//! Product imagery.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Where a product's picture comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    /// Catalog image hosted elsewhere.
    Remote { url: String },
    /// Image supplied by the customer.
    Upload(UploadedImage),
}

impl ImageSource {
    /// Create a remote image reference.
    pub fn remote(url: impl Into<String>) -> Self {
        ImageSource::Remote { url: url.into() }
    }

    /// A `src` value suitable for an `<img>` element.
    pub fn src(&self) -> String {
        match self {
            ImageSource::Remote { url } => url.clone(),
            ImageSource::Upload(image) => image.data_url(),
        }
    }

    /// Check if this image was uploaded by the customer.
    pub fn is_upload(&self) -> bool {
        matches!(self, ImageSource::Upload(_))
    }
}

/// An image file read from the customer's device.
///
/// Only the declared media type is checked; the bytes are never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Original file name, including extension.
    pub file_name: String,
    /// Declared media type (e.g., "image/jpeg").
    pub media_type: String,
    /// Raw file contents.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Create an uploaded image.
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// File name with its final extension removed ("beach.jpg" -> "beach").
    ///
    /// Names without an extension, or whose only dot is leading
    /// (".hidden"), are returned unchanged.
    pub fn stem(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(idx) if idx > 0 && idx + 1 < self.file_name.len() => &self.file_name[..idx],
            _ => &self.file_name,
        }
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Render as a `data:` URL for previews.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }
}

/// Check whether a declared media type is an image type.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_strips_last_extension() {
        let img = UploadedImage::new("living-room.final.png", "image/png", vec![]);
        assert_eq!(img.stem(), "living-room.final");

        let img = UploadedImage::new("wall", "image/png", vec![]);
        assert_eq!(img.stem(), "wall");

        let img = UploadedImage::new(".hidden", "image/png", vec![]);
        assert_eq!(img.stem(), ".hidden");

        let img = UploadedImage::new("trailing.", "image/png", vec![]);
        assert_eq!(img.stem(), "trailing.");
    }

    #[test]
    fn test_data_url() {
        let img = UploadedImage::new("a.png", "image/png", b"hi".to_vec());
        assert_eq!(img.data_url(), "data:image/png;base64,aGk=");
        assert_eq!(ImageSource::Upload(img).src(), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_image_media_types() {
        assert!(is_image_media_type("image/jpeg"));
        assert!(is_image_media_type("Image/PNG"));
        assert!(!is_image_media_type("image/"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type(""));
    }
}
