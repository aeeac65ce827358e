//! Custom-upload flow state machine.
//!
//! ```text
//! Idle --begin--> Reading --complete--> ImageSelected --size+material--> Configured
//!   ^                                                                       |
//!   +------------------------------- commit --------------------------------+
//! ```
//!
//! Reading a file is asynchronous from the UI's point of view. Every
//! [`UploadFlow::begin`] issues a new [`UploadToken`]; a completion is only
//! accepted for the most recently issued token, so when two reads race the
//! one started last wins.

use crate::cart::Cart;
use crate::catalog::{is_image_media_type, UploadedImage};
use crate::customize::CustomProductTemplate;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size hint shown next to the upload button (10 MB).
pub const DEFAULT_UPLOAD_HINT_BYTES: u64 = 10 * 1024 * 1024;

/// Identifies one file read; later reads get larger tokens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UploadToken(u64);

impl UploadToken {
    /// Raw token value.
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        UploadToken(self.0.wrapping_add(1))
    }
}

impl fmt::Display for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upload size policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Hard limit in bytes. `None` accepts any size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,
    /// Size shown to the customer as guidance only.
    #[serde(default = "default_hint_bytes")]
    pub hint_bytes: u64,
}

fn default_hint_bytes() -> u64 {
    DEFAULT_UPLOAD_HINT_BYTES
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: None,
            hint_bytes: DEFAULT_UPLOAD_HINT_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Check a file against the policy.
    pub fn check(&self, file_name: &str, media_type: &str, byte_len: u64) -> Result<(), CommerceError> {
        if !is_image_media_type(media_type) {
            return Err(CommerceError::RejectedFile {
                file_name: file_name.to_string(),
                media_type: media_type.to_string(),
            });
        }
        if let Some(limit) = self.max_bytes {
            if byte_len > limit {
                return Err(CommerceError::UploadTooLarge {
                    size: byte_len,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Where the upload flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum UploadState {
    /// Nothing chosen.
    #[default]
    Idle,
    /// A file was accepted and is being read.
    Reading {
        token: UploadToken,
        file_name: String,
        media_type: String,
    },
    /// Image available; options may be partially chosen.
    ImageSelected {
        image: UploadedImage,
        size: Option<String>,
        material: Option<String>,
    },
    /// Image plus both options chosen; ready to commit.
    Configured {
        image: UploadedImage,
        size: String,
        material: String,
    },
}

impl UploadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Reading { .. } => "reading",
            UploadState::ImageSelected { .. } => "image_selected",
            UploadState::Configured { .. } => "configured",
        }
    }
}

/// The custom-upload flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UploadFlow {
    state: UploadState,
    last_token: UploadToken,
}

impl UploadFlow {
    /// Create an idle flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Check if the flow is idle.
    pub fn is_idle(&self) -> bool {
        self.state == UploadState::Idle
    }

    /// Token of the most recent read.
    pub fn last_token(&self) -> UploadToken {
        self.last_token
    }

    /// The selected image, once its read has completed.
    pub fn image(&self) -> Option<&UploadedImage> {
        match &self.state {
            UploadState::ImageSelected { image, .. } | UploadState::Configured { image, .. } => {
                Some(image)
            }
            _ => None,
        }
    }

    /// Chosen size, if any.
    pub fn size(&self) -> Option<&str> {
        match &self.state {
            UploadState::ImageSelected { size, .. } => size.as_deref(),
            UploadState::Configured { size, .. } => Some(size),
            _ => None,
        }
    }

    /// Chosen material, if any.
    pub fn material(&self) -> Option<&str> {
        match &self.state {
            UploadState::ImageSelected { material, .. } => material.as_deref(),
            UploadState::Configured { material, .. } => Some(material),
            _ => None,
        }
    }

    /// Accept a file and start reading it.
    ///
    /// Replaces any previously selected image and discards option choices.
    /// Non-image files are rejected and leave the flow unchanged.
    pub fn begin(
        &self,
        file_name: &str,
        media_type: &str,
        byte_len: u64,
        policy: &UploadPolicy,
    ) -> Result<(UploadFlow, UploadToken), CommerceError> {
        policy.check(file_name, media_type, byte_len)?;

        let token = self.last_token.next();
        let flow = UploadFlow {
            state: UploadState::Reading {
                token,
                file_name: file_name.to_string(),
                media_type: media_type.to_string(),
            },
            last_token: token,
        };
        Ok((flow, token))
    }

    /// Deliver the bytes of a finished read.
    ///
    /// Only the read started by the latest [`UploadFlow::begin`] is accepted,
    /// and only while it is still pending.
    pub fn complete(&self, token: UploadToken, bytes: Vec<u8>) -> Result<UploadFlow, CommerceError> {
        let stale = CommerceError::StaleUpload {
            token: token.value(),
            current: self.last_token.value(),
        };
        match &self.state {
            UploadState::Reading {
                token: pending,
                file_name,
                media_type,
            } if *pending == token => Ok(UploadFlow {
                state: UploadState::ImageSelected {
                    image: UploadedImage::new(file_name.clone(), media_type.clone(), bytes),
                    size: None,
                    material: None,
                },
                last_token: self.last_token,
            }),
            _ => Err(stale),
        }
    }

    /// Choose a print size.
    pub fn select_size(
        &self,
        size: &str,
        template: &CustomProductTemplate,
    ) -> Result<UploadFlow, CommerceError> {
        template.check_size(size)?;
        let (image, material) = match &self.state {
            UploadState::ImageSelected {
                image, material, ..
            } => (image.clone(), material.clone()),
            UploadState::Configured {
                image, material, ..
            } => (image.clone(), Some(material.clone())),
            _ => return Err(CommerceError::NoImageSelected),
        };
        Ok(self.with_choices(image, Some(size.to_string()), material))
    }

    /// Choose a print material.
    pub fn select_material(
        &self,
        material: &str,
        template: &CustomProductTemplate,
    ) -> Result<UploadFlow, CommerceError> {
        template.check_material(material)?;
        let (image, size) = match &self.state {
            UploadState::ImageSelected { image, size, .. } => (image.clone(), size.clone()),
            UploadState::Configured { image, size, .. } => (image.clone(), Some(size.clone())),
            _ => return Err(CommerceError::NoImageSelected),
        };
        Ok(self.with_choices(image, size, Some(material.to_string())))
    }

    /// Synthesize the custom product, add it to `cart` and reset to idle.
    ///
    /// Returns the reset flow, the new cart and the new product's identity.
    pub fn commit(
        &self,
        cart: &Cart,
        template: &CustomProductTemplate,
    ) -> Result<(UploadFlow, Cart, ProductId), CommerceError> {
        match &self.state {
            UploadState::Configured {
                image,
                size,
                material,
            } => {
                let product = template.product_for(image.clone());
                let cart = cart.with_item(&product, size, material)?;
                Ok((self.choose_another(), cart, product.id))
            }
            UploadState::ImageSelected { size, material, .. } => {
                let missing = match (size, material) {
                    (None, None) => "size, material",
                    (None, Some(_)) => "size",
                    _ => "material",
                };
                Err(CommerceError::SelectionIncomplete(missing.to_string()))
            }
            _ => Err(CommerceError::NoImageSelected),
        }
    }

    /// Drop the current image and choices.
    ///
    /// Any read still in flight becomes stale.
    pub fn choose_another(&self) -> UploadFlow {
        UploadFlow {
            state: UploadState::Idle,
            last_token: self.last_token,
        }
    }

    fn with_choices(
        &self,
        image: UploadedImage,
        size: Option<String>,
        material: Option<String>,
    ) -> UploadFlow {
        let state = match (size, material) {
            (Some(size), Some(material)) => UploadState::Configured {
                image,
                size,
                material,
            },
            (size, material) => UploadState::ImageSelected {
                image,
                size,
                material,
            },
        };
        UploadFlow {
            state,
            last_token: self.last_token,
        }
    }
}
