//! Custom prints from customer uploads.

mod template;
mod upload;

pub use template::CustomProductTemplate;
pub use upload::{
    UploadFlow, UploadPolicy, UploadState, UploadToken, DEFAULT_UPLOAD_HINT_BYTES,
};
