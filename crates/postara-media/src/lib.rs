//! # postara-media
//!
//! Clients for the hosted services that own all media state:
//!
//! - **Cloudinary**: signed multipart upload returning a public URL.
//!   Ownership of the uploaded object belongs entirely to Cloudinary; this
//!   application never re-reads or deletes it.
//! - **Ayrshare**: single-call multi-network post distribution.
//!
//! Both are thin request/response wrappers; nothing is retried or queued.

mod ayrshare;
mod cloudinary;
mod error;

pub use ayrshare::{AyrshareClient, SocialPostRequest, SocialPostResponse};
pub use cloudinary::{CloudinaryClient, CloudinaryConfig, UploadResult};
pub use error::{MediaError, Result};
