//! # pdf_scribe
//!
//! Lightweight PDF generation: styled text runs, raster image placements,
//! and hyperlink regions assembled into spec-valid PDF 1.4 files.
//!
//! The crate is a document assembly and serialization engine. Drawing
//! commands are compiled into per-page content streams; every emitted
//! entity lives in an object store under a sequential identity; and the
//! writer records exact byte offsets so the cross-reference table always
//! matches the bytes on disk.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_scribe::{Document, PageSpec, SaveOptions, TextOptions};
//!
//! # fn main() -> pdf_scribe::Result<()> {
//! let mut doc = Document::new();
//! let page = doc.add_page(PageSpec::default());
//!
//! doc.page_mut(page).unwrap().add_text(
//!     "Hello, world",
//!     100.0,
//!     700.0,
//!     &TextOptions::default().size(18.0).color("navy").underline(),
//! )?;
//!
//! let bytes = doc.finish(&SaveOptions::default())?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Images and links
//!
//! Images are embedded via [`Document::embed_image`], which decodes the
//! file (any format the `image` crate understands), optionally
//! re-encodes it as JPEG, and returns a name usable in an
//! [`ImagePlacement`]. Hyperlinks attach to the most recent text line
//! through [`TextOptions::link`] and become link annotations.
//!
//! ## Warnings
//!
//! Text or images drawn outside a page's padding box never fail the
//! build; they produce [`BoundsWarning`]s collected on the page and
//! mirrored to the `log` facade.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Utilities
pub mod color;
pub mod diagnostics;
pub mod geometry;
pub mod layout;

// Object model
pub mod object;

// Image embedding
pub mod image;

// Assembly and serialization
pub mod writer;

pub use color::{Color, ColorSpec};
pub use diagnostics::{BoundsWarning, Diagnostics, ElementKind};
pub use error::{Error, Result};
pub use image::EmbeddedImage;
pub use layout::TextAlign;
pub use object::{Dict, Object, ObjectId, ObjectStore, PlaceholderKey};
pub use writer::{
    Document, DocumentMetadata, ImagePlacement, LinkAnnotation, Orientation, Page, PageSize,
    PageSpec, SaveOptions, TextOptions,
};
