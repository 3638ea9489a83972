//! Document assembly and PDF serialization.
//!
//! ## Architecture
//!
//! ```text
//! add_text / add_image / embed_image
//!     ↓
//! [Document / Page] (object graph: pages, placements, links)
//!     ↓
//! [ContentStreamBuilder] (styled runs → drawing operators)
//!     ↓
//! [ObjectStore] (sequential identities, placeholder patching)
//!     ↓
//! [ObjectSerializer] (objects → bytes, exact /Length fields)
//!     ↓
//! PDF bytes (header, objects, xref, trailer)
//! ```

mod annotation_builder;
mod content_stream;
mod document;
mod font_manager;
mod object_serializer;

pub use annotation_builder::LinkAnnotation;
pub use content_stream::{ContentOp, ContentStreamBuilder};
pub use document::{
    Document, DocumentMetadata, ImagePlacement, Orientation, Page, PageSize, PageSpec,
    SaveOptions, TextOptions,
};
pub use font_manager::{variant_key, FontManager};
pub use object_serializer::ObjectSerializer;
