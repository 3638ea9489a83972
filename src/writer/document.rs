//! Document and page model, the finalize pass, and the file writer.
//!
//! A [`Document`] is built up by registering pages, styled text, image
//! placements, and embedded images; it is consumed exactly once by
//! [`Document::finish`] or [`Document::save`]. Finalization runs in a
//! strict order — fonts, image-resource resolution, content streams, page
//! nodes with annotations, the page tree, the catalog — and only then are
//! bytes produced, so every structural error is caught before any output
//! is written.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use indexmap::IndexMap;

use super::annotation_builder::LinkAnnotation;
use super::content_stream::ContentStreamBuilder;
use super::font_manager::{variant_key, FontManager};
use super::object_serializer::ObjectSerializer;
use crate::color::{Color, ColorSpec};
use crate::diagnostics::{BoundsWarning, Diagnostics, ElementKind};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::image::EmbeddedImage;
use crate::layout::{align_offset, estimate_text_width, wrap_text, TextAlign};
use crate::object::{Dict, Object, ObjectId, ObjectStore, PlaceholderKey};

/// Vertical advance between wrapped lines, as a multiple of font size.
const LINE_SPACING: f32 = 1.2;
/// Underline offset below the baseline, as a fraction of font size.
const UNDERLINE_DROP: f32 = 0.15;
/// Strikethrough offset above the baseline, as a fraction of font size.
const STRIKE_RAISE: f32 = 0.3;
/// Background rectangle drop below the baseline, as a fraction of font size.
const BACKGROUND_DROP: f32 = 0.2;
/// Font size for image captions and page numbers.
const SMALL_FONT_SIZE: f32 = 10.0;
/// Vertical gap between an image's bottom edge and its caption baseline.
const CAPTION_GAP: f32 = 12.0;
/// Baseline height of the page number above the bottom edge.
const PAGE_NUMBER_Y: f32 = 15.0;

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// A4 (210mm x 297mm)
    A4,
    /// A3 (297mm x 420mm)
    A3,
    /// US Letter (8.5" x 11")
    Letter,
    /// Custom width and height in points
    Custom(f32, f32),
}

impl PageSize {
    /// Portrait dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Width and height as given (default)
    #[default]
    Portrait,
    /// Width and height swapped
    Landscape,
}

/// Geometry for a new page.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Page size
    pub size: PageSize,
    /// Orientation; landscape swaps the size's dimensions
    pub orientation: Orientation,
    /// Horizontal padding of the content box, from each side
    pub padding_horizontal: f32,
    /// Vertical padding of the content box, from each side
    pub padding_vertical: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
            padding_horizontal: 50.0,
            padding_vertical: 50.0,
        }
    }
}

impl PageSpec {
    /// A page spec for the given size with default orientation and padding.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Use landscape orientation.
    pub fn landscape(mut self) -> Self {
        self.orientation = Orientation::Landscape;
        self
    }

    /// Set the content padding.
    pub fn padding(mut self, horizontal: f32, vertical: f32) -> Self {
        self.padding_horizontal = horizontal;
        self.padding_vertical = vertical;
        self
    }

    /// Final page dimensions after applying orientation.
    pub fn resolved_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Styling options for a text run.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Font size in points (default: 24)
    pub size: f32,
    /// Text color (default: black)
    pub color: ColorSpec,
    /// Base font family (default: Helvetica)
    pub font: String,
    /// Use the bold variant
    pub bold: bool,
    /// Use the oblique variant
    pub italic: bool,
    /// Horizontal alignment relative to the anchor x
    pub align: TextAlign,
    /// Stroke an underline beneath each line
    pub underline: bool,
    /// Stroke a strikethrough across each line
    pub strike: bool,
    /// Fill a background rectangle behind each line
    pub background: Option<ColorSpec>,
    /// Wrap the text to this width before rendering
    pub max_width: Option<f32>,
    /// Attach a hyperlink to the last rendered line
    pub link: Option<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 24.0,
            color: ColorSpec::Named("black".to_string()),
            font: "Helvetica".to_string(),
            bold: false,
            italic: false,
            align: TextAlign::Left,
            underline: false,
            strike: false,
            background: None,
            max_width: None,
            link: None,
        }
    }
}

impl TextOptions {
    /// Set the font size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the text color.
    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the base font family.
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Use the bold variant.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Use the oblique variant.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Underline each line.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Strike through each line.
    pub fn strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// Fill a background behind each line.
    pub fn background(mut self, color: impl Into<ColorSpec>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Wrap to the given width.
    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Attach a hyperlink to the last rendered line.
    pub fn link(mut self, uri: impl Into<String>) -> Self {
        self.link = Some(uri.into());
        self
    }
}

/// An image placement on a page.
///
/// The image is referenced by the name returned from
/// [`Document::embed_image`]; its final pixel size is resolved from the
/// registry at finalize time, with explicit width/height overriding it.
#[derive(Debug, Clone)]
pub struct ImagePlacement {
    /// Registered image name
    pub name: String,
    /// X position of the left edge
    pub x: f32,
    /// Y position of the bottom edge
    pub y: f32,
    /// Explicit display width in points, before scaling
    pub width: Option<f32>,
    /// Explicit display height in points, before scaling
    pub height: Option<f32>,
    /// Scale factor applied to the display size (must be positive)
    pub scale: f32,
    /// Caption rendered centered below the image
    pub caption: Option<String>,
}

impl ImagePlacement {
    /// Place the named image at `(x, y)` at natural size.
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width: None,
            height: None,
            scale: 1.0,
            caption: None,
        }
    }

    /// Set an explicit display size in points.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the scale factor.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Render a caption below the image.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Options for the final write.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Render the 1-based page number bottom-centered on every page
    pub show_page_numbers: bool,
}

/// Optional document metadata, emitted as the `/Info` dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Creator application
    pub creator: Option<String>,
}

impl DocumentMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the document subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the document keywords.
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set the creator application.
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
    }

    /// Build the `/Info` dictionary, stamped with the creation time.
    /// Returns `None` when no field is set.
    fn to_info_object(&self) -> Option<Object> {
        if self.is_empty() {
            return None;
        }
        let mut entries = Vec::new();
        if let Some(title) = &self.title {
            entries.push(("Title", Object::string(title)));
        }
        if let Some(author) = &self.author {
            entries.push(("Author", Object::string(author)));
        }
        if let Some(subject) = &self.subject {
            entries.push(("Subject", Object::string(subject)));
        }
        if let Some(keywords) = &self.keywords {
            entries.push(("Keywords", Object::string(keywords)));
        }
        if let Some(creator) = &self.creator {
            entries.push(("Creator", Object::string(creator)));
        }
        let stamp = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
        entries.push(("CreationDate", Object::string(&stamp)));
        Some(Object::dict(entries))
    }
}

/// A registered image: its XObject identity and pixel dimensions.
#[derive(Debug, Clone, Copy)]
struct RegisteredImage {
    id: ObjectId,
    width: u32,
    height: u32,
}

/// One page of the document.
///
/// Owned exclusively by the [`Document`] that created it; obtained
/// mutably through [`Document::page_mut`].
#[derive(Debug, Clone)]
pub struct Page {
    width: f32,
    height: f32,
    padding_h: f32,
    padding_v: f32,
    content: ContentStreamBuilder,
    placements: Vec<ImagePlacement>,
    image_usages: IndexMap<String, Option<ObjectId>>,
    links: Vec<LinkAnnotation>,
    diagnostics: Diagnostics,
}

impl Page {
    fn new(spec: &PageSpec) -> Self {
        let (width, height) = spec.resolved_dimensions();
        Self {
            width,
            height,
            padding_h: spec.padding_horizontal,
            padding_v: spec.padding_vertical,
            content: ContentStreamBuilder::new(),
            placements: Vec::new(),
            image_usages: IndexMap::new(),
            links: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Bounds warnings recorded for this page, in emission order.
    pub fn warnings(&self) -> &[BoundsWarning] {
        self.diagnostics.warnings()
    }

    /// The content box: the page rectangle inset by the padding.
    fn padding_box(&self) -> Rect {
        Rect::new(
            self.padding_h,
            self.padding_v,
            self.width - 2.0 * self.padding_h,
            self.height - 2.0 * self.padding_v,
        )
    }

    /// Add a styled text run anchored at `(x, y)` (baseline of the first
    /// line, y measured from the page bottom).
    ///
    /// Wraps to `options.max_width` when set; otherwise the whole string
    /// renders as one line. Colors are resolved once per call, so a bad
    /// color fails here and not at finalize. Lines outside the padding
    /// box produce a warning and still render.
    pub fn add_text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions) -> Result<()> {
        let color = options.color.resolve()?;
        let background = options
            .background
            .as_ref()
            .map(ColorSpec::resolve)
            .transpose()?;
        let font_key = variant_key(&options.font, options.bold, options.italic);

        let lines = match options.max_width {
            Some(max_width) => wrap_text(text, max_width, options.size),
            None => vec![text.to_string()],
        };

        let mut last_rect = None;
        for (i, line) in lines.iter().enumerate() {
            let text_width = estimate_text_width(line, options.size);
            let text_height = options.size;
            let line_y = y - i as f32 * options.size * LINE_SPACING;
            let line_x = x + align_offset(options.align, text_width);
            let rect = Rect::new(line_x, line_y, text_width, text_height);

            if !rect.contained_in(&self.padding_box()) {
                self.diagnostics.report(BoundsWarning {
                    kind: ElementKind::Text,
                    label: line.clone(),
                    x: line_x,
                    y: line_y,
                    width: text_width,
                    height: text_height,
                });
            }

            if let Some(bg) = background {
                self.content.fill_color(bg);
                self.content.fill_rect(
                    line_x,
                    line_y - BACKGROUND_DROP * options.size,
                    text_width,
                    text_height,
                );
            }

            self.content.fill_color(color);
            self.content
                .text_at(&font_key, options.size, line_x, line_y, line);

            if options.underline {
                self.content.stroke_color(color);
                self.content.horizontal_line(
                    line_x,
                    line_y - UNDERLINE_DROP * options.size,
                    text_width,
                );
            }
            if options.strike {
                self.content.stroke_color(color);
                self.content.horizontal_line(
                    line_x,
                    line_y + STRIKE_RAISE * options.size,
                    text_width,
                );
            }

            last_rect = Some(rect);
        }

        // The link is anchored to the last rendered line only, not to the
        // whole wrapped block.
        if let (Some(uri), Some(rect)) = (&options.link, last_rect) {
            self.links.push(LinkAnnotation::uri(rect, uri));
        }

        Ok(())
    }

    /// Queue an image placement.
    ///
    /// Fails with [`Error::InvalidScale`] for a non-positive scale before
    /// touching any page state. The bounds check here uses the declared
    /// width/height only; the registry size is not known until finalize.
    pub fn add_image(&mut self, placement: ImagePlacement) -> Result<()> {
        if placement.scale <= 0.0 {
            return Err(Error::InvalidScale(placement.scale));
        }

        self.image_usages
            .entry(placement.name.clone())
            .or_insert(None);

        let provisional_w = placement.width.unwrap_or(0.0) * placement.scale;
        let provisional_h = placement.height.unwrap_or(0.0) * placement.scale;
        let rect = Rect::new(placement.x, placement.y, provisional_w, provisional_h);
        if !rect.contained_in(&self.padding_box()) {
            self.diagnostics.report(BoundsWarning {
                kind: ElementKind::Image,
                label: placement.name.clone(),
                x: placement.x,
                y: placement.y,
                width: provisional_w,
                height: provisional_h,
            });
        }

        self.placements.push(placement);
        Ok(())
    }

    /// Compile the page's complete content stream: queued text fragments,
    /// then image draws with captions, then the optional page number.
    fn compile_content(
        &self,
        images: &IndexMap<String, RegisteredImage>,
        page_number: usize,
        options: &SaveOptions,
    ) -> Result<Vec<u8>> {
        let mut content = self.content.clone();

        for placement in &self.placements {
            let registered = images
                .get(&placement.name)
                .ok_or_else(|| Error::UnresolvedResource(placement.name.clone()))?;
            let final_w = placement.width.unwrap_or(registered.width as f32) * placement.scale;
            let final_h = placement.height.unwrap_or(registered.height as f32) * placement.scale;
            content.draw_image(&placement.name, placement.x, placement.y, final_w, final_h);

            if let Some(caption) = &placement.caption {
                let caption_width = estimate_text_width(caption, SMALL_FONT_SIZE);
                let caption_x = placement.x + (final_w - caption_width) / 2.0;
                let caption_y = placement.y - CAPTION_GAP;
                content.fill_color(Color::black());
                content.text_at("Helvetica", SMALL_FONT_SIZE, caption_x, caption_y, caption);
            }
        }

        if options.show_page_numbers {
            let label = page_number.to_string();
            let label_width = estimate_text_width(&label, SMALL_FONT_SIZE);
            content.fill_color(Color::black());
            content.text_at(
                "Helvetica",
                SMALL_FONT_SIZE,
                (self.width - label_width) / 2.0,
                PAGE_NUMBER_Y,
                &label,
            );
        }

        content.build()
    }

    /// Build the page node dictionary.
    ///
    /// The `/Parent` entry is a placeholder: the page tree does not exist
    /// yet when page nodes are created. It is patched in one pass after
    /// the tree's identity is assigned.
    fn node_object(
        &self,
        content_id: ObjectId,
        font_map: &IndexMap<String, ObjectId>,
        annotation_ids: &[ObjectId],
    ) -> Result<Object> {
        let font_dict: Dict = font_map
            .iter()
            .map(|(key, id)| (key.clone(), Object::Reference(*id)))
            .collect();

        let mut resources = Dict::new();
        resources.insert("Font".to_string(), Object::Dictionary(font_dict));

        if !self.image_usages.is_empty() {
            let mut xobjects = Dict::new();
            for (name, slot) in &self.image_usages {
                let id = slot.ok_or_else(|| Error::UnresolvedResource(name.clone()))?;
                xobjects.insert(name.clone(), Object::Reference(id));
            }
            resources.insert("XObject".to_string(), Object::Dictionary(xobjects));
        }

        let mut entries = vec![
            ("Type", Object::name("Page")),
            ("Parent", Object::Placeholder(PlaceholderKey::PageTree)),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
            (
                "MediaBox",
                Object::rect(0.0, 0.0, self.width as f64, self.height as f64),
            ),
        ];
        if !annotation_ids.is_empty() {
            entries.push((
                "Annots",
                Object::Array(
                    annotation_ids
                        .iter()
                        .map(|id| Object::Reference(*id))
                        .collect(),
                ),
            ));
        }
        Ok(Object::dict(entries))
    }
}

/// A PDF document under construction.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
    store: ObjectStore,
    images: IndexMap<String, RegisteredImage>,
    fonts: FontManager,
    metadata: DocumentMetadata,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document carrying metadata for the `/Info` entry.
    pub fn with_metadata(metadata: DocumentMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Append a page and return its index.
    pub fn add_page(&mut self, spec: PageSpec) -> usize {
        self.pages.push(Page::new(&spec));
        self.pages.len() - 1
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Borrow a page.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Borrow a page mutably for adding text and images.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// All bounds warnings across all pages, in page order.
    pub fn warnings(&self) -> impl Iterator<Item = &BoundsWarning> {
        self.pages.iter().flat_map(|page| page.warnings().iter())
    }

    /// Decode an image file and register it for placement.
    ///
    /// The XObject stream is stored immediately and the returned name
    /// (`Im<object-number>`) is what [`ImagePlacement`] refers to. With
    /// `compress` the payload is a JPEG stream embedded under DCTDecode;
    /// otherwise raw RGB rows.
    pub fn embed_image(&mut self, path: impl AsRef<Path>, compress: bool) -> Result<String> {
        let image = EmbeddedImage::open(path, compress)?;
        let (width, height) = (image.width, image.height);
        let dict = image.xobject_dict();
        let id = self.store.add(Object::Stream {
            dict,
            data: Bytes::from(image.data),
        });
        let name = format!("Im{}", id.get());
        self.images
            .insert(name.clone(), RegisteredImage { id, width, height });
        Ok(name)
    }

    /// Finalize the document and serialize it to bytes.
    ///
    /// All structural validation (image-resource resolution, placeholder
    /// patching) happens before the first output byte is produced.
    pub fn finish(mut self, options: &SaveOptions) -> Result<Vec<u8>> {
        // (1) Font objects: the fixed variant set, created once.
        let font_map = self.fonts.create_objects(&mut self.store);

        // (2) Resolve every page's image usages against the registry.
        for page in &mut self.pages {
            for (name, slot) in page.image_usages.iter_mut() {
                let registered = self
                    .images
                    .get(name)
                    .ok_or_else(|| Error::UnresolvedResource(name.clone()))?;
                *slot = Some(registered.id);
            }
        }

        // (3) One content stream object per page.
        let mut content_ids = Vec::with_capacity(self.pages.len());
        for (index, page) in self.pages.iter().enumerate() {
            let data = page.compile_content(&self.images, index + 1, options)?;
            let id = self.store.add(Object::Stream {
                dict: Dict::new(),
                data: Bytes::from(data),
            });
            content_ids.push(id);
        }

        // (4) Annotations and page nodes.
        let mut page_ids = Vec::with_capacity(self.pages.len());
        for (page, content_id) in self.pages.iter().zip(&content_ids) {
            let annotation_ids: Vec<ObjectId> = page
                .links
                .iter()
                .map(|link| self.store.add(link.to_object()))
                .collect();
            let node = page.node_object(*content_id, &font_map, &annotation_ids)?;
            page_ids.push(self.store.add(node));
        }

        // (5) Page tree, then patch every pending /Parent placeholder.
        let kids = Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect());
        let tree_id = self.store.add(Object::dict(vec![
            ("Type", Object::name("Pages")),
            ("Kids", kids),
            ("Count", Object::Integer(page_ids.len() as i64)),
        ]));
        self.store
            .resolve_placeholder(PlaceholderKey::PageTree, tree_id);

        // (6) Optional /Info, then the catalog last so the root is the
        // final identity.
        let info_id = self
            .metadata
            .to_info_object()
            .map(|info| self.store.add(info));
        let catalog_id = self.store.add(Object::dict(vec![
            ("Type", Object::name("Catalog")),
            ("Pages", Object::Reference(tree_id)),
        ]));

        self.store.assert_resolved()?;

        self.write_bytes(catalog_id, info_id)
    }

    /// The write pass: header, objects with recorded offsets, xref,
    /// trailer, startxref, EOF marker.
    fn write_bytes(&self, catalog_id: ObjectId, info_id: Option<ObjectId>) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::new();
        let mut output = Vec::new();

        output.extend_from_slice(b"%PDF-1.4\n");
        // Binary marker comment so transfer tools treat the file as binary.
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(self.store.len());
        for (id, object) in self.store.iter() {
            offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(id, object)?);
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.store.len() + 1)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        writeln!(output, "trailer")?;
        let mut trailer = vec![
            ("Size", Object::Integer(self.store.len() as i64 + 1)),
            ("Root", Object::Reference(catalog_id)),
        ];
        if let Some(info) = info_id {
            trailer.push(("Info", Object::Reference(info)));
        }
        output.extend_from_slice(&serializer.serialize(&Object::dict(trailer))?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        output.extend_from_slice(b"%%EOF\n");

        log::debug!(
            "serialized {} objects, xref at byte {}",
            self.store.len(),
            xref_start
        );
        Ok(output)
    }

    /// Finalize and write the document to `path` atomically.
    ///
    /// The bytes are staged in a temporary file next to the target and
    /// renamed over it on success, so a failed build never leaves a
    /// truncated file behind.
    pub fn save(self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.finish(options)?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(&bytes)?;
        staged.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish_to_string(document: Document) -> String {
        let bytes = document.finish(&SaveOptions::default()).unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[test]
    fn test_add_page_dimensions() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page(0).unwrap();
        assert_eq!(page.width(), 595.28);
        assert_eq!(page.height(), 841.89);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let mut document = Document::new();
        document.add_page(PageSpec::new(PageSize::A3).landscape());
        let page = document.page(0).unwrap();
        assert_eq!(page.width(), 1190.55);
        assert_eq!(page.height(), 841.89);
    }

    #[test]
    fn test_invalid_scale_rejected_without_mutation() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();

        let result = page.add_image(ImagePlacement::new("Im1", 100.0, 100.0).scale(0.0));
        assert!(matches!(result, Err(Error::InvalidScale(_))));
        assert!(page.placements.is_empty());
        assert!(page.image_usages.is_empty());
        assert!(page.warnings().is_empty());
    }

    #[test]
    fn test_bad_color_fails_at_call_site() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();

        let options = TextOptions::default().color("not-a-color");
        let result = page.add_text("x", 100.0, 700.0, &options);
        assert!(matches!(result, Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_text_inside_padding_produces_no_warning() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();
        page.add_text("Hello", 100.0, 700.0, &TextOptions::default())
            .unwrap();
        assert!(page.warnings().is_empty());
    }

    #[test]
    fn test_text_in_padding_zone_warns_but_renders() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();
        page.add_text("Edge", 10.0, 700.0, &TextOptions::default())
            .unwrap();

        assert_eq!(page.warnings().len(), 1);
        assert_eq!(page.warnings()[0].kind, ElementKind::Text);
        // The text still made it into the content stream.
        assert!(!page.content.is_empty());
    }

    #[test]
    fn test_link_attaches_to_last_wrapped_line() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();

        let options = TextOptions::default()
            .size(12.0)
            .max_width(100.0)
            .link("https://example.com");
        page.add_text("one two three four five six seven", 60.0, 700.0, &options)
            .unwrap();

        assert_eq!(page.links.len(), 1);
        // Several lines were produced; the link rect must sit below the
        // anchor line.
        assert!(page.links[0].rect.y < 700.0);
    }

    #[test]
    fn test_wrapped_text_advances_lines_downward() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();
        let options = TextOptions::default().size(10.0).max_width(60.0);
        page.add_text("alpha beta gamma delta epsilon", 60.0, 700.0, &options)
            .unwrap();

        let content = String::from_utf8_lossy(&page.content.build().unwrap()).to_string();
        // Second line baseline: 700 - 1.2 * 10.
        assert!(content.contains("688 Td"));
    }

    #[test]
    fn test_minimal_document_structure() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let content = finish_to_string(document);

        assert!(content.starts_with("%PDF-1.4\n"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Type /Page "));
        assert!(content.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(content.contains("/Count 1"));
        assert!(content.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_catalog_is_last_object_and_root() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        document.add_page(PageSpec::default());
        let content = finish_to_string(document);

        // 4 fonts + 2 streams + 2 pages + tree + catalog = 10 objects.
        assert!(content.contains("/Size 11"));
        assert!(content.contains("/Root 10 0 R"));
        assert!(content.contains("10 0 obj\n<</Type /Catalog"));
    }

    #[test]
    fn test_unresolved_image_fails_finalize() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        document
            .page_mut(0)
            .unwrap()
            .add_image(ImagePlacement::new("Im9", 100.0, 400.0).size(100.0, 100.0))
            .unwrap();

        let result = document.finish(&SaveOptions::default());
        assert!(matches!(result, Err(Error::UnresolvedResource(name)) if name == "Im9"));
    }

    #[test]
    fn test_page_numbers_rendered_when_requested() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        document.add_page(PageSpec::default());
        let bytes = document
            .finish(&SaveOptions {
                show_page_numbers: true,
            })
            .unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("(1) Tj"));
        assert!(content.contains("(2) Tj"));
        assert!(content.contains("15 Td"));
    }

    #[test]
    fn test_info_object_emitted_before_catalog() {
        let metadata = DocumentMetadata::new().title("Report").author("QA");
        let mut document = Document::with_metadata(metadata);
        document.add_page(PageSpec::default());
        let content = finish_to_string(document);

        assert!(content.contains("/Title (Report)"));
        assert!(content.contains("/Author (QA)"));
        assert!(content.contains("/CreationDate (D:2"));
        // fonts 1-4, stream 5, page 6, tree 7, info 8, catalog last at 9.
        assert!(content.contains("/Info 8 0 R"));
        assert!(content.contains("/Root 9 0 R"));
        assert!(content.contains("9 0 obj\n<</Type /Catalog"));
    }

    #[test]
    fn test_annotation_objects_created_per_link() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();
        page.add_text(
            "Visit",
            100.0,
            700.0,
            &TextOptions::default().size(12.0).link("https://a.example"),
        )
        .unwrap();
        page.add_text(
            "Also",
            100.0,
            680.0,
            &TextOptions::default().size(12.0).link("https://b.example"),
        )
        .unwrap();

        let content = finish_to_string(document);
        assert_eq!(content.matches("/Subtype /Link").count(), 2);
        assert!(content.contains("/Annots ["));
        assert!(content.contains("(https://a.example)"));
        assert!(content.contains("(https://b.example)"));
    }

    #[test]
    fn test_background_and_decorations_emitted_in_order() {
        let mut document = Document::new();
        document.add_page(PageSpec::default());
        let page = document.page_mut(0).unwrap();
        let options = TextOptions::default()
            .size(10.0)
            .color("red")
            .background("#CCDDEE")
            .underline()
            .strike();
        page.add_text("styled", 100.0, 700.0, &options).unwrap();

        let content = String::from_utf8_lossy(&page.content.build().unwrap()).to_string();
        let bg = content.find("re\nf\n").expect("background fill");
        let text = content.find("(styled) Tj").expect("text draw");
        let strokes: Vec<usize> = content
            .match_indices(" l\nS\n")
            .map(|(idx, _)| idx)
            .collect();
        assert!(bg < text, "background before text");
        assert_eq!(strokes.len(), 2, "underline and strike strokes");
        assert!(text < strokes[0]);
    }
}
