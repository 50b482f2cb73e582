//! PDF Document builder

use crate::font::FontSubset;
use crate::graphics::{generate_line_operators, generate_marked_content_begin, generate_rect_operators};
use crate::text::{anchor_offset, generate_text_operators, TextRenderContext};
use crate::{Align, FontFamily, FontSource, FontWeight, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// A buffered text operation for deferred encoding
///
/// Text is buffered during rendering and encoded during save,
/// after fonts have been subsetted and glyph IDs remapped.
#[derive(Debug, Clone)]
struct BufferedTextOp {
    /// The text to render
    text: String,
    /// Font variant name (e.g., "ko-bold")
    font_name: String,
    /// Font resource name (e.g., "F1")
    font_resource_name: String,
    /// X coordinate (in PDF coordinates, already converted)
    x: f64,
    /// Y coordinate (in PDF coordinates, already converted)
    y: f64,
    /// Font size in points
    font_size: f32,
    /// Text color
    color: Color,
}

/// One entry of a page content stream, kept in drawing order
#[derive(Debug, Clone)]
enum ContentItem {
    Operators(Vec<u8>),
    Text(BufferedTextOp),
}

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create color from a 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    /// US Letter (8.5 x 11 in)
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

#[derive(Debug)]
struct Page {
    size: PageSize,
    content: Vec<ContentItem>,
    /// Font variant names referenced by this page
    fonts: BTreeSet<String>,
    /// Currently open marked-content sequences
    open_marks: usize,
}

/// PDF document builder providing high-level operations
///
/// Pages are created blank and filled with text, rectangles and rules using
/// top-origin coordinates. Nothing is written until [`PdfDocument::to_bytes`]
/// or [`PdfDocument::save`], at which point used fonts are subset and embedded.
/// The output depends only on the calls made, never on the clock.
pub struct PdfDocument {
    pages: Vec<Page>,
    /// Registered font families
    font_families: BTreeMap<String, FontFamily>,
    /// Font variants by name (e.g. "ko-regular")
    fonts: BTreeMap<String, FontSource>,
    /// Characters rendered per font variant
    used_chars: BTreeMap<String, BTreeSet<char>>,
    /// Font variant name -> resource name
    font_resources: BTreeMap<String, String>,
    /// Next font resource number
    next_font_resource: u32,
    /// Current font family name
    current_family: Option<String>,
    /// Current font weight
    current_weight: FontWeight,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Document title (Info dictionary)
    title: Option<String>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document without pages
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            font_families: BTreeMap::new(),
            fonts: BTreeMap::new(),
            used_chars: BTreeMap::new(),
            font_resources: BTreeMap::new(),
            next_font_resource: 1,
            current_family: None,
            current_weight: FontWeight::Regular,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            title: None,
        }
    }

    /// Append a blank page, returning its number (1-indexed)
    pub fn add_page(&mut self, size: PageSize) -> usize {
        self.pages.push(Page {
            size,
            content: Vec::new(),
            fonts: BTreeSet::new(),
            open_marks: 0,
        });
        self.pages.len()
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Size of the given page (1-indexed)
    pub fn page_size(&self, page: usize) -> Result<PageSize> {
        Ok(self.page(page)?.size)
    }

    /// Set the document title written to the Info dictionary
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Register a font family
    ///
    /// # Example
    /// ```ignore
    /// doc.register_font_family("ko", FontFamilyBuilder::new()
    ///     .regular(std::fs::read("NanumGothic.ttf")?)
    ///     .bold(std::fs::read("NanumGothicBold.ttf")?)
    ///     .build("ko")?)?;
    /// doc.register_font_family("en", FontFamily::helvetica())?;
    /// ```
    pub fn register_font_family(&mut self, name: &str, family: FontFamily) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        for weight in [FontWeight::Regular, FontWeight::Bold] {
            let variant_name = family.get_variant_name(name, weight);
            self.fonts
                .entry(variant_name)
                .or_insert_with(|| family.get_variant(weight).clone());
        }
        self.font_families.insert(name.to_string(), family);

        Ok(())
    }

    /// Set the current font family and size
    ///
    /// # Example
    /// ```ignore
    /// doc.set_font("ko", 12.0)?;  // Regular 12pt
    /// doc.set_font_weight(FontWeight::Bold)?;  // Now bold 12pt
    /// doc.set_font_size(16.0)?;  // Now bold 16pt
    /// ```
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Set only the font size (keeps current family/weight)
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Set the font weight (keeps current family/size)
    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_weight = weight;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Get the current active font variant name
    fn current_font_name(&self) -> Result<String> {
        let family_name = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;
        let family = self
            .font_families
            .get(family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;

        Ok(family.get_variant_name(family_name, self.current_weight))
    }

    fn current_font(&self) -> Result<(String, &FontSource)> {
        let name = self.current_font_name()?;
        let font = self
            .fonts
            .get(&name)
            .ok_or_else(|| PdfError::FontNotFound(name.clone()))?;
        Ok((name, font))
    }

    /// Get the width of text in points using the current font and size
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let (_, font) = self.current_font()?;
        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    fn page(&self, page: usize) -> Result<&Page> {
        let count = self.pages.len();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page, count));
        }
        Ok(&self.pages[page - 1])
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut Page> {
        let count = self.pages.len();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page, count));
        }
        Ok(&mut self.pages[page - 1])
    }

    /// Resource name for a font variant, allocated on first use
    fn font_resource_name(&mut self, font_name: &str) -> String {
        if let Some(resource) = self.font_resources.get(font_name) {
            return resource.clone();
        }
        let resource = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        self.font_resources
            .insert(font_name.to_string(), resource.clone());
        resource
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points (alignment anchor)
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_height = self.page(page)?.size.height;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let (font_name, font) = self.current_font()?;
        let text_width = font.text_width_points(text, self.current_font_size) as f64;

        self.used_chars
            .entry(font_name.clone())
            .or_default()
            .extend(text.chars());
        let font_resource_name = self.font_resource_name(&font_name);

        let op = BufferedTextOp {
            text: text.to_string(),
            font_name: font_name.clone(),
            font_resource_name,
            x: x + anchor_offset(text_width, align),
            y: page_height - y,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };

        let page = self.page_mut(page)?;
        page.fonts.insert(font_name);
        page.content.push(ContentItem::Text(op));

        Ok(())
    }

    /// Fill a rectangle whose top-left corner is at (`x`, `y`) from the top
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        let page = self.page_mut(page)?;
        let pdf_y = page.size.height - y - height;
        page.content.push(ContentItem::Operators(generate_rect_operators(
            x, pdf_y, width, height, color,
        )));
        Ok(())
    }

    /// Stroke a line between two top-origin points
    pub fn stroke_line(
        &mut self,
        page: usize,
        from: (f64, f64),
        to: (f64, f64),
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        let page = self.page_mut(page)?;
        let height = page.size.height;
        page.content.push(ContentItem::Operators(generate_line_operators(
            (from.0, height - from.1),
            (to.0, height - to.1),
            line_width,
            color,
        )));
        Ok(())
    }

    /// Open a marked-content sequence (`/Tag BMC`)
    pub fn begin_marked_content(&mut self, page: usize, tag: &str) -> Result<()> {
        let page = self.page_mut(page)?;
        page.open_marks += 1;
        page.content
            .push(ContentItem::Operators(generate_marked_content_begin(tag)));
        Ok(())
    }

    /// Close the innermost marked-content sequence (`EMC`)
    pub fn end_marked_content(&mut self, page: usize) -> Result<()> {
        let page_number = page;
        let page = self.page_mut(page)?;
        if page.open_marks == 0 {
            return Err(PdfError::UnbalancedMarkedContent(page_number));
        }
        page.open_marks -= 1;
        page.content
            .push(ContentItem::Operators(b"EMC\n".to_vec()));
        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        for (index, page) in self.pages.iter().enumerate() {
            if page.open_marks != 0 {
                return Err(PdfError::UnbalancedMarkedContent(index + 1));
            }
        }

        // 1. Subset fonts (creates subsets with only used glyphs)
        let subsets = self.subset_fonts()?;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        // 2. Embed fonts into PDF
        let font_ids = self.embed_fonts(&mut doc, &subsets)?;

        // 3. Encode buffered text with remapped glyph IDs and write pages
        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = self.encode_page_content(page, &subsets)?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

            let mut font_dict = Dictionary::new();
            for font_name in &page.fonts {
                if let (Some(resource), Some(&font_id)) =
                    (self.font_resources.get(font_name), font_ids.get(font_name))
                {
                    font_dict.set(resource.as_str(), Object::Reference(font_id));
                }
            }
            let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(font_dict))]);

            let media_box: Vec<Object> = vec![
                0.into(),
                0.into(),
                Object::Real(page.size.width as _),
                Object::Real(page.size.height as _),
            ];

            let page_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Parent", Object::Reference(pages_id)),
                ("MediaBox", media_box.into()),
                ("Resources", Object::Dictionary(resources)),
                ("Contents", Object::Reference(content_id)),
            ]));
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", "Pages".into()),
                ("Kids", kids.into()),
                ("Count", page_count.into()),
            ])),
        );

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal("rsinvoice"));
        if let Some(title) = &self.title {
            info.set("Title", text_string(title));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Create subsets for all embedded fonts that have been used
    fn subset_fonts(&self) -> Result<BTreeMap<String, FontSubset>> {
        let mut subsets = BTreeMap::new();
        for (font_name, chars) in &self.used_chars {
            if let Some(FontSource::Embedded(data)) = self.fonts.get(font_name) {
                subsets.insert(font_name.clone(), data.create_subset(chars)?);
            }
        }
        Ok(subsets)
    }

    /// Add font objects for every used variant, returning the font dictionary IDs
    fn embed_fonts(
        &self,
        doc: &mut Document,
        subsets: &BTreeMap<String, FontSubset>,
    ) -> Result<BTreeMap<String, ObjectId>> {
        let mut font_ids = BTreeMap::new();

        for font_name in self.used_chars.keys() {
            let font = self
                .fonts
                .get(font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;

            let font_id = match font {
                FontSource::Builtin(builtin) => doc.add_object(builtin.to_pdf_dictionary()),
                FontSource::Embedded(data) => {
                    let subset = subsets
                        .get(font_name)
                        .ok_or_else(|| PdfError::FontSubsetError(font_name.clone()))?;
                    let objects = data.to_pdf_objects(subset)?;

                    let font_file_id = doc.add_object(objects.font_file_stream);
                    let tounicode_id = doc.add_object(objects.tounicode_stream);

                    let mut descriptor = objects.font_descriptor;
                    descriptor.set("FontFile2", Object::Reference(font_file_id));
                    let descriptor_id = doc.add_object(descriptor);

                    let mut cid_font = objects.cid_font;
                    cid_font.set("FontDescriptor", Object::Reference(descriptor_id));
                    let cid_font_id = doc.add_object(cid_font);

                    let mut type0_font = objects.type0_font;
                    type0_font.set(
                        "DescendantFonts",
                        vec![Object::Reference(cid_font_id)],
                    );
                    type0_font.set("ToUnicode", Object::Reference(tounicode_id));
                    doc.add_object(type0_font)
                }
            };

            font_ids.insert(font_name.clone(), font_id);
        }

        Ok(font_ids)
    }

    fn encode_page_content(
        &self,
        page: &Page,
        subsets: &BTreeMap<String, FontSubset>,
    ) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for item in &page.content {
            match item {
                ContentItem::Operators(ops) => content.extend_from_slice(ops),
                ContentItem::Text(op) => {
                    let text_hex = match self.fonts.get(&op.font_name) {
                        Some(FontSource::Builtin(builtin)) => builtin.encode_text_hex(&op.text),
                        Some(FontSource::Embedded(_)) => subsets
                            .get(&op.font_name)
                            .ok_or_else(|| PdfError::FontSubsetError(op.font_name.clone()))?
                            .encode_text_hex(&op.text),
                        None => return Err(PdfError::FontNotFound(op.font_name.clone())),
                    };
                    let ctx = TextRenderContext {
                        font_name: op.font_resource_name.clone(),
                        font_size: op.font_size,
                        text_width: 0.0,
                        color: op.color,
                    };
                    content.extend(generate_text_operators(
                        &text_hex,
                        op.x,
                        op.y,
                        Align::Left,
                        &ctx,
                    ));
                }
            }
        }
        Ok(content)
    }
}

/// Encode a PDF text string, using UTF-16BE when it is not plain ASCII
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn helvetica_doc() -> PdfDocument {
        let mut doc = PdfDocument::new();
        doc.register_font_family("en", FontFamily::helvetica())
            .unwrap();
        doc
    }

    fn page_text(doc: &PdfDocument, page: usize) -> String {
        let subsets = doc.subset_fonts().unwrap();
        let content = doc
            .encode_page_content(&doc.pages[page - 1], &subsets)
            .unwrap();
        String::from_utf8(content).unwrap()
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = PdfDocument::new();
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_add_page() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.add_page(PageSize::A4), 1);
        assert_eq!(doc.add_page(PageSize::LETTER), 2);
        assert_eq!(doc.page_size(2).unwrap(), PageSize::LETTER);
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex(0xFFFFFF), Color::white());
        assert_eq!(Color::from_hex(0x000000), Color::black());
        assert_eq!(Color::from_hex(0x808080), Color::from_rgb(128, 128, 128));
    }

    #[test]
    fn test_set_font_requires_registration() {
        let mut doc = PdfDocument::new();
        assert!(matches!(
            doc.set_font("missing", 12.0),
            Err(PdfError::FontNotFound(_))
        ));
        assert!(matches!(
            doc.set_font_size(10.0),
            Err(PdfError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_register_duplicate_family() {
        let mut doc = helvetica_doc();
        assert!(matches!(
            doc.register_font_family("en", FontFamily::helvetica()),
            Err(PdfError::FontAlreadyExists(_))
        ));
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = helvetica_doc();
        doc.set_font("en", 12.0).unwrap();
        assert!(matches!(
            doc.insert_text("x", 1, 0.0, 0.0, Align::Left),
            Err(PdfError::InvalidPage(1, 0))
        ));
    }

    #[test]
    fn test_insert_text_converts_to_bottom_origin() {
        let mut doc = helvetica_doc();
        let page = doc.add_page(PageSize::A4);
        doc.set_font("en", 10.0).unwrap();
        doc.insert_text("Hi", page, 100.0, 41.89, Align::Left)
            .unwrap();

        let content = page_text(&doc, page);
        assert!(content.contains("/F1 10 Tf"));
        assert!(content.contains("100 800 Td"));
        assert!(content.contains("<4869> Tj"));
    }

    #[test]
    fn test_insert_text_right_aligned() {
        let mut doc = helvetica_doc();
        let page = doc.add_page(PageSize::A4);
        doc.set_font("en", 10.0).unwrap();
        // "Hi" is 9.44pt wide in Helvetica 10
        doc.insert_text("Hi", page, 100.0, 41.89, Align::Right)
            .unwrap();

        let content = page_text(&doc, page);
        assert!(content.contains("90.56 800 Td"));
    }

    #[test]
    fn test_bold_uses_separate_resource() {
        let mut doc = helvetica_doc();
        let page = doc.add_page(PageSize::A4);
        doc.set_font("en", 10.0).unwrap();
        doc.insert_text("a", page, 0.0, 10.0, Align::Left).unwrap();
        doc.set_font_weight(FontWeight::Bold).unwrap();
        doc.insert_text("b", page, 0.0, 20.0, Align::Left).unwrap();

        let content = page_text(&doc, page);
        assert!(content.contains("/F1 10 Tf"));
        assert!(content.contains("/F2 10 Tf"));
    }

    #[test]
    fn test_text_width() {
        let mut doc = helvetica_doc();
        doc.set_font("en", 10.0).unwrap();
        let regular = doc.get_text_width("Total").unwrap();
        doc.set_font_weight(FontWeight::Bold).unwrap();
        let bold = doc.get_text_width("Total").unwrap();
        assert!(bold > regular);
    }

    #[test]
    fn test_graphics_keep_drawing_order() {
        let mut doc = helvetica_doc();
        let page = doc.add_page(PageSize::A4);
        doc.set_font("en", 9.0).unwrap();
        doc.fill_rect(page, 0.0, 0.0, 10.0, 10.0, Color::from_hex(0x4472C4))
            .unwrap();
        doc.insert_text("A", page, 0.0, 8.0, Align::Left).unwrap();
        doc.stroke_line(page, (0.0, 10.0), (10.0, 10.0), 0.5, Color::black())
            .unwrap();

        let content = page_text(&doc, page);
        let rect = content.find(" re").unwrap();
        let text = content.find("Tj").unwrap();
        let line = content.find(" l\n").unwrap();
        assert!(rect < text && text < line);
        assert!(content.contains("0 831.89 10 10 re"));
    }

    #[test]
    fn test_marked_content_balance() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(PageSize::A4);
        assert!(matches!(
            doc.end_marked_content(page),
            Err(PdfError::UnbalancedMarkedContent(1))
        ));

        doc.begin_marked_content(page, "Header").unwrap();
        assert!(matches!(
            doc.to_bytes(),
            Err(PdfError::UnbalancedMarkedContent(1))
        ));

        doc.end_marked_content(page).unwrap();
        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_to_bytes_is_deterministic() {
        let build = || {
            let mut doc = helvetica_doc();
            doc.set_title("INVOICE");
            let page = doc.add_page(PageSize::A4);
            doc.set_font("en", 12.0).unwrap();
            doc.insert_text("Hello", page, 50.0, 50.0, Align::Left)
                .unwrap();
            doc.to_bytes().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_to_bytes_parses_back() {
        let mut doc = helvetica_doc();
        let page = doc.add_page(PageSize::A4);
        doc.add_page(PageSize::A4);
        doc.set_font("en", 12.0).unwrap();
        doc.insert_text("Hello", page, 50.0, 50.0, Align::Left)
            .unwrap();

        let bytes = doc.to_bytes().unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn test_text_string_encoding() {
        match text_string("INVOICE") {
            Object::String(bytes, StringFormat::Literal) => assert_eq!(bytes, b"INVOICE"),
            other => panic!("unexpected {other:?}"),
        }
        match text_string("청구서") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(bytes.len(), 2 + 3 * 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
