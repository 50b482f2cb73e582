//! Font handling for PDF documents

use crate::{PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Object, Stream};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::sync::Arc;
use subsetter::GlyphRemapper;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A parsed TrueType font.
///
/// `FontData` is immutable once loaded, so one instance can be shared (via `Arc`)
/// between any number of documents. Glyph usage is tracked per document.
#[derive(Debug)]
pub struct FontData {
    /// Font name/identifier (used as the PDF BaseFont)
    pub name: String,
    /// Raw TTF/TTC data
    ttf_data: Vec<u8>,
    /// Face index inside a font collection
    index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
}

/// A glyph subset of a [`FontData`] for one document
#[derive(Debug, Clone)]
pub struct FontSubset {
    /// Subsetted font program
    pub data: Vec<u8>,
    /// Character -> remapped glyph ID
    glyphs: BTreeMap<char, u16>,
    /// Remapped glyph ID -> advance width in 1/1000 em
    widths: BTreeMap<u16, i64>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (compressed TTF subset)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        Self::from_collection(name, ttf_data, 0)
    }

    /// Create font data from one face of a TrueType collection (`.ttc`)
    pub fn from_collection(name: &str, ttf_data: &[u8], index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(ttf_data, index)
            .map_err(|e| PdfError::FontParseError(format!("{e:?}")))?;

        if face.tables().cff.is_some() || face.tables().cff2.is_some() {
            return Err(PdfError::FontParseError(format!(
                "{name}: CFF outlines are not supported, use a TrueType font"
            )));
        }

        let bbox = face.global_bounding_box();
        let ascender = face.ascender();

        Ok(Self {
            name: sanitize_font_name(name),
            units_per_em: face.units_per_em(),
            ascender,
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or(ascender),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            ttf_data: ttf_data.to_vec(),
            index,
        })
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.ttf_data, self.index).ok()
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        let Some(face) = self.face() else {
            return 0;
        };
        text.chars()
            .filter_map(|c| face.glyph_index(c).and_then(|g| face.glyph_hor_advance(g)))
            .map(|w| w as u32)
            .sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        (width as f32 / self.units_per_em as f32) * font_size
    }

    fn to_thousandths(&self, value: i32) -> i64 {
        (value as i64 * 1000) / self.units_per_em.max(1) as i64
    }

    /// Subset the font to the given characters
    ///
    /// Glyph IDs are remapped densely; text must be encoded through the returned
    /// [`FontSubset`], not with the glyph IDs of the full font.
    pub fn create_subset(&self, chars: &BTreeSet<char>) -> Result<FontSubset> {
        let face = self
            .face()
            .ok_or_else(|| PdfError::FontParseError(self.name.clone()))?;

        let mut remapper = GlyphRemapper::new();
        remapper.remap(0);

        let mut glyphs = BTreeMap::new();
        let mut widths = BTreeMap::new();
        for &c in chars {
            let glyph = face.glyph_index(c);
            let new_gid = remapper.remap(glyph.map(|g| g.0).unwrap_or(0));
            let advance = glyph
                .and_then(|g| face.glyph_hor_advance(g))
                .unwrap_or(0);
            glyphs.insert(c, new_gid);
            widths.insert(new_gid, self.to_thousandths(advance as i32));
        }

        let data = subsetter::subset(&self.ttf_data, self.index, &remapper)
            .map_err(|e| PdfError::FontSubsetError(format!("{}: {e:?}", self.name)))?;

        Ok(FontSubset {
            data,
            glyphs,
            widths,
        })
    }

    /// Generate all PDF objects needed to embed a subset of this font
    pub fn to_pdf_objects(&self, subset: &FontSubset) -> Result<FontObjects> {
        let base_font = Object::Name(format!("{}+{}", subset.tag(), self.name).into_bytes());

        // Generate ToUnicode CMap
        let tounicode_content = subset.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![("Type", "CMap".into())]),
            tounicode_content.into_bytes(),
        );

        // Generate compressed font file stream
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&subset.data)?;
        let compressed = encoder.finish()?;
        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Filter", "FlateDecode".into()),
                ("Length1", (subset.data.len() as i64).into()),
            ]),
            compressed,
        );

        let font_bbox: Vec<Object> = self
            .bbox
            .iter()
            .map(|&v| self.to_thousandths(v as i32).into())
            .collect();

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", base_font.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", self.to_thousandths(self.ascender as i32).into()),
            ("Descent", self.to_thousandths(self.descender as i32).into()),
            ("CapHeight", self.to_thousandths(self.cap_height as i32).into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Reference((0, 0))), // Placeholder, set when embedding
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", base_font.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Reference((0, 0))), // Placeholder, set when embedding
            ("CIDToGIDMap", "Identity".into()),
            ("W", subset.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", base_font),
            ("Encoding", "Identity-H".into()),
            ("DescendantFonts", vec![Object::Reference((0, 0))].into()), // Placeholder
            ("ToUnicode", Object::Reference((0, 0))),                     // Placeholder
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }
}

impl FontSubset {
    /// Encode text as a hex string of remapped glyph IDs for the Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 4 + 2);
        result.push('<');
        for c in text.chars() {
            let gid = self.glyphs.get(&c).copied().unwrap_or(0);
            result.push_str(&format!("{gid:04X}"));
        }
        result.push('>');
        result
    }

    /// Six-letter subset tag derived from the glyph set, stable across runs
    fn tag(&self) -> String {
        let mut hash: u32 = 0x811c_9dc5;
        for (&c, &gid) in &self.glyphs {
            for byte in (c as u32).to_be_bytes().into_iter().chain(gid.to_be_bytes()) {
                hash ^= byte as u32;
                hash = hash.wrapping_mul(0x0100_0193);
            }
        }
        (0..6)
            .map(|i| (b'A' + ((hash >> (i * 5)) % 26) as u8) as char)
            .collect()
    }

    /// Generate /W array: [gid [width] gid [width] ...]
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::with_capacity(self.widths.len() * 2);
        for (&gid, &advance) in &self.widths {
            widths.push((gid as i64).into());
            widths.push(vec![advance.into()].into());
        }
        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let mapped: Vec<(u16, char)> = self
            .glyphs
            .iter()
            .filter(|(_, &gid)| gid != 0)
            .map(|(&c, &gid)| (gid, c))
            .collect();

        // bfchar sections are limited to 100 entries
        for chunk in mapped.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, c) in chunk {
                let mut utf16 = [0u16; 2];
                let unicode: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{unicode}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}

/// Standard-14 fonts every PDF reader ships, used when no font file is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

/// Helvetica advance widths for 0x20..=0x7E (AFM, 1/1000 em)
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold advance widths for 0x20..=0x7E (AFM, 1/1000 em)
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

impl BuiltinFont {
    /// PDF BaseFont name
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Map a character to its WinAnsiEncoding byte
    pub fn encode_char(c: char) -> Option<u8> {
        match c {
            ' '..='~' => Some(c as u8),
            '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        }
    }

    /// Check if the font can render the character
    pub fn has_glyph(&self, c: char) -> bool {
        Self::encode_char(c).is_some()
    }

    fn byte_width(&self, byte: u8) -> u16 {
        let table = match self {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match byte {
            0x20..=0x7E => table[(byte - 0x20) as usize],
            0x85 | 0x89 | 0x97 => 1000,
            0x91 | 0x92 => table[(b'\'' - 0x20) as usize],
            0x93 | 0x94 => table[(b'"' - 0x20) as usize],
            0x95 => 350,
            _ => 556,
        }
    }

    /// Calculate text width in points for a given font size
    ///
    /// Unencodable characters are measured as the `?` they are rendered with.
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| self.byte_width(Self::encode_char(c).unwrap_or(b'?')) as u32)
            .sum();
        units as f32 / 1000.0 * font_size
    }

    /// Encode text as a WinAnsi hex string for the Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 2 + 2);
        result.push('<');
        for c in text.chars() {
            let byte = Self::encode_char(c).unwrap_or(b'?');
            result.push_str(&format!("{byte:02X}"));
        }
        result.push('>');
        result
    }

    /// Font dictionary for a Standard-14 font
    pub fn to_pdf_dictionary(&self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type1".into()),
            ("BaseFont", self.base_font().into()),
            ("Encoding", "WinAnsiEncoding".into()),
        ])
    }
}

/// Either an embedded TrueType font or a built-in Standard-14 font
#[derive(Debug, Clone)]
pub enum FontSource {
    Embedded(Arc<FontData>),
    Builtin(BuiltinFont),
}

impl FontSource {
    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        match self {
            FontSource::Embedded(data) => data.text_width_points(text, font_size),
            FontSource::Builtin(font) => font.text_width_points(text, font_size),
        }
    }

    /// Check if the font can render the character
    pub fn has_glyph(&self, c: char) -> bool {
        match self {
            FontSource::Embedded(data) => data.has_glyph(c),
            FontSource::Builtin(font) => font.has_glyph(c),
        }
    }

    /// True for Standard-14 fonts
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontSource::Builtin(_))
    }
}

/// Font family with regular and bold variants
#[derive(Debug, Clone)]
pub struct FontFamily {
    /// Regular variant (required)
    pub regular: FontSource,
    /// Bold variant
    pub bold: Option<FontSource>,
}

impl FontFamily {
    /// The built-in Helvetica family
    pub fn helvetica() -> Self {
        Self {
            regular: FontSource::Builtin(BuiltinFont::Helvetica),
            bold: Some(FontSource::Builtin(BuiltinFont::HelveticaBold)),
        }
    }

    /// Get the font for the specified weight
    /// Falls back to regular if the bold variant is not available
    pub fn get_variant(&self, weight: FontWeight) -> &FontSource {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular => &self.regular,
        }
    }

    /// Get the variant name for the specified weight
    pub fn get_variant_name(&self, family_name: &str, weight: FontWeight) -> String {
        match weight {
            FontWeight::Bold if self.bold.is_some() => format!("{family_name}-bold"),
            _ => format!("{family_name}-regular"),
        }
    }

    /// Text width in points for the given weight and size
    pub fn text_width(&self, text: &str, weight: FontWeight, font_size: f32) -> f32 {
        self.get_variant(weight).text_width_points(text, font_size)
    }
}

/// Builder for registering font families
#[derive(Default)]
pub struct FontFamilyBuilder {
    regular: Option<FontSource>,
    bold: Option<FontSource>,
    pending_regular: Option<Vec<u8>>,
    pending_bold: Option<Vec<u8>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular variant from TTF bytes
    pub fn regular(mut self, ttf_data: Vec<u8>) -> Self {
        self.pending_regular = Some(ttf_data);
        self
    }

    /// Bold variant from TTF bytes
    pub fn bold(mut self, ttf_data: Vec<u8>) -> Self {
        self.pending_bold = Some(ttf_data);
        self
    }

    /// Regular variant from an already loaded (shared) font
    pub fn regular_font(mut self, font: FontSource) -> Self {
        self.regular = Some(font);
        self
    }

    /// Bold variant from an already loaded (shared) font
    pub fn bold_font(mut self, font: FontSource) -> Self {
        self.bold = Some(font);
        self
    }

    /// Build the FontFamily from the provided fonts
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let regular = match (self.regular, self.pending_regular) {
            (Some(font), _) => font,
            (None, Some(data)) => FontSource::Embedded(Arc::new(FontData::from_ttf(
                &format!("{family_name}-regular"),
                &data,
            )?)),
            (None, None) => {
                return Err(PdfError::FontParseError(
                    "FontFamily must have at least a regular variant".to_string(),
                ))
            }
        };

        let bold = match (self.bold, self.pending_bold) {
            (Some(font), _) => Some(font),
            (None, Some(data)) => Some(FontSource::Embedded(Arc::new(FontData::from_ttf(
                &format!("{family_name}-bold"),
                &data,
            )?))),
            (None, None) => None,
        };

        Ok(FontFamily { regular, bold })
    }
}

/// PDF names may not contain whitespace or delimiters
fn sanitize_font_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn subset_of(pairs: &[(char, u16, i64)]) -> FontSubset {
        FontSubset {
            data: vec![0u8; 16],
            glyphs: pairs.iter().map(|&(c, gid, _)| (c, gid)).collect(),
            widths: pairs.iter().map(|&(_, gid, w)| (gid, w)).collect(),
        }
    }

    #[test]
    fn test_from_ttf_rejects_garbage() {
        let result = FontData::from_ttf("test", &[0u8; 100]);
        assert!(matches!(result, Err(PdfError::FontParseError(_))));
    }

    #[test]
    fn test_sanitize_font_name() {
        assert_eq!(sanitize_font_name("Nanum Gothic/Bold"), "Nanum-Gothic-Bold");
        assert_eq!(sanitize_font_name("ko-regular"), "ko-regular");
    }

    #[test]
    fn test_helvetica_widths() {
        let font = BuiltinFont::Helvetica;
        // "Hi" = 722 + 222
        assert!((font.text_width_points("Hi", 10.0) - 9.44).abs() < 1e-4);
        assert_eq!(font.text_width_points("", 12.0), 0.0);

        let bold = BuiltinFont::HelveticaBold;
        assert!(bold.text_width_points("Hi", 10.0) > font.text_width_points("Hi", 10.0));
    }

    #[test]
    fn test_helvetica_digits_share_width() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(
            font.text_width_points("1234567890", 9.0),
            font.text_width_points("0000000000", 9.0)
        );
    }

    #[test]
    fn test_winansi_encoding() {
        assert_eq!(BuiltinFont::encode_char('A'), Some(0x41));
        assert_eq!(BuiltinFont::encode_char('€'), Some(0x80));
        assert_eq!(BuiltinFont::encode_char('¥'), Some(0xA5));
        assert_eq!(BuiltinFont::encode_char('₩'), None);
        assert_eq!(BuiltinFont::encode_char('한'), None);
    }

    #[test]
    fn test_builtin_encode_text_hex_replaces_missing_glyphs() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(font.encode_text_hex("$1"), "<2431>");
        assert_eq!(font.encode_text_hex("₩1"), "<3F31>");
        assert_eq!(font.encode_text_hex(""), "<>");
    }

    #[test]
    fn test_builtin_dictionary() {
        let dict = BuiltinFont::HelveticaBold.to_pdf_dictionary();
        assert_eq!(
            dict.get(b"BaseFont").unwrap().as_name().unwrap(),
            b"Helvetica-Bold"
        );
        assert_eq!(
            dict.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );
    }

    #[test]
    fn test_family_bold_falls_back_to_regular() {
        let family = FontFamily {
            regular: FontSource::Builtin(BuiltinFont::Helvetica),
            bold: None,
        };
        assert!(matches!(
            family.get_variant(FontWeight::Bold),
            FontSource::Builtin(BuiltinFont::Helvetica)
        ));
        assert_eq!(family.get_variant_name("ko", FontWeight::Bold), "ko-regular");

        let helvetica = FontFamily::helvetica();
        assert_eq!(helvetica.get_variant_name("en", FontWeight::Bold), "en-bold");
    }

    #[test]
    fn test_builder_requires_regular() {
        let result = FontFamilyBuilder::new().build("empty");
        assert!(matches!(result, Err(PdfError::FontParseError(_))));
    }

    #[test]
    fn test_builder_with_shared_fonts() {
        let family = FontFamilyBuilder::new()
            .regular_font(FontSource::Builtin(BuiltinFont::Helvetica))
            .bold_font(FontSource::Builtin(BuiltinFont::HelveticaBold))
            .build("shared")
            .unwrap();
        assert!(family.regular.is_builtin());
        assert!(family.bold.is_some());
    }

    #[test]
    fn test_subset_encode_text_hex() {
        let subset = subset_of(&[('A', 1, 600), ('B', 2, 650)]);
        assert_eq!(subset.encode_text_hex("AB"), "<00010002>");
        // Unknown characters map to .notdef
        assert_eq!(subset.encode_text_hex("Z"), "<0000>");
        assert_eq!(subset.encode_text_hex(""), "<>");
    }

    #[test]
    fn test_subset_widths_array() {
        let subset = subset_of(&[('A', 1, 600), ('한', 2, 920)]);
        let widths = subset.generate_widths_array();
        assert_eq!(widths.len(), 4);
        assert_eq!(widths[0].as_i64().unwrap(), 1);
        assert_eq!(widths[2].as_i64().unwrap(), 2);
    }

    #[test]
    fn test_generate_tounicode_cmap_hangul() {
        let subset = subset_of(&[('A', 1, 600), ('한', 2, 920)]);
        let cmap = subset.generate_tounicode_cmap();

        assert!(cmap.contains("/CIDInit"));
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0001> <0041>"));
        assert!(cmap.contains("<0002> <D55C>"));
        assert!(cmap.contains("endcmap"));
    }

    #[test]
    fn test_generate_tounicode_cmap_skips_notdef() {
        let subset = subset_of(&[('A', 0, 0)]);
        let cmap = subset.generate_tounicode_cmap();
        assert!(!cmap.contains("beginbfchar"));
        assert!(cmap.contains("endcmap"));
    }

    #[test]
    fn test_subset_tag_is_stable() {
        let a = subset_of(&[('A', 1, 600)]);
        let b = subset_of(&[('A', 1, 600)]);
        assert_eq!(a.tag(), b.tag());
        assert_eq!(a.tag().len(), 6);
        assert!(a.tag().chars().all(|c| c.is_ascii_uppercase()));
    }
}
