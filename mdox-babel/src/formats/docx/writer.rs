//! Package writer (Document → .docx bytes)
//!
//! A `.docx` file is a zip container of XML parts. The parts that never
//! change are kept as constants; everything derived from the [`Document`] is
//! written with `quick-xml` so text is always escaped.

use super::elements::{
    Border, BorderSide, Document, Element, Paragraph, Run, Section, Table, TableOfContents,
};
use super::styles::{NumberingDefinitions, ParagraphStyle, StyleSheet};
use crate::error::FormatError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
</Relationships>"#;

const APP_PROPERTIES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>mdox</Application></Properties>"#;

/// Serialize a document into `.docx` bytes.
pub fn pack(document: &Document) -> Result<Vec<u8>, FormatError> {
    let parts: Vec<(&str, Vec<u8>)> = vec![
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        ("word/document.xml", document_part(document)?),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec()),
        ("word/styles.xml", styles_part(&document.styles)?),
        ("word/numbering.xml", numbering_part(&document.numbering)?),
        ("word/settings.xml", settings_part()?),
        ("docProps/core.xml", core_part(&document.title)?),
        ("docProps/app.xml", APP_PROPERTIES.as_bytes().to_vec()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(bytes)?;
    }
    let bytes = zip.finish()?.into_inner();

    tracing::debug!(parts = parts.len(), bytes = bytes.len(), "packed docx");
    Ok(bytes)
}

/// Thin wrapper over the quick-xml writer with attribute-slice helpers.
struct Xml {
    writer: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self, FormatError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), FormatError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), FormatError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), FormatError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Characters XML 1.0 cannot carry even escaped (C0 controls, U+FFFE/F)
    /// are dropped.
    fn text(&mut self, text: &str) -> Result<(), FormatError> {
        let text: Cow<str> = if text.chars().all(is_xml_char) {
            Cow::Borrowed(text)
        } else {
            tracing::debug!("dropping characters not allowed in XML");
            Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
        };
        self.writer.write_event(Event::Text(BytesText::new(&text)))?;
        Ok(())
    }

    /// `<name w:val="value"/>`
    fn val(&mut self, name: &str, value: &str) -> Result<(), FormatError> {
        self.empty(name, &[("w:val", value)])
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn document_part(document: &Document) -> Result<Vec<u8>, FormatError> {
    let mut xml = Xml::new()?;
    xml.open("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    xml.open("w:body", &[])?;
    for element in &document.body {
        match element {
            Element::Paragraph(paragraph) => write_paragraph(&mut xml, paragraph)?,
            Element::Table(table) => write_table(&mut xml, table)?,
            Element::TableOfContents(toc) => write_toc(&mut xml, toc)?,
        }
    }
    write_section(&mut xml, &document.section)?;
    xml.close("w:body")?;
    xml.close("w:document")?;
    Ok(xml.finish())
}

fn write_paragraph(xml: &mut Xml, paragraph: &Paragraph) -> Result<(), FormatError> {
    xml.open("w:p", &[])?;

    let has_properties = paragraph.style.is_some()
        || paragraph.keep_next
        || paragraph.numbering.is_some()
        || paragraph.border.is_some()
        || paragraph.spacing.is_some()
        || paragraph.alignment.is_some();

    if has_properties {
        xml.open("w:pPr", &[])?;
        if let Some(style) = &paragraph.style {
            xml.val("w:pStyle", style)?;
        }
        if paragraph.keep_next {
            xml.empty("w:keepNext", &[])?;
        }
        if let Some(numbering) = paragraph.numbering {
            xml.open("w:numPr", &[])?;
            xml.val("w:ilvl", &numbering.level.to_string())?;
            xml.val("w:numId", &numbering.num_id.to_string())?;
            xml.close("w:numPr")?;
        }
        if let Some(border) = &paragraph.border {
            write_border(xml, border)?;
        }
        if let Some(spacing) = paragraph.spacing {
            write_spacing(xml, spacing)?;
        }
        if let Some(alignment) = paragraph.alignment {
            xml.val("w:jc", alignment.as_str())?;
        }
        xml.close("w:pPr")?;
    }

    for run in &paragraph.runs {
        write_run(xml, run)?;
    }
    xml.close("w:p")
}

fn write_border(xml: &mut Xml, border: &Border) -> Result<(), FormatError> {
    let edge = match border.side {
        BorderSide::Left => "w:left",
        BorderSide::Bottom => "w:bottom",
    };
    let size = border.size.to_string();
    let space = border.space.to_string();
    xml.open("w:pBdr", &[])?;
    xml.empty(
        edge,
        &[
            ("w:val", "single"),
            ("w:sz", &size),
            ("w:space", &space),
            ("w:color", &border.color),
        ],
    )?;
    xml.close("w:pBdr")
}

fn write_shading(xml: &mut Xml, fill: &str) -> Result<(), FormatError> {
    xml.empty(
        "w:shd",
        &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill)],
    )
}

fn write_spacing(xml: &mut Xml, (before, after): (usize, usize)) -> Result<(), FormatError> {
    let before = before.to_string();
    let after = after.to_string();
    xml.empty("w:spacing", &[("w:before", &before), ("w:after", &after)])
}

fn write_run(xml: &mut Xml, run: &Run) -> Result<(), FormatError> {
    xml.open("w:r", &[])?;

    if run.bold || run.italic || run.font.is_some() || run.size.is_some() || run.color.is_some()
    {
        xml.open("w:rPr", &[])?;
        if let Some(font) = &run.font {
            write_fonts(xml, font)?;
        }
        if run.bold {
            xml.empty("w:b", &[])?;
        }
        if run.italic {
            xml.empty("w:i", &[])?;
        }
        if let Some(color) = &run.color {
            xml.val("w:color", color)?;
        }
        if let Some(size) = run.size {
            write_size(xml, size)?;
        }
        xml.close("w:rPr")?;
    }

    if run.page_break {
        xml.empty("w:br", &[("w:type", "page")])?;
    }

    for (index, piece) in run.text.split('\t').enumerate() {
        if index > 0 {
            xml.empty("w:tab", &[])?;
        }
        if !piece.is_empty() {
            xml.open("w:t", &[("xml:space", "preserve")])?;
            xml.text(piece)?;
            xml.close("w:t")?;
        }
    }

    xml.close("w:r")
}

fn write_fonts(xml: &mut Xml, font: &str) -> Result<(), FormatError> {
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", font),
            ("w:hAnsi", font),
            ("w:eastAsia", font),
            ("w:cs", font),
        ],
    )
}

fn write_size(xml: &mut Xml, half_points: usize) -> Result<(), FormatError> {
    let size = half_points.to_string();
    xml.val("w:sz", &size)?;
    xml.val("w:szCs", &size)
}

fn write_table(xml: &mut Xml, table: &Table) -> Result<(), FormatError> {
    let total = table.width().to_string();

    xml.open("w:tbl", &[])?;
    xml.open("w:tblPr", &[])?;
    xml.empty("w:tblW", &[("w:w", &total), ("w:type", "dxa")])?;
    xml.open("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", &table.border_color),
            ],
        )?;
    }
    xml.close("w:tblBorders")?;
    xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
    xml.close("w:tblPr")?;

    xml.open("w:tblGrid", &[])?;
    for width in &table.column_widths {
        xml.empty("w:gridCol", &[("w:w", &width.to_string())])?;
    }
    xml.close("w:tblGrid")?;

    for row in &table.rows {
        xml.open("w:tr", &[])?;
        if row.header {
            xml.open("w:trPr", &[])?;
            xml.empty("w:tblHeader", &[])?;
            xml.close("w:trPr")?;
        }
        if row.cells.is_empty() {
            // a row needs at least one cell
            write_cell(xml, table.width(), None, &[])?;
        }
        for cell in &row.cells {
            write_cell(xml, cell.width, cell.shading.as_deref(), &cell.paragraphs)?;
        }
        xml.close("w:tr")?;
    }

    xml.close("w:tbl")
}

fn write_cell(
    xml: &mut Xml,
    width: usize,
    shading: Option<&str>,
    paragraphs: &[Paragraph],
) -> Result<(), FormatError> {
    xml.open("w:tc", &[])?;
    xml.open("w:tcPr", &[])?;
    xml.empty("w:tcW", &[("w:w", &width.to_string()), ("w:type", "dxa")])?;
    if let Some(fill) = shading {
        write_shading(xml, fill)?;
    }
    xml.close("w:tcPr")?;
    if paragraphs.is_empty() {
        // a cell needs at least one paragraph
        xml.empty("w:p", &[])?;
    }
    for paragraph in paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    xml.close("w:tc")
}

fn write_toc(xml: &mut Xml, toc: &TableOfContents) -> Result<(), FormatError> {
    xml.open("w:sdt", &[])?;
    xml.open("w:sdtPr", &[])?;
    xml.open("w:docPartObj", &[])?;
    xml.val("w:docPartGallery", "Table of Contents")?;
    xml.empty("w:docPartUnique", &[])?;
    xml.close("w:docPartObj")?;
    xml.close("w:sdtPr")?;
    xml.open("w:sdtContent", &[])?;

    xml.open("w:p", &[])?;
    field_char(xml, "begin", true)?;
    xml.open("w:r", &[])?;
    xml.open("w:instrText", &[("xml:space", "preserve")])?;
    xml.text(&toc.instruction())?;
    xml.close("w:instrText")?;
    xml.close("w:r")?;
    field_char(xml, "separate", false)?;
    xml.open("w:r", &[])?;
    xml.open("w:t", &[])?;
    xml.text(&toc.placeholder)?;
    xml.close("w:t")?;
    xml.close("w:r")?;
    field_char(xml, "end", false)?;
    xml.close("w:p")?;

    xml.close("w:sdtContent")?;
    xml.close("w:sdt")
}

fn field_char(xml: &mut Xml, kind: &str, dirty: bool) -> Result<(), FormatError> {
    xml.open("w:r", &[])?;
    if dirty {
        xml.empty("w:fldChar", &[("w:fldCharType", kind), ("w:dirty", "true")])?;
    } else {
        xml.empty("w:fldChar", &[("w:fldCharType", kind)])?;
    }
    xml.close("w:r")
}

fn write_section(xml: &mut Xml, section: &Section) -> Result<(), FormatError> {
    let width = section.page_width.to_string();
    let height = section.page_height.to_string();
    let top = section.margin_top.to_string();
    let right = section.margin_right.to_string();
    let bottom = section.margin_bottom.to_string();
    let left = section.margin_left.to_string();

    xml.open("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", &width), ("w:h", &height)])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", &top),
            ("w:right", &right),
            ("w:bottom", &bottom),
            ("w:left", &left),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.close("w:sectPr")
}

fn styles_part(sheet: &StyleSheet) -> Result<Vec<u8>, FormatError> {
    let mut xml = Xml::new()?;
    xml.open("w:styles", &[("xmlns:w", W_NS)])?;

    xml.open("w:docDefaults", &[])?;
    xml.open("w:rPrDefault", &[])?;
    xml.open("w:rPr", &[])?;
    write_fonts(&mut xml, &sheet.default_font)?;
    write_size(&mut xml, sheet.default_size)?;
    xml.val("w:lang", "en-US")?;
    xml.close("w:rPr")?;
    xml.close("w:rPrDefault")?;
    xml.open("w:pPrDefault", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[("w:after", "120"), ("w:line", "276"), ("w:lineRule", "auto")],
    )?;
    xml.close("w:pPr")?;
    xml.close("w:pPrDefault")?;
    xml.close("w:docDefaults")?;

    xml.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.val("w:name", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.close("w:style")?;

    for style in &sheet.styles {
        write_style(&mut xml, style)?;
    }

    xml.close("w:styles")?;
    Ok(xml.finish())
}

fn write_style(xml: &mut Xml, style: &ParagraphStyle) -> Result<(), FormatError> {
    xml.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:styleId", &style.id)],
    )?;
    xml.val("w:name", &style.name)?;
    if let Some(based_on) = &style.based_on {
        xml.val("w:basedOn", based_on)?;
    }
    if let Some(next) = &style.next {
        xml.val("w:next", next)?;
    }
    xml.empty("w:qFormat", &[])?;

    xml.open("w:pPr", &[])?;
    if style.keep_next {
        xml.empty("w:keepNext", &[])?;
    }
    if let Some(spacing) = style.spacing {
        write_spacing(xml, spacing)?;
    }
    if let Some(indent) = style.indent_left {
        xml.empty("w:ind", &[("w:left", &indent.to_string())])?;
    }
    if let Some(level) = style.outline_level {
        xml.val("w:outlineLvl", &level.to_string())?;
    }
    xml.close("w:pPr")?;

    xml.open("w:rPr", &[])?;
    if let Some(font) = &style.font {
        write_fonts(xml, font)?;
    }
    if style.bold {
        xml.empty("w:b", &[])?;
    }
    if style.italic {
        xml.empty("w:i", &[])?;
    }
    if let Some(color) = &style.color {
        xml.val("w:color", color)?;
    }
    if let Some(size) = style.size {
        write_size(xml, size)?;
    }
    xml.close("w:rPr")?;

    xml.close("w:style")
}

fn numbering_part(numbering: &NumberingDefinitions) -> Result<Vec<u8>, FormatError> {
    let mut xml = Xml::new()?;
    xml.open("w:numbering", &[("xmlns:w", W_NS)])?;

    for definition in &numbering.abstracts {
        xml.open(
            "w:abstractNum",
            &[("w:abstractNumId", &definition.id.to_string())],
        )?;
        xml.val("w:multiLevelType", "hybridMultilevel")?;
        for (level, level_def) in definition.levels.iter().enumerate() {
            xml.open("w:lvl", &[("w:ilvl", &level.to_string())])?;
            xml.val("w:start", "1")?;
            xml.val("w:numFmt", level_def.format.as_str())?;
            xml.val("w:lvlText", &level_def.text)?;
            xml.val("w:lvlJc", "left")?;
            xml.open("w:pPr", &[])?;
            xml.empty(
                "w:ind",
                &[
                    ("w:left", &level_def.indent.to_string()),
                    ("w:hanging", &level_def.hanging.to_string()),
                ],
            )?;
            xml.close("w:pPr")?;
            xml.close("w:lvl")?;
        }
        xml.close("w:abstractNum")?;
    }

    for instance in &numbering.instances {
        xml.open("w:num", &[("w:numId", &instance.num_id.to_string())])?;
        xml.val("w:abstractNumId", &instance.abstract_id.to_string())?;
        if instance.restart {
            xml.open("w:lvlOverride", &[("w:ilvl", "0")])?;
            xml.val("w:startOverride", "1")?;
            xml.close("w:lvlOverride")?;
        }
        xml.close("w:num")?;
    }

    xml.close("w:numbering")?;
    Ok(xml.finish())
}

fn settings_part() -> Result<Vec<u8>, FormatError> {
    let mut xml = Xml::new()?;
    xml.open("w:settings", &[("xmlns:w", W_NS)])?;
    xml.val("w:defaultTabStop", "720")?;
    // ask the viewer to refresh fields (the TOC) when the file is opened
    xml.val("w:updateFields", "true")?;
    xml.close("w:settings")?;
    Ok(xml.finish())
}

fn core_part(title: &str) -> Result<Vec<u8>, FormatError> {
    let mut xml = Xml::new()?;
    xml.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.open("dc:title", &[])?;
    xml.text(title)?;
    xml.close("dc:title")?;
    xml.open("dc:creator", &[])?;
    xml.text("mdox")?;
    xml.close("dc:creator")?;
    xml.close("cp:coreProperties")?;
    Ok(xml.finish())
}
