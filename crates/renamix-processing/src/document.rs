//! Document conversions: PDF → DOCX and DOCX → PDF.
//!
//! Both directions are plain-text re-flows: extracted text, one paragraph
//! per line. Layout, fonts, and embedded media are not preserved.

use anyhow::{Context, Result};
use bytes::Bytes;
use regex::Regex;
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use renamix_core::AppError;

/// Lines that fit on the single rendered PDF page.
const MAX_PDF_LINES: usize = 48;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>
"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>
"#;

/// Extract the text of a PDF and re-flow it into a minimal DOCX container.
pub fn pdf_to_docx(data: &[u8]) -> Result<Bytes, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::DocumentProcessing(format!("Failed to extract PDF text: {}", e)))?;

    let docx = build_docx(&text)
        .map_err(|e| AppError::DocumentProcessing(format!("Failed to build DOCX: {}", e)))?;

    Ok(Bytes::from(docx))
}

/// Recover the text of a DOCX and render it as a plain-text PDF.
pub fn docx_to_pdf(data: &[u8]) -> Result<Bytes, AppError> {
    let lines = extract_docx_text(data)
        .map_err(|e| AppError::DocumentProcessing(format!("Failed to read DOCX: {}", e)))?;

    Ok(Bytes::from(build_pdf(&lines)))
}

/// Build a minimal OOXML word-processing container around `text`.
fn build_docx(text: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file("[Content_Types].xml", options)
            .context("Failed to add [Content_Types].xml")?;
        zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

        zip.start_file("_rels/.rels", options)
            .context("Failed to add _rels/.rels")?;
        zip.write_all(RELS_XML.as_bytes())?;

        zip.start_file("word/document.xml", options)
            .context("Failed to add word/document.xml")?;
        zip.write_all(document_xml(text).as_bytes())?;

        zip.finish().context("Failed to finalize DOCX container")?;
    }
    Ok(buffer)
}

/// word/document.xml: one paragraph per non-blank input line.
fn document_xml(text: &str) -> String {
    let mut body = String::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(&escape_xml(line));
        body.push_str("</w:t></w:r></w:p>");
    }
    if body.is_empty() {
        body.push_str("<w:p/>");
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    )
}

/// Pull paragraph text out of a DOCX container.
fn extract_docx_text(data: &[u8]) -> Result<Vec<String>> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).context("Not a DOCX (ZIP) container")?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("DOCX is missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("Failed to read word/document.xml")?;

    document_xml_lines(&xml)
}

/// Strip markup from document.xml, one output line per `<w:p>` paragraph.
fn document_xml_lines(xml: &str) -> Result<Vec<String>> {
    let tag = Regex::new("<[^>]*>").context("Failed to compile tag-stripping regex")?;

    let mut lines = Vec::new();
    for paragraph in xml.split("</w:p>") {
        let stripped = tag.replace_all(paragraph, "");
        let line = unescape_xml(stripped.trim());
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Render text lines into a minimal single-page PDF (Helvetica, 11 pt).
fn build_pdf(lines: &[String]) -> Vec<u8> {
    let mut content = String::from("BT\n/F1 11 Tf\n14 TL\n72 756 Td\n");
    for (i, line) in lines.iter().take(MAX_PDF_LINES).enumerate() {
        if i > 0 {
            content.push_str("T*\n");
        }
        content.push('(');
        content.push_str(&escape_pdf_string(line));
        content.push_str(") Tj\n");
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!("<< /Length {} >>\nstream\n{}endstream", content.len(), content),
    ];

    let mut pdf = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in &offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    pdf
}

/// PDF literal-string escaping; non-ASCII characters have no glyph mapping
/// in the bare Helvetica setup and are replaced.
fn escape_pdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
