//! One-page PDF certificates.
//!
//! The page is A4 portrait, drawn with the standard Helvetica fonts in
//! WinAnsi encoding. Characters outside that encoding print as `?`.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::ExportError;
use super::certificate::Certificate;

/// `Content-Type` of PDF exports.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;

/// Encodes text for a WinAnsi font.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‘' | '’' => b'\'',
            '“' | '”' => b'"',
            '–' | '—' => b'-',
            _ => b'?',
        })
        .collect()
}

/// Accumulates drawing operations top to bottom.
struct PageWriter {
    operations: Vec<Operation>,
    cursor: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn text_at(&mut self, font: &str, size: i64, x: i64, y: i64, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn line(&mut self, font: &str, size: i64, text: &str) {
        self.cursor -= size + 6;
        self.text_at(font, size, MARGIN, self.cursor, text);
    }

    fn labelled(&mut self, label: &str, value: &str) {
        self.cursor -= 16;
        self.text_at("F2", 10, MARGIN + 10, self.cursor, label);
        self.text_at("F1", 10, MARGIN + 180, self.cursor, value);
    }

    fn rule(&mut self) {
        self.cursor -= 10;
        self.operations.extend([
            Operation::new("w", vec![Object::Real(0.5)]),
            Operation::new("m", vec![MARGIN.into(), self.cursor.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), self.cursor.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    fn gap(&mut self, points: i64) {
        self.cursor -= points;
    }

    fn finish(self) -> Content {
        Content {
            operations: self.operations,
        }
    }
}

fn layout(cert: &Certificate) -> Content {
    let mut page = PageWriter::new();

    page.line("F2", 13, &cert.title);
    page.gap(4);
    page.line("F1", 10, &format!("Nro. Comprobante: {}", cert.number));
    page.line(
        "F1",
        10,
        &format!("Fecha de emisión: {}", cert.issued_on.format("%d/%m/%Y")),
    );
    page.rule();

    page.line("F2", 11, "AGENTE DE RETENCIÓN");
    page.labelled("Razón social", &cert.agent.name);
    page.labelled("RIF", &cert.agent.rif);
    page.labelled("Dirección fiscal", &cert.agent.address);
    page.rule();

    page.line("F2", 11, "SUJETO RETENIDO");
    page.labelled("Razón social", &cert.subject_name);
    page.labelled("RIF", &cert.subject_rif);
    if let Some(address) = cert.subject_address.as_deref().filter(|a| !a.is_empty()) {
        page.labelled("Dirección", address);
    }
    page.rule();

    page.line("F2", 11, "DETALLE DE LA RETENCIÓN");
    for (label, value) in &cert.lines {
        page.labelled(label, value);
    }
    page.rule();

    page.gap(60);
    page.line("F1", 10, "______________________________");
    page.line("F1", 9, "Firma y sello del agente de retención");

    page.finish()
}

/// Renders a certificate as PDF bytes.
pub fn render_pdf(cert: &Certificate) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(regular_id),
            "F2" => Object::Reference(bold_id),
        },
    });

    let content = layout(cert).encode()?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(&format!("{} {}", cert.title, cert.number))),
        "Producer" => Object::string_literal("retenciones"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(output)
}
