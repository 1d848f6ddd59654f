//! PDF renderer: layout blocks → PDF bytes via printpdf.
//!
//! Built-in Helvetica fonts, fixed margins, explicit font/size calls and a
//! manually advanced vertical cursor with page breaks. Right-column text is
//! placed using the static width table in `metrics`.

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::export::layout::Block;
use crate::export::metrics::text_width_pt;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 25.0;

const BODY_PT: f32 = 9.5;
const NAME_PT: f32 = 13.0;
const HEADING_PT: f32 = 11.0;
const BULLET_INDENT_MM: f32 = 6.0;

const PT_TO_MM: f32 = 0.352_778;

struct PdfCursor {
    doc: printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y_mm: f32,
}

impl PdfCursor {
    fn advance(&mut self, line_height_mm: f32) {
        self.y_mm -= line_height_mm;
        if self.y_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    fn text_at(&self, text: &str, x_mm: f32, size_pt: f32, bold: bool) {
        self.layer
            .use_text(text, size_pt, Mm(x_mm), Mm(self.y_mm), self.font(bold));
    }
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.45
}

pub fn render_pdf(blocks: &[Block]) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "CV",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("failed to load Helvetica: {e}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("failed to load Helvetica-Bold: {e}"))?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut cursor = PdfCursor {
        doc,
        layer,
        regular,
        bold,
        y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    for block in blocks {
        draw_block(&mut cursor, block);
    }

    cursor
        .doc
        .save_to_bytes()
        .map_err(|e| anyhow!("failed to serialize PDF: {e}"))
}

fn draw_block(cursor: &mut PdfCursor, block: &Block) {
    let right_edge_mm = PAGE_WIDTH_MM - MARGIN_MM;
    match block {
        Block::SectionHeading(text) => {
            cursor.advance(line_height_mm(HEADING_PT) * 1.4);
            cursor.text_at(text, MARGIN_MM, HEADING_PT, true);
        }
        Block::CenteredLine { text, bold, large } => {
            let size = if *large { NAME_PT } else { BODY_PT };
            cursor.advance(line_height_mm(size));
            let width_mm = text_width_pt(text, size, *bold) * PT_TO_MM;
            let x = (PAGE_WIDTH_MM - width_mm) / 2.0;
            cursor.text_at(text, x.max(MARGIN_MM), size, *bold);
        }
        Block::SplitLine {
            left,
            right,
            left_bold,
            right_bold,
        } => {
            cursor.advance(line_height_mm(BODY_PT));
            cursor.text_at(left, MARGIN_MM, BODY_PT, *left_bold);
            if !right.is_empty() {
                let width_mm = text_width_pt(right, BODY_PT, *right_bold) * PT_TO_MM;
                cursor.text_at(right, right_edge_mm - width_mm, BODY_PT, *right_bold);
            }
        }
        Block::Plain(text) => {
            cursor.advance(line_height_mm(BODY_PT));
            cursor.text_at(text, MARGIN_MM, BODY_PT, false);
        }
        Block::Bullet(text) => {
            cursor.advance(line_height_mm(BODY_PT));
            cursor.text_at(&format!("• {text}"), MARGIN_MM + BULLET_INDENT_MM, BODY_PT, false);
        }
        Block::Gap => {
            cursor.advance(line_height_mm(BODY_PT) * 0.6);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_pdf_document() {
        let blocks = vec![
            Block::CenteredLine {
                text: "JIANG, Yanze Robert".into(),
                bold: true,
                large: true,
            },
            Block::SectionHeading("EDUCATION".into()),
            Block::SplitLine {
                left: "CUHK".into(),
                right: "Hong Kong".into(),
                left_bold: true,
                right_bold: true,
            },
            Block::Bullet("GPA: 3.83/4.00".into()),
        ];
        let bytes = render_pdf(&blocks).expect("render should succeed");
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn long_documents_paginate() {
        let mut blocks = Vec::new();
        for i in 0..200 {
            blocks.push(Block::Bullet(format!("Line {i}")));
        }
        let bytes = render_pdf(&blocks).expect("render should succeed");
        assert_eq!(&bytes[..5], b"%PDF-");
    }
}
