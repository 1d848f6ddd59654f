//! Word renderer: layout blocks → .docx bytes via docx-rs.

use anyhow::{anyhow, Result};
use docx_rs::{
    AlignmentType, Docx, LineSpacing, PageMargin, Paragraph, Run, SpecialIndentType, Tab,
    TabValueType,
};

use crate::export::layout::Block;

/// Body text runs at 9.5pt, the centered name at 13pt (docx sizes are in
/// half-points).
const BODY_SIZE: usize = 19;
const NAME_SIZE: usize = 26;
/// 2.5 cm page margins in twips.
const MARGIN_TWIPS: i32 = 1440;
/// Right tab stop at the text-area edge.
const RIGHT_TAB_POS: usize = 9026;

pub fn render_docx(blocks: &[Block]) -> Result<Vec<u8>> {
    let mut docx = Docx::new().page_margin(
        PageMargin::new()
            .top(MARGIN_TWIPS)
            .bottom(MARGIN_TWIPS)
            .left(MARGIN_TWIPS)
            .right(MARGIN_TWIPS),
    );

    for block in blocks {
        docx = docx.add_paragraph(paragraph_for(block));
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| anyhow!("failed to pack docx: {e}"))?;
    Ok(cursor.into_inner())
}

fn paragraph_for(block: &Block) -> Paragraph {
    match block {
        Block::SectionHeading(text) => Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(text.as_str())
                    .bold()
                    .underline("single")
                    .size(BODY_SIZE),
            )
            .line_spacing(LineSpacing::new().before(400)),
        Block::CenteredLine { text, bold, large } => {
            let mut run = Run::new().add_text(text.as_str()).size(if *large {
                NAME_SIZE
            } else {
                BODY_SIZE
            });
            if *bold {
                run = run.bold();
            }
            Paragraph::new()
                .add_run(run)
                .align(AlignmentType::Center)
                .line_spacing(LineSpacing::new().after(100))
        }
        Block::SplitLine {
            left,
            right,
            left_bold,
            right_bold,
        } => {
            let mut left_run = Run::new().add_text(left.as_str()).size(BODY_SIZE);
            if *left_bold {
                left_run = left_run.bold();
            }
            let mut right_run = Run::new().add_tab().add_text(right.as_str()).size(BODY_SIZE);
            if *right_bold {
                right_run = right_run.bold();
            }
            Paragraph::new()
                .add_tab(Tab::new().val(TabValueType::Right).pos(RIGHT_TAB_POS))
                .add_run(left_run)
                .add_run(right_run)
                .align(AlignmentType::Left)
                .line_spacing(LineSpacing::new().after(100))
        }
        Block::Plain(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()).size(BODY_SIZE))
            .line_spacing(LineSpacing::new().after(100)),
        Block::Bullet(text) => Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(format!("• {text}"))
                    .size(BODY_SIZE),
            )
            .align(AlignmentType::Left)
            .indent(Some(400), Some(SpecialIndentType::Hanging(120)), None, None)
            .line_spacing(LineSpacing::new().after(50)),
        Block::Gap => Paragraph::new().line_spacing(LineSpacing::new().after(150)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_zip_container() {
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
            Block::Gap,
        ];
        let bytes = render_docx(&blocks).expect("render should succeed");
        // .docx is a ZIP archive; check the local-file-header magic.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_block_list_still_renders() {
        let bytes = render_docx(&[]).expect("render should succeed");
        assert!(!bytes.is_empty());
    }
}
