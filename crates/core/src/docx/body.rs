//! `word/document.xml` rendering.

use super::xml::{escape, DECLARATION};
use crate::constants::{EMU_PER_INCH, TWIPS_PER_CM};
use crate::model::{
    Alignment, Block, Cell, Document, InlineImage, PageSetup, Paragraph, ParagraphStyle, Run,
    Table, TextRun,
};

/// Relationship ids below this value are reserved for the fixed parts.
pub(super) const FIRST_MEDIA_REL: usize = 10;

/// An image part referenced from the body.
pub(super) struct Media<'a> {
    pub rel_id: String,
    pub file_name: String,
    pub bytes: &'a [u8],
}

pub(super) struct BodyWriter<'a> {
    out: String,
    media: Vec<Media<'a>>,
    text_width_twips: u32,
}

fn twips(cm: f64) -> u32 {
    (cm * TWIPS_PER_CM).round() as u32
}

fn emu(inches: f64) -> u64 {
    (inches * EMU_PER_INCH as f64).round() as u64
}

fn jc(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

impl<'a> BodyWriter<'a> {
    pub(super) fn render(doc: &'a Document) -> (String, Vec<Media<'a>>) {
        let page = &doc.page;
        let mut writer = BodyWriter {
            out: String::new(),
            media: Vec::new(),
            text_width_twips: twips(page.width_cm - page.margin_left_cm - page.margin_right_cm),
        };

        writer.out.push_str(DECLARATION);
        writer.out.push_str(concat!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
            r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#,
            r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing""#,
            r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#,
            r#" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            "<w:body>"
        ));

        for block in &doc.blocks {
            match block {
                Block::Paragraph(p) => writer.paragraph(p),
                Block::Table(t) => writer.table(t),
                Block::PageBreak => writer
                    .out
                    .push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
            }
        }

        writer.section(page);
        writer.out.push_str("</w:body></w:document>");
        (writer.out, writer.media)
    }

    fn section(&mut self, page: &PageSetup) {
        self.out.push_str(&format!(
            concat!(
                r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/>"#,
                r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/>"#,
                "</w:sectPr>"
            ),
            twips(page.width_cm),
            twips(page.height_cm),
            twips(page.margin_top_cm),
            twips(page.margin_right_cm),
            twips(page.margin_bottom_cm),
            twips(page.margin_left_cm),
        ));
    }

    fn paragraph(&mut self, p: &'a Paragraph) {
        self.out.push_str("<w:p>");
        let style = match p.style {
            ParagraphStyle::Normal => None,
            ParagraphStyle::ListBullet => Some("ListBullet"),
        };
        let align = jc(p.alignment);
        if style.is_some() || align.is_some() {
            self.out.push_str("<w:pPr>");
            if let Some(style) = style {
                self.out.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
            }
            if let Some(align) = align {
                self.out.push_str(&format!(r#"<w:jc w:val="{align}"/>"#));
            }
            self.out.push_str("</w:pPr>");
        }
        for run in &p.runs {
            match run {
                Run::Text(t) => self.text_run(t),
                Run::Image(i) => self.image_run(i),
            }
        }
        self.out.push_str("</w:p>");
    }

    fn text_run(&mut self, run: &TextRun) {
        self.out.push_str("<w:r>");
        if run.bold || run.italic || run.half_points.is_some() {
            self.out.push_str("<w:rPr>");
            if run.bold {
                self.out.push_str("<w:b/><w:bCs/>");
            }
            if run.italic {
                self.out.push_str("<w:i/><w:iCs/>");
            }
            if let Some(size) = run.half_points {
                self.out
                    .push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
            }
            self.out.push_str("</w:rPr>");
        }
        for (i, line) in run.text.split('\n').enumerate() {
            if i > 0 {
                self.out.push_str("<w:br/>");
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                self.out.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape(line)
                ));
            }
        }
        self.out.push_str("</w:r>");
    }

    fn image_run(&mut self, image: &'a InlineImage) {
        let n = self.media.len() + 1;
        let rel_id = format!("rId{}", FIRST_MEDIA_REL + self.media.len());
        let file_name = format!("image{}.{}", n, image.image.format.extension());
        let cx = emu(image.width_inches);
        let cy = emu(image.height_inches());

        self.out.push_str(&format!(
            concat!(
                r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{n}" name="Picture {n}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{n}" name="{file}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
                "</a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"
            ),
            cx = cx,
            cy = cy,
            n = n,
            file = file_name,
            rel = rel_id,
        ));

        self.media.push(Media {
            rel_id,
            file_name,
            bytes: &image.image.bytes,
        });
    }

    fn table(&mut self, table: &'a Table) {
        let columns = table.columns.max(1);
        let col_width = self.text_width_twips / columns as u32;

        self.out.push_str("<w:tbl><w:tblPr>");
        if table.bordered {
            self.out.push_str(r#"<w:tblStyle w:val="TableGrid"/>"#);
        }
        self.out.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        if let Some(align) = table.alignment.and_then(jc) {
            self.out.push_str(&format!(r#"<w:jc w:val="{align}"/>"#));
        }
        self.out
            .push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
        self.out.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            self.out.push_str(&format!(r#"<w:gridCol w:w="{col_width}"/>"#));
        }
        self.out.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.out.push_str("<w:tr>");
            for cell in &row.cells {
                self.cell(cell, col_width);
            }
            self.out.push_str("</w:tr>");
        }
        self.out.push_str("</w:tbl>");
    }

    fn cell(&mut self, cell: &'a Cell, col_width: u32) {
        self.out.push_str(&format!(
            r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/>"#,
            col_width * cell.span as u32
        ));
        if cell.span > 1 {
            self.out
                .push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, cell.span));
        }
        if let Some(fill) = cell.shading {
            self.out.push_str(&format!(
                r#"<w:shd w:val="clear" w:color="auto" w:fill="{fill}"/>"#
            ));
        }
        self.out.push_str("</w:tcPr>");

        // A cell must contain at least one paragraph.
        if cell.paragraphs.is_empty() {
            self.out.push_str("<w:p/>");
        }
        for p in &cell.paragraphs {
            self.paragraph(p);
        }
        self.out.push_str("</w:tc>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::decode_data_uri;
    use crate::image::tests::png_data_uri;
    use crate::model::{BaseFont, Row};

    fn doc() -> Document {
        Document::new(BaseFont {
            family: "Sylfaen".into(),
            half_points: 20,
        })
    }

    #[test]
    fn newlines_become_breaks() {
        let mut d = doc();
        d.paragraph(Paragraph::text("one\ntwo"));
        let (xml, _) = BodyWriter::render(&d);

        assert!(xml.contains(
            r#"<w:t xml:space="preserve">one</w:t><w:br/><w:t xml:space="preserve">two</w:t>"#
        ));
    }

    #[test]
    fn merged_shaded_header_cell() {
        let mut d = doc();
        d.table(Table::grid(
            2,
            vec![Row::new(vec![Cell::text("H").spanning(2).shaded("D9E2F3")])],
        ));
        let (xml, _) = BodyWriter::render(&d);

        assert!(xml.contains(r#"<w:gridSpan w:val="2"/>"#));
        assert!(xml.contains(r#"w:fill="D9E2F3""#));
        assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        assert_eq!(xml.matches("<w:gridCol ").count(), 2);
    }

    #[test]
    fn images_are_registered_as_media() {
        let image = decode_data_uri(&png_data_uri()).unwrap();
        let mut d = doc();
        d.paragraph(Paragraph::image(InlineImage {
            image,
            width_inches: 1.0,
        }));
        let (xml, media) = BodyWriter::render(&d);

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].file_name, "image1.png");
        assert!(xml.contains(r#"r:embed="rId10""#));
        assert!(xml.contains(r#"cx="914400" cy="914400""#));
    }

    #[test]
    fn a4_section_properties() {
        let (xml, _) = BodyWriter::render(&doc());
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        assert!(xml.contains(r#"w:left="850""#));
        assert!(xml.contains(r#"w:top="567""#));
    }
}
