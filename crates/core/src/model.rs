//! Format-agnostic document model.
//!
//! The mappers build a [`Document`] and the DOCX writer serialises it. The model only
//! records what the two layouts need: styled text runs, inline images, fixed grids with
//! shading and horizontal merges, and page breaks.

use crate::image::DecodedImage;

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Paragraph style applied from the style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    ListBullet,
}

/// Page geometry, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width_cm: f64,
    pub height_cm: f64,
    pub margin_top_cm: f64,
    pub margin_bottom_cm: f64,
    pub margin_left_cm: f64,
    pub margin_right_cm: f64,
}

impl PageSetup {
    /// A4 portrait with the margins both layouts use.
    pub fn a4_form() -> Self {
        Self {
            width_cm: 21.0,
            height_cm: 29.7,
            margin_top_cm: 1.0,
            margin_bottom_cm: 1.0,
            margin_left_cm: 1.5,
            margin_right_cm: 1.0,
        }
    }
}

/// Default font of the `Normal` style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFont {
    pub family: String,
    /// Size in half-points (22 = 11pt).
    pub half_points: u32,
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Overrides the base size; half-points.
    pub half_points: Option<u32>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size_pt(mut self, points: u32) -> Self {
        self.half_points = Some(points * 2);
        self
    }
}

/// An image placed inline in the text flow, scaled to a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub image: DecodedImage,
    pub width_inches: f64,
}

impl InlineImage {
    /// Display height in inches, keeping the pixel aspect ratio.
    pub fn height_inches(&self) -> f64 {
        if self.image.width_px == 0 {
            return self.width_inches;
        }
        self.width_inches * f64::from(self.image.height_px) / f64::from(self.image.width_px)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(TextRun),
    Image(InlineImage),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub alignment: Alignment,
    pub style: ParagraphStyle,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// An empty spacer paragraph.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_run(TextRun::plain(text))
    }

    pub fn with_run(run: TextRun) -> Self {
        Self {
            runs: vec![Run::Text(run)],
            ..Self::default()
        }
    }

    pub fn image(image: InlineImage) -> Self {
        Self {
            runs: vec![Run::Image(image)],
            ..Self::default()
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            style: ParagraphStyle::ListBullet,
            ..Self::text(text)
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn push(mut self, run: TextRun) -> Self {
        self.runs.push(Run::Text(run));
        self
    }

    /// Concatenated text of all text runs.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|r| match r {
                Run::Text(t) => Some(t.text.as_str()),
                Run::Image(_) => None,
            })
            .collect()
    }

    pub fn images(&self) -> impl Iterator<Item = &InlineImage> {
        self.runs.iter().filter_map(|r| match r {
            Run::Image(i) => Some(i),
            Run::Text(_) => None,
        })
    }
}

/// A table cell. A cell with `span > 1` covers that many grid columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
    /// Background fill as an RGB hex string such as `D9E2F3`.
    pub shading: Option<&'static str>,
    pub span: usize,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_paragraph(Paragraph::text(text))
    }

    pub fn from_paragraph(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
            shading: None,
            span: 1,
        }
    }

    pub fn shaded(mut self, fill: &'static str) -> Self {
        self.shading = Some(fill);
        self
    }

    pub fn spanning(mut self, columns: usize) -> Self {
        self.span = columns.max(1);
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        for p in &mut self.paragraphs {
            p.alignment = alignment;
        }
        self
    }

    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Number of grid columns this row covers.
    pub fn grid_width(&self) -> usize {
        self.cells.iter().map(|c| c.span).sum()
    }

    /// The cell covering grid column `column`, if any.
    pub fn cell_at(&self, column: usize) -> Option<&Cell> {
        let mut start = 0;
        for cell in &self.cells {
            if column < start + cell.span {
                return Some(cell);
            }
            start += cell.span;
        }
        None
    }
}

/// A fixed rows × columns grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: usize,
    pub rows: Vec<Row>,
    /// Draw the `TableGrid` borders.
    pub bordered: bool,
    /// Horizontal placement of the whole table; `None` leaves the default.
    pub alignment: Option<Alignment>,
}

impl Table {
    pub fn grid(columns: usize, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            bordered: true,
            alignment: None,
        }
    }

    /// Text of the cell covering (`row`, `column`), if the position exists.
    pub fn text_at(&self, row: usize, column: usize) -> Option<String> {
        self.rows.get(row)?.cell_at(column).map(Cell::plain_text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSetup,
    pub base_font: BaseFont,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(base_font: BaseFont) -> Self {
        Self {
            page: PageSetup::a4_form(),
            base_font,
            blocks: Vec::new(),
        }
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Every inline image in the document, in reading order, including table cells.
    pub fn images(&self) -> Vec<&InlineImage> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => out.extend(p.images()),
                Block::Table(t) => {
                    for row in &t.rows {
                        for cell in &row.cells {
                            for p in &cell.paragraphs {
                                out.extend(p.images());
                            }
                        }
                    }
                }
                Block::PageBreak => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_header_covers_both_columns() {
        let row = Row::new(vec![Cell::text("Header").spanning(2)]);

        assert_eq!(row.grid_width(), 2);
        assert_eq!(row.cell_at(1).map(Cell::plain_text).as_deref(), Some("Header"));
        assert!(row.cell_at(2).is_none());
    }

    #[test]
    fn table_text_lookup() {
        let table = Table::grid(
            2,
            vec![
                Row::new(vec![Cell::text("H").spanning(2)]),
                Row::new(vec![Cell::text("label"), Cell::text("value")]),
            ],
        );

        assert_eq!(table.text_at(1, 1).as_deref(), Some("value"));
        assert_eq!(table.text_at(0, 1).as_deref(), Some("H"));
        assert!(table.text_at(2, 0).is_none());
    }

    #[test]
    fn paragraph_plain_text_joins_runs() {
        let p = Paragraph::with_run(TextRun::plain("Allergies: ").bold()).push(TextRun::plain("none"));
        assert_eq!(p.plain_text(), "Allergies: none");
    }
}
