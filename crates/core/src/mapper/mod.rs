//! Field mapping: [`FieldRecord`] → [`Document`].
//!
//! Both layouts are pure functions of the record and the font variant. They never fail:
//! blank fields render as empty cells and unusable images fall back to placeholders.

mod certificate;
mod encounter;
pub mod labels;

use crate::model::{BaseFont, Cell, Document, Row, Table};
use crate::record::{FieldRecord, FontVariant, Layout};

/// Builds the document model for `record` in the given layout and variant.
pub fn map_record(record: &FieldRecord, layout: Layout, variant: FontVariant) -> Document {
    let base_font = BaseFont {
        family: labels::FONT_FAMILY.to_string(),
        half_points: variant.base_half_points(layout),
    };

    match layout {
        Layout::HealthCertificate => certificate::build(record, base_font),
        Layout::EncounterRecord => encounter::build(record, base_font),
    }
}

/// Header row: one shaded cell spanning the whole table.
fn header_row(text: &str, columns: usize, fill: &'static str) -> Row {
    Row::new(vec![Cell::text(text).spanning(columns).shaded(fill)])
}

fn label_row(label: &str, value: &str) -> Row {
    Row::new(vec![Cell::text(label), Cell::text(value)])
}

/// A bordered two-column table with a merged shaded header and `label: value` rows.
fn labelled_table(header: &str, fill: &'static str, rows: &[(&str, &str)]) -> Table {
    let mut out = vec![header_row(header, 2, fill)];
    out.extend(rows.iter().map(|(label, value)| label_row(label, value)));
    Table::grid(2, out)
}

/// A bordered one-column table: shaded header row, then one row per body text.
fn narrative_table(header: &str, fill: &'static str, body: &[String]) -> Table {
    let mut out = vec![header_row(header, 1, fill)];
    out.extend(body.iter().map(|text| Row::new(vec![Cell::text(text.as_str())])));
    Table::grid(1, out)
}

/// Non-blank trimmed lines of a newline-delimited field.
fn list_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// `base` followed by `  (თარიღი: <date>)`, or just `base` when the date is blank.
fn dated_header(base: &str, date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        base.to_string()
    } else {
        format!("{}  ({}: {})", base, labels::DATE_SUFFIX_LABEL, date)
    }
}

/// `value`, or `fallback` when `value` is blank.
fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_lines_drops_blank_lines() {
        assert_eq!(list_lines("CBC\n\nChest X-ray"), vec!["CBC", "Chest X-ray"]);
        assert_eq!(list_lines("  \n\t\n"), Vec::<&str>::new());
        assert_eq!(list_lines(" Aspirin 100mg \r\nOmeprazole"), vec!["Aspirin 100mg", "Omeprazole"]);
    }

    #[test]
    fn dated_header_omits_suffix_without_date() {
        assert_eq!(dated_header("Discharge", ""), "Discharge");
        assert_eq!(dated_header("Discharge", "   "), "Discharge");
        assert_eq!(
            dated_header("Discharge", "2024-03-01"),
            "Discharge  (თარიღი: 2024-03-01)"
        );
    }

    #[test]
    fn or_fallback_replaces_blank_only() {
        assert_eq!(or_fallback("", "-"), "-");
        assert_eq!(or_fallback(" ", "-"), "-");
        assert_eq!(or_fallback("A-12", "-"), "A-12");
    }

    #[test]
    fn labelled_table_shape() {
        let table = labelled_table("H", labels::FILL_BLUE, &[("a", "1"), ("b", "2")]);
        assert_eq!(table.columns, 2);
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows.iter().all(|r| r.grid_width() == 2));
        assert_eq!(table.rows[0].cells[0].shading, Some(labels::FILL_BLUE));
    }
}
