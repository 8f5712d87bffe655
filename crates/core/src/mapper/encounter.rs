//! Layout B: clinical encounter record.
//!
//! Page one holds the admission findings; page two is the progress log with orders and
//! the signed discharge note.

use super::labels::*;
use super::{dated_header, header_row, labelled_table, list_lines, narrative_table, or_fallback};
use crate::image::slot_image;
use crate::model::{
    Alignment, BaseFont, Cell, Document, InlineImage, Paragraph, Row, Table, TextRun,
};
use crate::record::FieldRecord;

const SIGNATURE_WIDTH_INCHES: f64 = 1.0;

pub(super) fn build(r: &FieldRecord, base_font: BaseFont) -> Document {
    let mut doc = Document::new(base_font);
    admission_page(&mut doc, r);
    doc.page_break();
    progress_log_page(&mut doc, r);
    doc
}

fn admission_page(doc: &mut Document, r: &FieldRecord) {
    doc.paragraph(centered_heading(or_fallback(&r.facility_name, DEFAULT_FACILITY), 14));
    doc.paragraph(Paragraph::text(or_fallback(&r.department, DEFAULT_DEPARTMENT)).aligned(Alignment::Center));
    doc.paragraph(Paragraph::blank());

    doc.table(labelled_table(
        PATIENT_HEADER,
        FILL_GREEN,
        &[
            (ENCOUNTER_CARD_NUMBER, or_fallback(&r.card_number, MISSING_VALUE)),
            (ENCOUNTER_PATIENT_NAME, or_fallback(&r.patient_name, MISSING_VALUE)),
            (
                ENCOUNTER_ADMISSION_STATUS,
                or_fallback(&r.admission_status, DEFAULT_ADMISSION_STATUS),
            ),
        ],
    ));
    doc.paragraph(Paragraph::blank());

    doc.table(Table::grid(
        2,
        vec![
            header_row(ICD_HEADER, 2, FILL_PEACH),
            Row::new(vec![
                Cell::text(format!("{}: {}", ICD_CASE_PREFIX, r.icd_code)),
                Cell::text(r.diagnosis_description.as_str()),
            ]),
        ],
    ));
    doc.paragraph(Paragraph::blank());

    doc.table(narrative_table(COMPLAINTS_HEADER, FILL_BLUE, &[r.complaints.clone()]));
    doc.paragraph(Paragraph::blank());
    doc.table(narrative_table(HISTORY_HEADER, FILL_BLUE, &[r.anamnesis.clone()]));
    doc.paragraph(Paragraph::blank());

    doc.paragraph(labelled_line(ALLERGIES_LABEL, or_fallback(&r.allergies, DEFAULT_ALLERGIES)));
    doc.paragraph(Paragraph::blank());

    doc.paragraph(centered_heading(OBJECTIVE_STATUS_HEADING, 12));
    doc.table(vitals_table(r));
    doc.paragraph(Paragraph::blank());
    doc.table(organ_systems_table(r));
    doc.paragraph(Paragraph::blank());

    doc.paragraph(labelled_line(PRELIMINARY_DIAGNOSIS_LABEL, &r.preliminary_diagnosis));
    doc.paragraph(labelled_line(ATTENDING_DOCTOR_LABEL, &r.doctor));
}

fn progress_log_page(doc: &mut Document, r: &FieldRecord) {
    doc.paragraph(centered_heading(PROGRESS_LOG_HEADING, 14));
    doc.paragraph(Paragraph::blank());

    doc.table(narrative_table(
        &dated_header(INITIAL_ASSESSMENT_HEADER, &r.initial_date),
        FILL_BLUE,
        &[r.initial_narrative.clone()],
    ));
    doc.paragraph(Paragraph::blank());
    doc.paragraph(labelled_line(PRELIMINARY_DIAGNOSIS_LABEL, &r.initial_diagnosis));
    doc.paragraph(Paragraph::blank());

    doc.paragraph(Paragraph::with_run(TextRun::plain(ORDERS_HEADING).bold().size_pt(11)));
    bullet_list(doc, ORDERED_INVESTIGATIONS, &r.investigations);
    bullet_list(doc, ORDERED_MEDICATIONS, &r.medications);
    doc.paragraph(Paragraph::blank());

    doc.paragraph(doctor_line(&r.doctor_signature));
    if let Some(p) = signature_paragraph(&r.doctor_signature_image, "doctor signature") {
        doc.paragraph(p);
    }
    doc.paragraph(Paragraph::blank());
    doc.paragraph(Paragraph::blank());

    doc.table(narrative_table(
        &dated_header(DISCHARGE_HEADER, &r.discharge_note_date),
        FILL_GREEN,
        &[r.discharge_narrative.clone()],
    ));
    doc.paragraph(Paragraph::blank());

    doc.paragraph(doctor_line(&r.discharge_doctor));
    if let Some(p) = signature_paragraph(&r.discharge_signature_image, "discharge signature") {
        doc.paragraph(p);
    }
}

fn centered_heading(text: &str, points: u32) -> Paragraph {
    Paragraph::with_run(TextRun::plain(text).bold().size_pt(points)).aligned(Alignment::Center)
}

/// Bold label run followed by a plain value run.
fn labelled_line(label: &str, value: &str) -> Paragraph {
    Paragraph::with_run(TextRun::plain(label).bold()).push(TextRun::plain(value))
}

fn doctor_line(name: &str) -> Paragraph {
    Paragraph::text(format!("{}: {}", DOCTOR_LINE_LABEL, name)).aligned(Alignment::Right)
}

/// Italic caption, then one bullet per non-blank line of `text`.
fn bullet_list(doc: &mut Document, caption: &str, text: &str) {
    doc.paragraph(Paragraph::with_run(TextRun::plain(caption).italic()));
    for line in list_lines(text) {
        doc.paragraph(Paragraph::bullet(line));
    }
}

fn signature_paragraph(payload: &str, slot: &str) -> Option<Paragraph> {
    let image = slot_image(payload, slot)?;
    Some(
        Paragraph::image(InlineImage {
            image,
            width_inches: SIGNATURE_WIDTH_INCHES,
        })
        .aligned(Alignment::Right),
    )
}

fn vitals_table(r: &FieldRecord) -> Table {
    let headers = VITALS
        .into_iter()
        .map(|h| Cell::text(h).shaded(FILL_GREY).aligned(Alignment::Center))
        .collect();
    let values = [
        &r.temperature,
        &r.blood_pressure,
        &r.heart_rate,
        &r.respiratory_rate,
        &r.spo2,
    ]
    .into_iter()
    .map(|v| Cell::text(v.as_str()).aligned(Alignment::Center))
    .collect();

    Table::grid(5, vec![Row::new(headers), Row::new(values)])
}

fn organ_systems_table(r: &FieldRecord) -> Table {
    let values = [
        &r.general_condition,
        &r.skin,
        &r.edema,
        &r.cardiovascular,
        &r.respiratory,
        &r.digestive,
        &r.urinary,
        &r.neurological,
        &r.musculoskeletal,
    ];
    let rows = ORGAN_SYSTEMS
        .into_iter()
        .zip(values)
        .map(|(label, value)| {
            Row::new(vec![
                Cell::text(label).shaded(FILL_LIGHT_GREY),
                Cell::text(value.as_str()),
            ])
        })
        .collect();

    Table::grid(2, rows)
}
