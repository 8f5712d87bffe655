//! Layout A: health-status certificate (form IV-100/a).

use super::labels::*;
use super::{labelled_table, narrative_table, or_fallback};
use crate::constants::{SIGNATURE_PLACEHOLDER, STAMP_PLACEHOLDER};
use crate::image::slot_image;
use crate::model::{
    Alignment, BaseFont, Cell, Document, InlineImage, Paragraph, Row, Table, TextRun,
};
use crate::record::FieldRecord;

/// Width of each image in the signature row.
const SIGNATURE_WIDTH_INCHES: f64 = 1.2;

pub(super) fn build(r: &FieldRecord, base_font: BaseFont) -> Document {
    let mut doc = Document::new(base_font);

    doc.paragraph(
        Paragraph::with_run(TextRun::plain(APPROVAL_NOTE).italic().size_pt(8))
            .aligned(Alignment::Right),
    );
    doc.paragraph(
        Paragraph::with_run(
            TextRun::plain(or_fallback(&r.form_type, DEFAULT_FORM_TYPE))
                .bold()
                .size_pt(11),
        )
        .aligned(Alignment::Center),
    );
    doc.paragraph(
        Paragraph::with_run(TextRun::plain(CERTIFICATE_TITLE).bold().size_pt(12))
            .aligned(Alignment::Center),
    );
    doc.paragraph(
        Paragraph::text(format!(
            "{}: {}     {}: {}",
            ISSUE_DATE_LABEL, r.document_date, CARD_NUMBER_LABEL, r.registration_number
        ))
        .aligned(Alignment::Center),
    );
    doc.paragraph(Paragraph::blank());

    let tables = [
        labelled_table(
            ISSUER_HEADER,
            FILL_BLUE,
            &[
                (ISSUER_NAME, r.facility_name.as_str()),
                (ISSUER_CODE, r.identification_code.as_str()),
                (ISSUER_ADDRESS, r.facility_address.as_str()),
            ],
        ),
        labelled_table(RECIPIENT_HEADER, FILL_BLUE, &[(RECIPIENT_NAME, r.recipient_name.as_str())]),
        labelled_table(
            PATIENT_HEADER,
            FILL_GREEN,
            &[
                (PATIENT_NAME, r.patient_name.as_str()),
                (PATIENT_BIRTH_DATE, r.birth_date.as_str()),
                (PATIENT_PERSONAL_ID, r.personal_id.as_str()),
                (PATIENT_ADDRESS, r.patient_address.as_str()),
                (PATIENT_OCCUPATION, r.occupation.as_str()),
            ],
        ),
        stay_table(r),
        labelled_table(
            DIAGNOSIS_HEADER,
            FILL_PEACH,
            &[
                (DIAGNOSIS_MAIN, r.main_diagnosis.as_str()),
                (DIAGNOSIS_REFINED, r.case_code.as_str()),
            ],
        ),
        narrative_table(PAST_DISEASES_HEADER, FILL_BLUE, &[r.past_diseases.clone()]),
        narrative_table(SHORT_HISTORY_HEADER, FILL_BLUE, &[r.anamnesis.clone()]),
        narrative_table(
            INVESTIGATIONS_HEADER,
            FILL_BLUE,
            &[
                format!("{}: {}", BLOOD_ANALYSIS, r.blood_analysis),
                format!("{}: {}", GLUCOSE_ANALYSIS, r.biochemistry),
                format!("{}: {}", INSTRUMENTAL, r.instrumental),
            ],
        ),
        narrative_table(COURSE_HEADER, FILL_BLUE, &[course_text(r)]),
        narrative_table(
            TREATMENT_HEADER,
            FILL_BLUE,
            &[format!(
                "{}:\n{}\n\n{}: {}",
                TREATMENT_MEDICATIONS, r.medications, TREATMENT_CODE, r.treatment_code
            )],
        ),
        labelled_table(
            OUTCOME_HEADER,
            FILL_GREEN,
            &[
                (OUTCOME_TRANSFER, r.transfer_to_hospital.as_str()),
                (OUTCOME_CONDITION, r.discharge_condition.as_str()),
                (OUTCOME_RECOMMENDATIONS, r.recommendations.as_str()),
            ],
        ),
        labelled_table(
            SIGNATORIES_HEADER,
            FILL_BLUE,
            &[
                (SIGNATORY_DOCTOR, r.attending_doctor.as_str()),
                (SIGNATORY_HEAD, r.facility_head.as_str()),
                (SIGNATORY_DATE, r.issue_date.as_str()),
            ],
        ),
    ];

    for table in tables {
        doc.table(table);
        doc.paragraph(Paragraph::blank());
    }

    doc.table(signature_table(r));
    doc
}

/// Admission and discharge dates share one row.
fn stay_table(r: &FieldRecord) -> Table {
    Table::grid(
        2,
        vec![
            super::header_row(STAY_HEADER, 2, FILL_BLUE),
            Row::new(vec![
                Cell::text(format!("{}: {}", STAY_ADMISSION, r.hospitalization_date)),
                Cell::text(format!("{}: {}", STAY_DISCHARGE, r.discharge_date)),
            ]),
        ],
    )
}

fn vitals_line(temp: &str, hr: &str, bp: &str, rr: &str, spo2: &str) -> String {
    format!(
        "{}: T-{}°C | HR-{} | BP-{} | RR-{} | SpO2-{}",
        COURSE_VITALS, temp, hr, bp, rr, spo2
    )
}

fn course_text(r: &FieldRecord) -> String {
    format!(
        "{}: {}\n\n{}: {}\n{}\n\n{}: {}\n{}",
        COURSE_TYPE,
        r.course_type,
        COURSE_ON_ADMISSION,
        r.admission_status,
        vitals_line(
            &r.admission_temp,
            &r.admission_hr,
            &r.admission_bp,
            &r.admission_rr,
            &r.admission_spo2
        ),
        COURSE_ON_DISCHARGE,
        r.discharge_status,
        vitals_line(
            &r.discharge_temp,
            &r.discharge_hr,
            &r.discharge_bp,
            &r.discharge_rr,
            &r.discharge_spo2
        ),
    )
}

/// Image cell for one signature slot, or its placeholder text.
fn image_cell(payload: &str, slot: &str, placeholder: &str) -> Cell {
    let paragraph = match slot_image(payload, slot) {
        Some(image) => Paragraph::image(InlineImage {
            image,
            width_inches: SIGNATURE_WIDTH_INCHES,
        }),
        None => Paragraph::text(placeholder),
    };
    Cell::from_paragraph(paragraph.aligned(Alignment::Center))
}

fn signature_table(r: &FieldRecord) -> Table {
    let labels = Row::new(
        [SIGNATURE_DOCTOR, SIGNATURE_STAMP, SIGNATURE_HEAD]
            .into_iter()
            .map(|label| Cell::text(label).aligned(Alignment::Center))
            .collect(),
    );
    let images = Row::new(vec![
        image_cell(&r.doctor_signature_image, "doctor signature", SIGNATURE_PLACEHOLDER),
        image_cell(&r.stamp_image, "stamp", STAMP_PLACEHOLDER),
        image_cell(&r.head_signature_image, "head signature", SIGNATURE_PLACEHOLDER),
    ]);

    Table {
        columns: 3,
        rows: vec![labels, images],
        bordered: false,
        alignment: Some(Alignment::Center),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::png_data_uri;
    use crate::mapper::map_record;
    use crate::model::Block;
    use crate::record::{FontVariant, Layout};
    use serde_json::json;

    /// (columns, rows) of every table, in document order.
    const SHAPE: [(usize, usize); 13] = [
        (2, 4),
        (2, 2),
        (2, 6),
        (2, 2),
        (2, 3),
        (1, 2),
        (1, 2),
        (1, 4),
        (1, 2),
        (1, 2),
        (2, 4),
        (2, 4),
        (3, 2),
    ];

    fn certificate(value: serde_json::Value) -> Document {
        map_record(
            &FieldRecord::from_value(&value),
            Layout::HealthCertificate,
            FontVariant::Archive,
        )
    }

    fn assert_fixed_shape(doc: &Document) {
        let tables: Vec<&Table> = doc.tables().collect();
        assert_eq!(tables.len(), SHAPE.len());
        for (table, (columns, rows)) in tables.iter().zip(SHAPE) {
            assert_eq!(table.columns, columns);
            assert_eq!(table.rows.len(), rows);
            assert!(table.rows.iter().all(|r| r.grid_width() == columns));
        }
    }

    #[test]
    fn shape_is_fixed_regardless_of_input() {
        assert_fixed_shape(&certificate(json!({})));
        assert_fixed_shape(&certificate(json!({
            "patient_name": "Test Patient",
            "medications": "a\nb\nc",
            "doctor_signature_image": png_data_uri(),
            "unknown": 1
        })));
    }

    #[test]
    fn patient_and_diagnosis_rows_are_filled() {
        let doc = certificate(json!({"patient_name": "Test Patient", "main_diagnosis": "J18"}));
        let tables: Vec<&Table> = doc.tables().collect();

        let patient = tables[2];
        assert_eq!(patient.text_at(1, 0).as_deref(), Some(PATIENT_NAME));
        assert_eq!(patient.text_at(1, 1).as_deref(), Some("Test Patient"));
        for row in 2..6 {
            assert_eq!(patient.text_at(row, 1).as_deref(), Some(""));
        }

        let diagnosis = tables[4];
        assert_eq!(diagnosis.text_at(1, 1).as_deref(), Some("J18"));
        assert_eq!(diagnosis.text_at(2, 1).as_deref(), Some(""));

        for table in [tables[0], tables[1], tables[10], tables[11]] {
            for row in 1..table.rows.len() {
                assert_eq!(table.text_at(row, 1).as_deref(), Some(""));
            }
        }
    }

    #[test]
    fn headers_are_merged_and_shaded() {
        let doc = certificate(json!({}));
        let tables: Vec<&Table> = doc.tables().collect();

        assert_eq!(tables[0].rows[0].cells.len(), 1);
        assert_eq!(tables[0].rows[0].cells[0].span, 2);
        assert_eq!(tables[2].rows[0].cells[0].shading, Some(FILL_GREEN));
        assert_eq!(tables[4].rows[0].cells[0].shading, Some(FILL_PEACH));
        assert!(!tables[12].bordered);
    }

    #[test]
    fn missing_images_render_placeholders() {
        let doc = certificate(json!({"stamp_image": "not a data uri"}));
        let signatures = doc.tables().last().unwrap();

        assert_eq!(signatures.text_at(1, 0).as_deref(), Some(SIGNATURE_PLACEHOLDER));
        assert_eq!(signatures.text_at(1, 1).as_deref(), Some(STAMP_PLACEHOLDER));
        assert_eq!(signatures.text_at(1, 2).as_deref(), Some(SIGNATURE_PLACEHOLDER));
        assert!(doc.images().is_empty());
    }

    #[test]
    fn malformed_base64_degrades_to_placeholder() {
        let doc = certificate(json!({
            "doctor_signature_image": "data:image/png;base64,###",
            "head_signature_image": png_data_uri()
        }));
        let signatures = doc.tables().last().unwrap();

        assert_eq!(signatures.text_at(1, 0).as_deref(), Some(SIGNATURE_PLACEHOLDER));
        assert_eq!(signatures.text_at(1, 2).as_deref(), Some(""));
        let images = doc.images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].width_inches, SIGNATURE_WIDTH_INCHES);
    }

    #[test]
    fn font_variants_only_change_base_size() {
        let record = FieldRecord::from_value(&json!({"patient_name": "Nino"}));
        let archive = map_record(&record, Layout::HealthCertificate, FontVariant::Archive);
        let print = map_record(&record, Layout::HealthCertificate, FontVariant::Print);

        assert_eq!(archive.base_font.half_points, 22);
        assert_eq!(print.base_font.half_points, 20);
        assert_eq!(archive.blocks, print.blocks);
    }

    #[test]
    fn blank_form_type_uses_standard_caption() {
        let doc = certificate(json!({"form_type": "  "}));
        let caption = doc.paragraphs().nth(1).unwrap().plain_text();
        assert_eq!(caption, DEFAULT_FORM_TYPE);
        assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn course_text_contains_vitals() {
        let doc = certificate(json!({"admission_temp": 38.2, "discharge_hr": "80"}));
        let course = doc.tables().nth(8).unwrap();
        let text = course.text_at(1, 0).unwrap();

        assert!(text.contains("T-38.2°C"));
        assert!(text.contains("HR-80"));
    }
}
