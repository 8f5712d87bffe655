//! Typed field record and document-type selection.
//!
//! The browser form posts one flat JSON object per document. [`FieldRecord`] turns that
//! object into a struct with one `String` per known key so the mappers never perform a
//! fallible lookup: absent keys, `null` and non-scalar values all become `""`, numbers and
//! booleans keep their JSON text, unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag the front end sends for the health-status certificate.
pub const HEALTH_CERTIFICATE_TAG: &str = "form_100";

/// Tag used for the clinical encounter record.
pub const ENCOUNTER_RECORD_TAG: &str = "medical_record";

/// One of the two supported document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Layout A: health-status certificate (form IV-100/a).
    HealthCertificate,
    /// Layout B: clinical encounter record with a progress log page.
    EncounterRecord,
}

impl Layout {
    /// Selects the layout for a front-end `document_type` tag.
    ///
    /// `"form_100"`, a blank tag or no tag selects the certificate; any other value
    /// selects the encounter record.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            None | Some("") | Some(HEALTH_CERTIFICATE_TAG) => Layout::HealthCertificate,
            Some(_) => Layout::EncounterRecord,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Layout::HealthCertificate => HEALTH_CERTIFICATE_TAG,
            Layout::EncounterRecord => ENCOUNTER_RECORD_TAG,
        }
    }
}

/// Presentation variant of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontVariant {
    /// Copies saved to the archive.
    Archive,
    /// Copies produced for printing.
    Print,
}

impl FontVariant {
    /// Base font size in half-points for `layout`.
    ///
    /// Only the certificate distinguishes the two variants (11pt archive, 10pt print);
    /// the encounter record is always 10pt.
    pub fn base_half_points(&self, layout: Layout) -> u32 {
        match (layout, self) {
            (Layout::HealthCertificate, FontVariant::Archive) => 22,
            _ => 20,
        }
    }
}

/// Renders one JSON value as field text.
fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

macro_rules! field_record {
    ($( $(#[$doc:meta])* $name:ident ),* $(,)?) => {
        /// Every field a layout can read. All fields default to the empty string.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
        pub struct FieldRecord {
            $( $(#[$doc])* pub $name: String, )*
        }

        impl FieldRecord {
            /// Names of all known fields, in declaration order.
            pub const FIELD_NAMES: &'static [&'static str] = &[$( stringify!($name) ),*];

            /// Builds a record from a JSON object. Total: never fails.
            pub fn from_map(map: &Map<String, Value>) -> Self {
                Self {
                    $( $name: value_text(map.get(stringify!($name))), )*
                }
            }
        }
    };
}

field_record! {
    // Certificate header
    form_type,
    document_date,
    registration_number,
    // Issuer / recipient
    facility_name,
    identification_code,
    facility_address,
    recipient_name,
    // Patient identity
    patient_name,
    birth_date,
    personal_id,
    patient_address,
    occupation,
    // Hospitalisation
    hospitalization_date,
    discharge_date,
    // Diagnosis
    main_diagnosis,
    case_code,
    past_diseases,
    anamnesis,
    // Investigations
    blood_analysis,
    biochemistry,
    instrumental,
    // Clinical course
    course_type,
    admission_status,
    admission_temp,
    admission_hr,
    admission_bp,
    admission_rr,
    admission_spo2,
    discharge_status,
    discharge_temp,
    discharge_hr,
    discharge_bp,
    discharge_rr,
    discharge_spo2,
    // Treatment and outcome
    /// Newline-delimited; the encounter record renders one bullet per non-blank line.
    medications,
    treatment_code,
    transfer_to_hospital,
    discharge_condition,
    recommendations,
    // Signatories
    attending_doctor,
    facility_head,
    issue_date,
    /// `data:image/...;base64,...` payload.
    doctor_signature_image,
    /// `data:image/...;base64,...` payload.
    stamp_image,
    /// `data:image/...;base64,...` payload.
    head_signature_image,
    // Encounter record page 1
    department,
    card_number,
    icd_code,
    diagnosis_description,
    complaints,
    allergies,
    temperature,
    blood_pressure,
    heart_rate,
    respiratory_rate,
    spo2,
    general_condition,
    skin,
    edema,
    cardiovascular,
    respiratory,
    digestive,
    urinary,
    neurological,
    musculoskeletal,
    preliminary_diagnosis,
    doctor,
    // Encounter record progress log
    initial_date,
    initial_narrative,
    initial_diagnosis,
    /// Newline-delimited; one bullet per non-blank line.
    investigations,
    doctor_signature,
    discharge_note_date,
    discharge_narrative,
    discharge_doctor,
    /// `data:image/...;base64,...` payload shown after the discharge signatory line.
    discharge_signature_image,
}

impl FieldRecord {
    /// Builds a record from any JSON value; non-objects produce an empty record.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }
}
