//! Fixed captions printed on the forms (Georgian, as issued).

// Shared
pub const FONT_FAMILY: &str = "Sylfaen";
pub const DATE_SUFFIX_LABEL: &str = "თარიღი";

// Health-status certificate (form IV-100/a)
pub const APPROVAL_NOTE: &str = "დანართი №2 დამტკიცებულია საქართველოს შრომის\n\
ჯანმრთელობისა და სოციალური დაცვის მინისტრის\n\
2013 წ 03.12 №01-42/ნ ბრძანებით";
pub const DEFAULT_FORM_TYPE: &str = "სამედიცინო დოკუმენტაცია ფორმა № IV-100/ა";
pub const CERTIFICATE_TITLE: &str = "ცნობა ჯანმრთელობის მდგომარეობის შესახებ";
pub const ISSUE_DATE_LABEL: &str = "გაცემის თარიღი";
pub const CARD_NUMBER_LABEL: &str = "ბარათის №";

pub const ISSUER_HEADER: &str = "1. გამცემი ორგანიზაცია";
pub const ISSUER_NAME: &str = "დასახელება:";
pub const ISSUER_CODE: &str = "საიდენტიფიკაციო კოდი:";
pub const ISSUER_ADDRESS: &str = "მისამართი:";

pub const RECIPIENT_HEADER: &str = "2. მიმღები ორგანიზაცია";
pub const RECIPIENT_NAME: &str = "დასახელება:";

pub const PATIENT_HEADER: &str = "პაციენტის მონაცემები";
pub const PATIENT_NAME: &str = "3. სახელი, გვარი:";
pub const PATIENT_BIRTH_DATE: &str = "4. დაბადების თარიღი:";
pub const PATIENT_PERSONAL_ID: &str = "5. პირადი ნომერი:";
pub const PATIENT_ADDRESS: &str = "6. მისამართი:";
pub const PATIENT_OCCUPATION: &str = "7. სამუშაო ადგილი:";

pub const STAY_HEADER: &str = "8. ჰოსპიტალიზაციის ვადები";
pub const STAY_ADMISSION: &str = "მიღება";
pub const STAY_DISCHARGE: &str = "გაწერა";

pub const DIAGNOSIS_HEADER: &str = "9. დიაგნოზი";
pub const DIAGNOSIS_MAIN: &str = "ძირითადი:";
pub const DIAGNOSIS_REFINED: &str = "ექიმის მიერ დაზუსტება:";

pub const PAST_DISEASES_HEADER: &str = "10. გადატანილი დაავადებები";
pub const SHORT_HISTORY_HEADER: &str = "11. მოკლე ანამნეზი";

pub const INVESTIGATIONS_HEADER: &str = "12. ჩატარებული გამოკვლევები";
pub const BLOOD_ANALYSIS: &str = "სისხლის საერთო ანალიზი BL.6";
pub const GLUCOSE_ANALYSIS: &str = "გლუკოზის განსაზღვრა სისხლის შრატში BL.12.1";
pub const INSTRUMENTAL: &str = "ინსტრუმენტული კვლევები";

pub const COURSE_HEADER: &str = "13. დაავადების მიმდინარეობა";
pub const COURSE_TYPE: &str = "ტიპი";
pub const COURSE_ON_ADMISSION: &str = "მიღებისას";
pub const COURSE_ON_DISCHARGE: &str = "გაწერისას";
pub const COURSE_VITALS: &str = "ვიტალური მაჩვენებლები";

pub const TREATMENT_HEADER: &str = "14. ჩატარებული მკურნალობა";
pub const TREATMENT_MEDICATIONS: &str = "მედიკამენტები";
pub const TREATMENT_CODE: &str = "კოდი";

pub const OUTCOME_HEADER: &str = "გამოსავალი";
pub const OUTCOME_TRANSFER: &str = "15. სტაციონარში გადაყვანა:";
pub const OUTCOME_CONDITION: &str = "16. გაწერის მდგომარეობა:";
pub const OUTCOME_RECOMMENDATIONS: &str = "17. რეკომენდაციები:";

pub const SIGNATORIES_HEADER: &str = "ხელმოწერები";
pub const SIGNATORY_DOCTOR: &str = "18. მკურნალი ექიმი:";
pub const SIGNATORY_HEAD: &str = "19. დაწესებულების ხელმძღვანელი:";
pub const SIGNATORY_DATE: &str = "20. ცნობის გაცემის თარიღი:";

pub const SIGNATURE_DOCTOR: &str = "ექიმის ხელმოწერა";
pub const SIGNATURE_STAMP: &str = "ბეჭედი";
pub const SIGNATURE_HEAD: &str = "ხელმძღვანელის ხელმოწერა";

// Clinical encounter record
pub const DEFAULT_FACILITY: &str = "პრემიუმ მედ გრუპი";
pub const DEFAULT_DEPARTMENT: &str = "გადაუდებელი მედიცინა";
pub const DEFAULT_ADMISSION_STATUS: &str = "თვითდინებით";
pub const DEFAULT_ALLERGIES: &str = "არა";
pub const MISSING_VALUE: &str = "-";

pub const ENCOUNTER_CARD_NUMBER: &str = "ბარათის №:";
pub const ENCOUNTER_PATIENT_NAME: &str = "სახელი, გვარი:";
pub const ENCOUNTER_ADMISSION_STATUS: &str = "მიღების სტატუსი:";

pub const ICD_HEADER: &str = "დიაგნოზი (ICD-10)";
pub const ICD_CASE_PREFIX: &str = "ZYZA10 ამბულატორია (გადაუდებელი)";

pub const COMPLAINTS_HEADER: &str = "ჩივილები";
pub const HISTORY_HEADER: &str = "ანამნეზი";
pub const ALLERGIES_LABEL: &str = "ალერგიები: ";
pub const OBJECTIVE_STATUS_HEADING: &str = "ობიექტური სტატუსი";

pub const VITALS: [&str; 5] = ["T°C", "BP", "HR", "RR", "SpO₂"];

pub const ORGAN_SYSTEMS: [&str; 9] = [
    "ზოგადი მდგომარეობა:",
    "კანი:",
    "პერიფერიული შეშუპება:",
    "გულ-სისხლძარღვთა:",
    "სასუნთქი:",
    "საჭმლის მომნელებელი:",
    "შარდგამომყოფი:",
    "ნერვული სისტემა:",
    "საყრდენ-მამოძრავებელი:",
];

pub const PRELIMINARY_DIAGNOSIS_LABEL: &str = "წინასწარი დიაგნოზი: ";
pub const ATTENDING_DOCTOR_LABEL: &str = "მკურნალი ექიმი: ";

pub const PROGRESS_LOG_HEADING: &str = "პაციენტის მიმდინარეობის ფურცელი (დღიური)";
pub const INITIAL_ASSESSMENT_HEADER: &str = "პირველადი შეფასება / მიღება";
pub const ORDERS_HEADING: &str = "დანიშნულებები:";
pub const ORDERED_INVESTIGATIONS: &str = "გამოკვლევები:";
pub const ORDERED_MEDICATIONS: &str = "მედიკამენტები:";
pub const DOCTOR_LINE_LABEL: &str = "ექიმი";
pub const DISCHARGE_HEADER: &str = "გადაფასება / გაწერა";

// Section fills
pub const FILL_BLUE: &str = "D9E2F3";
pub const FILL_GREEN: &str = "E2EFDA";
pub const FILL_PEACH: &str = "FCE4D6";
pub const FILL_GREY: &str = "D0D0D0";
pub const FILL_LIGHT_GREY: &str = "F2F2F2";
