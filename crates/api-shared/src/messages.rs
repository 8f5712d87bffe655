//! User-facing messages returned in response bodies (Georgian, as shown by the front end).

pub const DOCUMENT_SAVED: &str = "დოკუმენტი წარმატებით შეინახა";
pub const PDF_CREATED: &str = "PDF წარმატებით შეიქმნა";
pub const PDF_CONVERSION_FAILED: &str = "PDF კონვერტაცია ვერ მოხერხდა";
pub const TEMPLATE_SAVED: &str = "შაბლონი წარმატებით შეინახა";
pub const TEMPLATE_DELETED: &str = "შაბლონი წაშლილია";
pub const TEMPLATE_NOT_FOUND: &str = "შაბლონი ვერ მოიძებნა";
pub const FILE_NOT_FOUND: &str = "ფაილი ვერ მოიძებნა";
pub const NO_FILE: &str = "ფაილი არ არის";
pub const NO_FILE_SELECTED: &str = "ფაილი არჩეული არ არის";
pub const IMAGES_ONLY: &str = "მხოლოდ სურათები (PNG, JPG)";
