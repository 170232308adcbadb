//! Per-source row transformers mapping raw exports onto the canonical schema
//!
//! Each source gets its own typed row, built straight from a parsed
//! [`RawRow`], so nothing downstream touches loosely-typed key-value bags.

use crate::customer::Customer;
use crate::normalize::{
    clean_tags, format_birth_date, map_referral_source, mentions_instagram, parse_address,
};
use crate::parser::RawRow;

// Master contact export columns (fixed Spanish-language headers)
pub const MASTER_EMAIL: &str = "Dirección de correo electrónico";
pub const MASTER_FIRST_NAME: &str = "Nombre";
pub const MASTER_LAST_NAME: &str = "Apellidos";
pub const MASTER_ADDRESS: &str = "Dirección";
pub const MASTER_TAGS: &str = "TAGS";

// Web-form submission export columns (fixed form-builder field ids)
pub const FORM_FIRST_NAME: &str = "text-243";
pub const FORM_LAST_NAME: &str = "text-154";
pub const FORM_EMAIL: &str = "your-email";
pub const FORM_PHONE: &str = "tel-778";
pub const FORM_BIRTH_DATE: &str = "date-343";
pub const FORM_REFERRAL: &str = "menu-749";
pub const FORM_FREE_TEXT: &str = "textarea-785";
pub const FORM_REFERRAL_EMAIL: &str = "email-210";

/// Tag stamped on every customer from the master contact export
pub const ONBOARDING_TAG: &str = "onboarding";
/// Batch tag identifying customers from the form submission export
pub const FORM_BATCH_TAG: &str = "shopify-forms-574141";

/// One row of the master contact export
#[derive(Debug, Clone, Default)]
pub struct MasterRow {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub tags: String,
}

impl MasterRow {
    /// Capture the master columns from a parsed row
    pub fn from_raw(row: &RawRow) -> Self {
        Self {
            email: row.get(MASTER_EMAIL).to_string(),
            first_name: row.get(MASTER_FIRST_NAME).to_string(),
            last_name: row.get(MASTER_LAST_NAME).to_string(),
            address: row.get(MASTER_ADDRESS).to_string(),
            tags: row.get(MASTER_TAGS).to_string(),
        }
    }

    /// Map onto the canonical schema.
    ///
    /// The address column populates both the default-address fields and the
    /// city metafield; the onboarding tag is always appended.
    pub fn into_customer(self) -> Customer {
        let address = parse_address(&self.address);

        let mut customer = Customer::with_defaults();
        customer.email = self.email;
        customer.first_name = self.first_name;
        customer.last_name = self.last_name;
        customer.city = address.city.clone();
        customer.metafield_city = address.city;
        customer.country_code = address.country;
        customer.tags = master_tags(&self.tags);
        customer
    }
}

/// One row of the web-form submission export
#[derive(Debug, Clone, Default)]
pub struct FormRow {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: String,
    pub referral: String,
    pub free_text: String,
    pub referral_email: String,
}

impl FormRow {
    /// Capture the form columns from a parsed row
    pub fn from_raw(row: &RawRow) -> Self {
        Self {
            email: row.get(FORM_EMAIL).to_string(),
            first_name: row.get(FORM_FIRST_NAME).to_string(),
            last_name: row.get(FORM_LAST_NAME).to_string(),
            phone: row.get(FORM_PHONE).to_string(),
            birth_date: row.get(FORM_BIRTH_DATE).to_string(),
            referral: row.get(FORM_REFERRAL).to_string(),
            free_text: row.get(FORM_FREE_TEXT).to_string(),
            referral_email: row.get(FORM_REFERRAL_EMAIL).to_string(),
        }
    }

    /// Map onto the canonical schema.
    ///
    /// The free-text field lands in the note verbatim, and doubles as the
    /// Instagram handle when the referral answer mentions Instagram. The
    /// form source carries no address data.
    pub fn into_customer(self) -> Customer {
        let mut customer = Customer::with_defaults();
        customer.email = self.email;
        customer.first_name = self.first_name;
        customer.last_name = self.last_name;
        customer.phone = self.phone;
        customer.note = self.free_text.clone();
        customer.tags = FORM_BATCH_TAG.to_string();
        customer.instagram = if mentions_instagram(&self.referral) {
            self.free_text
        } else {
            String::new()
        };
        customer.referral_source = map_referral_source(&self.referral);
        customer.referral_email = self.referral_email;
        customer.birth_date = format_birth_date(&self.birth_date);
        customer
    }
}

/// Transform every master row, in order
pub fn transform_master_rows(rows: &[RawRow]) -> Vec<Customer> {
    rows.iter()
        .map(|row| MasterRow::from_raw(row).into_customer())
        .collect()
}

/// Transform every form row, in order
pub fn transform_form_rows(rows: &[RawRow]) -> Vec<Customer> {
    rows.iter()
        .map(|row| FormRow::from_raw(row).into_customer())
        .collect()
}

/// Cleaned master tags with the onboarding tag always appended
fn master_tags(raw: &str) -> String {
    let cleaned = clean_tags(raw);
    if cleaned.is_empty() {
        ONBOARDING_TAG.to_string()
    } else {
        format!("{},{}", cleaned, ONBOARDING_TAG)
    }
}
