//! Canonical customer schema shared by both source transformers
//!
//! Field declaration order matches the bulk-import column order, so the CSV
//! encoder can emit the import sheet straight from the serde field names.

use serde::{Deserialize, Serialize};

/// Marketing consent recorded for every onboarded customer
pub const MARKETING_OPT_IN: &str = "yes";
/// Total spent for a customer that has never ordered
pub const DEFAULT_TOTAL_SPENT: &str = "0.00";
/// Order count for a customer that has never ordered
pub const DEFAULT_TOTAL_ORDERS: &str = "0";
/// Tax status for a newly onboarded customer
pub const DEFAULT_TAX_EXEMPT: &str = "no";

/// Output column headers in bulk-import order
pub const OUTPUT_COLUMNS: [&str; 25] = [
    "Customer ID",
    "First Name",
    "Last Name",
    "Email",
    "Accepts Email Marketing",
    "Default Address Company",
    "Default Address Address1",
    "Default Address Address2",
    "Default Address City",
    "Default Address Province Code",
    "Default Address Country Code",
    "Default Address Zip",
    "Default Address Phone",
    "Phone",
    "Accepts SMS Marketing",
    "Total Spent",
    "Total Orders",
    "Note",
    "Tax Exempt",
    "Tags",
    "¿De qué ciudad eres? (customer.metafields.custom.city)",
    "¿Nos dejas tu Instagram para que verifiquemos que existes? (customer.metafields.custom.instagram)",
    "¿Cómo nos has conocido? (customer.metafields.custom.referral)",
    "Si te ha recomendado alguien, ¿nos puedes dejar su correo? (customer.metafields.custom.referral-email)",
    "Fecha de nacimiento (customer.metafields.facts.birth_date)",
];

/// A customer record in the canonical import schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Ignored by the importer, present to occupy the leading column
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    /// Identity key; records with a blank email are never imported
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Accepts Email Marketing")]
    pub accepts_email_marketing: String,
    #[serde(rename = "Default Address Company")]
    pub address_company: String,
    #[serde(rename = "Default Address Address1")]
    pub address1: String,
    #[serde(rename = "Default Address Address2")]
    pub address2: String,
    #[serde(rename = "Default Address City")]
    pub city: String,
    #[serde(rename = "Default Address Province Code")]
    pub province_code: String,
    #[serde(rename = "Default Address Country Code")]
    pub country_code: String,
    #[serde(rename = "Default Address Zip")]
    pub zip: String,
    #[serde(rename = "Default Address Phone")]
    pub address_phone: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Accepts SMS Marketing")]
    pub accepts_sms_marketing: String,
    #[serde(rename = "Total Spent")]
    pub total_spent: String,
    #[serde(rename = "Total Orders")]
    pub total_orders: String,
    #[serde(rename = "Note")]
    pub note: String,
    #[serde(rename = "Tax Exempt")]
    pub tax_exempt: String,
    /// Comma-joined tag list; never contains empty segments or quotes
    #[serde(rename = "Tags")]
    pub tags: String,
    /// Duplicate of the address city, kept for the master source schema
    #[serde(rename = "¿De qué ciudad eres? (customer.metafields.custom.city)")]
    pub metafield_city: String,
    #[serde(
        rename = "¿Nos dejas tu Instagram para que verifiquemos que existes? (customer.metafields.custom.instagram)"
    )]
    pub instagram: String,
    #[serde(rename = "¿Cómo nos has conocido? (customer.metafields.custom.referral)")]
    pub referral_source: String,
    #[serde(
        rename = "Si te ha recomendado alguien, ¿nos puedes dejar su correo? (customer.metafields.custom.referral-email)"
    )]
    pub referral_email: String,
    /// ISO `YYYY-MM-DD`, or the raw source value when it did not parse
    #[serde(rename = "Fecha de nacimiento (customer.metafields.facts.birth_date)")]
    pub birth_date: String,
}

impl Customer {
    /// Create a record pre-filled with the onboarding defaults
    pub fn with_defaults() -> Self {
        Self {
            accepts_email_marketing: MARKETING_OPT_IN.to_string(),
            accepts_sms_marketing: MARKETING_OPT_IN.to_string(),
            total_spent: DEFAULT_TOTAL_SPENT.to_string(),
            total_orders: DEFAULT_TOTAL_ORDERS.to_string(),
            tax_exempt: DEFAULT_TAX_EXEMPT.to_string(),
            ..Self::default()
        }
    }

    /// Lower-cased email used as the merge key
    pub fn merge_key(&self) -> String {
        self.email.to_lowercase()
    }

    /// Whether this record carries an email and can appear in output
    pub fn has_email(&self) -> bool {
        is_present(&self.email)
    }
}

/// Shared presence rule: a field is present iff its trimmed value is non-empty
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
