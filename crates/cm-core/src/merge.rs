//! Identity merge engine: deduplicate two canonical record sets by email

use std::collections::{HashMap, HashSet};

use crate::customer::{is_present, Customer};

/// Merge two transformed record sets into one list keyed by lower-cased
/// email.
///
/// Primary records seed the result and keep their order; a duplicate email
/// within the primary source is last-write-wins at its original position.
/// Secondary records either overlay an existing entry (non-empty fields
/// only, tags unioned) or append as new entries. Blank-email records from
/// either side are dropped, never merged.
///
/// Name, address, and commerce-default fields are never overlaid: the two
/// source schemas contribute disjoint data categories.
pub fn merge_customers(primary: Vec<Customer>, secondary: Vec<Customer>) -> Vec<Customer> {
    // Insertion-ordered map: keys in `order`, records in `by_email`
    let mut order: Vec<String> = Vec::new();
    let mut by_email: HashMap<String, Customer> = HashMap::new();

    for customer in primary {
        if !customer.has_email() {
            continue;
        }
        let key = customer.merge_key();
        if by_email.insert(key.clone(), customer).is_none() {
            order.push(key);
        }
    }

    for customer in secondary {
        if !customer.has_email() {
            continue;
        }
        let key = customer.merge_key();
        match by_email.get_mut(&key) {
            Some(existing) => overlay(existing, &customer),
            None => {
                by_email.insert(key.clone(), customer);
                order.push(key);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| by_email.remove(&key))
        .filter(|customer| is_present(&customer.email))
        .collect()
}

/// Set union of two comma-separated tag lists, first-occurrence order,
/// blank segments dropped
pub fn union_tags(left: &str, right: &str) -> String {
    let mut seen = HashSet::new();
    let mut union: Vec<&str> = Vec::new();

    for tag in left.split(',').chain(right.split(',')).map(str::trim) {
        if is_present(tag) && seen.insert(tag) {
            union.push(tag);
        }
    }
    union.join(",")
}

/// Overlay the secondary-source fields onto an existing record. A non-empty
/// incoming value replaces the existing one; an empty value never erases
/// data.
fn overlay(existing: &mut Customer, incoming: &Customer) {
    overlay_field(&mut existing.phone, &incoming.phone);
    overlay_field(&mut existing.note, &incoming.note);
    overlay_field(&mut existing.instagram, &incoming.instagram);
    overlay_field(&mut existing.referral_source, &incoming.referral_source);
    overlay_field(&mut existing.referral_email, &incoming.referral_email);
    overlay_field(&mut existing.birth_date, &incoming.birth_date);
    existing.tags = union_tags(&existing.tags, &incoming.tags);
}

fn overlay_field(existing: &mut String, incoming: &str) {
    if is_present(incoming) {
        *existing = incoming.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_rows;
    use crate::transform::{transform_form_rows, transform_master_rows};

    fn customer(email: &str) -> Customer {
        Customer {
            email: email.to_string(),
            ..Customer::with_defaults()
        }
    }

    #[test]
    fn test_merge_disjoint_emails_appends() {
        let primary = vec![customer("a@x.com"), customer("b@x.com")];
        let secondary = vec![customer("c@x.com")];

        let merged = merge_customers(primary, secondary);

        let emails: Vec<&str> = merged.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn test_merge_key_is_case_insensitive() {
        let primary = vec![customer("Ana@X.com")];
        let mut incoming = customer("ana@x.com");
        incoming.phone = "600111222".to_string();

        let merged = merge_customers(primary, vec![incoming]);

        assert_eq!(merged.len(), 1);
        // The primary record stays authoritative; only the overlay applies.
        assert_eq!(merged[0].email, "Ana@X.com");
        assert_eq!(merged[0].phone, "600111222");
    }

    #[test]
    fn test_overlay_covers_contact_and_metafields() {
        let mut existing = customer("a@x.com");
        existing.first_name = "Ana".to_string();
        existing.city = "Lima".to_string();

        let mut incoming = customer("a@x.com");
        incoming.first_name = "Anna".to_string();
        incoming.phone = "600111222".to_string();
        incoming.note = "hola".to_string();
        incoming.instagram = "@ana".to_string();
        incoming.referral_source = "friend".to_string();
        incoming.referral_email = "b@x.com".to_string();
        incoming.birth_date = "1990-04-23".to_string();

        let merged = merge_customers(vec![existing], vec![incoming]);

        let record = &merged[0];
        assert_eq!(record.phone, "600111222");
        assert_eq!(record.note, "hola");
        assert_eq!(record.instagram, "@ana");
        assert_eq!(record.referral_source, "friend");
        assert_eq!(record.referral_email, "b@x.com");
        assert_eq!(record.birth_date, "1990-04-23");
        // Names and address are outside the overlay.
        assert_eq!(record.first_name, "Ana");
        assert_eq!(record.city, "Lima");
    }

    #[test]
    fn test_empty_secondary_fields_never_erase() {
        let mut existing = customer("a@x.com");
        existing.phone = "600111222".to_string();
        existing.note = "keep me".to_string();

        let incoming = customer("a@x.com");

        let merged = merge_customers(vec![existing], vec![incoming]);

        assert_eq!(merged[0].phone, "600111222");
        assert_eq!(merged[0].note, "keep me");
    }

    #[test]
    fn test_blank_email_dropped_from_either_source() {
        let mut blank_primary = customer("");
        blank_primary.first_name = "Ana".to_string();
        let mut blank_secondary = customer("   ");
        blank_secondary.first_name = "Berta".to_string();

        let merged = merge_customers(
            vec![blank_primary, customer("a@x.com")],
            vec![blank_secondary],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].email, "a@x.com");
    }

    #[test]
    fn test_intra_source_duplicate_is_last_write_wins() {
        let mut first = customer("a@x.com");
        first.first_name = "Ana".to_string();
        first.phone = "111".to_string();
        let mut second = customer("a@x.com");
        second.first_name = "Anna".to_string();

        let merged = merge_customers(vec![first, second, customer("b@x.com")], vec![]);

        // The later record replaces the earlier wholesale, keeping position.
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].email, "a@x.com");
        assert_eq!(merged[0].first_name, "Anna");
        assert_eq!(merged[0].phone, "");
        assert_eq!(merged[1].email, "b@x.com");
    }

    #[test]
    fn test_merge_idempotent_with_empty_secondary() {
        let mut a = customer("a@x.com");
        a.tags = "vip,onboarding".to_string();
        let mut b = customer("a@x.com");
        b.tags = "shopify-forms-574141".to_string();
        b.phone = "600111222".to_string();

        let merged = merge_customers(vec![a], vec![b, customer("c@x.com")]);
        let again = merge_customers(merged.clone(), vec![]);

        assert_eq!(again, merged);
    }

    #[test]
    fn test_tag_union_symmetric_while_field_precedence_is_not() {
        let mut master = customer("a@x.com");
        master.tags = "vip,onboarding".to_string();
        master.note = "from master".to_string();

        let mut form = customer("a@x.com");
        form.tags = "shopify-forms-574141,vip".to_string();
        form.note = "from form".to_string();

        let ab = merge_customers(vec![master.clone()], vec![form.clone()]);
        let ba = merge_customers(vec![form], vec![master]);

        // The tag sets agree regardless of merge order...
        let tags_ab: HashSet<&str> = ab[0].tags.split(',').collect();
        let tags_ba: HashSet<&str> = ba[0].tags.split(',').collect();
        assert_eq!(tags_ab, tags_ba);

        // ...but non-tag fields take the secondary source's value whenever
        // it is non-empty, so precedence flips with the order.
        assert_eq!(ab[0].note, "from form");
        assert_eq!(ba[0].note, "from master");
    }

    #[test]
    fn test_union_tags() {
        assert_eq!(union_tags("a,b", "b,c"), "a,b,c");
        assert_eq!(union_tags("", "a"), "a");
        assert_eq!(union_tags("a", ""), "a");
        assert_eq!(union_tags("", ""), "");
        assert_eq!(union_tags("a, b ,a", "b"), "a,b");
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let master_content = "Dirección de correo electrónico,Nombre,Apellidos,Dirección,TAGS\n\
                              a@x.com,Ana,García,Lima Peru,\"vip\"\n";
        let form_content = "text-243,text-154,your-email,tel-778,date-343,menu-749,textarea-785,email-210\n\
                            Ana,García,a@x.com,600111222,,,,\n";

        let master = transform_master_rows(&parse_rows(master_content));
        let form = transform_form_rows(&parse_rows(form_content));
        let merged = merge_customers(master, form);

        assert_eq!(merged.len(), 1);
        let record = &merged[0];
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.city, "Lima");
        assert_eq!(record.country_code, "Peru");
        assert_eq!(record.phone, "600111222");
        // The master tags survive and the form batch tag joins the union.
        assert_eq!(record.tags, "vip,onboarding,shopify-forms-574141");
    }
}
