use super::contact::Contact;

/// Category token meaning "no filtering".
pub const CATEGORY_ALL: &str = "all";

/// Case-insensitive substring match over the searchable fields. Phone numbers
/// are matched as typed since they carry no letters worth folding.
pub fn matches_query(contact: &Contact, query: &str) -> bool {
    let needle = query.to_lowercase();

    contact.first_name.to_lowercase().contains(&needle)
        || contact.last_name.to_lowercase().contains(&needle)
        || contact.email.to_lowercase().contains(&needle)
        || contact.phone.contains(&needle)
        || contact
            .company
            .as_ref()
            .is_some_and(|company| company.to_lowercase().contains(&needle))
}

/// Exact token comparison against the stored category string.
pub fn matches_category(contact: &Contact, category: &str) -> bool {
    category == CATEGORY_ALL || contact.category == category
}
