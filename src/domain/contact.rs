use std::fmt;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Opaque record identifier. Fresh ids are UUID v4 strings, but any string
/// loaded from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ContactId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Personal,
    Client,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Client,
        Category::Other,
    ];

    /// Unknown tokens fall back to `Other`. The store never calls this, it
    /// keeps whatever category string it was handed.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "work" => Category::Work,
            "personal" => Category::Personal,
            "client" => Category::Client,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Client => "client",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Client => "Client",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Builds a brand new record. `created_at` and `updated_at` share `now`.
    pub fn from_draft(id: ContactId, draft: ContactDraft, now: DateTime<Utc>) -> Self {
        Contact {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            category: draft.category,
            address: draft.address,
            company: draft.company,
            notes: draft.notes,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges `draft` over this record. Required fields always replace,
    /// optional ones only when the draft carries a value. `id`, `created_at`
    /// and `avatar_url` are left alone.
    pub fn apply(&mut self, draft: ContactDraft, now: DateTime<Utc>) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.category = draft.category;

        if let Some(address) = draft.address {
            self.address = Some(address);
        }
        if let Some(company) = draft.company {
            self.company = Some(company);
        }
        if let Some(notes) = draft.notes {
            self.notes = Some(notes);
        }

        // Never let a skewed clock move updated_at behind created_at.
        self.updated_at = now.max(self.created_at);
    }

    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Input shape for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn first_name_req() -> String {
        "First name is required".to_string()
    }

    pub fn last_name_req() -> String {
        "Last name is required".to_string()
    }

    pub fn email_req() -> String {
        "Email is required".to_string()
    }

    pub fn email_format() -> String {
        "Invalid email address".to_string()
    }

    pub fn phone_req() -> String {
        "Phone number is required".to_string()
    }
}

impl ContactDraft {
    /// Form-level checks owned by callers. The store itself never validates.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.first_name.trim().is_empty() {
            problems.push(ValidationReq::first_name_req());
        }
        if self.last_name.trim().is_empty() {
            problems.push(ValidationReq::last_name_req());
        }
        if self.email.trim().is_empty() {
            problems.push(ValidationReq::email_req());
        } else if !self.validate_email()? {
            problems.push(ValidationReq::email_format());
        }
        if self.phone.trim().is_empty() {
            problems.push(ValidationReq::phone_req());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }

    pub fn validate_email(&self) -> Result<bool, AppError> {
        // local part, '@', domain with at least one dot and a 2+ letter TLD
        let re = Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")?;
        Ok(re.is_match(self.email.trim()))
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        ContactDraft {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            category: contact.category.clone(),
            address: contact.address.clone(),
            company: contact.company.clone(),
            notes: contact.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn draft() -> ContactDraft {
        ContactDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "a@x.com".to_string(),
            phone: "555".to_string(),
            category: "other".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn unknown_category_reads_as_other() {
        assert_eq!(Category::parse("work"), Category::Work);
        assert_eq!(Category::parse(" Client "), Category::Client);
        assert_eq!(Category::parse("family"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
    }

    #[test]
    fn store_keeps_raw_category_string() {
        let mut d = draft();
        d.category = "family".to_string();
        let contact = Contact::from_draft(ContactId::from("x"), d, Utc::now());

        assert_eq!(contact.category, "family");
        assert_eq!(contact.category(), Category::Other);
    }

    #[test]
    fn serializes_with_camel_case_field_names() -> Result<(), AppError> {
        let now = Utc.with_ymd_and_hms(2023, 2, 15, 0, 0, 0).unwrap();
        let contact = Contact::from_draft(ContactId::from("1"), draft(), now);

        let value = serde_json::to_value(&contact)?;

        assert_eq!(value["id"], "1");
        assert_eq!(value["firstName"], "Ann");
        assert_eq!(value["lastName"], "Lee");
        assert_eq!(value["createdAt"], "2023-02-15T00:00:00Z");
        assert!(value.get("avatarUrl").is_none());
        assert!(value.get("company").is_none());
        Ok(())
    }

    #[test]
    fn reads_browser_style_timestamps() -> Result<(), AppError> {
        let raw = r#"{"id":"9","firstName":"A","lastName":"B","email":"a@b.co",
            "phone":"1","category":"work","avatarUrl":"https://x/1.png",
            "createdAt":"2023-02-15T05:00:00.000Z","updatedAt":"2023-05-10T04:00:00.000Z"}"#;

        let contact: Contact = serde_json::from_str(raw)?;

        assert_eq!(contact.avatar_url.as_deref(), Some("https://x/1.png"));
        assert!(contact.created_at < contact.updated_at);
        Ok(())
    }

    #[test]
    fn apply_merges_only_provided_optionals() {
        let created = Utc::now() - Duration::days(3);
        let mut d = draft();
        d.company = Some("Acme Inc.".to_string());
        d.notes = Some("met at a fair".to_string());
        let mut contact = Contact::from_draft(ContactId::from("1"), d, created);
        contact.avatar_url = Some("https://x/a.png".to_string());

        let mut change = draft();
        change.first_name = "Anna".to_string();
        change.notes = Some(String::new());
        let now = Utc::now();
        contact.apply(change, now);

        assert_eq!(contact.first_name, "Anna");
        assert_eq!(contact.company.as_deref(), Some("Acme Inc."));
        assert_eq!(contact.notes.as_deref(), Some(""));
        assert_eq!(contact.avatar_url.as_deref(), Some("https://x/a.png"));
        assert_eq!(contact.created_at, created);
        assert_eq!(contact.updated_at, now);
    }

    #[test]
    fn initials_and_full_name() {
        let contact = Contact::from_draft(ContactId::from("1"), draft(), Utc::now());

        assert_eq!(contact.full_name(), "Ann Lee");
        assert_eq!(contact.initials(), "AL");
    }

    #[test]
    fn draft_validation() -> Result<(), AppError> {
        assert!(draft().validate().is_ok());

        let mut bad = draft();
        bad.first_name = "  ".to_string();
        bad.email = "foo@bar".to_string();

        let err = bad.validate().unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("First name is required"));
        assert!(message.contains("Invalid email address"));
        assert!(!message.contains("Phone number is required"));
        Ok(())
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ContactId::generate(), ContactId::generate());
    }
}
