use chrono::{DateTime, TimeZone, Utc};

use super::contact::{Contact, ContactId};

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Demonstration dataset written to an empty durable slot on first use.
pub fn demo_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: ContactId::from("1"),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            category: "work".to_string(),
            company: some("Acme Inc."),
            address: some("123 Main St, Anytown, USA"),
            notes: some("Met at the conference last month"),
            avatar_url: some("https://i.pravatar.cc/150?img=1"),
            created_at: midnight(2023, 2, 15),
            updated_at: midnight(2023, 5, 10),
        },
        Contact {
            id: ContactId::from("2"),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            phone: "(555) 987-6543".to_string(),
            category: "personal".to_string(),
            company: None,
            address: some("456 Oak Ave, Somewhere, USA"),
            notes: some("Friend from college"),
            avatar_url: some("https://i.pravatar.cc/150?img=5"),
            created_at: midnight(2023, 3, 20),
            updated_at: midnight(2023, 3, 20),
        },
        Contact {
            id: ContactId::from("3"),
            first_name: "Michael".to_string(),
            last_name: "Johnson".to_string(),
            email: "michael.j@example.com".to_string(),
            phone: "(555) 234-5678".to_string(),
            category: "work".to_string(),
            company: some("Tech Solutions Ltd"),
            address: some("789 Pine Rd, Elsewhere, USA"),
            notes: None,
            avatar_url: some("https://i.pravatar.cc/150?img=8"),
            created_at: midnight(2023, 4, 5),
            updated_at: midnight(2023, 4, 5),
        },
        Contact {
            id: ContactId::from("4"),
            first_name: "Emily".to_string(),
            last_name: "Brown".to_string(),
            email: "emily.b@example.com".to_string(),
            phone: "(555) 876-5432".to_string(),
            category: "personal".to_string(),
            company: None,
            address: None,
            notes: some("Yoga instructor"),
            avatar_url: some("https://i.pravatar.cc/150?img=9"),
            created_at: midnight(2023, 5, 10),
            updated_at: midnight(2023, 5, 10),
        },
        Contact {
            id: ContactId::from("5"),
            first_name: "David".to_string(),
            last_name: "Wilson".to_string(),
            email: "david.w@example.com".to_string(),
            phone: "(555) 345-6789".to_string(),
            category: "client".to_string(),
            company: some("Global Enterprises"),
            address: some("101 Maple Dr, Nowhere, USA"),
            notes: some("Important client - handle with care"),
            avatar_url: some("https://i.pravatar.cc/150?img=11"),
            created_at: midnight(2023, 6, 25),
            updated_at: midnight(2023, 6, 25),
        },
    ]
}
