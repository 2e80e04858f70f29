pub mod contact;
pub mod search;
pub mod seed;

pub use contact::{Category, Contact, ContactDraft, ContactId, ValidationReq};
