//! Contact detail extraction (email, phone, URL).

use serde::{Deserialize, Serialize};

use super::patterns::{EMAIL, PHONE, URL};
use super::push_unique;

/// Contact details found in a document. Each list is de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub urls: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty() && self.urls.is_empty()
    }
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    let mut info = ContactInfo::default();

    for m in EMAIL.find_iter(text) {
        push_unique(&mut info.emails, m.as_str());
    }
    for m in PHONE.find_iter(text) {
        push_unique(&mut info.phones, m.as_str());
    }
    for m in URL.find_iter(text) {
        push_unique(&mut info.urls, m.as_str());
    }

    info
}
