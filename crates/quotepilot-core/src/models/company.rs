//! Candidate companies and their contact channels.

use serde::{Deserialize, Serialize};

use super::Category;

/// A company that can be asked for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_form: Option<ContactForm>,
    /// Business category label this company serves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A web contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub url: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// The form is meant for quote requests rather than general enquiries.
    #[serde(default)]
    pub is_quote_form: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FormField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            required,
            placeholder: None,
        }
    }
}

/// Contact preference. Ordered so that `High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPriority {
    High,
    Medium,
    Low,
}

impl ContactPriority {
    /// Sort key: 1 for high, 2 for medium, 3 for low.
    pub fn rank(&self) -> u32 {
        match self {
            ContactPriority::High => 1,
            ContactPriority::Medium => 2,
            ContactPriority::Low => 3,
        }
    }
}

/// A way to reach a company. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContactMethod {
    Email { address: String, priority: ContactPriority },
    Form { form: ContactForm, priority: ContactPriority },
    Manual { priority: ContactPriority },
}

impl ContactMethod {
    pub fn priority(&self) -> ContactPriority {
        match self {
            ContactMethod::Email { priority, .. }
            | ContactMethod::Form { priority, .. }
            | ContactMethod::Manual { priority } => *priority,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContactMethod::Email { .. } => "email",
            ContactMethod::Form { .. } => "form",
            ContactMethod::Manual { .. } => "manual",
        }
    }
}

fn is_sales_address(address: &str) -> bool {
    address.contains("sales") || address.contains("estimate")
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website: None,
            email: None,
            contact_form: None,
            industry: None,
            description: None,
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_contact_form(mut self, form: ContactForm) -> Self {
        self.contact_form = Some(form);
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Industry parsed into the closed category set, if it is a member.
    pub fn category(&self) -> Option<Category> {
        self.industry.as_deref().and_then(Category::from_label)
    }

    /// Whether the company has an email address or a contact form.
    pub fn is_contactable(&self) -> bool {
        self.email.is_some() || self.contact_form.is_some()
    }

    /// Every contact channel, email first. Never empty: a company with no
    /// channel gets a single low-priority manual entry.
    pub fn contact_methods(&self) -> Vec<ContactMethod> {
        let mut methods = Vec::new();

        if let Some(address) = &self.email {
            let priority = if is_sales_address(address) {
                ContactPriority::High
            } else {
                ContactPriority::Medium
            };
            methods.push(ContactMethod::Email {
                address: address.clone(),
                priority,
            });
        }

        if let Some(form) = &self.contact_form {
            let priority = if form.is_quote_form {
                ContactPriority::High
            } else {
                ContactPriority::Medium
            };
            methods.push(ContactMethod::Form {
                form: form.clone(),
                priority,
            });
        }

        if methods.is_empty() {
            methods.push(ContactMethod::Manual {
                priority: ContactPriority::Low,
            });
        }

        methods
    }

    /// Best channel: sales email, quote form, any email, any form, manual.
    pub fn preferred_contact_method(&self) -> ContactMethod {
        match (&self.email, &self.contact_form) {
            (Some(address), _) if is_sales_address(address) => ContactMethod::Email {
                address: address.clone(),
                priority: ContactPriority::High,
            },
            (_, Some(form)) if form.is_quote_form => ContactMethod::Form {
                form: form.clone(),
                priority: ContactPriority::High,
            },
            (Some(address), _) => ContactMethod::Email {
                address: address.clone(),
                priority: ContactPriority::Medium,
            },
            (None, Some(form)) => ContactMethod::Form {
                form: form.clone(),
                priority: ContactPriority::Medium,
            },
            (None, None) => ContactMethod::Manual {
                priority: ContactPriority::Low,
            },
        }
    }

    /// Rank of the preferred method; smaller sorts first.
    pub fn contact_priority(&self) -> u32 {
        self.preferred_contact_method().priority().rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(is_quote_form: bool) -> ContactForm {
        ContactForm {
            url: "https://example.com/contact".to_string(),
            fields: vec![FormField::new("email", "email", true)],
            is_quote_form,
        }
    }

    #[test]
    fn test_no_channel_is_manual_low() {
        let company = Company::new("c1", "Nowhere");
        assert_eq!(
            company.contact_methods(),
            vec![ContactMethod::Manual {
                priority: ContactPriority::Low
            }]
        );
        assert!(!company.is_contactable());
        assert_eq!(company.contact_priority(), 3);
    }

    #[test]
    fn test_methods_never_empty() {
        let companies = [
            Company::new("a", "A"),
            Company::new("b", "B").with_email("info@b.example"),
            Company::new("c", "C").with_contact_form(form(false)),
            Company::new("d", "D").with_email("sales@d.example").with_contact_form(form(true)),
        ];
        for company in &companies {
            assert!(!company.contact_methods().is_empty(), "{}", company.id);
        }
    }

    #[test]
    fn test_email_priority() {
        let sales = Company::new("s", "S").with_email("sales@s.example");
        let estimate = Company::new("e", "E").with_email("estimate-desk@e.example");
        let info = Company::new("i", "I").with_email("info@i.example");

        assert_eq!(sales.contact_methods()[0].priority(), ContactPriority::High);
        assert_eq!(estimate.contact_methods()[0].priority(), ContactPriority::High);
        assert_eq!(info.contact_methods()[0].priority(), ContactPriority::Medium);
    }

    #[test]
    fn test_both_channels_listed_email_first() {
        let company = Company::new("x", "X").with_email("info@x.example").with_contact_form(form(true));
        let kinds: Vec<&str> = company.contact_methods().iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, vec!["email", "form"]);
    }

    #[test]
    fn test_preferred_method_order() {
        // Quote form beats a plain email.
        let company = Company::new("x", "X").with_email("info@x.example").with_contact_form(form(true));
        assert_eq!(company.preferred_contact_method().kind(), "form");
        assert_eq!(company.contact_priority(), 1);

        // Sales email beats a quote form.
        let company = Company::new("y", "Y").with_email("sales@y.example").with_contact_form(form(true));
        assert!(matches!(company.preferred_contact_method(), ContactMethod::Email { .. }));

        // Plain email beats a plain form.
        let company = Company::new("z", "Z").with_email("info@z.example").with_contact_form(form(false));
        assert_eq!(company.preferred_contact_method().kind(), "email");
        assert_eq!(company.contact_priority(), 2);

        let company = Company::new("w", "W").with_contact_form(form(false));
        assert_eq!(company.preferred_contact_method().kind(), "form");
        assert_eq!(company.contact_priority(), 2);
    }

    #[test]
    fn test_priority_order() {
        assert!(ContactPriority::High < ContactPriority::Medium);
        assert!(ContactPriority::Medium < ContactPriority::Low);
        assert_eq!(
            [ContactPriority::High, ContactPriority::Medium, ContactPriority::Low].map(|p| p.rank()),
            [1, 2, 3]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let method = ContactMethod::Email {
            address: "sales@a.example".to_string(),
            priority: ContactPriority::High,
        };
        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            serde_json::json!({"type": "email", "address": "sales@a.example", "priority": "high"})
        );

        let company: Company = serde_json::from_str(
            r#"{"id": "c", "name": "C", "contactForm": {"url": "https://c.example/q", "isQuoteForm": true,
                "fields": [{"name": "budget", "type": "number", "required": true}]}}"#,
        )
        .unwrap();
        let form = company.contact_form.unwrap();
        assert!(form.is_quote_form);
        assert_eq!(form.fields[0].field_type, "number");
    }

    #[test]
    fn test_category() {
        assert_eq!(Company::new("a", "A").with_industry("コンサルティング").category(), Some(Category::Consulting));
        assert_eq!(Company::new("a", "A").with_industry("宇宙").category(), None);
    }
}
