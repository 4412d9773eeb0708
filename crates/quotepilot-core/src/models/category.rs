//! Business categories shared by classification and company matching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of business categories.
///
/// Declaration order is the classifier's tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// IT / systems development.
    #[serde(rename = "IT・システム開発")]
    ItSystems,
    /// Design / creative work.
    #[serde(rename = "デザイン・クリエイティブ")]
    DesignCreative,
    /// Marketing / advertising.
    #[serde(rename = "マーケティング・広告")]
    MarketingAdvertising,
    /// Consulting.
    #[serde(rename = "コンサルティング")]
    Consulting,
    /// Manufacturing / production.
    #[serde(rename = "製造・生産")]
    Manufacturing,
    /// Construction / civil works.
    #[serde(rename = "建設・工事")]
    Construction,
    /// Anything else.
    #[serde(rename = "その他")]
    Other,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 7] = [
        Category::ItSystems,
        Category::DesignCreative,
        Category::MarketingAdvertising,
        Category::Consulting,
        Category::Manufacturing,
        Category::Construction,
        Category::Other,
    ];

    /// Label used on the wire, in storage keys and in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Category::ItSystems => "IT・システム開発",
            Category::DesignCreative => "デザイン・クリエイティブ",
            Category::MarketingAdvertising => "マーケティング・広告",
            Category::Consulting => "コンサルティング",
            Category::Manufacturing => "製造・生産",
            Category::Construction => "建設・工事",
            Category::Other => "その他",
        }
    }

    /// Parse an exact label. Anything outside the closed set is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Parse a label, mapping unknown values to [`Category::Other`].
    pub fn from_label_or_other(label: &str) -> Self {
        Self::from_label(label.trim()).unwrap_or(Category::Other)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Category::from_label("IT"), None);
        assert_eq!(Category::from_label_or_other("宇宙開発"), Category::Other);
        assert_eq!(Category::from_label_or_other(" コンサルティング "), Category::Consulting);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Category::DesignCreative).unwrap();
        assert_eq!(json, "\"デザイン・クリエイティブ\"");
        let parsed: Category = serde_json::from_str("\"建設・工事\"").unwrap();
        assert_eq!(parsed, Category::Construction);
    }
}
