//! Keyword-bucket business category classifier.

use crate::models::Category;

/// Category keyword buckets, checked in order. First hit wins.
///
/// Keywords are lower-case; the haystack is lower-cased before matching.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::ItSystems,
        &[
            "システム", "アプリ", "web", "api", "データベース", "サーバー", "プログラム",
            "コーディング", "開発", "エンジニア", "react", "vue", "angular", "javascript",
            "typescript", "python", "java",
        ],
    ),
    (
        Category::DesignCreative,
        &[
            "デザイン", "ux", "ロゴ", "ブランド", "グラフィック", "イラスト", "動画", "映像",
            "クリエイティブ", "アート",
        ],
    ),
    (
        Category::MarketingAdvertising,
        &[
            "マーケティング", "広告", "seo", "sns", "プロモーション", "宣伝", "ブランディング",
            "キャンペーン",
        ],
    ),
    (
        Category::Consulting,
        &[
            "コンサル", "戦略", "経営", "業務改善", "dx", "組織", "人事", "財務", "会計",
            "プロセス", "最適化",
        ],
    ),
    (
        Category::Manufacturing,
        &["製造", "生産", "工場", "品質", "製品", "部品", "組立"],
    ),
    (
        Category::Construction,
        &["建設", "工事", "施工", "設計", "建築", "土木", "リフォーム"],
    ),
];

/// Classify a document from its text and service labels.
///
/// Order-sensitive: a text matching keywords from several buckets resolves
/// to the bucket declared first in [`CATEGORY_KEYWORDS`].
pub fn classify<S: AsRef<str>>(text: &str, services: &[S]) -> Category {
    let mut haystack = text.to_lowercase();
    for service in services {
        haystack.push(' ');
        haystack.push_str(&service.as_ref().to_lowercase());
    }

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
