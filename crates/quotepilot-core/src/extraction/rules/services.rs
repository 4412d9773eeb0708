//! Service label detection.

use super::push_unique;

/// Label recorded when an invoice names no recognisable service.
pub const DEFAULT_SERVICE: &str = "一般業務";

/// Service dictionary, matched case-insensitively as substrings.
pub const SERVICE_LABELS: &[&str] = &[
    "Web開発",
    "Webアプリケーション開発",
    "アプリ開発",
    "モバイルアプリ開発",
    "システム開発",
    "フロントエンド開発",
    "バックエンド開発",
    "API開発",
    "管理画面開発",
    "データベース設計",
    "システム設計",
    "インフラ設計",
    "UI/UXデザイン",
    "UI設計",
    "UXデザイン",
    "Webデザイン",
    "ロゴデザイン",
    "グラフィックデザイン",
    "動画制作",
    "コンテンツ制作",
    "資料制作",
    "SEO対策",
    "リスティング広告",
    "広告運用",
    "SNS運用",
    "デジタルマーケティング",
    "ITコンサルティング",
    "経営コンサルティング",
    "戦略策定",
    "プロセス改善",
    "システム運用",
    "サーバー運用",
    "保守",
    "品質管理",
];

/// Return every dictionary label found in `text`.
///
/// Empty when nothing matches; callers that need a non-empty list
/// substitute [`DEFAULT_SERVICE`].
pub fn extract_services(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut services = Vec::new();

    for label in SERVICE_LABELS {
        if haystack.contains(&label.to_lowercase()) {
            push_unique(&mut services, *label);
        }
    }

    services
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let services = extract_services("WEB開発 一式、サーバー運用");
        assert!(services.contains(&"Web開発".to_string()));
        assert!(services.contains(&"サーバー運用".to_string()));
    }

    #[test]
    fn test_overlapping_labels() {
        let services = extract_services("Webアプリケーション開発");
        assert_eq!(services, vec!["Webアプリケーション開発".to_string()]);

        let services = extract_services("モバイルアプリ開発");
        assert!(services.contains(&"アプリ開発".to_string()));
        assert!(services.contains(&"モバイルアプリ開発".to_string()));
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(extract_services("").is_empty());
        assert!(extract_services("lorem ipsum").is_empty());
    }
}
