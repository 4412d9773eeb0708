//! Demo company catalogue for local runs.

use tracing::info;

use super::{CompanyRepository, KvStore, StoreResult};
use crate::models::{Category, Company, ContactForm, FormField};

fn form(url: &str, fields: &[(&str, &str, bool)], is_quote_form: bool) -> ContactForm {
    ContactForm {
        url: url.to_string(),
        fields: fields
            .iter()
            .map(|(name, field_type, required)| FormField::new(*name, *field_type, *required))
            .collect(),
        is_quote_form,
    }
}

/// Eight sample companies covering four categories plus `その他`.
pub fn demo_companies() -> Vec<Company> {
    vec![
        Company::new("comp1", "テックソリューション株式会社")
            .with_website("https://techsolution.example.com")
            .with_email("sales@techsolution.example.com")
            .with_contact_form(form(
                "https://techsolution.example.com/contact",
                &[("name", "text", true), ("email", "email", true), ("message", "textarea", true)],
                false,
            ))
            .with_industry(Category::ItSystems.label())
            .with_description("Webアプリケーション開発を専門とする企業"),
        Company::new("comp2", "株式会社デザインスタジオ")
            .with_website("https://design-studio.example.com")
            .with_email("info@design-studio.example.com")
            .with_industry(Category::DesignCreative.label())
            .with_description("UI/UXデザイン、ブランディングを手がける"),
        Company::new("comp3", "マーケティングプラス株式会社")
            .with_website("https://marketing-plus.example.com")
            .with_email("contact@marketing-plus.example.com")
            .with_contact_form(form(
                "https://marketing-plus.example.com/quote",
                &[("company", "text", true), ("budget", "number", true), ("description", "textarea", true)],
                true,
            ))
            .with_industry(Category::MarketingAdvertising.label())
            .with_description("デジタルマーケティング、SNS運用"),
        Company::new("comp4", "総合ビジネスサポート株式会社")
            .with_website("https://business-support.example.com")
            .with_email("inquiry@business-support.example.com")
            .with_contact_form(form(
                "https://business-support.example.com/contact",
                &[
                    ("name", "text", true),
                    ("company", "text", true),
                    ("phone", "tel", false),
                    ("email", "email", true),
                    ("service_type", "select", true),
                    ("description", "textarea", true),
                ],
                true,
            ))
            .with_industry(Category::Other.label())
            .with_description("様々な業務に対応する総合ビジネスサポート企業"),
        Company::new("comp5", "株式会社オールインワン")
            .with_website("https://allinone.example.com")
            .with_email("sales@allinone.example.com")
            .with_industry(Category::Other.label())
            .with_description("イベント運営、メディア制作、コンサルティングなど幅広く対応"),
        Company::new("comp6", "プロフェッショナル・サービス合同会社")
            .with_website("https://pro-service.example.com")
            .with_email("contact@pro-service.example.com")
            .with_contact_form(form(
                "https://pro-service.example.com/estimate",
                &[
                    ("project_type", "select", true),
                    ("timeline", "text", true),
                    ("budget_range", "select", true),
                    ("details", "textarea", true),
                ],
                true,
            ))
            .with_industry(Category::Other.label())
            .with_description("専門性を活かした各種サービス提供"),
        Company::new("comp7", "株式会社コンサルティングワークス")
            .with_website("https://consulting-works.example.com")
            .with_email("hello@consulting-works.example.com")
            .with_industry(Category::Consulting.label())
            .with_description("経営・財務・人事コンサルティング専門"),
        Company::new("comp8", "メディア・クリエイト株式会社")
            .with_website("https://media-create.example.com")
            .with_email("info@media-create.example.com")
            .with_contact_form(form(
                "https://media-create.example.com/quote-form",
                &[
                    ("media_type", "select", true),
                    ("duration", "text", true),
                    ("target_audience", "text", false),
                    ("description", "textarea", true),
                ],
                true,
            ))
            .with_industry(Category::Other.label())
            .with_description("動画制作、SNS運営、イベント企画・運営"),
    ]
}

/// Save the demo catalogue when no company exists yet. Returns how many
/// companies were written.
pub fn seed_if_empty<S: KvStore>(companies: &CompanyRepository<S>) -> StoreResult<usize> {
    if !companies.is_empty()? {
        return Ok(0);
    }

    let demo = demo_companies();
    for company in &demo {
        companies.save(company)?;
    }
    info!("Seeded {} demo companies", demo.len());
    Ok(demo.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_seed_once() {
        let repo = CompanyRepository::new(MemoryStore::new());
        assert_eq!(seed_if_empty(&repo).unwrap(), 8);
        assert_eq!(seed_if_empty(&repo).unwrap(), 0);
        assert_eq!(repo.find_all().unwrap().len(), 8);
        assert_eq!(repo.search_by_category("その他").unwrap().len(), 4);
    }

    #[test]
    fn test_catalogue_ids_unique() {
        let companies = demo_companies();
        let mut ids: Vec<&str> = companies.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), companies.len());
    }
}
