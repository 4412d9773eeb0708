//! Uploaded invoice records and the factory that builds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::extraction::rules::{push_unique, DEFAULT_SERVICE};
use crate::extraction::{AiAnalysis, ExtractionOutcome, HeuristicExtractor};
use crate::pdf::UploadedFile;

use super::Category;

/// Scope recorded for invoices built by the offline rules.
pub const HEURISTIC_SCOPE: &str = "詳細な分析情報なし";

/// Timeline recorded for invoices built by the offline rules.
pub const UNKNOWN_TIMELINE: &str = "不明";

const NO_SCOPE: &str = "スコープ情報なし";

/// Words looked for in a project scope when building matching keywords.
const SCOPE_KEYWORDS: &[&str] = &[
    "React", "Vue", "Angular", "JavaScript", "TypeScript", "Node.js", "Python", "Java", "PHP",
    "Ruby", "Go", "Rust", "AWS", "Azure", "GCP", "Docker", "Kubernetes", "API", "REST", "GraphQL",
    "データベース", "MySQL", "PostgreSQL", "AI", "機械学習", "データ分析", "BI", "DX", "UI", "UX",
    "デザイン", "ブランディング", "マーケティング", "SEO", "SEM", "SNS", "広告", "コンサルティング",
    "業務改善", "プロセス",
];

/// An analysed invoice. Built once at upload time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub file_name: String,
    /// Raw document text, or a short note when none could be extracted.
    pub extracted_text: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_category: Option<Category>,
    #[serde(default)]
    pub services: Vec<String>,
    /// Total in yen; `0` means unknown.
    #[serde(default)]
    pub total_amount: u64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    /// Why AI analysis was not used, when the record came from the offline rules
    /// after a degraded extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_note: Option<String>,
}

/// Summary of the work an invoice describes, as used by [`Invoice::detailed_business_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    pub category: Category,
    pub services: Vec<String>,
    pub scope: String,
    pub requirements: Vec<String>,
    pub estimated_budget: u64,
}

/// What a quote request asks a company to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub business_category: Category,
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_amount: Option<u64>,
    pub description: String,
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

fn services_or_default(services: Vec<String>) -> Vec<String> {
    if services.is_empty() {
        vec![DEFAULT_SERVICE.to_string()]
    } else {
        services
    }
}

impl Invoice {
    /// Build an invoice from a successful AI analysis.
    pub fn from_ai_analysis(file_name: impl Into<String>, extracted_text: impl Into<String>, analysis: AiAnalysis) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            extracted_text: extracted_text.into(),
            company_name: analysis.company_name,
            business_category: Some(analysis.business_category),
            services: services_or_default(analysis.services),
            total_amount: analysis.total_amount,
            uploaded_at: Utc::now(),
            project_scope: non_empty(analysis.project_scope),
            timeline: non_empty(analysis.timeline),
            requirements: analysis.requirements,
            contact_info: non_empty(analysis.contact_info),
            analysis_note: None,
        }
    }

    /// Build an invoice from the offline rules alone.
    pub fn from_heuristics(file_name: impl Into<String>, extracted_text: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let extracted_text = extracted_text.into();
        let findings = HeuristicExtractor::new().extract_with_file_name(&extracted_text, Some(&file_name));

        Self {
            id: Uuid::new_v4().to_string(),
            file_name,
            extracted_text,
            company_name: findings.company_name,
            business_category: Some(findings.business_category),
            services: services_or_default(findings.services),
            total_amount: findings.total_amount,
            uploaded_at: Utc::now(),
            project_scope: Some(HEURISTIC_SCOPE.to_string()),
            timeline: Some(UNKNOWN_TIMELINE.to_string()),
            requirements: Vec::new(),
            contact_info: None,
            analysis_note: None,
        }
    }

    /// Build an invoice from an orchestrator outcome.
    ///
    /// A degraded outcome falls back to the offline rules and keeps the reason
    /// in `analysis_note`. When no text was extracted at all, the stored text
    /// is replaced by a note naming the file.
    pub fn from_outcome(file: &UploadedFile, outcome: ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Success { extracted_text, analysis } => {
                Self::from_ai_analysis(&file.file_name, extracted_text, analysis)
            }
            ExtractionOutcome::Degraded { extracted_text, reason } => {
                debug!("Building {} from heuristics ({})", file.file_name, reason);
                let mut invoice = Self::from_heuristics(&file.file_name, extracted_text);
                if invoice.extracted_text.trim().is_empty() {
                    invoice.extracted_text = degraded_note(file, &reason);
                }
                invoice.analysis_note = Some(reason);
                invoice
            }
        }
    }

    pub fn detailed_business_info(&self) -> BusinessInfo {
        BusinessInfo {
            category: self.business_category.unwrap_or_default(),
            services: self.services.clone(),
            scope: self
                .project_scope
                .clone()
                .unwrap_or_else(|| NO_SCOPE.to_string()),
            requirements: self.requirements.clone(),
            estimated_budget: self.total_amount,
        }
    }

    /// Services, requirements and known technology words from the scope,
    /// de-duplicated in that order.
    pub fn matching_keywords(&self) -> Vec<String> {
        let mut keywords = Vec::new();
        for value in self.services.iter().chain(&self.requirements) {
            push_unique(&mut keywords, value.as_str());
        }

        if let Some(scope) = &self.project_scope {
            let scope = scope.to_lowercase();
            for keyword in SCOPE_KEYWORDS {
                if scope.contains(&keyword.to_lowercase()) {
                    push_unique(&mut keywords, *keyword);
                }
            }
        }

        keywords
    }
}

fn degraded_note(file: &UploadedFile, reason: &str) -> String {
    format!(
        "ファイル名: {}\nサイズ: {:.1}KB\nAI分析を利用できなかったため、ファイル名から簡易分析しました（{}）",
        file.file_name,
        file.size() as f64 / 1024.0,
        reason
    )
}

impl QuoteSummary {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let description = match &invoice.project_scope {
            Some(scope) if scope != HEURISTIC_SCOPE => scope.clone(),
            _ => format!("{}様の請求書（{}）に基づく見積もり依頼", invoice.company_name, invoice.file_name),
        };

        Self {
            business_category: invoice.business_category.unwrap_or_default(),
            services: invoice.services.clone(),
            estimated_amount: (invoice.total_amount > 0).then_some(invoice.total_amount),
            description,
        }
    }
}
