//! Structured extraction through a reasoning-model completion service.
//!
//! The model is asked for a single JSON object. Its answer is free-form, so
//! the object is located inside the text, parsed, and every field coerced
//! into a well-formed [`AiAnalysis`]. Once a JSON object has been parsed the
//! adapter never fails; bad shapes are normalised instead.

use quotepilot_completion::{CompletionBackend, CompletionRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::Category;

use super::rules::{DEFAULT_SERVICE, UNKNOWN_COMPANY};

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "あなたは業務委託契約書・請求書の分析を専門とするアシスタントです。\
文書から見積もり依頼に必要な業務内容を抽出し、指定された業務カテゴリに分類します。\
判断根拠を整理したうえで、正確な値のみを回答してください。";

/// Normalised answer of the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub company_name: String,
    pub business_category: Category,
    pub services: Vec<String>,
    pub total_amount: u64,
    pub project_scope: String,
    pub timeline: String,
    pub requirements: Vec<String>,
    pub contact_info: String,
}

/// AI extraction adapter over any [`CompletionBackend`].
pub struct AiExtractor<B> {
    backend: B,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl<B: CompletionBackend> AiExtractor<B> {
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            max_tokens: 1200,
            temperature: 0.1,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the completion request for a document.
    pub fn build_request(&self, document_text: &str) -> CompletionRequest {
        CompletionRequest::new(&self.model, SYSTEM_PROMPT, analysis_prompt(document_text))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }

    /// Analyse a document.
    ///
    /// Fails only when the service cannot be reached or its answer holds no
    /// parseable JSON object.
    pub async fn analyze(&self, document_text: &str) -> Result<AiAnalysis, ExtractionError> {
        let request = self.build_request(document_text);
        info!(
            "Requesting analysis from {} (model {}, {} chars)",
            self.backend.name(),
            self.model,
            document_text.chars().count()
        );

        let completion = self
            .backend
            .complete(&request)
            .await
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        debug!("Completion answer: {} chars", completion.text.len());
        parse_answer(&completion.text)
    }
}

/// User prompt embedding the document and the expected JSON keys.
pub fn analysis_prompt(document_text: &str) -> String {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();

    format!(
        "次の文書から見積もり依頼に使う業務情報を抽出してください。\n\
         \n\
         ---\n\
         {document_text}\n\
         ---\n\
         \n\
         手順:\n\
         1. 文書の種類（請求書・見積書・契約書など）を判断する\n\
         2. 発注者または受注者の企業名を特定する\n\
         3. 業務内容と技術要素を具体的に洗い出す\n\
         4. 金額（税込を優先）を数値で求める\n\
         5. 期間・納期と要件を整理する\n\
         \n\
         回答は次のキーを持つJSONオブジェクトを1つだけ含めてください:\n\
         {{\n\
           \"companyName\": \"企業名\",\n\
           \"businessCategory\": \"{categories}\",\n\
           \"services\": [\"具体的な業務内容\"],\n\
           \"totalAmount\": 0,\n\
           \"projectScope\": \"範囲と成果物\",\n\
           \"timeline\": \"期間・納期\",\n\
           \"requirements\": [\"技術要件や制約\"],\n\
           \"contactInfo\": \"連絡先\"\n\
         }}\n",
        categories = categories.join("|"),
    )
}

/// Locate, parse and normalise the JSON object in a model answer.
pub fn parse_answer(answer: &str) -> Result<AiAnalysis, ExtractionError> {
    let object = locate_json(answer).ok_or_else(|| {
        warn!("No JSON object in completion answer");
        ExtractionError::Unparseable(preview(answer))
    })?;

    Ok(coerce(&object))
}

/// Find the JSON object a model answer carries.
///
/// Candidates are the top-level brace-delimited blocks of the answer,
/// tried from last to first. Models tend to put reasoning prose before the
/// payload, so the block closest to the end is preferred.
pub fn locate_json(answer: &str) -> Option<Map<String, Value>> {
    brace_blocks(answer).into_iter().rev().find_map(|block| {
        match serde_json::from_str::<Value>(block) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(e) => {
                debug!("Skipping brace block that is not JSON: {}", e);
                None
            }
        }
    })
}

/// Outermost balanced brace blocks of `text`, in order of appearance.
///
/// One pass with a stack of open positions. A '{' that never closes does
/// not hide the balanced blocks after it. Braces inside string literals
/// are ignored; strings are only tracked within a block.
fn brace_blocks(text: &str) -> Vec<&str> {
    let mut opens: Vec<usize> = Vec::new();
    let mut blocks: Vec<(usize, usize)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if !opens.is_empty() => in_string = true,
            '{' => opens.push(i),
            '}' => {
                if let Some(open) = opens.pop() {
                    // Blocks closed earlier inside this one are no longer outermost.
                    while blocks.last().is_some_and(|&(inner, _)| inner > open) {
                        blocks.pop();
                    }
                    blocks.push((open, i + c.len_utf8()));
                }
            }
            _ => {}
        }
    }

    blocks.into_iter().map(|(open, close)| &text[open..close]).collect()
}

fn coerce(object: &Map<String, Value>) -> AiAnalysis {
    let text = |key: &str| -> String {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let company_name = match text("companyName") {
        name if name.is_empty() => UNKNOWN_COMPANY.to_string(),
        name => name,
    };

    let business_category = object
        .get("businessCategory")
        .and_then(Value::as_str)
        .map(Category::from_label_or_other)
        .unwrap_or_default();

    let services = match object.get("services") {
        Some(Value::Array(items)) => strings(items),
        _ => vec![DEFAULT_SERVICE.to_string()],
    };

    let requirements = match object.get("requirements") {
        Some(Value::Array(items)) => strings(items),
        _ => Vec::new(),
    };

    let total_amount = object
        .get("totalAmount")
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.round() as u64)
        .unwrap_or(0);

    AiAnalysis {
        company_name,
        business_category,
        services,
        total_amount,
        project_scope: text("projectScope"),
        timeline: text("timeline"),
        requirements,
        contact_info: text("contactInfo"),
    }
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn preview(answer: &str) -> String {
    let head: String = answer.chars().take(80).collect();
    if head.len() < answer.len() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quotepilot_completion::{Completion, CompletionError};

    struct Scripted(Result<&'static str, ()>);

    impl CompletionBackend for Scripted {
        async fn complete(&self, _request: &CompletionRequest) -> quotepilot_completion::Result<Completion> {
            match self.0 {
                Ok(text) => Ok(Completion::new(text)),
                Err(()) => Err(CompletionError::Timeout(5)),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_full_answer() {
        let answer = r#"{
            "companyName": "株式会社Foo",
            "businessCategory": "デザイン・クリエイティブ",
            "services": ["ロゴデザイン", "名刺デザイン"],
            "totalAmount": 250000,
            "projectScope": "CI一式",
            "timeline": "2か月",
            "requirements": ["Illustrator納品"],
            "contactInfo": "info@foo.example"
        }"#;

        assert_eq!(
            parse_answer(answer).unwrap(),
            AiAnalysis {
                company_name: "株式会社Foo".to_string(),
                business_category: Category::DesignCreative,
                services: vec!["ロゴデザイン".to_string(), "名刺デザイン".to_string()],
                total_amount: 250_000,
                project_scope: "CI一式".to_string(),
                timeline: "2か月".to_string(),
                requirements: vec!["Illustrator納品".to_string()],
                contact_info: "info@foo.example".to_string(),
            }
        );
    }

    #[test]
    fn test_prose_before_json_uses_last_block() {
        let answer = "Reasoning: the header {draft} mentions {\"companyName\": \"Old\"}.\n\
                      Final answer:\n{\"companyName\": \"New\", \"services\": []}";
        let analysis = parse_answer(answer).unwrap();
        assert_eq!(analysis.company_name, "New");
        assert!(analysis.services.is_empty());
    }

    #[test]
    fn test_invalid_trailing_block_falls_back_to_earlier_one() {
        let answer = "{\"companyName\": \"Bar\"}\nnote: {not json}";
        assert_eq!(parse_answer(answer).unwrap().company_name, "Bar");
    }

    #[test]
    fn test_braces_inside_strings() {
        let answer = r#"{"companyName": "A}B{C", "timeline": "Q3"}"#;
        let analysis = parse_answer(answer).unwrap();
        assert_eq!(analysis.company_name, "A}B{C");
        assert_eq!(analysis.timeline, "Q3");
    }

    #[test]
    fn test_unclosed_brace_before_payload() {
        let answer = "Draft {\"companyName\": \"Old\"\nFinal: {\"companyName\": \"New\"}";
        assert_eq!(parse_answer(answer).unwrap().company_name, "New");
    }

    #[test]
    fn test_long_unbalanced_answer() {
        let mut answer = "{".repeat(200_000);
        answer.push_str(r#"{"companyName": "Deep"}"#);
        assert_eq!(parse_answer(&answer).unwrap().company_name, "Deep");
        assert_eq!(brace_blocks(&"{".repeat(200_000)), Vec::<&str>::new());
    }

    #[test]
    fn test_no_json_is_unparseable() {
        assert!(matches!(parse_answer("I could not read the document."), Err(ExtractionError::Unparseable(_))));
        assert!(matches!(parse_answer("{unclosed"), Err(ExtractionError::Unparseable(_))));
    }

    #[test]
    fn test_field_coercion() {
        let answer = r#"{"businessCategory": "宇宙開発", "services": "Web開発",
                          "totalAmount": "300000", "requirements": null}"#;
        let analysis = parse_answer(answer).unwrap();
        assert_eq!(analysis.company_name, UNKNOWN_COMPANY);
        assert_eq!(analysis.business_category, Category::Other);
        assert_eq!(analysis.services, vec![DEFAULT_SERVICE.to_string()]);
        assert_eq!(analysis.total_amount, 0);
        assert!(analysis.requirements.is_empty());
        assert_eq!(analysis.project_scope, "");
    }

    #[test]
    fn test_amount_coercion() {
        let amount = |raw: &str| parse_answer(&format!("{{\"totalAmount\": {raw}}}")).unwrap().total_amount;
        assert_eq!(amount("1200.6"), 1201);
        assert_eq!(amount("-50"), 0);
        assert_eq!(amount("0"), 0);
    }

    #[test]
    fn test_request_shape() {
        let extractor = AiExtractor::new(Scripted(Ok("{}")), "o4-mini").with_max_tokens(800);
        let request = extractor.build_request("請求書本文");
        assert_eq!(request.model, "o4-mini");
        assert_eq!(request.max_tokens, 800);
        assert!(request.temperature <= 0.2);
        assert_eq!(request.system_prompt, SYSTEM_PROMPT);
        assert!(request.user_prompt.contains("請求書本文"));
        for key in ["companyName", "businessCategory", "services", "totalAmount", "projectScope", "timeline", "requirements", "contactInfo"] {
            assert!(request.user_prompt.contains(key), "prompt is missing {key}");
        }
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let extractor = AiExtractor::new(Scripted(Err(())), "o4-mini");
        assert!(matches!(extractor.analyze("text").await, Err(ExtractionError::Transport(_))));
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let extractor = AiExtractor::new(Scripted(Ok("結果:\n{\"companyName\": \"Foo\", \"businessCategory\": \"コンサルティング\"}")), "o4-mini");
        let analysis = extractor.analyze("text").await.unwrap();
        assert_eq!(analysis.company_name, "Foo");
        assert_eq!(analysis.business_category, Category::Consulting);
        assert_eq!(analysis.services, vec![DEFAULT_SERVICE.to_string()]);
    }
}
