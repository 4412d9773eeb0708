//! Quote request lifecycle.
//!
//! Transitions consume the request and return the next state, so an old
//! value kept around (e.g. via `clone`) stays a valid snapshot.
//!
//! ```text
//! pending ──mark_sent──▶ sent ──mark_responded──▶ responded
//!    └──────────── mark_failed (from any state) ──────────▶ failed
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TransitionError;

use super::{Company, ContactMethod, Invoice, QuoteSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Sent,
    Responded,
    Failed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Responded => "responded",
            QuoteStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Quote,
    Rejection,
    RequestMoreInfo,
    Error,
}

/// A company's answer, or the error that ended the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl QuoteResponse {
    pub fn new(kind: ResponseKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            amount: None,
            deadline: None,
        }
    }

    pub fn quote(content: impl Into<String>, amount: u64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::new(ResponseKind::Quote, content)
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(ResponseKind::Error, content)
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A request for a quote sent to one company about one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: String,
    pub invoice: Invoice,
    pub target_company: Company,
    pub contact_method: ContactMethod,
    pub summary: QuoteSummary,
    pub status: QuoteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<QuoteResponse>,
}

impl QuoteRequest {
    /// New pending request using the company's preferred contact method.
    pub fn new(invoice: Invoice, target_company: Company) -> Self {
        let contact_method = target_company.preferred_contact_method();
        let summary = QuoteSummary::from_invoice(&invoice);

        Self {
            id: Uuid::new_v4().to_string(),
            invoice,
            target_company,
            contact_method,
            summary,
            status: QuoteStatus::Pending,
            sent_at: None,
            responded_at: None,
            response: None,
        }
    }

    /// `pending → sent`. An illegal move leaves the request untouched.
    pub fn mark_sent(&mut self) -> Result<(), TransitionError> {
        self.expect_status(QuoteStatus::Pending, QuoteStatus::Sent)?;
        self.status = QuoteStatus::Sent;
        self.sent_at = Some(Utc::now());
        Ok(())
    }

    /// `sent → responded`. An illegal move leaves the request untouched.
    pub fn mark_responded(&mut self, response: QuoteResponse) -> Result<(), TransitionError> {
        self.expect_status(QuoteStatus::Sent, QuoteStatus::Responded)?;
        self.status = QuoteStatus::Responded;
        self.responded_at = Some(Utc::now());
        self.response = Some(response);
        Ok(())
    }

    /// `any → failed`, recording the error as the response.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = QuoteStatus::Failed;
        self.response = Some(QuoteResponse::error(error));
    }

    fn expect_status(&self, expected: QuoteStatus, to: QuoteStatus) -> Result<(), TransitionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TransitionError {
                from: self.status.as_str(),
                to: to.as_str(),
            })
        }
    }
}
