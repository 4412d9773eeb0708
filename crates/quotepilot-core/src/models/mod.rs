//! Domain models.

pub mod category;
pub mod company;
pub mod config;
pub mod invoice;
pub mod quote_request;

pub use category::Category;
pub use company::{Company, ContactForm, ContactMethod, ContactPriority, FormField};
pub use config::{AiConfig, QuotePilotConfig, StoreConfig, UploadConfig};
pub use invoice::{BusinessInfo, Invoice, QuoteSummary};
pub use quote_request::{QuoteRequest, QuoteResponse, QuoteStatus, ResponseKind};
