pub mod core;
pub mod formatters;
pub mod models;
pub mod pdf;

// Re-export commonly used types
pub use self::core::{
    ColumnAlign, DocumentError, DocumentResult, Margin, Orientation, PageSize, PdfConfig,
    TableData,
};
pub use formatters::{format_currency, mask_cnpj, mask_cpf};
pub use models::{Client, LineItem, QuoteRequest};
pub use pdf::{GeneratedQuote, QuoteGenerator, TableVariant};
