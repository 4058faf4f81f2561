pub mod canvas;
pub mod generator;
pub mod metrics;

pub use canvas::{Align, Canvas, FontStyle};
pub use generator::{build_items_table, quote_filename, GeneratedQuote, QuoteGenerator, TableVariant};
