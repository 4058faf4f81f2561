pub mod client;
pub mod item;
pub mod quote;

pub use client::Client;
pub use item::LineItem;
pub use quote::QuoteRequest;
