use serde::{Deserialize, Serialize};

use super::{Client, LineItem};

/// Pedido de geração de orçamento, montado pelo chamador a cada documento.
/// O total é informado, nunca recalculado a partir dos itens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub client: Client,
    pub items: Vec<LineItem>,
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteRequest {
    pub fn new(client: Client, items: Vec<LineItem>, total: f64) -> Self {
        QuoteRequest {
            client,
            items,
            total,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_notes_are_ignored() {
        let client = Client::new("Oficina Silva", "11222333000144");
        let request = QuoteRequest::new(client, Vec::new(), 0.0).with_notes("  \n ");
        assert!(!request.has_notes());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let json = r#"{
            "client": { "company_name": "Oficina Silva", "tax_id": "11222333000144" },
            "items": [ { "quantity": 2, "description": "Correia" } ],
            "total": 80.0
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].unit_value, 0.0);
        assert!(request.notes.is_none());
    }
}
