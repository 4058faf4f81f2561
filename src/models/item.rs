use serde::{Deserialize, Serialize};

/// Um item do orçamento. `unit_value` zero significa item sem preço
/// individual (mão de obra inclusa, peça de cortesia, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u32,
    pub description: String,
    #[serde(default)]
    pub unit_value: f64,
}

impl LineItem {
    pub fn new(quantity: u32, description: impl Into<String>, unit_value: f64) -> Self {
        LineItem {
            quantity,
            description: description.into(),
            unit_value,
        }
    }

    pub fn is_priced(&self) -> bool {
        self.unit_value > 0.0
    }

    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem::new(3, "Troca de rolamento", 150.0);
        assert_eq!(item.line_total(), 450.0);
    }

    #[test]
    fn test_zero_value_is_not_priced() {
        let item = LineItem::new(1, "Visita técnica", 0.0);
        assert!(!item.is_priced());
    }
}
