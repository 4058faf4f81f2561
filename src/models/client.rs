use serde::{Deserialize, Serialize};

/// Dados do cliente exibidos no orçamento. Todos os campos são texto livre;
/// nada é validado, apenas reformatado para exibição.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub company_name: String,
    /// CNPJ da empresa, aceito em qualquer formato.
    pub tax_id: String,
    pub representative_name: Option<String>,
    /// CPF do representante.
    pub representative_tax_id: Option<String>,
    pub machine_brand: Option<String>,
    pub machine_model: Option<String>,
}

impl Client {
    pub fn new(company_name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Client {
            company_name: company_name.into(),
            tax_id: tax_id.into(),
            representative_name: None,
            representative_tax_id: None,
            machine_brand: None,
            machine_model: None,
        }
    }

    pub fn with_representative(
        mut self,
        name: impl Into<String>,
        tax_id: impl Into<String>,
    ) -> Self {
        self.representative_name = Some(name.into());
        self.representative_tax_id = Some(tax_id.into());
        self
    }

    pub fn with_machine(mut self, brand: impl Into<String>, model: impl Into<String>) -> Self {
        self.machine_brand = Some(brand.into());
        self.machine_model = Some(model.into());
        self
    }

    /// The representative line is rendered when at least one of the two
    /// fields is present and non-empty.
    pub fn has_representative_info(&self) -> bool {
        non_empty(&self.representative_name) || non_empty(&self.representative_tax_id)
    }

    /// Same rule for the machine brand/model line.
    pub fn has_machine_info(&self) -> bool {
        non_empty(&self.machine_brand) || non_empty(&self.machine_model)
    }
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_representative_info_when_both_missing() {
        let client = Client::new("Padaria Central", "12345678000190");
        assert!(!client.has_representative_info());
        assert!(!client.has_machine_info());
    }

    #[test]
    fn test_representative_info_with_single_field() {
        let mut client = Client::new("Padaria Central", "12345678000190");
        client.representative_name = Some("João".to_string());
        assert!(client.has_representative_info());
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let mut client = Client::new("Padaria Central", "12345678000190");
        client.representative_name = Some("   ".to_string());
        client.representative_tax_id = Some(String::new());
        assert!(!client.has_representative_info());
    }

    #[test]
    fn test_machine_info_with_single_field() {
        let mut client = Client::new("Padaria Central", "12345678000190");
        client.machine_model = Some("MX-500".to_string());
        assert!(client.has_machine_info());
    }
}
