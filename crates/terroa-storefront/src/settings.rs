//! Company settings shown on invoices and the storefront header.

use serde::{Deserialize, Serialize};

/// Durable key of the company settings.
pub const SETTINGS_KEY: &str = "settings.company";

/// Seller details, editable by the administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompanySettings {
    pub name: String,
    /// CNPJ.
    pub tax_id: String,
    /// Logo URL. Empty means the built-in logo.
    pub logo: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: "TERROÁ".to_string(),
            tax_id: "12.345.678/0001-90".to_string(),
            logo: String::new(),
            address: "Fazenda Raiz, KM 42 - Chapada Diamantina, BA".to_string(),
            phone: "(71) 99876-5432".to_string(),
            email: "contato@terroa.com".to_string(),
        }
    }
}

impl CompanySettings {
    /// Check the fields an invoice cannot do without.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("company name is required".to_string());
        }
        if self.tax_id.trim().is_empty() {
            return Err("tax id is required".to_string());
        }
        Ok(())
    }

    pub fn has_custom_logo(&self) -> bool {
        !self.logo.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CompanySettings::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.has_custom_logo());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let settings: CompanySettings =
            serde_json::from_str(r#"{"name": "Terroá Sul"}"#).unwrap();
        assert_eq!(settings.name, "Terroá Sul");
        assert_eq!(settings.tax_id, "12.345.678/0001-90");
    }

    #[test]
    fn test_blank_name_rejected() {
        let settings = CompanySettings {
            name: "  ".to_string(),
            ..CompanySettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
