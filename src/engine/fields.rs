use serde::Deserialize;
use std::collections::BTreeMap;

/// Every editable scalar on the quotation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    CompanyName,
    CompanyTagline,
    LogoText,
    QuotationNumber,
    InvoiceDate,
    ValidUntil,
    ClientName,
    ClientCompany,
    ClientAddress,
    ClientContact,
    ProjectName,
    DeliveryTime,
    Maintenance,
    PackageCost,
    DiscountName,
    DiscountAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Company,
    Quotation,
    Client,
    Project,
    Pricing,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Company => "Company",
            Section::Quotation => "Quotation",
            Section::Client => "Client",
            Section::Project => "Project",
            Section::Pricing => "Pricing",
        }
    }
}

impl FieldKey {
    /// Form order.
    pub const ALL: [FieldKey; 16] = [
        FieldKey::CompanyName,
        FieldKey::CompanyTagline,
        FieldKey::LogoText,
        FieldKey::QuotationNumber,
        FieldKey::InvoiceDate,
        FieldKey::ValidUntil,
        FieldKey::ClientName,
        FieldKey::ClientCompany,
        FieldKey::ClientAddress,
        FieldKey::ClientContact,
        FieldKey::ProjectName,
        FieldKey::DeliveryTime,
        FieldKey::Maintenance,
        FieldKey::PackageCost,
        FieldKey::DiscountName,
        FieldKey::DiscountAmount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::CompanyName => "Company Name",
            FieldKey::CompanyTagline => "Tagline",
            FieldKey::LogoText => "Logo Text",
            FieldKey::QuotationNumber => "Quotation No.",
            FieldKey::InvoiceDate => "Date",
            FieldKey::ValidUntil => "Valid Until",
            FieldKey::ClientName => "Client Name",
            FieldKey::ClientCompany => "Client Company",
            FieldKey::ClientAddress => "Address",
            FieldKey::ClientContact => "Contact",
            FieldKey::ProjectName => "Project",
            FieldKey::DeliveryTime => "Delivery Time",
            FieldKey::Maintenance => "Maintenance",
            FieldKey::PackageCost => "Package Cost",
            FieldKey::DiscountName => "Discount Name",
            FieldKey::DiscountAmount => "Discount Amount",
        }
    }

    pub fn section(self) -> Section {
        match self {
            FieldKey::CompanyName | FieldKey::CompanyTagline | FieldKey::LogoText => {
                Section::Company
            }
            FieldKey::QuotationNumber | FieldKey::InvoiceDate | FieldKey::ValidUntil => {
                Section::Quotation
            }
            FieldKey::ClientName
            | FieldKey::ClientCompany
            | FieldKey::ClientAddress
            | FieldKey::ClientContact => Section::Client,
            FieldKey::ProjectName | FieldKey::DeliveryTime | FieldKey::Maintenance => {
                Section::Project
            }
            FieldKey::PackageCost | FieldKey::DiscountName | FieldKey::DiscountAmount => {
                Section::Pricing
            }
        }
    }
}

/// Current value of every form field. All keys are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    values: BTreeMap<FieldKey, String>,
}

impl Default for FormFields {
    fn default() -> Self {
        Self::new()
    }
}

impl FormFields {
    pub fn new() -> Self {
        Self {
            values: FieldKey::ALL
                .iter()
                .map(|&k| (k, String::new()))
                .collect(),
        }
    }

    pub fn get(&self, key: FieldKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Values the form starts with and returns to on reset. Dates are not part of
/// the baseline; they are always derived from the current day.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Baseline {
    pub company_name: String,
    pub company_tagline: String,
    pub logo_text: String,
    pub quotation_number: String,
    pub client_name: String,
    pub client_company: String,
    pub client_address: String,
    pub client_contact: String,
    pub project_name: String,
    pub delivery_time: String,
    pub maintenance: String,
    pub package_cost: String,
    pub discount_name: String,
    pub discount_amount: String,
    pub line_items: Vec<String>,
}

pub fn default_line_items() -> Vec<String> {
    [
        "Custom Website Design & Development (Up to 5 Pages)",
        "Responsive & Mobile-Friendly Layout (optimized for all devices)",
        "User-Friendly Content Management System (CMS) (easy updates without coding)",
        "Contact Form Integration",
        "Google Maps Integration",
        "Basic On-Page SEO Setup (meta tags, headings, alt text, speed optimization)",
        "Social Media Integration (Facebook, Instagram, LinkedIn links/buttons)",
        "Image Optimization & Galleries (for better SEO and user experience)",
        "Training & Documentation",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            company_name: "PRANAYUV TECHNOLOGIES PVT LTD".to_string(),
            company_tagline: "Empowering Lives through Innovation".to_string(),
            logo_text: "PV".to_string(),
            quotation_number: "Q2025001".to_string(),
            client_name: "Apna Advertising".to_string(),
            client_company: "Apna Advertising Pvt Ltd".to_string(),
            client_address: "Pahar Ganj, New Delhi 110055".to_string(),
            client_contact: "9389271138".to_string(),
            project_name: "Website development (Up to 5 pages)".to_string(),
            delivery_time: "3-4 weeks from advance & assets".to_string(),
            maintenance: "18 months included (1 hour/month basic updates)".to_string(),
            package_cost: "20000".to_string(),
            discount_name: "Inaugural Client Discount (FIRST50)".to_string(),
            discount_amount: "8000".to_string(),
            line_items: default_line_items(),
        }
    }
}

impl Baseline {
    /// Write every non-date field onto `fields`.
    pub fn apply_to(&self, fields: &mut FormFields) {
        fields.set(FieldKey::CompanyName, &self.company_name);
        fields.set(FieldKey::CompanyTagline, &self.company_tagline);
        fields.set(FieldKey::LogoText, &self.logo_text);
        fields.set(FieldKey::QuotationNumber, &self.quotation_number);
        fields.set(FieldKey::ClientName, &self.client_name);
        fields.set(FieldKey::ClientCompany, &self.client_company);
        fields.set(FieldKey::ClientAddress, &self.client_address);
        fields.set(FieldKey::ClientContact, &self.client_contact);
        fields.set(FieldKey::ProjectName, &self.project_name);
        fields.set(FieldKey::DeliveryTime, &self.delivery_time);
        fields.set(FieldKey::Maintenance, &self.maintenance);
        fields.set(FieldKey::PackageCost, &self.package_cost);
        fields.set(FieldKey::DiscountName, &self.discount_name);
        fields.set(FieldKey::DiscountAmount, &self.discount_amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fields_are_all_empty() {
        let fields = FormFields::new();
        assert_eq!(fields.iter().count(), FieldKey::ALL.len());
        assert!(fields.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_set_overwrites() {
        let mut fields = FormFields::new();
        fields.set(FieldKey::ClientName, "Acme");
        fields.set(FieldKey::ClientName, "Globex");
        assert_eq!(fields.get(FieldKey::ClientName), "Globex");
    }

    #[test]
    fn test_baseline_leaves_dates_alone() {
        let mut fields = FormFields::new();
        fields.set(FieldKey::InvoiceDate, "2026-01-01");
        Baseline::default().apply_to(&mut fields);
        assert_eq!(fields.get(FieldKey::InvoiceDate), "2026-01-01");
        assert_eq!(fields.get(FieldKey::ValidUntil), "");
        assert_eq!(fields.get(FieldKey::CompanyName), "PRANAYUV TECHNOLOGIES PVT LTD");
        assert_eq!(fields.get(FieldKey::PackageCost), "20000");
        assert_eq!(fields.get(FieldKey::DiscountAmount), "8000");
    }

    #[test]
    fn test_default_baseline_has_nine_items() {
        let b = Baseline::default();
        assert_eq!(b.line_items.len(), 9);
        assert_eq!(b.line_items[8], "Training & Documentation");
    }

    #[test]
    fn test_sections_follow_form_order() {
        let sections: Vec<Section> = FieldKey::ALL.iter().map(|k| k.section()).collect();
        let mut deduped = sections.clone();
        deduped.dedup();
        assert_eq!(
            deduped,
            vec![
                Section::Company,
                Section::Quotation,
                Section::Client,
                Section::Project,
                Section::Pricing
            ]
        );
    }
}
