use super::fields::{FieldKey, FormFields};
use super::format::{format_currency, format_date};
use super::line_items::LineItems;
use super::pricing::Pricing;
use serde::Serialize;

/// Everything the read-only quotation shows, already formatted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Preview {
    pub company_name: String,
    pub tagline: String,
    pub quotation_number: String,
    pub date: String,
    pub valid_until: String,
    pub client_name: String,
    pub client_company: String,
    pub client_address: String,
    pub client_contact: String,
    pub project_name: String,
    pub delivery: String,
    pub maintenance: String,
    pub items: Vec<String>,
    /// Total cell of the items table (the package cost).
    pub items_total: String,
    pub package_cost: String,
    pub discount_name: String,
    pub discount_amount: String,
    pub grand_total: String,
}

/// Derive the preview from the form. Pure; the same inputs always give the
/// same output.
pub fn compute_preview(fields: &FormFields, items: &LineItems) -> Preview {
    let pricing = Pricing::from_inputs(
        fields.get(FieldKey::PackageCost),
        fields.get(FieldKey::DiscountAmount),
    );
    let package_cost = format_currency(pricing.package_cost);

    Preview {
        company_name: fields.get(FieldKey::CompanyName).to_string(),
        tagline: fields.get(FieldKey::CompanyTagline).to_string(),
        quotation_number: fields.get(FieldKey::QuotationNumber).to_string(),
        date: format_date(fields.get(FieldKey::InvoiceDate)),
        valid_until: format_date(fields.get(FieldKey::ValidUntil)),
        client_name: fields.get(FieldKey::ClientName).to_string(),
        client_company: fields.get(FieldKey::ClientCompany).to_string(),
        client_address: fields.get(FieldKey::ClientAddress).to_string(),
        client_contact: fields.get(FieldKey::ClientContact).to_string(),
        project_name: fields.get(FieldKey::ProjectName).to_string(),
        delivery: fields.get(FieldKey::DeliveryTime).to_string(),
        maintenance: fields.get(FieldKey::Maintenance).to_string(),
        items: items.as_slice().to_vec(),
        items_total: package_cost.clone(),
        package_cost,
        discount_name: fields.get(FieldKey::DiscountName).to_string(),
        discount_amount: format!("- {}", format_currency(pricing.discount)),
        grand_total: format_currency(pricing.grand_total),
    }
}

/// Plain-text rendition used for printing and `--preview`.
pub fn render_plain_text(p: &Preview, width: usize) -> String {
    let width = width.max(40);
    let rule = "=".repeat(width);
    let thin = "-".repeat(width);
    let mut out = Vec::new();

    out.push(rule.clone());
    out.push(center(&p.company_name, width));
    if !p.tagline.is_empty() {
        out.push(center(&p.tagline, width));
    }
    out.push(rule.clone());
    out.push(center("QUOTATION", width));
    out.push(String::new());
    out.push(format!("Quotation No: {}", p.quotation_number));
    out.push(format!("Date:         {}", p.date));
    out.push(format!("Valid Until:  {}", p.valid_until));
    out.push(String::new());

    out.push("BILL TO".to_string());
    for line in [&p.client_name, &p.client_company, &p.client_address, &p.client_contact] {
        if !line.is_empty() {
            out.push(format!("  {}", line));
        }
    }
    out.push(String::new());

    out.push("PROJECT".to_string());
    out.push(format!("  Project:      {}", p.project_name));
    out.push(format!("  Delivery:     {}", p.delivery));
    out.push(format!("  Maintenance:  {}", p.maintenance));
    out.push(String::new());

    out.push(thin.clone());
    out.push(two_columns("Description", "Total", width));
    out.push(thin.clone());
    for (i, item) in p.items.iter().enumerate() {
        let right = if i == 0 { p.items_total.as_str() } else { "" };
        out.push(two_columns(&format!("* {}", item), right, width));
    }
    out.push(thin);

    out.push(two_columns("Package Cost", &p.package_cost, width));
    out.push(two_columns(&p.discount_name, &p.discount_amount, width));
    out.push(two_columns("GRAND TOTAL", &p.grand_total, width));
    out.push(rule);

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), s)
}

fn two_columns(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    if right.is_empty() {
        return left.to_string();
    }
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fields::Baseline;
    use pretty_assertions::assert_eq;

    fn baseline_model() -> (FormFields, LineItems) {
        let baseline = Baseline::default();
        let mut fields = FormFields::new();
        baseline.apply_to(&mut fields);
        fields.set(FieldKey::InvoiceDate, "2026-10-19");
        fields.set(FieldKey::ValidUntil, "2026-10-24");
        let items = LineItems::new(baseline.line_items.clone()).unwrap();
        (fields, items)
    }

    #[test]
    fn test_baseline_preview() {
        let (fields, items) = baseline_model();
        let p = compute_preview(&fields, &items);

        assert_eq!(p.company_name, "PRANAYUV TECHNOLOGIES PVT LTD");
        assert_eq!(p.date, "October 19, 2026");
        assert_eq!(p.valid_until, "October 24, 2026");
        assert_eq!(p.items.len(), 9);
        assert_eq!(p.items_total, "₹20,000.00");
        assert_eq!(p.package_cost, "₹20,000.00");
        assert_eq!(p.discount_amount, "- ₹8,000.00");
        assert_eq!(p.grand_total, "₹12,000.00");
    }

    #[test]
    fn test_unparsable_pricing_falls_back_to_zero() {
        let (mut fields, items) = baseline_model();
        fields.set(FieldKey::PackageCost, "");
        fields.set(FieldKey::DiscountAmount, "abc");
        let p = compute_preview(&fields, &items);

        assert_eq!(p.package_cost, "₹0.00");
        assert_eq!(p.discount_amount, "- ₹0.00");
        assert_eq!(p.grand_total, "₹0.00");
    }

    #[test]
    fn test_empty_dates_render_empty() {
        let (mut fields, items) = baseline_model();
        fields.set(FieldKey::InvoiceDate, "");
        fields.set(FieldKey::ValidUntil, "");
        let p = compute_preview(&fields, &items);
        assert_eq!(p.date, "");
        assert_eq!(p.valid_until, "");
    }

    #[test]
    fn test_preview_is_pure() {
        let (fields, items) = baseline_model();
        assert_eq!(compute_preview(&fields, &items), compute_preview(&fields, &items));
    }

    #[test]
    fn test_logo_text_not_shown() {
        let (mut fields, items) = baseline_model();
        fields.set(FieldKey::LogoText, "ZZ-LOGO");
        let text = render_plain_text(&compute_preview(&fields, &items), 72);
        assert!(!text.contains("ZZ-LOGO"));
    }

    #[test]
    fn test_plain_text_contains_totals_and_items() {
        let (fields, items) = baseline_model();
        let text = render_plain_text(&compute_preview(&fields, &items), 72);

        assert!(text.contains("QUOTATION"));
        assert!(text.contains("Quotation No: Q2025001"));
        assert!(text.contains("* Contact Form Integration"));
        assert!(text.contains("Inaugural Client Discount (FIRST50)"));
        assert!(text.contains("- ₹8,000.00"));
        assert!(text.contains("GRAND TOTAL"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_two_columns_right_aligns() {
        let line = two_columns("Total", "₹5.00", 20);
        assert_eq!(line.chars().count(), 20);
        assert!(line.ends_with("₹5.00"));
    }

    #[test]
    fn test_two_columns_overflow_keeps_single_gap() {
        assert_eq!(two_columns("abcdef", "xyz", 4), "abcdef xyz");
    }
}
