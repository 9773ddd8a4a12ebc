use super::format::parse_amount;

/// Quotation pricing: a single package cost less a flat discount.
///
/// grand_total = package_cost - discount
/// Inputs that do not parse as numbers count as 0. A discount larger than the
/// package cost yields a negative total; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub package_cost: f64,
    pub discount: f64,
    pub grand_total: f64,
}

impl Pricing {
    pub fn new(package_cost: f64, discount: f64) -> Self {
        Self {
            package_cost,
            discount,
            grand_total: package_cost - discount,
        }
    }

    /// Build pricing from the raw form strings.
    pub fn from_inputs(package_cost: &str, discount: &str) -> Self {
        Self::new(parse_amount(package_cost), parse_amount(discount))
    }
}
