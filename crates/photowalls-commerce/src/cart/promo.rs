//! Promo codes.

use crate::error::CommerceError;
use crate::money::{Money, Percent};
use serde::{Deserialize, Serialize};

/// A redeemable code worth a flat percentage off the cart subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoCode {
    /// Code as typed by the customer (case-sensitive).
    pub code: String,
    /// Percentage off the subtotal.
    pub percent: Percent,
    /// Description for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PromoCode {
    /// Create a promo code.
    pub fn new(code: impl Into<String>, percent: Percent) -> Self {
        Self {
            code: code.into(),
            percent,
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A promo code that has been accepted for the current cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedPromo {
    /// The code used.
    pub code: String,
    /// Percentage off the subtotal.
    pub percent: Percent,
}

impl AppliedPromo {
    /// Amount taken off a subtotal by this promo.
    pub fn discount_on(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        subtotal
            .try_percentage(self.percent)
            .ok_or(CommerceError::Overflow)
    }
}

/// The fixed set of codes the shop accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<PromoCode>", into = "Vec<PromoCode>")]
pub struct PromoRegistry {
    codes: Vec<PromoCode>,
}

impl PromoRegistry {
    /// Build a registry, rejecting duplicate or empty codes.
    pub fn new(codes: Vec<PromoCode>) -> Result<Self, CommerceError> {
        for (i, promo) in codes.iter().enumerate() {
            if promo.code.trim().is_empty() {
                return Err(CommerceError::Config("promo code must not be empty".to_string()));
            }
            if codes[..i].iter().any(|p| p.code == promo.code) {
                return Err(CommerceError::Config(format!(
                    "duplicate promo code {}",
                    promo.code
                )));
            }
        }
        Ok(Self { codes })
    }

    /// All registered codes.
    pub fn codes(&self) -> &[PromoCode] {
        &self.codes
    }

    /// Look up a code by exact, case-sensitive match.
    pub fn find(&self, code: &str) -> Option<&PromoCode> {
        self.codes.iter().find(|p| p.code == code)
    }

    /// Redeem a code.
    ///
    /// Unknown codes are rejected with [`CommerceError::InvalidPromoCode`];
    /// callers keep whatever promo was applied before.
    pub fn apply(&self, code: &str) -> Result<AppliedPromo, CommerceError> {
        self.find(code)
            .map(|p| AppliedPromo {
                code: p.code.clone(),
                percent: p.percent,
            })
            .ok_or_else(|| CommerceError::InvalidPromoCode(code.to_string()))
    }
}

impl TryFrom<Vec<PromoCode>> for PromoRegistry {
    type Error = CommerceError;

    fn try_from(codes: Vec<PromoCode>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<PromoRegistry> for Vec<PromoCode> {
    fn from(registry: PromoRegistry) -> Self {
        registry.codes
    }
}

impl Default for PromoRegistry {
    fn default() -> Self {
        Self {
            codes: crate::sample::promo_codes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_default_codes() {
        let registry = PromoRegistry::default();
        assert_eq!(registry.apply("WELCOME10").unwrap().percent.value(), 10);
        assert_eq!(registry.apply("LOYAL20").unwrap().percent.value(), 20);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = PromoRegistry::default();
        assert_eq!(
            registry.apply("welcome10"),
            Err(CommerceError::InvalidPromoCode("welcome10".to_string()))
        );
        assert!(registry.apply(" WELCOME10").is_err());
        assert!(registry.apply("").is_err());
    }

    #[test]
    fn test_discount_on_subtotal() {
        let registry = PromoRegistry::default();
        let welcome = registry.apply("WELCOME10").unwrap();
        let loyal = registry.apply("LOYAL20").unwrap();
        assert_eq!(welcome.discount_on(&Money::new(4500, Currency::RUB)).unwrap().amount, 450);
        assert_eq!(loyal.discount_on(&Money::new(4800, Currency::RUB)).unwrap().amount, 960);
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let ten = Percent::new(10).unwrap();
        let result = PromoRegistry::new(vec![PromoCode::new("A", ten), PromoCode::new("A", ten)]);
        assert!(matches!(result, Err(CommerceError::Config(_))));
    }

    #[test]
    fn test_deserialize_validates_codes() {
        let json = r#"[{"code":"A","percent":10},{"code":"A","percent":15}]"#;
        assert!(serde_json::from_str::<PromoRegistry>(json).is_err());

        let json = r#"[{"code":" ","percent":10}]"#;
        assert!(serde_json::from_str::<PromoRegistry>(json).is_err());

        let registry = PromoRegistry::default();
        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(serde_json::from_str::<PromoRegistry>(&json).unwrap(), registry);
    }
}
