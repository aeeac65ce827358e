//! Customer profile shown on the account page.

use crate::cart::PromoRegistry;
use serde::{Deserialize, Serialize};

/// A promo code advertised to the customer.
///
/// Advertising a code does not make it redeemable; only the
/// [`PromoRegistry`] decides that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoOffer {
    pub code: String,
    pub description: String,
}

impl PromoOffer {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Check whether the registry will accept this code.
    pub fn is_redeemable(&self, registry: &PromoRegistry) -> bool {
        registry.find(&self.code).is_some()
    }
}

/// Display-only customer profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub offers: Vec<PromoOffer>,
}

impl Account {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            offers: Vec::new(),
        }
    }

    pub fn with_offer(mut self, offer: PromoOffer) -> Self {
        self.offers.push(offer);
        self
    }

    /// Up to two initials for the avatar.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

impl Default for Account {
    fn default() -> Self {
        crate::sample::account()
    }
}
