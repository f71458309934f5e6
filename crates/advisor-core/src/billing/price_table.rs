//! Price id to tier mapping.

use crate::error::{AdvisorError, Result};
use crate::plan::Tier;
use std::collections::HashMap;
use std::str::FromStr;

/// Static lookup from payment-provider price ids to tiers.
///
/// Unknown or missing price ids map to [`Tier::Free`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTierTable {
    tiers: HashMap<String, Tier>,
}

impl PriceTierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a mapping.
    pub fn with_price(mut self, price_id: impl Into<String>, tier: Tier) -> Self {
        self.insert(price_id, tier);
        self
    }

    pub fn insert(&mut self, price_id: impl Into<String>, tier: Tier) {
        self.tiers.insert(price_id.into(), tier);
    }

    /// Merges another table; its entries win.
    pub fn extend(&mut self, other: PriceTierTable) {
        self.tiers.extend(other.tiers);
    }

    /// Tier for a price id.
    pub fn tier_for(&self, price_id: Option<&str>) -> Tier {
        price_id
            .and_then(|id| self.tiers.get(id))
            .copied()
            .unwrap_or(Tier::Free)
    }

    /// Price ids mapped to `tier`, sorted.
    pub fn prices_for(&self, tier: Tier) -> Vec<&str> {
        let mut prices: Vec<&str> = self
            .tiers
            .iter()
            .filter(|(_, t)| **t == tier)
            .map(|(price, _)| price.as_str())
            .collect();
        prices.sort_unstable();
        prices
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Parses `price_a=pro,price_b=enterprise` override lists.
pub fn parse_overrides(raw: &str) -> Result<PriceTierTable> {
    let mut table = PriceTierTable::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (price, tier) = entry.split_once('=').ok_or_else(|| {
            AdvisorError::config(format!("price override '{entry}' is not of the form price=tier"))
        })?;
        let tier = Tier::from_str(tier.trim()).map_err(|_| {
            AdvisorError::config(format!("price override '{entry}' names an unknown tier"))
        })?;
        table.insert(price.trim(), tier);
    }
    Ok(table)
}
