use log::debug;

use crate::core::item::{ItemProcessor, ItemProcessorResult};

use super::balancer::balance;
use super::config::{FeedConfig, OfferDefaults};
use super::mapper::{map_category, map_offer};
use super::model::{Category, Offer};
use super::sanitizer::sanitize_offer;

/// Turns a products row into a sanitized [`Offer`].
#[derive(Debug, Clone)]
pub struct OfferProcessor {
    defaults: OfferDefaults,
    balance_descriptions: bool,
}

impl OfferProcessor {
    pub fn new(defaults: OfferDefaults) -> Self {
        Self {
            defaults,
            balance_descriptions: false,
        }
    }

    /// Also closes HTML tags left open in both descriptions.
    pub fn balance_descriptions(mut self, balance_descriptions: bool) -> Self {
        self.balance_descriptions = balance_descriptions;
        self
    }
}

impl From<&FeedConfig> for OfferProcessor {
    fn from(config: &FeedConfig) -> Self {
        OfferProcessor::new(config.offer_defaults).balance_descriptions(config.balance_descriptions)
    }
}

impl ItemProcessor<Vec<String>, Offer> for OfferProcessor {
    fn process(&self, item: &Vec<String>) -> ItemProcessorResult<Offer> {
        let mut offer = map_offer(item, &self.defaults)?;
        sanitize_offer(&mut offer);

        if self.balance_descriptions {
            offer.description = balance(&offer.description);
            offer.description_ua = balance(&offer.description_ua);
        }

        debug!("Mapped offer {}", offer.id);
        Ok(offer)
    }
}

/// Turns a groups row into a [`Category`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryProcessor;

impl ItemProcessor<Vec<String>, Category> for CategoryProcessor {
    fn process(&self, item: &Vec<String>) -> ItemProcessorResult<Category> {
        let category = map_category(item)?;
        debug!("Mapped category {}", category.id);
        Ok(category)
    }
}
