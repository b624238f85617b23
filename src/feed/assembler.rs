use std::cell::RefCell;

use crate::core::item::{ItemWriter, ItemWriterResult};

use super::config::ShopConfig;
use super::model::{Category, Offer, Shop};

/// Builds the shop from static metadata plus the mapped records, in the
/// order they were produced. Nothing is deduplicated, sorted or checked.
pub fn assemble(offers: Vec<Offer>, categories: Vec<Category>, shop: &ShopConfig) -> Shop {
    Shop {
        name: shop.name.clone(),
        company: shop.company.clone(),
        url: shop.url.clone(),
        currencies: shop.currencies.clone(),
        categories,
        offers,
    }
}

/// Collects offers and categories handed over by the chunk steps until the
/// catalog is assembled.
#[derive(Debug, Default)]
pub struct CatalogAssembler {
    offers: RefCell<Vec<Offer>>,
    categories: RefCell<Vec<Category>>,
}

impl CatalogAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer_count(&self) -> usize {
        self.offers.borrow().len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.borrow().len()
    }

    pub fn assemble(&self, shop: &ShopConfig) -> Shop {
        assemble(
            self.offers.borrow().clone(),
            self.categories.borrow().clone(),
            shop,
        )
    }
}

impl ItemWriter<Offer> for CatalogAssembler {
    fn write(&self, items: &[Offer]) -> ItemWriterResult {
        self.offers.borrow_mut().extend_from_slice(items);
        Ok(())
    }
}

impl ItemWriter<Category> for CatalogAssembler {
    fn write(&self, items: &[Category]) -> ItemWriterResult {
        self.categories.borrow_mut().extend_from_slice(items);
        Ok(())
    }
}
