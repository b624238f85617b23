//! Fixed settings of the feed: shop metadata, currencies, offer defaults,
//! input/output locations.

use std::path::PathBuf;

use super::model::Currency;

/// Values every offer carries regardless of its source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferDefaults {
    pub available: bool,
    pub pickup: bool,
    pub delivery: bool,
    pub currency_id: &'static str,
    pub vendor: &'static str,
}

pub const OFFER_DEFAULTS: OfferDefaults = OfferDefaults {
    available: true,
    pickup: false,
    delivery: true,
    currency_id: "PLN",
    vendor: "",
};

impl Default for OfferDefaults {
    fn default() -> Self {
        OFFER_DEFAULTS
    }
}

/// Static `<shop>` metadata and the currency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub name: String,
    pub company: String,
    pub url: String,
    pub currencies: Vec<Currency>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: "Allegro *UA*".to_string(),
            company: "Allegro *UA*".to_string(),
            url: "Allegro *UA*".to_string(),
            currencies: vec![
                Currency::new("USD", "CB"),
                Currency::new("PLN", "1"),
                Currency::new("BYN", "CB"),
                Currency::new("KZT", "CB"),
                Currency::new("EUR", "CB"),
            ],
        }
    }
}

/// Everything the feed job needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub shop: ShopConfig,
    pub offer_defaults: OfferDefaults,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub products_sheet: &'static str,
    pub groups_sheet: &'static str,
    /// Close unterminated HTML tags in both descriptions after sanitizing.
    pub balance_descriptions: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            shop: ShopConfig::default(),
            offer_defaults: OFFER_DEFAULTS,
            input_path: PathBuf::from("products.xlsx"),
            output_path: PathBuf::from("output.xml"),
            products_sheet: "Export Products Sheet",
            groups_sheet: "Export Groups Sheet",
            balance_descriptions: false,
        }
    }
}
