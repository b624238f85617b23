use serde::Serialize;

/// Root aggregate of one feed generation. Serialized as the `<shop>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    pub name: String,
    pub company: String,
    pub url: String,
    pub currencies: Vec<Currency>,
    pub categories: Vec<Category>,
    pub offers: Vec<Offer>,
}

/// `<currency id=".." rate=".."/>`. `rate` is a number or `CB` (central bank rate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@rate")]
    pub rate: String,
}

impl Currency {
    pub fn new(id: &str, rate: &str) -> Self {
        Self {
            id: id.to_string(),
            rate: rate.to_string(),
        }
    }
}

/// `<category id=".." parentId="..">name</category>`, `parentId` omitted
/// for top-level categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "$text")]
    pub name: String,
}

/// One product entry of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@available")]
    pub available: bool,
    pub url: String,
    pub price: String,
    #[serde(rename = "currencyId")]
    pub currency_id: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(rename = "picture")]
    pub pictures: Vec<Picture>,
    pub pickup: bool,
    pub delivery: bool,
    pub name: String,
    pub name_ua: String,
    pub vendor: String,
    #[serde(rename = "vendorCode")]
    pub vendor_code: String,
    pub description: String,
    pub description_ua: String,
}

/// One image URL of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    #[serde(rename = "$text")]
    pub value: String,
}

impl From<&str> for Picture {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}
