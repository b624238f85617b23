//! `yml_catalog` rendering.
//!
//! The shop is serialized on its own as an indented `<shop>` fragment, then
//! wrapped in a fixed envelope: XML declaration, DOCTYPE and a dated
//! `<yml_catalog>` root.

use std::io::Write;

use chrono::NaiveDateTime;
use log::debug;
use quick_xml::se::Serializer;
use serde::Serialize;

use crate::BatchError;

use super::model::{Category, Currency, Offer, Shop};
use super::sanitizer::LINE_FEED_REFERENCE;

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";
pub const DOCTYPE: &str = "<!DOCTYPE yml_catalog>\n";
pub const ROOT_TAG: &str = "yml_catalog";
pub const SHOP_TAG: &str = "shop";

/// Format of the `date` attribute of the catalog root.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
struct ShopElement<'a> {
    name: &'a str,
    company: &'a str,
    url: &'a str,
    currencies: CurrenciesElement<'a>,
    categories: CategoriesElement<'a>,
    offers: OffersElement<'a>,
}

#[derive(Serialize)]
struct CurrenciesElement<'a> {
    currency: &'a [Currency],
}

#[derive(Serialize)]
struct CategoriesElement<'a> {
    category: &'a [Category],
}

#[derive(Serialize)]
struct OffersElement<'a> {
    offer: &'a [Offer],
}

impl<'a> From<&'a Shop> for ShopElement<'a> {
    fn from(shop: &'a Shop) -> Self {
        Self {
            name: &shop.name,
            company: &shop.company,
            url: &shop.url,
            currencies: CurrenciesElement {
                currency: &shop.currencies,
            },
            categories: CategoriesElement {
                category: &shop.categories,
            },
            offers: OffersElement {
                offer: &shop.offers,
            },
        }
    }
}

/// Serializes the shop as a `<shop>` fragment indented by two spaces,
/// without declaration or catalog root. Encoded line feeds still present
/// in the result are turned back into literal newlines.
pub fn serialize_shop(shop: &Shop) -> Result<String, BatchError> {
    let mut fragment = String::new();
    let mut serializer = Serializer::with_root(&mut fragment, Some(SHOP_TAG))
        .map_err(|e| BatchError::ItemWriter(format!("Invalid root tag: {}", e)))?;
    serializer.indent(' ', 2);

    ShopElement::from(shop)
        .serialize(serializer)
        .map_err(|e| BatchError::ItemWriter(format!("Failed to serialize shop: {}", e)))?;

    Ok(fragment.replace(LINE_FEED_REFERENCE, "\n"))
}

/// Renders the complete catalog document for a generation time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yml_feed_rs::feed::assembler::assemble;
/// use yml_feed_rs::feed::config::ShopConfig;
/// use yml_feed_rs::feed::serializer::render_catalog;
///
/// let shop = assemble(Vec::new(), Vec::new(), &ShopConfig::default());
/// let generated_at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(7, 5, 59)
///     .unwrap();
///
/// let document = render_catalog(&shop, generated_at).unwrap();
///
/// assert!(document.starts_with(
///     "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
///      <!DOCTYPE yml_catalog>\n\
///      <yml_catalog date=\"2024-03-09 07:05\">\n<shop>"
/// ));
/// assert!(document.ends_with("</shop>\n</yml_catalog>"));
/// ```
pub fn render_catalog(shop: &Shop, generated_at: NaiveDateTime) -> Result<String, BatchError> {
    let fragment = serialize_shop(shop)?;
    let date = generated_at.format(DATE_FORMAT).to_string();
    debug!("Rendering catalog dated {}", date);

    let mut document = String::with_capacity(fragment.len() + 128);
    document.push_str(XML_DECLARATION);
    document.push_str(DOCTYPE);
    document.push_str(&format!("<{} date=\"{}\">\n", ROOT_TAG, date));
    document.push_str(&fragment);
    document.push_str(&format!("\n</{}>", ROOT_TAG));
    Ok(document)
}

/// Writes a rendered document in one go.
pub fn write_catalog<W: Write>(writer: &mut W, document: &str) -> Result<(), BatchError> {
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::feed::config::ShopConfig;
    use crate::feed::model::Picture;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 30)
            .unwrap()
            .and_hms_opt(18, 42, 13)
            .unwrap()
    }

    fn offer() -> Offer {
        Offer {
            id: "1001".to_string(),
            available: true,
            url: "https://shop.example/p/1001".to_string(),
            price: "129.99".to_string(),
            currency_id: "PLN".to_string(),
            category_id: "42".to_string(),
            pictures: vec![Picture::from("a.jpg"), Picture::from("b.jpg")],
            pickup: false,
            delivery: true,
            name: "Kettle".to_string(),
            name_ua: "Чайник".to_string(),
            vendor: String::new(),
            vendor_code: "KT-1".to_string(),
            description: "<p>Steel & glass</p>".to_string(),
            description_ua: "&lt;p&gt;".to_string(),
        }
    }

    fn shop() -> Shop {
        let config = ShopConfig::default();
        Shop {
            name: config.name,
            company: config.company,
            url: config.url,
            currencies: config.currencies,
            categories: vec![
                Category {
                    id: "1".to_string(),
                    parent_id: None,
                    name: "Kitchen".to_string(),
                },
                Category {
                    id: "42".to_string(),
                    parent_id: Some("1".to_string()),
                    name: "Kettles".to_string(),
                },
            ],
            offers: vec![offer()],
        }
    }

    #[test]
    fn shop_fragment_has_no_envelope() {
        let fragment = serialize_shop(&shop()).unwrap();

        assert!(fragment.starts_with("<shop>\n  <name>Allegro *UA*</name>"));
        assert!(fragment.ends_with("</shop>"));
        assert!(!fragment.contains("<?xml"));
        assert!(!fragment.contains("yml_catalog"));
    }

    #[test]
    fn currencies_are_attribute_only_elements() {
        let fragment = serialize_shop(&shop()).unwrap();

        assert!(fragment.contains("<currencies>"));
        assert!(fragment.contains("<currency id=\"USD\" rate=\"CB\"/>"));
        assert!(fragment.contains("<currency id=\"PLN\" rate=\"1\"/>"));
        let usd = fragment.find("id=\"USD\"").unwrap();
        let eur = fragment.find("id=\"EUR\"").unwrap();
        assert!(usd < eur);
    }

    #[test]
    fn parent_id_attribute_is_omitted_for_top_level_categories() {
        let fragment = serialize_shop(&shop()).unwrap();

        assert!(fragment.contains("<category id=\"1\">Kitchen</category>"));
        assert!(fragment.contains("<category id=\"42\" parentId=\"1\">Kettles</category>"));
    }

    #[test]
    fn offer_elements_follow_the_feed_layout() {
        let fragment = serialize_shop(&shop()).unwrap();

        assert!(fragment.contains("<offer id=\"1001\" available=\"true\">"));
        let order = [
            "<url>https://shop.example/p/1001</url>",
            "<price>129.99</price>",
            "<currencyId>PLN</currencyId>",
            "<categoryId>42</categoryId>",
            "<picture>a.jpg</picture>",
            "<picture>b.jpg</picture>",
            "<pickup>false</pickup>",
            "<delivery>true</delivery>",
            "<name>Kettle</name>",
            "<name_ua>Чайник</name_ua>",
            "<vendorCode>KT-1</vendorCode>",
            "<description>",
            "<description_ua>",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| {
                fragment
                    .find(needle)
                    .unwrap_or_else(|| panic!("{} missing in {}", needle, fragment))
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn text_content_is_escaped() {
        let fragment = serialize_shop(&shop()).unwrap();

        assert!(fragment.contains("&lt;p&gt;Steel &amp; glass&lt;/p&gt;"));
        assert!(fragment.contains("&amp;lt;p&amp;gt;"));
    }

    #[test]
    fn categories_keep_their_order() {
        let fragment = serialize_shop(&shop()).unwrap();

        let kitchen = fragment.find("Kitchen").unwrap();
        let kettles = fragment.find("Kettles").unwrap();
        assert!(kitchen < kettles);
    }

    #[test]
    fn remaining_line_feed_references_become_newlines() {
        let mut shop = shop();
        shop.name = "Line\none".to_string();

        let fragment = serialize_shop(&shop).unwrap();

        assert!(!fragment.contains(LINE_FEED_REFERENCE));
        assert!(fragment.contains("<name>Line\none</name>"));
    }

    #[test]
    fn catalog_envelope_is_exact() {
        let document = render_catalog(&shop(), generated_at()).unwrap();

        assert!(document.starts_with(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <!DOCTYPE yml_catalog>\n\
             <yml_catalog date=\"2023-11-30 18:42\">\n\
             <shop>\n  <name>Allegro *UA*</name>\n  <company>Allegro *UA*</company>\n"
        ));
        assert!(document.ends_with("    </offer>\n  </offers>\n</shop>\n</yml_catalog>"));
    }

    #[test]
    fn shop_fragment_starts_without_blank_line() {
        let fragment = serialize_shop(&shop()).unwrap();

        assert!(fragment.starts_with("<shop>\n"));
        assert!(!fragment.contains("\n\n"));
    }

    #[test]
    fn rendering_is_deterministic_for_a_given_time() {
        let first = render_catalog(&shop(), generated_at()).unwrap();
        let second = render_catalog(&shop(), generated_at()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn write_catalog_writes_the_whole_document() {
        let mut buffer = Vec::new();

        write_catalog(&mut buffer, "<yml_catalog/>").unwrap();

        assert_eq!(buffer, b"<yml_catalog/>");
    }
}
