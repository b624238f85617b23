//! Cleanup of offer descriptions exported by the rich-text editor.
//!
//! The passes are order sensitive and only target the quirks of that export:
//! a leftover `</td>` fragment, encoded line feeds, and entity-escaped HTML in
//! the main description.

use super::html::unescape;
use super::model::Offer;

/// Fragment left behind by table cells of the source editor.
const TABLE_CELL_CLOSE: &str = "</td>";

/// Numeric character reference of a line feed.
pub const LINE_FEED_REFERENCE: &str = "&#xA;";

/// Removes `</td>` fragments, then turns encoded line feeds into spaces.
pub fn clean_fragments(text: &str) -> String {
    text.replace(TABLE_CELL_CLOSE, "")
        .replace(LINE_FEED_REFERENCE, " ")
}

/// Sanitizes both descriptions of a freshly mapped offer in place.
///
/// Entities are decoded in `description` only; `description_ua` keeps them
/// escaped.
///
/// # Examples
///
/// ```
/// use yml_feed_rs::feed::sanitizer::sanitize_offer;
/// # use yml_feed_rs::feed::mapper::map_offer;
/// # use yml_feed_rs::feed::config::OFFER_DEFAULTS;
/// # let row = vec![String::new(); 31];
/// # let mut offer = map_offer(&row, &OFFER_DEFAULTS).unwrap();
/// offer.description = "A&amp;B</td>text&#xA;more".to_string();
/// offer.description_ua = "A&amp;B</td>text&#xA;more".to_string();
///
/// sanitize_offer(&mut offer);
///
/// assert_eq!(offer.description, "A&Btext more");
/// assert_eq!(offer.description_ua, "A&amp;Btext more");
/// ```
pub fn sanitize_offer(offer: &mut Offer) {
    let description = clean_fragments(&offer.description);
    offer.description = unescape(&description);
    offer.description_ua = clean_fragments(&offer.description_ua);
}
