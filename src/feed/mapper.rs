//! Row to record mapping.
//!
//! Columns are bound by position, not by header name. Both layouts live in
//! the constant tables below so a change of the export format is a one-place
//! edit.

use crate::BatchError;

use super::config::OfferDefaults;
use super::model::{Category, Offer, Picture};

/// Column positions of the products sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductColumns {
    pub id: usize,
    pub url: usize,
    pub name: usize,
    pub name_ua: usize,
    pub description: usize,
    pub description_ua: usize,
    pub price: usize,
    pub pictures: usize,
    pub vendor_code: usize,
    pub category_id: usize,
}

pub const PRODUCT_COLUMNS: ProductColumns = ProductColumns {
    id: 0,
    url: 1,
    name: 3,
    name_ua: 4,
    description: 8,
    description_ua: 9,
    price: 11,
    pictures: 17,
    vendor_code: 27,
    category_id: 30,
};

/// Column positions of the groups sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupColumns {
    pub name: usize,
    pub id: usize,
    pub parent_id: usize,
}

pub const GROUP_COLUMNS: GroupColumns = GroupColumns {
    name: 3,
    id: 4,
    parent_id: 6,
};

fn cell(row: &[String], column: &'static str, index: usize) -> Result<String, BatchError> {
    row.get(index).cloned().ok_or(BatchError::RowShape {
        column,
        index,
        len: row.len(),
    })
}

/// Builds an offer from a products row. Fails with [`BatchError::RowShape`]
/// when the row does not reach one of the product columns.
pub fn map_offer(row: &[String], defaults: &OfferDefaults) -> Result<Offer, BatchError> {
    let columns = PRODUCT_COLUMNS;

    Ok(Offer {
        id: cell(row, "id", columns.id)?,
        available: defaults.available,
        url: cell(row, "url", columns.url)?,
        price: cell(row, "price", columns.price)?,
        currency_id: defaults.currency_id.to_string(),
        category_id: cell(row, "category_id", columns.category_id)?,
        pictures: split_pictures(&cell(row, "pictures", columns.pictures)?),
        pickup: defaults.pickup,
        delivery: defaults.delivery,
        name: cell(row, "name", columns.name)?,
        name_ua: cell(row, "name_ua", columns.name_ua)?,
        vendor: defaults.vendor.to_string(),
        vendor_code: cell(row, "vendor_code", columns.vendor_code)?,
        description: cell(row, "description", columns.description)?,
        description_ua: cell(row, "description_ua", columns.description_ua)?,
    })
}

/// Builds a category from a groups row. The parent id is only read when the
/// row reaches its column and the cell is not empty.
pub fn map_category(row: &[String]) -> Result<Category, BatchError> {
    let columns = GROUP_COLUMNS;

    let parent_id = row
        .get(columns.parent_id)
        .filter(|parent_id| !parent_id.is_empty())
        .cloned();

    Ok(Category {
        id: cell(row, "id", columns.id)?,
        parent_id,
        name: cell(row, "name", columns.name)?,
    })
}

/// Splits a comma separated pictures cell, keeping order. Segments are not
/// trimmed; empty segments are dropped.
pub fn split_pictures(cell: &str) -> Vec<Picture> {
    cell.split(',')
        .filter(|segment| !segment.is_empty())
        .map(Picture::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::config::OFFER_DEFAULTS;

    fn product_row() -> Vec<String> {
        let mut row = vec![String::new(); 31];
        row[0] = "1001".to_string();
        row[1] = "https://shop.example/p/1001".to_string();
        row[2] = "unused".to_string();
        row[3] = "Kettle".to_string();
        row[4] = "Чайник".to_string();
        row[8] = "<p>Steel kettle</p>".to_string();
        row[9] = "<p>Сталевий чайник</p>".to_string();
        row[11] = "129.99".to_string();
        row[17] = "a.jpg,b.jpg".to_string();
        row[27] = "KT-1".to_string();
        row[30] = "42".to_string();
        row
    }

    fn group_row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn maps_product_columns() {
        let offer = map_offer(&product_row(), &OFFER_DEFAULTS).unwrap();

        assert_eq!(offer.id, "1001");
        assert_eq!(offer.url, "https://shop.example/p/1001");
        assert_eq!(offer.name, "Kettle");
        assert_eq!(offer.name_ua, "Чайник");
        assert_eq!(offer.description, "<p>Steel kettle</p>");
        assert_eq!(offer.description_ua, "<p>Сталевий чайник</p>");
        assert_eq!(offer.price, "129.99");
        assert_eq!(offer.vendor_code, "KT-1");
        assert_eq!(offer.category_id, "42");
        assert_eq!(
            offer.pictures,
            vec![Picture::from("a.jpg"), Picture::from("b.jpg")]
        );
    }

    #[test]
    fn fixed_values_do_not_depend_on_row_content() {
        let mut row = product_row();
        for cell in row.iter_mut() {
            *cell = "false".to_string();
        }

        let offer = map_offer(&row, &OFFER_DEFAULTS).unwrap();

        assert!(offer.available);
        assert!(!offer.pickup);
        assert!(offer.delivery);
        assert_eq!(offer.currency_id, "PLN");
        assert_eq!(offer.vendor, "");
    }

    #[test]
    fn empty_pictures_cell_yields_no_picture() {
        let mut row = product_row();
        row[17] = String::new();

        let offer = map_offer(&row, &OFFER_DEFAULTS).unwrap();

        assert!(offer.pictures.is_empty());
    }

    #[test]
    fn picture_segments_are_kept_verbatim_and_in_order() {
        let pictures = split_pictures("c.png, d.png,,e.png");

        let values: Vec<&str> = pictures.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["c.png", " d.png", "e.png"]);
    }

    #[test]
    fn short_product_row_is_a_row_shape_error() {
        let mut row = product_row();
        row.truncate(30);

        let result = map_offer(&row, &OFFER_DEFAULTS);

        match result {
            Err(BatchError::RowShape { column, index, len }) => {
                assert_eq!(column, "category_id");
                assert_eq!(index, 30);
                assert_eq!(len, 30);
            }
            other => panic!("Expected RowShape error, got {:?}", other),
        }
    }

    #[test]
    fn empty_row_is_a_row_shape_error() {
        assert!(matches!(
            map_offer(&[], &OFFER_DEFAULTS),
            Err(BatchError::RowShape { index: 0, len: 0, .. })
        ));
        assert!(matches!(
            map_category(&[]),
            Err(BatchError::RowShape { len: 0, .. })
        ));
    }

    #[test]
    fn maps_category_with_parent() {
        let category = map_category(&group_row(&["", "", "", "Kettles", "42", "", "7"])).unwrap();

        assert_eq!(category.id, "42");
        assert_eq!(category.name, "Kettles");
        assert_eq!(category.parent_id.as_deref(), Some("7"));
    }

    #[test]
    fn parent_is_absent_when_row_stops_before_its_column() {
        let category = map_category(&group_row(&["", "", "", "Kitchen", "7", ""])).unwrap();

        assert_eq!(category.parent_id, None);
    }

    #[test]
    fn parent_is_absent_when_its_cell_is_empty() {
        let category =
            map_category(&group_row(&["", "", "", "Kitchen", "7", "", "", "x"])).unwrap();

        assert_eq!(category.parent_id, None);
    }

    #[test]
    fn short_group_row_is_a_row_shape_error() {
        let result = map_category(&group_row(&["", "", "", "Kitchen"]));

        assert!(matches!(
            result,
            Err(BatchError::RowShape {
                column: "id",
                index: 4,
                len: 4
            })
        ));
    }
}
