//! Minimal XLSX packages written from plain string rows.
//!
//! Cells are stored as inline strings, empty strings are left out of the
//! sheet the way spreadsheet tools do.
use std::{fs::File, io::Write, path::Path};

use quick_xml::escape::escape;
use zip::{ZipWriter, write::SimpleFileOptions};

const CONTENT_TYPES_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKSHEET_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

pub struct Sheet<'a> {
    pub name: &'a str,
    pub rows: Vec<Vec<&'a str>>,
}

/// `0 -> A`, `25 -> Z`, `26 -> AA`.
pub fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

/// Builds a product row with `cells` placed at their column index.
pub fn row_with<'a>(width: usize, cells: &[(usize, &'a str)]) -> Vec<&'a str> {
    let mut row = vec![""; width];
    for (index, value) in cells {
        row[*index] = *value;
    }
    row
}

pub fn write_workbook(path: &Path, sheets: &[Sheet]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut content_types = CONTENT_TYPES_HEAD.to_string();
    for position in 1..=sheets.len() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{position}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }
    content_types.push_str("</Types>");

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut workbook_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (offset, sheet) in sheets.iter().enumerate() {
        let position = offset + 1;
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{position}" r:id="rId{position}"/>"#,
            escape(sheet.name)
        ));
        workbook_rels.push_str(&format!(
            r#"<Relationship Id="rId{position}" Type="{WORKSHEET_TYPE}" Target="worksheets/sheet{position}.xml"/>"#
        ));
    }
    workbook.push_str("</sheets></workbook>");
    workbook_rels.push_str("</Relationships>");

    let parts = [
        ("[Content_Types].xml", content_types),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", workbook_rels),
    ];
    for (name, content) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    for (offset, sheet) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", offset + 1), options)
            .unwrap();
        zip.write_all(worksheet(&sheet.rows).as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}

fn worksheet(rows: &[Vec<&str>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (row_index, row) in rows.iter().enumerate() {
        let number = row_index + 1;
        xml.push_str(&format!(r#"<row r="{number}">"#));
        for (column, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            xml.push_str(&format!(
                r#"<c r="{}{number}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                column_name(column),
                escape(*value)
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}
