#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # yml-feed-rs

 A batch job turning an XLSX product export into a YML product feed
 (`yml_catalog` document: shop metadata, currencies, categories, offers).

 ## Core Concepts

- **Job:** the whole transform, a sequence of `Step`s run in order. The first failing step aborts it.
- **Step:** either chunk oriented (an `ItemReader`, an `ItemProcessor` and an `ItemWriter`) or a single `Tasklet`.
- **ItemReader:** `XlsxItemReader` hands out the rows of one worksheet as cell strings.
- **ItemProcessor:** `OfferProcessor` and `CategoryProcessor` map rows to catalog records.
- **ItemWriter:** `CatalogAssembler` collects the records for the catalog.
- **Tasklet:** `CatalogTasklet` renders the dated catalog and writes it to disk.

 ## Pipeline

 1. The "products" sheet rows are mapped to offers by fixed column position, then their
    descriptions are cleaned up (leftover `</td>` fragments, encoded line feeds, entities).
 2. The "groups" sheet rows are mapped to categories.
 3. The shop is assembled in row order, serialized as an indented `<shop>` fragment and
    wrapped in the `<yml_catalog date="YYYY-MM-DD HH:MM">` envelope.

 Every failure is fatal: the catalog file is only written once everything else succeeded.

 ## Getting Started

```rust
# use yml_feed_rs::{
#     core::{
#         job::{Job, JobBuilder},
#         step::StepBuilder,
#     },
#     error::BatchError,
#     feed::{
#         assembler::CatalogAssembler,
#         config::FeedConfig,
#         model::{Category, Offer},
#         processor::{CategoryProcessor, OfferProcessor},
#     },
#     item::xlsx::XlsxItemReaderBuilder,
#     tasklet::catalog::CatalogTaskletBuilder,
# };
# use std::env::temp_dir;
fn main() -> Result<(), BatchError> {
    let config = FeedConfig::default();

    let mut product = vec![String::new(); 31];
    product[0] = "1".to_string();
    product[11] = "9.99".to_string();
    let products = XlsxItemReaderBuilder::new().from_rows(vec![Vec::new(), product]);

    let group = ["", "", "", "Tea", "1"].map(String::from).to_vec();
    let groups = XlsxItemReaderBuilder::new().from_rows(vec![Vec::new(), group]);

    let offer_processor = OfferProcessor::from(&config);
    let assembler = CatalogAssembler::new();
    let target = temp_dir().join("yml_feed_getting_started.xml");
    let catalog = CatalogTaskletBuilder::new()
        .assembler(&assembler)
        .shop(config.shop.clone())
        .target_path(&target)
        .build()?;

    let products_step = StepBuilder::new("products")
        .chunk::<Vec<String>, Offer>(100)
        .reader(&products)
        .processor(&offer_processor)
        .writer(&assembler)
        .build()?;
    let groups_step = StepBuilder::new("groups")
        .chunk::<Vec<String>, Category>(100)
        .reader(&groups)
        .processor(&CategoryProcessor)
        .writer(&assembler)
        .build()?;
    let catalog_step = StepBuilder::new("catalog").tasklet(&catalog).build();

    let job = JobBuilder::new()
        .start(&products_step)
        .next(&groups_step)
        .next(&catalog_step)
        .build();
    job.run()?;

    assert!(std::fs::read_to_string(&target).unwrap().contains("<offer id=\"1\""));
    std::fs::remove_file(&target).ok();
    Ok(())
}
```
 */

/// Core module for batch operations
pub mod core;

/// Error types for batch operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Product feed records, mapping, sanitizing and rendering
pub mod feed;

/// Set of item readers
pub mod item;

/// Set of tasklets
pub mod tasklet;
