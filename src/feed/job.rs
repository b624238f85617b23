use log::info;

use crate::{
    core::{
        job::{Job, JobBuilder, JobExecution},
        step::StepBuilder,
    },
    error::BatchError,
    item::xlsx::XlsxItemReaderBuilder,
    tasklet::catalog::CatalogTaskletBuilder,
};

use super::{
    assembler::CatalogAssembler,
    config::FeedConfig,
    model::{Category, Offer},
    processor::{CategoryProcessor, OfferProcessor},
};

const CHUNK_SIZE: usize = 100;

/// Runs the whole feed job: products sheet to offers, groups sheet to
/// categories, then the catalog file.
///
/// Both sheets are loaded before any row is mapped. Any error aborts the run
/// before the output file is touched.
pub fn run_feed(config: &FeedConfig) -> Result<JobExecution, BatchError> {
    let products = XlsxItemReaderBuilder::new()
        .sheet(config.products_sheet)
        .from_path(&config.input_path)?;
    let groups = XlsxItemReaderBuilder::new()
        .sheet(config.groups_sheet)
        .from_path(&config.input_path)?;

    let offer_processor = OfferProcessor::from(config);
    let category_processor = CategoryProcessor;
    let assembler = CatalogAssembler::new();

    let catalog = CatalogTaskletBuilder::new()
        .assembler(&assembler)
        .shop(config.shop.clone())
        .target_path(&config.output_path)
        .build()?;

    let products_step = StepBuilder::new("map-products")
        .chunk::<Vec<String>, Offer>(CHUNK_SIZE)
        .reader(&products)
        .processor(&offer_processor)
        .writer(&assembler)
        .build()?;
    let groups_step = StepBuilder::new("map-groups")
        .chunk::<Vec<String>, Category>(CHUNK_SIZE)
        .reader(&groups)
        .processor(&category_processor)
        .writer(&assembler)
        .build()?;
    let catalog_step = StepBuilder::new("write-catalog").tasklet(&catalog).build();

    let job = JobBuilder::new()
        .name("yml-feed".to_string())
        .start(&products_step)
        .next(&groups_step)
        .next(&catalog_step)
        .build();

    let execution = job.run()?;
    info!(
        "Feed generated in {:?}: {} offers, {} categories",
        execution.duration,
        assembler.offer_count(),
        assembler.category_count()
    );
    Ok(execution)
}
