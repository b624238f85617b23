//! # Catalog Tasklet
//!
//! Final step of the feed job: assembles the shop from what the chunk steps
//! collected, renders the dated `yml_catalog` document and writes it to the
//! target file with a single write.
//!
//! The document is fully rendered before the target file is created, so a
//! serialization failure leaves nothing on disk.
//!
//! ## Example
//!
//! ```rust
//! use yml_feed_rs::core::step::{Step, StepBuilder, StepExecution};
//! use yml_feed_rs::feed::assembler::CatalogAssembler;
//! use yml_feed_rs::feed::config::ShopConfig;
//! use yml_feed_rs::tasklet::catalog::CatalogTaskletBuilder;
//! use std::env::temp_dir;
//!
//! # fn example() -> Result<(), yml_feed_rs::BatchError> {
//! let assembler = CatalogAssembler::new();
//! let target = temp_dir().join("catalog_example.xml");
//!
//! let tasklet = CatalogTaskletBuilder::new()
//!     .assembler(&assembler)
//!     .shop(ShopConfig::default())
//!     .target_path(&target)
//!     .build()?;
//!
//! let step = StepBuilder::new("write-catalog").tasklet(&tasklet).build();
//! let mut step_execution = StepExecution::new(step.get_name());
//! step.execute(&mut step_execution)?;
//!
//! assert!(std::fs::read_to_string(&target).unwrap().contains("<shop>"));
//! std::fs::remove_file(&target).ok();
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use log::info;

use crate::{
    core::step::{RepeatStatus, StepExecution, Tasklet},
    feed::{
        assembler::CatalogAssembler,
        config::ShopConfig,
        serializer::{render_catalog, write_catalog},
    },
    BatchError,
};

/// Source of the generation time stamped on the catalog.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Tasklet writing the assembled catalog to a file.
pub struct CatalogTasklet<'a> {
    /// Records collected by the previous steps
    assembler: &'a CatalogAssembler,
    /// Static shop metadata and currencies
    shop: ShopConfig,
    /// Output file path
    target_path: PathBuf,
    clock: Clock,
}

impl CatalogTasklet<'_> {
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

impl Tasklet for CatalogTasklet<'_> {
    fn execute(&self, step_execution: &StepExecution) -> Result<RepeatStatus, BatchError> {
        info!(
            "Assembling catalog for step {}: {} categories, {} offers",
            step_execution.name,
            self.assembler.category_count(),
            self.assembler.offer_count()
        );

        let shop = self.assembler.assemble(&self.shop);
        let document = render_catalog(&shop, (self.clock)())?;

        let mut file = File::create(&self.target_path)?;
        write_catalog(&mut file, &document)?;

        info!(
            "Catalog written to {} ({} bytes)",
            self.target_path.display(),
            document.len()
        );
        Ok(RepeatStatus::Finished)
    }
}

/// Builder for [`CatalogTasklet`].
pub struct CatalogTaskletBuilder<'a> {
    assembler: Option<&'a CatalogAssembler>,
    shop: ShopConfig,
    target_path: Option<PathBuf>,
    clock: Clock,
}

impl Default for CatalogTaskletBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CatalogTaskletBuilder<'a> {
    pub fn new() -> Self {
        Self {
            assembler: None,
            shop: ShopConfig::default(),
            target_path: None,
            clock: local_now,
        }
    }

    pub fn assembler(mut self, assembler: &'a CatalogAssembler) -> Self {
        self.assembler = Some(assembler);
        self
    }

    pub fn shop(mut self, shop: ShopConfig) -> Self {
        self.shop = shop;
        self
    }

    pub fn target_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the local wall clock used for the `date` attribute.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<CatalogTasklet<'a>, BatchError> {
        let assembler = self.assembler.ok_or_else(|| {
            BatchError::Configuration("Catalog tasklet needs an assembler".to_string())
        })?;
        let target_path = self.target_path.ok_or_else(|| {
            BatchError::Configuration("Catalog tasklet needs a target path".to_string())
        })?;

        Ok(CatalogTasklet {
            assembler,
            shop: self.shop,
            target_path,
            clock: self.clock,
        })
    }
}
