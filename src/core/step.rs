use std::time::{Duration, Instant};

use log::{debug, error, info};
use uuid::Uuid;

use crate::BatchError;

use super::item::{ItemProcessor, ItemReader, ItemWriter};

/// Lifecycle of a step execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Created, not executed yet.
    Starting,
    /// Running.
    Started,
    /// Every item was read, processed and written.
    Success,
    /// Stopped on the first error.
    Failed,
}

/// Execution details of one step run.
#[derive(Debug)]
pub struct StepExecution {
    /// Unique identifier for this step execution
    pub id: Uuid,
    /// Human-readable name for the step
    pub name: String,
    /// Current status of the step execution
    pub status: StepStatus,
    pub start_time: Instant,
    pub end_time: Instant,
    pub duration: Duration,
    /// Number of items successfully read
    pub read_count: usize,
    /// Number of items successfully processed
    pub process_count: usize,
    /// Number of items successfully written
    pub write_count: usize,
}

impl StepExecution {
    pub fn new(name: &str) -> Self {
        let now = Instant::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status: StepStatus::Starting,
            start_time: now,
            end_time: now,
            duration: Duration::ZERO,
            read_count: 0,
            process_count: 0,
            write_count: 0,
        }
    }

    fn start(&mut self) {
        self.status = StepStatus::Started;
        self.start_time = Instant::now();
    }

    fn end(&mut self, status: StepStatus) {
        self.status = status;
        self.end_time = Instant::now();
        self.duration = self.start_time.elapsed();
    }
}

/// An independent, sequential phase of a job.
pub trait Step {
    fn get_name(&self) -> &str;

    /// Executes the step.
    ///
    /// This method represents the main operation of the step. Counters and
    /// timings are recorded into `step_execution` whether the step succeeds
    /// or fails.
    ///
    /// # Returns
    /// - `Ok(())`: The step completed successfully
    /// - `Err(BatchError::Step)`: The step failed, the message carries the cause
    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), BatchError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum RepeatStatus {
    /// The tasklet can continue to execute.
    Continuable,
    /// The tasklet has finished executing.
    Finished,
}

/// A single task run by a [`TaskletStep`].
pub trait Tasklet {
    fn execute(&self, step_execution: &StepExecution) -> Result<RepeatStatus, BatchError>;
}

/// Step reading every item, processing it and handing it to the writer in
/// chunks. The first read, process or write error fails the whole step.
pub struct ChunkOrientedStep<'a, I, O> {
    name: String,
    /// Component responsible for reading items from the source
    reader: &'a dyn ItemReader<I>,
    /// Component responsible for processing items
    processor: &'a dyn ItemProcessor<I, O>,
    /// Component responsible for writing items to the destination
    writer: &'a dyn ItemWriter<O>,
    /// Number of items to process in each chunk
    chunk_size: usize,
}

impl<I, O> Step for ChunkOrientedStep<'_, I, O> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        info!("Start of step: {}, id: {}", self.name, step_execution.id);
        step_execution.start();

        let result = self.run(step_execution);

        match result {
            Ok(()) => {
                step_execution.end(StepStatus::Success);
                info!(
                    "End of step: {}, read: {}, processed: {}, written: {}",
                    self.name,
                    step_execution.read_count,
                    step_execution.process_count,
                    step_execution.write_count
                );
                Ok(())
            }
            Err(err) => {
                step_execution.end(StepStatus::Failed);
                error!("Step {} failed: {}", self.name, err);
                Err(BatchError::Step(format!("{}: {}", self.name, err)))
            }
        }
    }
}

impl<I, O> ChunkOrientedStep<'_, I, O> {
    fn run(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        self.writer.open()?;

        let mut read_items: Vec<I> = Vec::with_capacity(self.chunk_size);
        loop {
            let finished = self.read_chunk(&mut read_items, step_execution)?;

            if !read_items.is_empty() {
                let processed_items = self.process_chunk(&read_items, step_execution)?;
                self.write_chunk(&processed_items, step_execution)?;
            }

            if finished {
                break;
            }
        }

        self.writer.close()
    }

    /// Fills `read_items` with up to `chunk_size` items, returns `true` once
    /// the reader is exhausted.
    fn read_chunk(
        &self,
        read_items: &mut Vec<I>,
        step_execution: &mut StepExecution,
    ) -> Result<bool, BatchError> {
        debug!("Start reading chunk");
        read_items.clear();

        while read_items.len() < self.chunk_size {
            match self.reader.read()? {
                Some(item) => {
                    read_items.push(item);
                    step_execution.read_count += 1;
                }
                None => {
                    debug!("End reading chunk: FINISHED");
                    return Ok(true);
                }
            }
        }

        debug!("End reading chunk: FULL");
        Ok(false)
    }

    fn process_chunk(
        &self,
        read_items: &[I],
        step_execution: &mut StepExecution,
    ) -> Result<Vec<O>, BatchError> {
        debug!("Start processing chunk");
        let first_index = step_execution.process_count;

        let mut processed_items = Vec::with_capacity(read_items.len());
        for (offset, item) in read_items.iter().enumerate() {
            let processed = self.processor.process(item).map_err(|err| {
                error!(
                    "Error occurred while processing item #{}: {}",
                    first_index + offset + 1,
                    err
                );
                err
            })?;
            processed_items.push(processed);
            step_execution.process_count += 1;
        }

        debug!("End processing chunk");
        Ok(processed_items)
    }

    fn write_chunk(
        &self,
        processed_items: &[O],
        step_execution: &mut StepExecution,
    ) -> Result<(), BatchError> {
        debug!("Start writing chunk");

        self.writer.write(processed_items)?;
        self.writer.flush()?;
        step_execution.write_count += processed_items.len();

        debug!("End writing chunk");
        Ok(())
    }
}

/// Step running a [`Tasklet`] until it reports [`RepeatStatus::Finished`].
pub struct TaskletStep<'a> {
    name: String,
    tasklet: &'a dyn Tasklet,
}

impl Step for TaskletStep<'_> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        info!("Start of step: {}, id: {}", self.name, step_execution.id);
        step_execution.start();

        loop {
            match self.tasklet.execute(step_execution) {
                Ok(RepeatStatus::Continuable) => continue,
                Ok(RepeatStatus::Finished) => break,
                Err(err) => {
                    step_execution.end(StepStatus::Failed);
                    error!("Step {} failed: {}", self.name, err);
                    return Err(BatchError::Step(format!("{}: {}", self.name, err)));
                }
            }
        }

        step_execution.end(StepStatus::Success);
        info!("End of step: {}", self.name);
        Ok(())
    }
}

/// Entry point for building steps.
///
/// # Example
///
/// ```
/// use yml_feed_rs::core::item::{
///     ItemProcessor, ItemProcessorResult, ItemReader, ItemReaderResult, ItemWriter,
///     ItemWriterResult,
/// };
/// use yml_feed_rs::core::step::{Step, StepBuilder, StepExecution, StepStatus};
/// use std::cell::RefCell;
///
/// struct Numbers(RefCell<Vec<u32>>);
///
/// impl ItemReader<u32> for Numbers {
///     fn read(&self) -> ItemReaderResult<u32> {
///         Ok(self.0.borrow_mut().pop())
///     }
/// }
///
/// struct Double;
///
/// impl ItemProcessor<u32, u32> for Double {
///     fn process(&self, item: &u32) -> ItemProcessorResult<u32> {
///         Ok(item * 2)
///     }
/// }
///
/// #[derive(Default)]
/// struct Sink(RefCell<Vec<u32>>);
///
/// impl ItemWriter<u32> for Sink {
///     fn write(&self, items: &[u32]) -> ItemWriterResult {
///         self.0.borrow_mut().extend_from_slice(items);
///         Ok(())
///     }
/// }
///
/// let reader = Numbers(RefCell::new(vec![3, 2, 1]));
/// let processor = Double;
/// let writer = Sink::default();
///
/// let step = StepBuilder::new("double-numbers")
///     .chunk::<u32, u32>(2)
///     .reader(&reader)
///     .processor(&processor)
///     .writer(&writer)
///     .build()
///     .unwrap();
///
/// let mut step_execution = StepExecution::new(step.get_name());
/// step.execute(&mut step_execution).unwrap();
///
/// assert_eq!(step_execution.status, StepStatus::Success);
/// assert_eq!(*writer.0.borrow(), vec![2, 4, 6]);
/// ```
pub struct StepBuilder {
    name: String,
}

impl StepBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn tasklet(self, tasklet: &dyn Tasklet) -> TaskletBuilder<'_> {
        TaskletBuilder {
            name: self.name,
            tasklet,
        }
    }

    pub fn chunk<'a, I, O>(self, chunk_size: usize) -> ChunkOrientedStepBuilder<'a, I, O> {
        ChunkOrientedStepBuilder {
            name: self.name,
            reader: None,
            processor: None,
            writer: None,
            chunk_size,
        }
    }
}

pub struct TaskletBuilder<'a> {
    name: String,
    tasklet: &'a dyn Tasklet,
}

impl<'a> TaskletBuilder<'a> {
    pub fn build(self) -> TaskletStep<'a> {
        TaskletStep {
            name: self.name,
            tasklet: self.tasklet,
        }
    }
}

pub struct ChunkOrientedStepBuilder<'a, I, O> {
    name: String,
    reader: Option<&'a dyn ItemReader<I>>,
    processor: Option<&'a dyn ItemProcessor<I, O>>,
    writer: Option<&'a dyn ItemWriter<O>>,
    chunk_size: usize,
}

impl<'a, I, O> ChunkOrientedStepBuilder<'a, I, O> {
    pub fn reader(mut self, reader: &'a dyn ItemReader<I>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn processor(mut self, processor: &'a dyn ItemProcessor<I, O>) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn writer(mut self, writer: &'a dyn ItemWriter<O>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn build(self) -> Result<ChunkOrientedStep<'a, I, O>, BatchError> {
        let reader = self.reader.ok_or_else(|| {
            BatchError::Configuration(format!("step {} has no reader", self.name))
        })?;
        let processor = self.processor.ok_or_else(|| {
            BatchError::Configuration(format!("step {} has no processor", self.name))
        })?;
        let writer = self.writer.ok_or_else(|| {
            BatchError::Configuration(format!("step {} has no writer", self.name))
        })?;
        if self.chunk_size == 0 {
            return Err(BatchError::Configuration(format!(
                "step {} needs a chunk size of at least 1",
                self.name
            )));
        }

        Ok(ChunkOrientedStep {
            name: self.name,
            reader,
            processor,
            writer,
            chunk_size: self.chunk_size,
        })
    }
}
