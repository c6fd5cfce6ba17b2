//! Pipelines assembled at runtime.
//!
//! When stages come from data (a query file, a command line) their types
//! are not known to the compiler. The builder here keeps the running output
//! type as a [`TypeId`] and checks every appended stage against it, so a
//! malformed pipeline is still rejected while it is being assembled, before
//! any sequence is touched.

use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use super::stage::{Kind, Stage, StageKind};
use crate::errors::{QueryError, Result};

/// Type-erased stage for dynamic dispatch.
///
/// This trait allows stages of different types to be stored in one list.
pub(crate) trait AnyStage: Send + Sync {
    fn execute_any(&self, input: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>>;
    fn name(&self) -> &str;
    fn kind(&self) -> Kind;
    fn input_type(&self) -> (TypeId, &'static str);
    fn output_type(&self) -> (TypeId, &'static str);
}

impl<S> AnyStage for S
where
    S: Stage + Send + Sync,
    S::Input: Send + 'static,
    S::Output: Send + 'static,
{
    fn execute_any(&self, input: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>> {
        let typed_input = input
            .downcast::<S::Input>()
            .map_err(|_| QueryError::TypeMismatch {
                position: 0,
                stage: Stage::name(self).to_string(),
                expected: type_name::<S::Input>(),
                found: "<erased>",
            })?;

        let output = self.execute(*typed_input)?;
        Ok(Box::new(output))
    }

    fn name(&self) -> &str {
        Stage::name(self)
    }

    fn kind(&self) -> Kind {
        <S::Kind as StageKind>::KIND
    }

    fn input_type(&self) -> (TypeId, &'static str) {
        (TypeId::of::<S::Input>(), type_name::<S::Input>())
    }

    fn output_type(&self) -> (TypeId, &'static str) {
        (TypeId::of::<S::Output>(), type_name::<S::Output>())
    }
}

/// Builder for pipelines whose stages are chosen at runtime.
///
/// # Example
///
/// ```rust
/// use seqpipe::errors::QueryError;
/// use seqpipe::ops::{sum, take};
/// use seqpipe::DynPipelineBuilder;
///
/// let pipeline = DynPipelineBuilder::<Vec<i64>>::new()
///     .stage(take::<i64>(2))?
///     .stage(sum::<i64>())?
///     .build()?;
/// assert_eq!(pipeline.execute_as::<i64>(vec![4, 5, 6])?, 9);
///
/// let err = DynPipelineBuilder::<Vec<i64>>::new()
///     .stage(sum::<i64>())?
///     .stage(take::<i64>(1))
///     .err();
/// assert!(matches!(err, Some(QueryError::NonTerminalReduction { .. })));
/// # Ok::<(), QueryError>(())
/// ```
pub struct DynPipelineBuilder<In> {
    stages: Vec<Box<dyn AnyStage>>,
    output: (TypeId, &'static str),
    terminated: bool,
    _phantom: PhantomData<fn(In)>,
}

impl<In: Send + 'static> DynPipelineBuilder<In> {
    /// Create an empty builder for pipelines consuming `In`.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            output: (TypeId::of::<In>(), type_name::<In>()),
            terminated: false,
            _phantom: PhantomData,
        }
    }

    /// Add a stage to the pipeline.
    ///
    /// The stage's input type must match the current output type, and no
    /// stage may follow a reduction.
    pub fn stage<S>(mut self, stage: S) -> Result<Self>
    where
        S: Stage + Send + Sync + 'static,
        S::Input: Send + 'static,
        S::Output: Send + 'static,
    {
        let position = self.stages.len() + 1;

        if self.terminated {
            return Err(QueryError::NonTerminalReduction {
                position,
                stage: Stage::name(&stage).to_string(),
            });
        }

        let (input_id, input_name) = AnyStage::input_type(&stage);
        if input_id != self.output.0 {
            return Err(QueryError::TypeMismatch {
                position,
                stage: Stage::name(&stage).to_string(),
                expected: input_name,
                found: self.output.1,
            });
        }

        log::debug!(
            "Stage {}: {} ({}) -> {}",
            position,
            Stage::name(&stage),
            <S::Kind as StageKind>::KIND,
            type_name::<S::Output>()
        );

        self.terminated = <S::Kind as StageKind>::KIND == Kind::Reduction;
        self.output = AnyStage::output_type(&stage);
        self.stages.push(Box::new(stage));
        Ok(self)
    }

    /// Add a stage conditionally.
    ///
    /// If the condition is true the closure runs, otherwise this is a no-op.
    pub fn when<F>(self, condition: bool, f: F) -> Result<Self>
    where
        F: FnOnce(Self) -> Result<Self>,
    {
        if condition {
            f(self)
        } else {
            Ok(self)
        }
    }

    /// Number of stages added so far.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Name of the type the next stage must consume.
    pub fn current_output_type(&self) -> &'static str {
        self.output.1
    }

    /// True when the pipeline currently produces a value of type `T`.
    pub fn produces<T: 'static>(&self) -> bool {
        self.output.0 == TypeId::of::<T>()
    }

    /// Whether the last stage added was a reduction.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Build the final pipeline ready for execution.
    pub fn build(self) -> Result<DynPipeline<In>> {
        if self.stages.is_empty() {
            return Err(QueryError::EmptyPipeline);
        }
        Ok(DynPipeline {
            stages: self.stages,
            output: self.output,
            _phantom: PhantomData,
        })
    }
}

impl<In: Send + 'static> Default for DynPipelineBuilder<In> {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated runtime pipeline.
///
/// The pipeline can be executed multiple times with different inputs.
pub struct DynPipeline<In> {
    stages: Vec<Box<dyn AnyStage>>,
    output: (TypeId, &'static str),
    _phantom: PhantomData<fn(In)>,
}

impl<In: Send + 'static> DynPipeline<In> {
    /// Execute the pipeline, returning the type-erased result.
    pub fn execute(&self, input: In) -> Result<Box<dyn Any + Send>> {
        let _span = tracing::debug_span!("dyn_pipeline", stages = self.stages.len()).entered();

        let mut data: Box<dyn Any + Send> = Box::new(input);
        for (i, stage) in self.stages.iter().enumerate() {
            log::trace!("Stage {}/{}: {}", i + 1, self.stages.len(), stage.name());
            data = stage.execute_any(data).map_err(|e| {
                log::debug!("Stage '{}' failed: {}", stage.name(), e);
                e
            })?;
        }
        Ok(data)
    }

    /// Execute the pipeline and extract a result of type `T`.
    pub fn execute_as<T: 'static>(&self, input: In) -> Result<T> {
        let output = self.execute(input)?;
        output
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|_| QueryError::TypeMismatch {
                position: self.stages.len(),
                stage: "result".to_string(),
                expected: type_name::<T>(),
                found: self.output.1,
            })
    }

    /// Execute the pipeline and collect timing information for each stage.
    pub fn execute_with_timing(
        &self,
        input: In,
    ) -> Result<(Box<dyn Any + Send>, Vec<StageTiming>)> {
        let mut data: Box<dyn Any + Send> = Box::new(input);
        let mut timings = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let start = Instant::now();
            data = stage.execute_any(data)?;
            timings.push(StageTiming {
                name: stage.name().to_string(),
                duration: start.elapsed(),
            });
        }

        Ok((data, timings))
    }

    /// Get the number of stages in this pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Kind of the final stage.
    pub fn kind(&self) -> Kind {
        self.stages
            .last()
            .map(|s| s.kind())
            .unwrap_or(Kind::Transform)
    }

    /// Whether the pipeline's result has type `T`.
    pub fn produces<T: 'static>(&self) -> bool {
        self.output.0 == TypeId::of::<T>()
    }

    pub fn output_type_name(&self) -> &'static str {
        self.output.1
    }

    /// Describe every stage in execution order.
    pub fn describe(&self) -> Vec<StageInfo> {
        self.stages
            .iter()
            .enumerate()
            .map(|(i, stage)| StageInfo {
                position: i + 1,
                name: stage.name().to_string(),
                kind: stage.kind(),
                input: stage.input_type().1,
                output: stage.output_type().1,
            })
            .collect()
    }
}

/// Static description of one stage of a [`DynPipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInfo {
    pub position: usize,
    pub name: String,
    pub kind: Kind,
    pub input: &'static str,
    pub output: &'static str,
}

/// Timing information for a pipeline stage.
#[derive(Debug, Clone)]
pub struct StageTiming {
    /// Name of the stage
    pub name: String,

    /// Time taken to execute the stage
    pub duration: Duration,
}

impl StageTiming {
    /// Format the timing as a human-readable string.
    pub fn format(&self) -> String {
        format!("{}: {:.3}ms", self.name, self.duration.as_secs_f64() * 1000.0)
    }
}
