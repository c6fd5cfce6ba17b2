//! Pipeline composition.
//!
//! [`Pipeline`] composes stages whose types are checked by the compiler;
//! [`DynPipeline`] composes stages chosen at runtime and checks them while
//! they are appended. Both thread one owned value through every stage in
//! order and stop at the first failing stage.

mod compose;
mod dynamic;
mod stage;

pub use compose::{Chain, Pipeline};
pub use dynamic::{DynPipeline, DynPipelineBuilder, StageInfo, StageTiming};
pub use stage::{
    FallibleStage, FnStage, Kind, Produces, Reducing, Reduction, Sequence, Stage, StageKind,
    Transform, Transforming,
};
