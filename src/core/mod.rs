pub mod normalize;
pub mod pipeline;
pub mod result;
pub mod sample;

pub use normalize::normalize;
pub use pipeline::RefreshPipeline;
pub use result::{PipelineState, RefreshOutcome, RefreshResult};
pub use sample::sample_site;
