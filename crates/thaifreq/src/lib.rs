pub mod clean;
pub mod freq;
pub mod handlers;
pub mod pipeline;

pub use clean::{Cleaner, CleanerConfig, NUM_TOKEN, clean};
pub use freq::{
    DEFAULT_MIN_FREQ, FrequencyMap, NormalizeError, ProbabilityMap, count, filter, normalize,
};
pub use handlers::{AppState, router};
pub use pipeline::{FrequencyEntry, FrequencyReport, Pipeline, PipelineOptions};
