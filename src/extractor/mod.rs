pub mod line_extractor;
pub mod output_sink;

pub use line_extractor::{ExtractionProgress, LineExtractor, SearchRequest};
pub use output_sink::{MatchResult, OutputSink};
