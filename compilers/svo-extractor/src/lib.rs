pub mod config;
pub mod construct;
pub mod describe;
pub mod extract;
pub mod participant;
pub mod report;
pub mod search;

pub use config::{ConfigError, ExtractorConfig};
pub use construct::SvoConstruct;
pub use extract::{extract_svo_constructs, SvoExtractor};
pub use participant::Participant;
pub use report::{ConstructView, SentenceReport};
