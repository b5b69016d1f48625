//! Data models: stored paper records, topic names and tool inputs.

mod enums;
mod inputs;
mod paper;
mod topic;

pub use enums::{DocumentType, JstorSearch};
pub use inputs::*;
pub use paper::{PaperMap, PaperRecord, RawSearchResult};
pub use topic::{TopicName, display_title};
