//! Tuning for the conversion passes.

/// Points inspected when deciding whether a cloud carries colour.
pub const COLOUR_DETECTION_SAMPLE_SIZE: usize = 100;

/// Chunk size for parallel bounds and recentring passes.
pub const PARALLEL_CHUNK_SIZE: usize = 25_000;

/// Points read between progress bar updates.
pub const PROGRESS_UPDATE_INTERVAL: usize = 10_000;

pub const PROGRESS_TEMPLATE: &str = "[{bar:40.cyan/blue}] {pos}/{len} points ({percent}%) {msg}";
pub const PROGRESS_CHARS: &str = "▉▊▋▌▍▎▏ ";
