// Keyword clustering: worksheet loading, ranking, and the per-session selection queue.
// Network access to the spreadsheet lives in `source`; everything else is pure.

pub mod handlers;
pub mod models;
pub mod queue;
pub mod ranking;
pub mod source;
