//! Streaming PDF context backed by lopdf.
//!
//! Pages are written to the output as soon as the next page begins, so only
//! one page's drawing operations are held in memory at a time.

mod context;
mod xobject;
mod writer;

pub use context::{DocumentInfo, LopdfContext};
pub use writer::StreamingPdfWriter;
