//! Content documents served by the contents API and their feed shaping.
//!
//! - [`ContentDetail`] is the full per-item document (summaries, glossary,
//!   media bias breakdown, source articles).
//! - [`FeedEntry`] is the compact card shown in a day's feed, derived from a
//!   detail with [`FeedEntry::from_detail`].

mod detail;
mod entry;

pub use detail::{
    ClassifiedSource, ContentDetail, ContentStamp, GlossaryItem, Leaning, MediaSummary,
    SourceArticle, VolumeCompare,
};
pub use entry::{ContentId, FeedEntry};
