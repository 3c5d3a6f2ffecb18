//! Day feed loading.
//!
//! - [`shapes`] - ordered, first-match decoding of the date-index body
//! - `resolver` - `IdentifierSource` for [`ApiClient`](crate::api::ApiClient)
//! - [`FeedAggregator`] - concurrent detail fan-out with per-item failure isolation
//! - [`CancelToken`] - abandons an in-progress load
//! - [`FeedState`] - per-screen state replaced wholesale on each load
//!
//! # Example
//!
//! ```ignore
//! use newbie_feed::feed::{CancelToken, FeedAggregator};
//!
//! let aggregator = FeedAggregator::new(client.clone(), client);
//! let entries = aggregator.load_feed(day, &CancelToken::new()).await?;
//! ```

mod aggregator;
mod cancel;
mod resolver;
pub mod shapes;
mod state;

pub use aggregator::{DroppedItem, FeedAggregator, FeedError, FeedLoad};
pub use cancel::CancelToken;
pub use shapes::decode_identifiers;
pub use state::FeedState;
