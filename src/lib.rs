//! Client for the NEWbiE contents API.
//!
//! Given a calendar day, [`feed::FeedAggregator`] resolves the identifiers
//! published that day and fetches every detail concurrently, producing a
//! feed of bias-labelled [`content::FeedEntry`] values. Detail failures are
//! isolated per item; only a failed date index fails the load.

pub mod api;
pub mod config;
pub mod content;
pub mod day;
pub mod feed;
pub mod util;
