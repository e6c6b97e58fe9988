//! News Records
//!
//! Plain data carried through the dashboard:
//!
//! - **types**: `NewsItem`, `FutureNewsItem`, `Timeframe`, `GenerationRequest`
//! - **mock**: canned records used when the backend is offline

pub mod mock;
pub mod types;

pub use mock::{current_mocks, current_mocks_at, future_mocks};
pub use types::{
    Feed, FutureNewsItem, GenerationRequest, NewsItem, Timeframe, UnknownVariant, STYLE_PRESETS,
};
