//! Dashboard Rendering
//!
//! - **surface**: display regions (`Surface` trait, headless `MemorySurface`)
//! - **markup**: HTML templates for cards, placeholders and panels
//! - **renderer**: turns records into cards, draws display-only values
//!
//! # Regions
//!
//! ```text
//!   current-news   cards for NewsItem, or loading / empty / error panel
//!   future-news    cards for FutureNewsItem, or loading / empty / error panel
//!   modal-body     detail view of the last selected card
//! ```

pub mod markup;
pub mod renderer;
pub mod surface;

pub use renderer::{
    event_id, format_published, probability, Renderer, MAX_PROBABILITY, MIN_PROBABILITY,
};
pub use surface::{Card, MemorySurface, Panel, Record, Region, Surface};
