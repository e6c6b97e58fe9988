//! Display Surface
//!
//! Named regions the renderer writes into. A region holds the markup last
//! written to it along with the cards behind that markup and the retry action
//! of an error panel, so that selection and retry never have to parse markup.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::news::{Feed, FutureNewsItem, NewsItem};
use crate::pipeline::RetryAction;

/// A display region on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    CurrentNews,
    FutureNews,
    Detail,
}

impl Region {
    /// Region that shows a feed's cards
    pub fn for_feed(feed: Feed) -> Self {
        match feed {
            Feed::Current => Region::CurrentNews,
            Feed::Future => Region::FutureNews,
        }
    }

    /// Element id of the region on the dashboard page
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::CurrentNews => "current-news",
            Region::FutureNews => "future-news",
            Region::Detail => "modal-body",
        }
    }
}

/// One rendered news card, retained next to its markup
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: i64,
    pub feed: Feed,
    pub title: String,
    /// Source name, or the projection label for future cards
    pub label: String,
    /// Localized publication time, or the event identifier for future cards
    pub stamp: String,
    pub body: String,
    /// Display-only probability, future cards only
    pub probability: Option<u8>,
    pub record: Record,
}

/// The record a card was rendered from
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Current(NewsItem),
    Future(FutureNewsItem),
}

/// Contents of a region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub markup: String,
    pub cards: Vec<Card>,
    pub retry: Option<RetryAction>,
}

impl Panel {
    /// A panel with markup only
    pub fn markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Default::default()
        }
    }

    /// Find a card by id; with duplicate ids the later card wins
    pub fn card(&self, id: i64) -> Option<&Card> {
        self.cards.iter().rev().find(|card| card.id == id)
    }
}

/// Something the renderer can draw on
pub trait Surface: Send + Sync {
    /// Replace the contents of a region
    fn show(&self, region: Region, panel: Panel);

    /// Current contents of a region, if anything was written to it
    fn panel(&self, region: Region) -> Option<Panel>;
}

/// Headless surface that keeps regions in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    regions: RwLock<HashMap<Region, Panel>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup currently shown in a region, empty if none
    pub fn markup(&self, region: Region) -> String {
        self.panel(region).map(|p| p.markup).unwrap_or_default()
    }
}

impl Surface for MemorySurface {
    fn show(&self, region: Region, panel: Panel) {
        // A poisoned lock only means a writer panicked mid-insert; the map is still usable
        let mut regions = self
            .regions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        regions.insert(region, panel);
    }

    fn panel(&self, region: Region) -> Option<Panel> {
        let regions = self
            .regions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        regions.get(&region).cloned()
    }
}
