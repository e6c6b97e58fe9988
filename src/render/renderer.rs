//! Card Renderer
//!
//! Turns news records into cards and writes them onto a [`Surface`].
//! Display-only values (projection probability and event identifier) come
//! from an injected random source so tests can pin them.

use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

use super::markup;
use super::surface::{Card, Panel, Record, Region, Surface};
use crate::news::{Feed, FutureNewsItem, NewsItem, Timeframe};
use crate::pipeline::RetryAction;

/// Lowest probability shown on a projection
pub const MIN_PROBABILITY: u8 = 60;
/// Highest probability shown on a projection
pub const MAX_PROBABILITY: u8 = 90;

/// Renders feeds and detail views
pub struct Renderer {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// Renderer drawing display values from OS entropy
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer drawing display values from `rng`
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Deterministic renderer, for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Show the loading placeholder for a feed
    pub fn show_loading(&self, surface: &dyn Surface, feed: Feed) {
        surface.show(Region::for_feed(feed), Panel::markup(markup::loading(feed)));
    }

    /// Show the error panel for a failed request, carrying its retry action
    pub fn show_error(&self, surface: &dyn Surface, retry: RetryAction) {
        surface.show(
            Region::for_feed(retry.feed()),
            Panel {
                markup: markup::error_panel(&retry),
                cards: Vec::new(),
                retry: Some(retry),
            },
        );
    }

    /// Render current headlines in input order
    pub fn render_current(&self, surface: &dyn Surface, items: &[NewsItem]) -> usize {
        let cards: Vec<Card> = items.iter().map(current_card).collect();
        self.show_cards(surface, Feed::Current, cards)
    }

    /// Render projections in input order, drawing a fresh probability and
    /// event identifier for every card
    pub fn render_future(
        &self,
        surface: &dyn Surface,
        items: &[FutureNewsItem],
        timeframe: Timeframe,
    ) -> usize {
        let cards: Vec<Card> = {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            items
                .iter()
                .map(|item| future_card(item, timeframe, &mut *rng))
                .collect()
        };
        self.show_cards(surface, Feed::Future, cards)
    }

    /// Open the detail view for a rendered card
    ///
    /// Built from the card retained in the feed's region, never from markup.
    /// Returns the detail markup, or `None` if no such card is shown.
    pub fn show_detail(&self, surface: &dyn Surface, feed: Feed, id: i64) -> Option<String> {
        let panel = surface.panel(Region::for_feed(feed))?;
        let card = panel.card(id)?;

        let html = markup::detail(card);
        surface.show(
            Region::Detail,
            Panel {
                markup: html.clone(),
                cards: vec![card.clone()],
                retry: None,
            },
        );
        Some(html)
    }

    fn show_cards(&self, surface: &dyn Surface, feed: Feed, cards: Vec<Card>) -> usize {
        let region = Region::for_feed(feed);

        if cards.is_empty() {
            surface.show(region, Panel::markup(markup::empty(feed)));
            return 0;
        }

        let count = cards.len();
        surface.show(
            region,
            Panel {
                markup: markup::cards(&cards),
                cards,
                retry: None,
            },
        );
        count
    }
}

/// Localized publication time, as shown on cards
pub fn format_published(published_at: &DateTime<Utc>) -> String {
    published_at
        .with_timezone(&Local)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// Random event identifier, `FE-` followed by four digits
pub fn event_id(rng: &mut impl Rng) -> String {
    format!("FE-{:04}", rng.gen_range(0..10_000u32))
}

/// Random display probability in `[MIN_PROBABILITY, MAX_PROBABILITY]`
pub fn probability(rng: &mut impl Rng) -> u8 {
    rng.gen_range(MIN_PROBABILITY..=MAX_PROBABILITY)
}

fn current_card(item: &NewsItem) -> Card {
    Card {
        id: item.id,
        feed: Feed::Current,
        title: item.title.clone(),
        label: item.source.clone(),
        stamp: format_published(&item.published_at),
        body: item
            .description
            .clone()
            .unwrap_or_else(|| markup::NO_DESCRIPTION.to_string()),
        probability: None,
        record: Record::Current(item.clone()),
    }
}

fn future_card(item: &FutureNewsItem, timeframe: Timeframe, rng: &mut impl Rng) -> Card {
    let probability = probability(rng);

    Card {
        id: item.id,
        feed: Feed::Future,
        title: item.title.clone(),
        label: format!("Projected +{}", timeframe.display_text()),
        stamp: format!("ID: {}", event_id(rng)),
        body: item
            .content
            .clone()
            .unwrap_or_else(|| markup::NO_PROJECTION.to_string()),
        probability: Some(probability),
        record: Record::Future(item.clone()),
    }
}
