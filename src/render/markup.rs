//! Markup templates for the dashboard regions
//!
//! Every function here is pure: same input, same markup. All interpolated
//! text goes through `html_escape`.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::surface::Card;
use crate::news::Feed;
use crate::pipeline::RetryAction;

pub const NO_CURRENT: &str = "No current intelligence available.";
pub const NO_FUTURE: &str = "No future projections available.";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_PROJECTION: &str = "No detailed projection available.";

/// Placeholder shown while a feed is being fetched
pub fn loading(feed: Feed) -> String {
    let message = match feed {
        Feed::Current => "Accessing classified information...",
        Feed::Future => "Calculating future probabilities...",
    };

    format!(
        r#"<div class="loading">
    <div class="spinner"></div>
    <p>{message}</p>
</div>"#
    )
}

/// Message shown when a feed has no records
pub fn empty(feed: Feed) -> String {
    let message = match feed {
        Feed::Current => NO_CURRENT,
        Feed::Future => NO_FUTURE,
    };
    format!("<p>{message}</p>")
}

/// Error panel with a retry control
///
/// The control carries the failed request's parameters, so pressing it
/// re-issues exactly that request.
pub fn error_panel(retry: &RetryAction) -> String {
    let feed = retry.feed();
    let (message, action) = match feed {
        Feed::Current => (
            "Error accessing classified information. Security protocols engaged.",
            "Retry Access",
        ),
        Feed::Future => (
            "Prediction algorithm failure. Quantum uncertainty detected.",
            "Recalibrate",
        ),
    };

    let params = match retry {
        RetryAction::Current { limit } => format!(r#"data-limit="{limit}""#),
        RetryAction::Future(request) => format!(
            r#"data-time-frame="{}" data-style="{}" data-limit="{}""#,
            request.time_frame,
            attr(&request.style),
            request.limit
        ),
    };

    format!(
        r#"<div class="error-message">
    <p>{message}</p>
    <button class="glow-btn" data-retry="{feed}" {params}>{action}</button>
</div>"#
    )
}

/// A single news card
///
/// The card's detail view rides along in a `<template class="card-detail">`,
/// so opening it needs nothing but the card itself.
pub fn card(card: &Card) -> String {
    let class = match card.feed {
        Feed::Current => "news-card",
        Feed::Future => "news-card future-card",
    };

    let probability = card
        .probability
        .map(|p| {
            format!(
                r#"
    <div class="future-probability">
        <span>Probability: {p}%</span>
        <div class="probability-indicator">
            <div style="width: {p}%"></div>
        </div>
    </div>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="{class}" data-id="{id}" data-feed="{feed}">
    <h4>{title}</h4>
    <div class="news-meta">
        <span>{label}</span>
        <span>{stamp}</span>
    </div>
    <div class="news-content">
        {body}
    </div>{probability}
    <template class="card-detail">{detail}</template>
</div>"#,
        id = card.id,
        feed = card.feed,
        title = text(&card.title),
        label = text(&card.label),
        stamp = text(&card.stamp),
        body = text(&card.body),
        detail = detail(card),
    )
}

/// All cards of a batch, in order
pub fn cards(cards: &[Card]) -> String {
    cards.iter().map(card).collect::<Vec<_>>().join("\n")
}

/// Detail view for a selected card
pub fn detail(card: &Card) -> String {
    let content = match card.probability {
        Some(p) if card.feed.is_future() => format!(
            r#"<div class="classification-banner">TOP SECRET - TIMELINE MANIPULATION</div>
    <p class="modal-probability">Probability: {p}%</p>
    <p>{body}</p>
    <div class="warning-text">
        <p><strong>WARNING:</strong> This is a projected future event. Manipulation of this timeline may have unforeseen consequences.</p>
        <p>Authorized by the Council of Nine. Directive 47-Alpha in effect.</p>
    </div>"#,
            body = text(&card.body)
        ),
        _ => format!(
            r#"<div class="classification-banner">CONFIDENTIAL - INTELLIGENCE REPORT</div>
    <p>{body}</p>
    <div class="warning-text">
        <p>This information is being monitored and may be subject to manipulation through Operation Shepherd.</p>
    </div>"#,
            body = text(&card.body)
        ),
    };

    format!(
        r#"<div class="news-detail" data-id="{id}" data-feed="{feed}">
<h3 id="modal-title">{title}</h3>
<div class="modal-meta">
    <span id="modal-source">{label}</span>
    <span id="modal-date">{stamp}</span>
</div>
<div id="modal-content">
    {content}
</div>
</div>"#,
        id = card.id,
        feed = card.feed,
        title = text(&card.title),
        label = text(&card.label),
        stamp = text(&card.stamp),
    )
}
