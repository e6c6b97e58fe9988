//! Dashboard Page
//!
//! - GET / - the dashboard shell
//!
//! The shell is static apart from the form options and loading placeholders.
//! Its script forwards user actions to the panel routes and swaps the
//! returned markup into place. Card details and retry parameters come from
//! the panel markup itself.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::dashboard::state::AppState;
use crate::news::{Feed, Timeframe, STYLE_PRESETS};
use crate::render::{markup, Region};

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(state.pipeline_config.current_limit))
}

/// Full dashboard page
pub fn render_page(current_limit: u32) -> String {
    let timeframes: String = Timeframe::all()
        .iter()
        .map(|tf| {
            let selected = if *tf == Timeframe::default() { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>+{}</option>"#,
                tf.as_str(),
                tf.display_text()
            )
        })
        .collect();

    let styles: String = STYLE_PRESETS
        .iter()
        .map(|style| format!(r#"<option value="{style}">{style}</option>"#))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Foresight</title>
<style>{STYLE}</style>
</head>
<body>
<div id="auth-modal" class="modal" style="display: flex">
    <form id="auth-form" class="modal-box">
        <h2>Restricted Access</h2>
        <input type="text" name="operator" placeholder="Operator designation" required>
        <button type="submit" class="glow-btn">Enter</button>
    </form>
</div>

<main class="dashboard">
    <section>
        <h3>Current Intelligence</h3>
        <div id="{current}" data-limit="{current_limit}"></div>
    </section>
    <section>
        <h3>Timeline Projections</h3>
        <div class="controls">
            <select id="timeframe">{timeframes}</select>
            <select id="style">{styles}</select>
            <button id="generate-btn" class="glow-btn">Generate</button>
        </div>
        <div id="{future}"></div>
    </section>
</main>

<div id="news-detail-modal" class="modal">
    <div class="modal-box">
        <span class="close-modal">&times;</span>
        <div id="{detail}"></div>
    </div>
</div>

<template id="loading-current">{loading_current}</template>
<template id="loading-future">{loading_future}</template>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        current = Region::CurrentNews.element_id(),
        future = Region::FutureNews.element_id(),
        detail = Region::Detail.element_id(),
        loading_current = markup::loading(Feed::Current),
        loading_future = markup::loading(Feed::Future),
    )
}

const STYLE: &str = r#"
body { background: #0b0f14; color: #c9d1d9; font-family: monospace; margin: 0; }
.dashboard { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; padding: 2rem; }
.news-card { border: 1px solid #1f6feb; padding: 1rem; margin-bottom: 1rem; cursor: pointer; }
.news-meta { display: flex; justify-content: space-between; font-size: 0.8rem; opacity: 0.7; }
.probability-indicator { background: #21262d; height: 4px; }
.probability-indicator div { background: #f78166; height: 4px; }
.modal { display: none; position: fixed; inset: 0; background: rgba(0,0,0,0.8); align-items: center; justify-content: center; }
.modal-box { background: #161b22; padding: 2rem; max-width: 40rem; }
.classification-banner { color: #f85149; font-weight: bold; }
.glow-btn { background: #1f6feb; color: white; border: none; padding: 0.5rem 1rem; cursor: pointer; }
"#;

const SCRIPT: &str = r#"
function swap(id, request) {
    return request
        .then(r => r.text())
        .then(html => { document.getElementById(id).innerHTML = html; })
        .catch(err => console.error('Request failed:', err));
}

function showLoading(id, feed) {
    document.getElementById(id).innerHTML = document.getElementById('loading-' + feed).innerHTML;
}

function loadCurrent(limit) {
    showLoading('current-news', 'current');
    swap('current-news', fetch('/panels/current?limit=' + limit));
}

function generateFuture(params) {
    showLoading('future-news', 'future');
    swap('future-news', fetch('/panels/future', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(params)
    }));
}

function generateFromForm() {
    generateFuture({
        time_frame: document.getElementById('timeframe').value,
        style: document.getElementById('style').value
    });
}

function onRegionClick(event) {
    const retry = event.target.closest('[data-retry]');
    if (retry) {
        const ds = retry.dataset;
        if (ds.retry === 'current') {
            loadCurrent(ds.limit);
        } else {
            generateFuture({ time_frame: ds.timeFrame, style: ds.style, limit: Number(ds.limit) });
        }
        return;
    }
    const card = event.target.closest('.news-card');
    if (card) {
        const detail = card.querySelector('template.card-detail');
        document.getElementById('modal-body').innerHTML = detail.innerHTML;
        document.getElementById('news-detail-modal').style.display = 'flex';
    }
}

document.addEventListener('DOMContentLoaded', () => {
    document.getElementById('auth-form').addEventListener('submit', event => {
        event.preventDefault();
        document.getElementById('auth-modal').style.display = 'none';
        loadCurrent(document.getElementById('current-news').dataset.limit);
    });
    document.getElementById('generate-btn').addEventListener('click', generateFromForm);
    document.getElementById('current-news').addEventListener('click', onRegionClick);
    document.getElementById('future-news').addEventListener('click', onRegionClick);
    document.querySelectorAll('.close-modal').forEach(button => {
        button.addEventListener('click', () => { button.closest('.modal').style.display = 'none'; });
    });
    window.addEventListener('click', event => {
        if (event.target.classList.contains('modal') && event.target.id !== 'auth-modal') {
            event.target.style.display = 'none';
        }
    });
});
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_regions_and_options() {
        let page = render_page(10);

        assert!(page.contains(r#"<div id="current-news" data-limit="10"></div>"#));
        assert!(page.contains(r#"<div id="future-news"></div>"#));
        assert!(page.contains(r#"<div id="modal-body"></div>"#));
        assert!(page.contains(r#"<option value="WEEK" selected>+7 days</option>"#));
        assert!(page.contains(r#"<option value="analytical">analytical</option>"#));
        assert!(page.contains("Calculating future probabilities..."));
        assert!(page.contains("template.card-detail"));
        assert!(!page.contains("/detail/"));
    }
}
