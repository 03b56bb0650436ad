#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use linkcut::application::services::{
    AnalyticsService, ClickLedgerService, LinkService, SecurityScorer,
};
use linkcut::domain::click_event::ClickEvent;
use linkcut::infrastructure::advisory::NullOracle;
use linkcut::infrastructure::cache::NullCache;
use linkcut::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use linkcut::state::AppState;
use linkcut::utils::fingerprint::Fingerprinter;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Builds an application state backed by the test pool, with the cache and
/// advisory oracle disabled. The click channel receiver is returned so tests
/// can inspect or drain fired events.
pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));

    let oracle = Arc::new(NullOracle::new());
    let (click_tx, click_rx) = mpsc::channel(1_000);

    let state = AppState::new(
        Arc::new(LinkService::new(link_repository)),
        Arc::new(ClickLedgerService::new(click_repository.clone())),
        Arc::new(AnalyticsService::new(click_repository, 5_000)),
        Arc::new(SecurityScorer::new(oracle.clone())),
        oracle,
        Arc::new(NullCache::new()),
        click_tx,
        Fingerprinter::new(b"test-salt".to_vec()),
        TEST_BASE_URL.to_string(),
        false,
    );

    (state, click_rx)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (code, destination_url, security_score) \
         VALUES ($1, $2, 80) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a click row directly and keeps the denormalized counter in step,
/// mirroring what the ledger transaction does.
pub async fn create_test_click(pool: &PgPool, link_id: i64, fingerprint: &str) {
    sqlx::query(
        "INSERT INTO link_clicks (link_id, fingerprint) \
         VALUES ($1, $2)",
    )
    .bind(link_id)
    .bind(fingerprint)
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "UPDATE links SET click_count = click_count + 1, last_clicked_at = now() WHERE id = $1",
    )
    .bind(link_id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_clicks(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
