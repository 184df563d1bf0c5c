// src/main.rs
//
// Headless host: reads player messages as newline-delimited JSON envelopes
// `{"origin": "...", "data": <payload>}` from stdin, flushes pending progress
// at EOF and prints the continue-watching list as JSON.

use std::sync::Arc;

use anyhow::Context;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use jstream_watch::application::commands::{
    flush_progress, list_continue_watching, receive_player_message,
};
use jstream_watch::application::state::AppState;
use jstream_watch::config::AppConfig;
use jstream_watch::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};
use jstream_watch::repositories::{KeyValueStore, SqliteKeyValueStore};

#[derive(Debug, Deserialize)]
struct Envelope {
    origin: String,
    data: serde_json::Value,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION
    let config = AppConfig::load().context("loading configuration")?;
    let db_path = config.storage.resolve_database_path()?;

    // 2. STORAGE
    let pool = Arc::new(
        create_connection_pool(&db_path)
            .with_context(|| format!("opening {}", db_path.display()))?,
    );
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)
            .with_context(|| format!("checking {}", db_path.display()))?;
        let stats = get_database_stats(&conn)?;
        info!(
            "Store {} ready ({} keys, {} bytes)",
            db_path.display(),
            stats.key_count,
            stats.size_bytes
        );
    }
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));

    // 3. APPLICATION STATE
    let state = AppState::build(&config, store)?;

    // 4. MESSAGE LOOP
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Envelope>(line) {
            Ok(envelope) => {
                let outcome = receive_player_message(&state, &envelope.origin, &envelope.data);
                debug!("{:?}", outcome);
            }
            Err(e) => warn!("Skipping malformed envelope: {}", e),
        }
    }

    // 5. TEARDOWN
    flush_progress(&state);

    let cards = list_continue_watching(&state);
    println!("{}", serde_json::to_string_pretty(&cards)?);

    Ok(())
}
