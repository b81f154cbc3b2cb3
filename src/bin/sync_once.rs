//! One-shot reconciliation runner.
//!
//! Loads the cached snapshot, pulls the remote dataset if configured, and
//! prints a summary. Exit code 1 when the pull failed; offline (no remote
//! configured) is a normal exit, because the core is expected to run fully
//! local.

use visionpath::cache::RoadmapCache;
use visionpath::config;
use visionpath::remote::RemoteStore;
use visionpath::state::AppState;
use visionpath::supabase::SupabaseClient;
use visionpath::sync;
use visionpath::types::SyncStatus;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let state = AppState::new();

    let cache = match RoadmapCache::open() {
        Ok(cache) => Some(cache),
        Err(e) => {
            log::warn!("Failed to open local cache: {e}. Continuing on memory only.");
            None
        }
    };

    if let Some(cache) = cache.as_ref() {
        sync::load_cached(&state, cache);
    }

    let client = match config::load_config() {
        Ok(config) => SupabaseClient::from_config(&config),
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(2);
        }
    };

    let status = sync::reconcile(
        &state,
        client.as_ref().map(|c| c as &dyn RemoteStore),
        cache.as_ref(),
    )
    .await;

    let snapshot = state.snapshot();
    println!(
        "{status:?}: {} items, {} products, {} milestones, {} verticals",
        snapshot.items.len(),
        snapshot.products.len(),
        snapshot.milestones.len(),
        snapshot.verticals.len()
    );

    if status == SyncStatus::Error {
        std::process::exit(1);
    }
}
