//! VisionPath core — local/cloud reconciliation and progress aggregation for
//! a roadmap-planning tool.
//!
//! The presentation layer (views, modals, drag styling) lives elsewhere and
//! calls in through four surfaces:
//!
//! - [`sync`]: cold-start hydration from the local cache, then a full remote
//!   pull with all-or-nothing apply
//! - [`mutations`]: optimistic create/update/delete with best-effort remote
//!   propagation and unconditional local durability
//! - [`progress`]: pure completion rollups (item → quarter → family)
//! - [`state::AppState`]: the shared dataset plus the sync status indicator
//!
//! Everything works with no remote configured; the gateway being `None` is
//! offline mode, not a failure.

pub mod cache;
pub mod config;
pub mod mutations;
pub mod progress;
pub mod remote;
pub mod state;
pub mod supabase;
pub mod sync;
pub mod types;
