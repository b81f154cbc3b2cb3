//! Supabase remote store gateway.
//!
//! Thin typed access to the four remote collections over PostgREST:
//! `teams`, `products`, `roadmap_items`, `milestones`.
//!
//! Modules:
//! - client: reqwest-based [`client::SupabaseClient`] implementing
//!   [`crate::remote::RemoteStore`]
//! - wire: snake_case row types and the full field mapping to the in-memory
//!   shape

pub mod client;
pub mod wire;

pub use client::SupabaseClient;
