mod helpers;

#[path = "aggregate/admin_cache.rs"]
mod admin_cache;
#[path = "aggregate/admin_sync.rs"]
mod admin_sync;
#[path = "aggregate/detail_alternatives.rs"]
mod detail_alternatives;
#[path = "aggregate/listing_cache.rs"]
mod listing_cache;
#[path = "aggregate/listing_failures.rs"]
mod listing_failures;
#[path = "aggregate/listing_filters.rs"]
mod listing_filters;
#[path = "aggregate/listing_sources.rs"]
mod listing_sources;
#[path = "aggregate/listing_trust.rs"]
mod listing_trust;
