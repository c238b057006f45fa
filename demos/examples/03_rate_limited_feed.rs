use std::sync::Arc;

use hearth::{ConnectorBuilder, Hearth, ResourceConnector};
use hearth_mock::{InMemoryRepository, MockConnector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A feed allowed one call per minute, in front of an empty local store.
    let feed: Arc<dyn ResourceConnector> = ConnectorBuilder::new(Arc::new(MockConnector::new()))
        .requests_per_minute(1)
        .build();
    let hearth = Hearth::builder()
        .with_repository(Arc::new(InMemoryRepository::new()))
        .with_connector(Arc::clone(&feed))
        .default_external_source(feed.name())
        .build()?;

    let first = hearth.list_resources_from_query("search=food").await?;
    println!("first call: {} records from {}", first.count, feed.label());

    // The budget is spent: the feed is skipped and the listing degrades to empty.
    let second = hearth.list_resources_from_query("search=legal").await?;
    println!("second call: {} records (degraded)", second.count);

    if let Some(state) = hearth.rate_limit_status(feed.name()) {
        println!(
            "requests today: {}, this minute: {}, day resets at {}",
            state.requests_today, state.requests_this_minute, state.day_resets_at
        );
    }
    Ok(())
}
