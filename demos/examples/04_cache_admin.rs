use hearth::CacheNamespace;
use hearth_demos::common::{build_hearth, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let hearth = build_hearth()?;
    let sweeper = hearth.start_cache_sweeper();

    hearth.list_resources_from_query("city=Orange").await?;
    hearth.list_resources_from_query("city=Orange").await?;
    hearth.resource_detail("demo-1").await?;

    let stats = hearth.cache_stats().await;
    println!(
        "entries: {}, hits: {}, misses: {}, remote: {}",
        stats.local_entries, stats.hits, stats.misses, stats.remote_configured
    );
    for key in &stats.fresh_keys {
        println!("fresh: {key}");
    }

    for status in hearth.source_status().await {
        println!("source {} ({}) limited: {}", status.source, status.label, status.rate_limit.is_some());
    }

    // Invalidation needs HEARTH_ADMIN_API_KEY; without it the call is refused.
    let key = std::env::var("HEARTH_ADMIN_API_KEY").unwrap_or_default();
    match hearth.invalidate_cache(&key, Some(CacheNamespace::Resources)).await {
        Ok(removed) => println!("invalidated {removed} entries"),
        Err(e) => println!("invalidation refused: {e}"),
    }

    sweeper.stop().await;
    Ok(())
}
