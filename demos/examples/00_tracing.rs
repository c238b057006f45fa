use hearth::ResourceFilters;
use hearth_demos::common::{build_hearth, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Spans for list_resources and connector calls, plus audit events.
    init_tracing();

    let hearth = build_hearth()?;

    // Local hit, then the same listing from cache.
    let filters = ResourceFilters::from_query_str("city=Orange")?;
    let _ = hearth.list_resources(&filters).await?;
    let _ = hearth.list_resources(&filters).await?;

    // Nothing local matches, so the default feed answers.
    let filters = ResourceFilters::from_query_str("state=NY&categories=food")?;
    let _ = hearth.list_resources(&filters).await?;

    Ok(())
}
