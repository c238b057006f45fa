use hearth_demos::common::{build_hearth, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let hearth = build_hearth()?;

    let page = hearth
        .list_resources_from_query("city=Orange&open_now=true&limit=10")
        .await?;
    println!("{} open resources in Orange (cached: {})", page.count, page.cached);
    for card in &page.data {
        println!(
            "- {:<28} {:<8} {:<16} {:?} [{}]",
            card.resource.name,
            card.availability_status.as_str(),
            card.verification_badge.as_str(),
            card.freshness_state,
            card.data_source_label,
        );
    }
    println!(
        "stale: {}, unknown: {}, sources: {:?}",
        page.freshness.stale_count, page.freshness.unknown_count, page.source_mix
    );

    // Malformed input never reaches the store.
    match hearth.list_resources_from_query("zip=abcde").await {
        Err(e) => println!("rejected: {e}"),
        Ok(_) => println!("unexpectedly accepted a malformed zip"),
    }
    Ok(())
}
