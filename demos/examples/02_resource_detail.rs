use hearth_core::{format_distance, haversine_miles};
use hearth_demos::common::{build_hearth, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let hearth = build_hearth()?;

    let detail = hearth.resource_detail("legal-aid").await?;
    let Some(card) = detail.resource else {
        println!("legal-aid not found");
        return Ok(());
    };
    println!("{} ({})", card.resource.name, card.verification_badge.as_str());

    let origin = card.resource.coordinates();
    println!("Nearby alternatives:");
    for alt in &detail.alternatives {
        let distance = match (origin, alt.resource.coordinates()) {
            (Some((lat1, lng1)), Some((lat2, lng2))) => {
                format_distance(haversine_miles(lat1, lng1, lat2, lng2))
            }
            _ => "unknown distance".to_string(),
        };
        println!("- {} ({distance})", alt.resource.name);
    }
    Ok(())
}
