use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hearth_core::{Resource, ResourceCard, TrustOverride, to_card};

use crate::Hearth;

impl Hearth {
    /// Cards for local rows, with store-held trust overrides applied.
    ///
    /// The two override lookups run concurrently. If either fails the rows
    /// are carded from derived signals only.
    pub(crate) async fn cards_with_trust(
        &self,
        rows: &[Resource],
        now: DateTime<Utc>,
    ) -> Vec<ResourceCard> {
        if rows.is_empty() {
            return Vec::new();
        }
        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let (availability, verification) = tokio::join!(
            self.repository.fetch_availability(&ids),
            self.repository.fetch_verification(&ids),
        );

        let overrides: HashMap<String, TrustOverride> = match (availability, verification) {
            (Ok(availability), Ok(verification)) => {
                let a: HashMap<&str, _> = availability
                    .iter()
                    .map(|row| (row.resource_id.as_str(), row))
                    .collect();
                let v: HashMap<&str, _> = verification
                    .iter()
                    .map(|row| (row.resource_id.as_str(), row))
                    .collect();
                ids.iter()
                    .filter_map(|id| {
                        TrustOverride::merge(a.get(id.as_str()).copied(), v.get(id.as_str()).copied())
                            .map(|o| (id.clone(), o))
                    })
                    .collect()
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "trust overrides unavailable; using derived signals");
                HashMap::new()
            }
        };

        rows.iter()
            .map(|r| to_card(r, overrides.get(&r.id), now))
            .collect()
    }
}
