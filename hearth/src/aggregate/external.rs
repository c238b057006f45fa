use chrono::{DateTime, Utc};
use hearth_core::normalize::{external_resource_id, to_resource, validate_resource};
use hearth_core::{ExternalQuery, ResourceCard, ResourceFilters, to_card};

use crate::Hearth;

/// Query sent to a connector on behalf of a listing: always the first page.
pub(crate) fn external_query(filters: &ResourceFilters, cap: u32) -> ExternalQuery {
    ExternalQuery {
        search: filters.search.clone(),
        city: filters.city.clone(),
        zip: filters.zip.clone(),
        category: filters.categories.first().copied(),
        state: filters.state.clone(),
        limit: cap.min(filters.limit),
        offset: 0,
    }
}

impl Hearth {
    /// Cards from the connector registered as `source`.
    ///
    /// Unknown sources and connector failures yield no cards. Records that do
    /// not validate are dropped.
    #[tracing::instrument(level = "debug", skip(self, filters, now))]
    pub(crate) async fn external_cards(
        &self,
        source: &str,
        filters: &ResourceFilters,
        now: DateTime<Utc>,
    ) -> Vec<ResourceCard> {
        let Some(connector) = self.connector(source) else {
            tracing::warn!(source, "unknown external source");
            return Vec::new();
        };
        let query = external_query(filters, self.cfg.external_limit_cap);
        let records = match connector.fetch_records(&query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(source, error = %e, "external source failed; serving without it");
                return Vec::new();
            }
        };

        let total = records.len();
        let cards: Vec<ResourceCard> = records
            .iter()
            .filter_map(|record| {
                let mut draft = to_resource(record);
                draft.id = Some(external_resource_id(connector.name(), &record.source_id));
                validate_resource(draft)
            })
            .map(|resource| to_card(&resource, None, now))
            .collect();
        if cards.len() < total {
            tracing::debug!(source, dropped = total - cards.len(), "invalid external records dropped");
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Category;

    #[test]
    fn external_query_uses_first_category_and_caps_limit() {
        let filters = ResourceFilters {
            categories: vec![Category::Legal, Category::Food],
            zip: Some("10007".into()),
            limit: 80,
            offset: 40,
            ..ResourceFilters::default()
        };
        let q = external_query(&filters, 50);
        assert_eq!(q.category, Some(Category::Legal));
        assert_eq!(q.limit, 50);
        assert_eq!(q.offset, 0);
        assert_eq!(q.zip.as_deref(), Some("10007"));
    }
}
