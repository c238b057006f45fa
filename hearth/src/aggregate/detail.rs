use chrono::{DateTime, Utc};
use hearth_core::cache_key::detail_key;
use hearth_core::normalize::{external_resource_id, to_resource, validate_resource};
use hearth_core::{
    HearthError, RepositoryQuery, Resource, ResourceCard, ResourceDetail, haversine_miles, to_card,
};

use crate::Hearth;

/// Nearby rows considered when choosing alternatives.
const NEARBY_SCAN_LIMIT: u32 = 100;

/// Split `ext-{source}-{source_id}` into its parts.
fn parse_external_id(id: &str) -> Option<(&str, &str)> {
    id.strip_prefix("ext-")?
        .split_once('-')
        .filter(|(source, source_id)| !source.is_empty() && !source_id.is_empty())
}

/// The `n` rows closest to `origin`, excluding `skip_id` and rows without coordinates.
fn nearest(rows: Vec<Resource>, origin: Option<(f64, f64)>, skip_id: &str, n: usize) -> Vec<Resource> {
    let mut ranked: Vec<(f64, Resource)> = rows
        .into_iter()
        .filter(|r| r.id != skip_id)
        .filter_map(|r| {
            let (lat, lng) = r.coordinates()?;
            let distance = origin.map_or(f64::MAX, |(olat, olng)| haversine_miles(olat, olng, lat, lng));
            Some((distance, r))
        })
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().take(n).map(|(_, r)| r).collect()
}

impl Hearth {
    /// One resource with up to a handful of nearby local alternatives.
    ///
    /// Ids of the form `ext-{source}-{source_id}` are looked up on the named
    /// feed and carry no alternatives. Unknown ids yield an empty detail,
    /// which is not cached.
    ///
    /// # Errors
    /// Returns `StoreQuery` when the local store fails the id lookup.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn resource_detail(&self, id: &str) -> Result<ResourceDetail, HearthError> {
        let key = detail_key(id);
        if let Some(detail) = self.cache.get::<ResourceDetail>(&key).await {
            return Ok(detail);
        }
        let now = Utc::now();
        let detail = match parse_external_id(id) {
            Some((source, source_id)) => ResourceDetail {
                resource: self.external_card(source, source_id, now).await,
                alternatives: Vec::new(),
            },
            None => self.local_detail(id, now).await?,
        };
        if detail.resource.is_some() {
            self.cache.set(&key, &detail, None).await;
        }
        Ok(detail)
    }

    async fn local_detail(&self, id: &str, now: DateTime<Utc>) -> Result<ResourceDetail, HearthError> {
        let Some(resource) = self
            .repository
            .fetch_by_id(id)
            .await
            .map_err(|e| HearthError::store_query(format!("Database query failed: {e}")))?
        else {
            return Ok(ResourceDetail::default());
        };

        let query = RepositoryQuery {
            city: resource.city.clone(),
            state: Some(resource.state.clone()),
            limit: NEARBY_SCAN_LIMIT,
            ..RepositoryQuery::default()
        };
        let nearby = match self.repository.fetch_filtered(&query).await {
            Ok(page) => page.rows,
            Err(e) => {
                tracing::warn!(id, error = %e, "alternatives unavailable");
                Vec::new()
            }
        };
        let alternatives = nearest(nearby, resource.coordinates(), &resource.id, self.cfg.detail_alternatives);

        let mut rows = Vec::with_capacity(alternatives.len() + 1);
        rows.push(resource);
        rows.extend(alternatives);
        let mut cards = self.cards_with_trust(&rows, now).await.into_iter();
        Ok(ResourceDetail {
            resource: cards.next(),
            alternatives: cards.collect(),
        })
    }

    async fn external_card(
        &self,
        source: &str,
        source_id: &str,
        now: DateTime<Utc>,
    ) -> Option<ResourceCard> {
        let connector = self.connector(source)?;
        let record = match connector.fetch_by_id(source_id).await {
            Ok(record) => record?,
            Err(e) => {
                tracing::warn!(source, source_id, error = %e, "external detail unavailable");
                return None;
            }
        };
        let mut draft = to_resource(&record);
        draft.id = Some(external_resource_id(connector.name(), &record.source_id));
        validate_resource(draft).map(|r| to_card(&r, None, now))
    }
}
