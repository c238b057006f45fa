//! Hearth data transfer objects, configuration primitives and the unified error type.
#![warn(missing_docs)]

mod card;
mod config;
mod connector;
mod error;
mod external;
mod filters;
mod middleware;
mod reports;
mod resource;
mod trust;

pub use card::ResourceCard;
pub use config::{
    CacheConfig, CacheNamespace, CachePolicy, HearthConfig, MIN_ADMIN_KEY_LEN, RateLimitConfig,
    RateLimitState, RateLimitWindow, RemoteCacheConfig,
};
pub use connector::ConnectorKey;
pub use error::HearthError;
pub use external::{ExternalQuery, ExternalService, PhoneType, SyncReport};
pub use filters::{DEFAULT_LIMIT, MAX_LIMIT, RepositoryQuery, ResourceFilters, ResourcePage};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use reports::{ListFreshness, ResourceDetail, ResourceListResponse};
pub use resource::{Category, Resource, ResourceDraft};
pub use trust::{
    AvailabilityRow, AvailabilityStatus, FreshnessState, TrustOverride, VerificationBadge,
    VerificationRow,
};
