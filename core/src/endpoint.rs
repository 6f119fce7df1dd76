//! Immutable endpoint paths for the Kanka API.
//!
//! # Design
//! An `Endpoint` is a path plus an optional `lastSync` filter. Every
//! operation returns a new value. The sync filter is held apart from the
//! path so segments appended after `sync` still land before the query.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ApiError;

/// Query parameter used by the API for incremental sync.
pub const SYNC_PARAM: &str = "lastSync";

/// A composed API path, optionally filtered to records changed since a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: Cow<'static, str>,
    since: Option<DateTime<Utc>>,
}

impl Endpoint {
    pub const CAMPAIGNS: Endpoint = Endpoint::from_static("/campaigns");

    pub const fn from_static(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            since: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    /// Append a numeric ID segment. Fails with `InvalidId` when `id <= 0`.
    pub fn id(&self, id: i64) -> Result<Endpoint, ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidId(id));
        }
        Ok(self.concat(&id.to_string()))
    }

    /// Append a sub-path segment.
    pub fn concat(&self, segment: &str) -> Endpoint {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            return self.clone();
        }
        Endpoint {
            path: Cow::Owned(format!("{}/{segment}", self.path.trim_end_matches('/'))),
            since: self.since,
        }
    }

    /// Restrict a collection listing to records changed after `since`.
    pub fn sync(&self, since: DateTime<Utc>) -> Endpoint {
        Endpoint {
            path: self.path.clone(),
            since: Some(since),
        }
    }

    /// Join the endpoint onto `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{self}", base_url.trim_end_matches('/'))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(since) = self.since {
            write!(
                f,
                "?{SYNC_PARAM}={}",
                since.to_rfc3339_opts(SecondsFormat::Secs, true)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn id_appends_segment() {
        let end = Endpoint::CAMPAIGNS.id(5).unwrap();
        assert_eq!(end.to_string(), "/campaigns/5");
    }

    #[test]
    fn id_rejects_zero_and_negative() {
        assert!(matches!(Endpoint::CAMPAIGNS.id(0), Err(ApiError::InvalidId(0))));
        assert!(matches!(Endpoint::CAMPAIGNS.id(-3), Err(ApiError::InvalidId(-3))));
    }

    #[test]
    fn concat_builds_nested_path() {
        let end = Endpoint::CAMPAIGNS
            .id(5)
            .unwrap()
            .concat("characters")
            .id(9)
            .unwrap();
        assert_eq!(end.to_string(), "/campaigns/5/characters/9");
    }

    #[test]
    fn concat_trims_slashes() {
        let end = Endpoint::CAMPAIGNS.concat("/characters/");
        assert_eq!(end.path(), "/campaigns/characters");
        assert_eq!(end.concat(""), end);
    }

    #[test]
    fn operations_do_not_mutate_receiver() {
        let base = Endpoint::CAMPAIGNS;
        let _ = base.id(5).unwrap();
        let _ = base.sync(Utc::now());
        assert_eq!(base.to_string(), "/campaigns");
        assert!(base.since().is_none());
    }

    #[test]
    fn sync_renders_rfc3339_query() {
        let since = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let end = Endpoint::CAMPAIGNS.id(5).unwrap().concat("characters").sync(since);
        assert_eq!(
            end.to_string(),
            "/campaigns/5/characters?lastSync=2024-03-01T12:30:00Z"
        );
    }

    #[test]
    fn query_stays_last_after_concat() {
        let since = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Endpoint::CAMPAIGNS.sync(since).id(5).unwrap();
        assert_eq!(end.to_string(), "/campaigns/5?lastSync=2024-03-01T00:00:00Z");
    }

    #[test]
    fn url_joins_base() {
        let end = Endpoint::CAMPAIGNS.id(1).unwrap();
        assert_eq!(end.url("https://api.kanka.io/1.0/"), "https://api.kanka.io/1.0/campaigns/1");
    }
}
