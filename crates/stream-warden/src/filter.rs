//! Candidate filtering for discovery
//!
//! Two independent allow-lists (countries and categories), each optional,
//! plus a best-effort existence gate against the registry. Both allow-list
//! gates must pass before the registry is consulted.

use crate::errors::RegistryResult;
use crate::models::Candidate;
use crate::repositories::StreamRegistry;

/// Declarative accept/reject rules applied to parsed candidates
#[derive(Debug, Clone)]
pub struct FilterEngine {
    countries: Vec<String>,
    categories: Vec<String>,
}

impl FilterEngine {
    /// Build a filter from configured allow-lists.
    ///
    /// Tokens are matched case-insensitively; blank tokens are dropped so a
    /// stray empty string cannot turn a gate into match-everything. An empty
    /// list disables its gate entirely.
    pub fn new(countries: &[String], categories: &[String]) -> Self {
        let normalize = |tokens: &[String]| {
            tokens
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        };

        Self {
            countries: normalize(countries),
            categories: normalize(categories),
        }
    }

    /// Apply the allow-list gates only (no registry access).
    ///
    /// The country gate passes when any configured token appears in the
    /// candidate name or its country hint; the category gate is symmetric
    /// over name and category. Missing hint fields match as empty strings.
    pub fn matches_rules(&self, candidate: &Candidate) -> bool {
        let name = candidate.name.to_lowercase();

        if !self.countries.is_empty() {
            let hint = candidate
                .country_hint
                .as_deref()
                .unwrap_or("")
                .to_lowercase();
            let hit = self
                .countries
                .iter()
                .any(|token| name.contains(token) || hint.contains(token));
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty() {
            let category = candidate.category.as_deref().unwrap_or("").to_lowercase();
            let hit = self
                .categories
                .iter()
                .any(|token| name.contains(token) || category.contains(token));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Full gate: allow-lists, then existence dedup by source URL or name.
    ///
    /// Rejecting on either field prevents re-adding a renamed duplicate of a
    /// known URL, and a re-hosted duplicate of a known name.
    pub async fn accepts(
        &self,
        candidate: &Candidate,
        registry: &dyn StreamRegistry,
    ) -> RegistryResult<bool> {
        if !self.matches_rules(candidate) {
            return Ok(false);
        }

        let exists = registry
            .exists_by_source_or_name(&candidate.url, &candidate.name)
            .await?;
        Ok(!exists)
    }
}
