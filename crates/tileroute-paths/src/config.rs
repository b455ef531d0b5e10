//! Construction-time resolver settings.

/// Settings fixed when a [`PathResolver`](crate::PathResolver) is built.
///
/// The default is an exact, unbounded search: no best-effort fallback and
/// no expansion budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// When the goal cannot be reached, return the partial route to the
    /// touched node with the smallest remaining-cost estimate instead of an
    /// empty route.
    pub best_effort: bool,
    /// Maximum number of nodes a single search may expand. `None` means
    /// unbounded.
    pub max_expanded_nodes: Option<usize>,
}

impl ResolverConfig {
    /// Enable or disable the best-effort fallback.
    pub fn with_best_effort(mut self, best_effort: bool) -> Self {
        self.best_effort = best_effort;
        self
    }

    /// Cap the number of expansions per search.
    pub fn with_max_expanded_nodes(mut self, max: usize) -> Self {
        self.max_expanded_nodes = Some(max);
        self
    }

    /// Whether a search that has expanded `expanded` nodes is still within
    /// budget.
    #[inline]
    pub fn is_within_budget(&self, expanded: usize) -> bool {
        self.max_expanded_nodes.is_none_or(|max| expanded <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_exact_and_unbounded() {
        let cfg = ResolverConfig::default();
        assert!(!cfg.best_effort);
        assert_eq!(cfg.max_expanded_nodes, None);
        assert!(cfg.is_within_budget(usize::MAX));
    }

    #[test]
    fn budget_is_inclusive() {
        let cfg = ResolverConfig::default()
            .with_best_effort(true)
            .with_max_expanded_nodes(3);
        assert!(cfg.best_effort);
        assert!(cfg.is_within_budget(3));
        assert!(!cfg.is_within_budget(4));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: ResolverConfig = serde_json::from_str(r#"{"best_effort": true}"#).unwrap();
        assert_eq!(cfg, ResolverConfig::default().with_best_effort(true));
    }

    #[test]
    fn config_round_trip() {
        let cfg = ResolverConfig::default().with_max_expanded_nodes(250);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ResolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
