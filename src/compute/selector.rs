//! Rule selection by name.

use super::{Rule, RuleKind};
use crate::schema::AgingConfig;

/// Builds rules from configuration names.
///
/// Created once at startup and handed to the population, so there is no
/// global factory state.
#[derive(Debug, Clone, Default)]
pub struct RuleSelector {
    aging: AgingConfig,
}

impl RuleSelector {
    pub fn new(aging: AgingConfig) -> Self {
        Self { aging }
    }

    /// Aging thresholds given to every aging rule built here.
    pub fn aging(&self) -> &AgingConfig {
        &self.aging
    }

    /// Rule for `name`. `"von_neumann"` and `"erik"` select those rules;
    /// anything else, including an empty name, selects Conway.
    pub fn select(&self, name: &str) -> Rule {
        Rule::of_kind(RuleKind::from_name(name), self.aging)
    }

    /// Even-generation rule plus an odd-generation rule when `odd` is
    /// non-empty and differs from `even`. Names are matched exactly. `None` means both parities share the even
    /// rule.
    pub fn select_pair(&self, even: &str, odd: Option<&str>) -> (Rule, Option<Rule>) {
        let even_rule = self.select(even);
        let odd_rule = odd
            .filter(|name| !name.is_empty() && *name != even)
            .map(|name| self.select(name));
        (even_rule, odd_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_name() {
        let selector = RuleSelector::default();
        assert_eq!(selector.select("conway").name(), "conway");
        assert_eq!(selector.select("erik").name(), "erik");
        assert_eq!(selector.select("von_neumann").name(), "von_neumann");
    }

    #[test]
    fn test_unknown_names_default_to_conway() {
        let selector = RuleSelector::default();
        for name in ["", "VON_NEUMANN", "game_of_life", " erik"] {
            assert_eq!(selector.select(name).kind(), RuleKind::Conway, "{:?}", name);
        }
    }

    #[test]
    fn test_select_pair() {
        let selector = RuleSelector::default();

        let (even, odd) = selector.select_pair("conway", None);
        assert_eq!(even.kind(), RuleKind::Conway);
        assert!(odd.is_none());

        let (_, odd) = selector.select_pair("conway", Some(""));
        assert!(odd.is_none());

        let (_, odd) = selector.select_pair("erik", Some("erik"));
        assert!(odd.is_none());

        let (even, odd) = selector.select_pair("conway", Some("von_neumann"));
        assert_eq!(even.kind(), RuleKind::Conway);
        assert_eq!(odd.map(|r| r.kind()), Some(RuleKind::VonNeumann));
    }

    #[test]
    fn test_odd_name_is_not_trimmed() {
        let selector = RuleSelector::default();
        let (even, _) = selector.select_pair(" erik", None);
        let (_, odd) = selector.select_pair("conway", Some(" erik"));
        assert_eq!(even.kind(), RuleKind::Conway);
        assert_eq!(odd.map(|r| r.kind()), Some(RuleKind::Conway));
    }

    #[test]
    fn test_aging_is_passed_to_erik() {
        let aging = AgingConfig {
            mature_age: 2,
            elder_age: 3,
            ..Default::default()
        };
        match RuleSelector::new(aging).select("erik") {
            Rule::Erik(erik) => assert_eq!(*erik.aging(), aging),
            other => panic!("expected erik, got {}", other.name()),
        }
    }
}
