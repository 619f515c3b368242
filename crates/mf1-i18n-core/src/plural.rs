use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// CLDR plural categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == label)
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counting (`plural`) or ranking (`selectordinal`) rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluralKind {
    Cardinal,
    Ordinal,
}

impl PluralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PluralKind::Cardinal => "cardinal",
            PluralKind::Ordinal => "ordinal",
        }
    }
}

pub type PluralFn = Arc<dyn Fn(f64, PluralKind) -> PluralCategory + Send + Sync>;

/// A locale-bound pluralization function with its declared category sets.
///
/// Empty category sets mean the rule declares nothing, so case keys are not
/// checked against it. Selection behavior is unaffected either way.
#[derive(Clone)]
pub struct PluralRule {
    locale: String,
    select: PluralFn,
    cardinal: Vec<PluralCategory>,
    ordinal: Vec<PluralCategory>,
}

impl PluralRule {
    pub fn new(
        locale: impl Into<String>,
        select: impl Fn(f64, PluralKind) -> PluralCategory + Send + Sync + 'static,
    ) -> Self {
        Self {
            locale: locale.into(),
            select: Arc::new(select),
            cardinal: Vec::new(),
            ordinal: Vec::new(),
        }
    }

    pub fn with_categories(
        mut self,
        cardinal: &[PluralCategory],
        ordinal: &[PluralCategory],
    ) -> Self {
        self.cardinal = cardinal.to_vec();
        self.ordinal = ordinal.to_vec();
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn category(&self, value: f64, kind: PluralKind) -> PluralCategory {
        (self.select)(value, kind)
    }

    pub fn categories(&self, kind: PluralKind) -> &[PluralCategory] {
        match kind {
            PluralKind::Cardinal => &self.cardinal,
            PluralKind::Ordinal => &self.ordinal,
        }
    }

    pub fn without_categories(&self) -> Self {
        Self {
            locale: self.locale.clone(),
            select: Arc::clone(&self.select),
            cardinal: Vec::new(),
            ordinal: Vec::new(),
        }
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("locale", &self.locale)
            .field("cardinal", &self.cardinal)
            .field("ordinal", &self.ordinal)
            .finish_non_exhaustive()
    }
}

/// Source of plural rules by exact locale name. Fallback is the caller's job.
pub trait PluralRuleProvider: Send + Sync {
    fn plural_rule(&self, locale: &str) -> Option<PluralRule>;
}

impl PluralRuleProvider for BTreeMap<String, PluralRule> {
    fn plural_rule(&self, locale: &str) -> Option<PluralRule> {
        self.get(locale).cloned()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use super::{PluralCategory, PluralKind, PluralRule, PluralRuleProvider};

    fn english() -> PluralRule {
        PluralRule::new("en", |n, kind| match kind {
            PluralKind::Cardinal if n == 1.0 => PluralCategory::One,
            _ => PluralCategory::Other,
        })
        .with_categories(&[PluralCategory::One, PluralCategory::Other], &[PluralCategory::Other])
    }

    #[test]
    fn labels_round_trip() {
        for category in PluralCategory::ALL {
            assert_eq!(PluralCategory::from_label(category.as_str()), Some(category));
        }
        assert_eq!(PluralCategory::from_label("several"), None);
    }

    #[test]
    fn rule_dispatches_by_kind() {
        let rule = english();
        assert_eq!(rule.category(1.0, PluralKind::Cardinal), PluralCategory::One);
        assert_eq!(rule.category(1.0, PluralKind::Ordinal), PluralCategory::Other);
        assert_eq!(rule.categories(PluralKind::Cardinal).len(), 2);
    }

    #[test]
    fn without_categories_keeps_selection() {
        let rule = english().without_categories();
        assert!(rule.categories(PluralKind::Cardinal).is_empty());
        assert!(rule.categories(PluralKind::Ordinal).is_empty());
        assert_eq!(rule.category(1.0, PluralKind::Cardinal), PluralCategory::One);
        assert_eq!(rule.locale(), "en");
    }

    #[test]
    fn map_provider_looks_up_exact_names() {
        let mut rules = BTreeMap::new();
        rules.insert(String::from("en"), english());
        assert!(rules.plural_rule("en").is_some());
        assert!(rules.plural_rule("en-US").is_none());
    }
}
