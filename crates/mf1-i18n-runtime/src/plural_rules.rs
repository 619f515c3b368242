//! A small built-in set of CLDR plural rules.
//!
//! Covers the common language families only. Hosts with full CLDR data
//! should supply their own [`PluralRuleProvider`].

use mf1_i18n_core::{PluralCategory, PluralKind, PluralRule, PluralRuleProvider};

use PluralCategory::{Few, Many, One, Other, Two, Zero};

/// Looks up rules by bare language code (`en`, `fr`, ...). Region and script
/// fallback belongs to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPluralRules;

impl PluralRuleProvider for BasicPluralRules {
    fn plural_rule(&self, locale: &str) -> Option<PluralRule> {
        let family = RuleFamily::for_language(locale)?;
        Some(
            PluralRule::new(locale, move |n, kind| family.category(n, kind))
                .with_categories(family.cardinal(), family.ordinal()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleFamily {
    English,
    Germanic,
    French,
    Spanish,
    Italian,
    Hebrew,
    Russian,
    SerboCroatian,
    Polish,
    Arabic,
    Welsh,
    NoPlurals,
}

impl RuleFamily {
    fn for_language(language: &str) -> Option<Self> {
        let family = match language {
            "en" => Self::English,
            "de" | "nl" | "sv" | "da" | "no" | "nb" | "nn" | "el" | "hu" | "fi" | "et" | "tr"
            | "bg" => Self::Germanic,
            "fr" => Self::French,
            "es" => Self::Spanish,
            "it" => Self::Italian,
            "he" => Self::Hebrew,
            "ru" | "uk" => Self::Russian,
            "hr" | "sr" | "bs" => Self::SerboCroatian,
            "pl" => Self::Polish,
            "ar" => Self::Arabic,
            "cy" => Self::Welsh,
            "zh" | "ja" | "ko" | "th" | "vi" | "id" | "ms" => Self::NoPlurals,
            _ => return None,
        };
        Some(family)
    }

    fn cardinal(self) -> &'static [PluralCategory] {
        match self {
            Self::English | Self::Germanic => &[One, Other],
            Self::French | Self::Spanish | Self::Italian => &[One, Many, Other],
            Self::Hebrew => &[One, Two, Other],
            Self::Russian | Self::Polish => &[One, Few, Many, Other],
            Self::SerboCroatian => &[One, Few, Other],
            Self::Arabic | Self::Welsh => &[Zero, One, Two, Few, Many, Other],
            Self::NoPlurals => &[Other],
        }
    }

    fn ordinal(self) -> &'static [PluralCategory] {
        match self {
            Self::English => &[One, Two, Few, Other],
            Self::Welsh => &[Zero, One, Two, Few, Many, Other],
            Self::French => &[One, Other],
            Self::Italian => &[Many, Other],
            _ => &[Other],
        }
    }

    fn category(self, n: f64, kind: PluralKind) -> PluralCategory {
        let n = if n < 0.0 { -n } else { n };
        let integer = integer_value(n);
        match kind {
            PluralKind::Cardinal => self.cardinal_category(n, integer),
            PluralKind::Ordinal => self.ordinal_category(integer),
        }
    }

    fn cardinal_category(self, n: f64, integer: Option<u64>) -> PluralCategory {
        match self {
            Self::English | Self::Germanic => match integer {
                Some(1) => One,
                _ => Other,
            },
            Self::French if n < 2.0 => One,
            Self::French | Self::Spanish | Self::Italian => match integer {
                Some(1) => One,
                Some(i) if is_million_multiple(i) => Many,
                _ => Other,
            },
            Self::Hebrew => match integer {
                Some(1) => One,
                Some(2) => Two,
                _ if n < 1.0 && n > 0.0 => One,
                _ => Other,
            },
            Self::Russian => match integer {
                Some(i) => russian(i),
                None => Other,
            },
            Self::SerboCroatian => match integer {
                Some(i) => serbo_croatian(i),
                None => Other,
            },
            Self::Polish => match integer {
                Some(i) => polish(i),
                None => Other,
            },
            Self::Arabic => match integer {
                Some(i) => arabic(i),
                None => Other,
            },
            Self::Welsh => match integer {
                Some(0) => Zero,
                Some(1) => One,
                Some(2) => Two,
                Some(3) => Few,
                Some(6) => Many,
                _ => Other,
            },
            Self::NoPlurals => Other,
        }
    }

    fn ordinal_category(self, integer: Option<u64>) -> PluralCategory {
        match (self, integer) {
            (Self::English, Some(i)) => english_ordinal(i),
            (Self::French, Some(1)) => One,
            (Self::Italian, Some(11 | 8 | 80 | 800)) => Many,
            (Self::Welsh, Some(i)) => welsh_ordinal(i),
            _ => Other,
        }
    }
}

fn integer_value(n: f64) -> Option<u64> {
    let candidate = n as u64;
    if candidate as f64 == n {
        Some(candidate)
    } else {
        None
    }
}

// Compact decimal exponents are not modeled, so only exact multiples count.
fn is_million_multiple(n: u64) -> bool {
    n != 0 && n.is_multiple_of(1_000_000)
}

fn english_ordinal(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;
    match (mod10, mod100) {
        (1, m) if m != 11 => One,
        (2, m) if m != 12 => Two,
        (3, m) if m != 13 => Few,
        _ => Other,
    }
}

fn welsh_ordinal(n: u64) -> PluralCategory {
    match n {
        0 | 7 | 8 | 9 => Zero,
        1 => One,
        2 => Two,
        3 | 4 => Few,
        5 | 6 => Many,
        _ => Other,
    }
}

fn russian(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;
    if mod10 == 1 && mod100 != 11 {
        One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        Few
    } else {
        Many
    }
}

fn serbo_croatian(n: u64) -> PluralCategory {
    match russian(n) {
        Many => Other,
        category => category,
    }
}

fn polish(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;
    if n == 1 {
        One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        Few
    } else {
        Many
    }
}

fn arabic(n: u64) -> PluralCategory {
    let mod100 = n % 100;
    match n {
        0 => Zero,
        1 => One,
        2 => Two,
        _ if (3..=10).contains(&mod100) => Few,
        _ if (11..=99).contains(&mod100) => Many,
        _ => Other,
    }
}
