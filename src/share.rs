use chrono::NaiveDate;
use itertools::Itertools;

use crate::language::Language;
use crate::summary::GameSummary;

pub const SHARE_URL: &str = "https://typoslinger.app";

const HIT_GLYPH: &str = "🎯";
const MISS_GLYPH: &str = "💥";
const HINT_GLYPH: &str = "💡";
const TIME_GLYPH: &str = "⏱️";

/// Singular form plus the suffix appended when the count is not exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluralRule {
    pub singular: &'static str,
    pub plural_suffix: &'static str,
}

impl PluralRule {
    pub const fn new(singular: &'static str, plural_suffix: &'static str) -> Self {
        Self {
            singular,
            plural_suffix,
        }
    }

    pub fn apply(&self, count: usize) -> String {
        if count == 1 {
            self.singular.to_string()
        } else {
            format!("{}{}", self.singular, self.plural_suffix)
        }
    }
}

/// Per-locale words and pluralization used by the share text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareLocale {
    pub hit: PluralRule,
    pub miss: PluralRule,
    pub hint: PluralRule,
    pub hint_used: PluralRule,
    pub footer: &'static str,
}

const ENGLISH: ShareLocale = ShareLocale {
    hit: PluralRule::new("Hit", "s"),
    miss: PluralRule::new("Miss", "es"),
    hint: PluralRule::new("Hint", "s"),
    hint_used: PluralRule::new("Used", ""),
    footer: "Give it your best shot",
};

const SPANISH: ShareLocale = ShareLocale {
    hit: PluralRule::new("Acierto", "s"),
    miss: PluralRule::new("Fallo", "s"),
    hint: PluralRule::new("Pista", "s"),
    hint_used: PluralRule::new("usada", "s"),
    footer: "Demuestra tu puntería",
};

impl ShareLocale {
    pub fn for_language(language: Language) -> &'static ShareLocale {
        match language {
            Language::English => &ENGLISH,
            Language::Spanish => &SPANISH,
        }
    }
}

fn launch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Daily puzzle number: 1 on launch day, counting up one per calendar day.
pub fn game_number_for(date: NaiveDate) -> u32 {
    let days = (date - launch_date()).num_days();
    u32::try_from(days + 1).unwrap_or(1).max(1)
}

/// Renders a summary into clipboard-ready text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareTextFormatter {
    game_number: u32,
}

impl ShareTextFormatter {
    pub fn new(game_number: u32) -> Self {
        Self { game_number }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(game_number_for(date))
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    /// Pure: equal inputs always produce byte-identical output.
    pub fn format(&self, summary: &GameSummary, locale_code: &str) -> String {
        let locale = ShareLocale::for_language(Language::resolve(locale_code));

        let header = format!("Typoslinger #{}", self.game_number);
        let stats = [
            format!("{TIME_GLYPH} {}s", summary.elapsed_seconds),
            format!(
                "{HIT_GLYPH} {} {}",
                summary.hits,
                locale.hit.apply(summary.hits)
            ),
            format!(
                "{MISS_GLYPH} {} {}",
                summary.misses,
                locale.miss.apply(summary.misses)
            ),
            format!(
                "{HINT_GLYPH} {} {} {}",
                summary.hints_used,
                locale.hint.apply(summary.hints_used),
                locale.hint_used.apply(summary.hints_used)
            ),
        ]
        .join(" • ");

        let rounds = summary
            .round_results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let glyph = if r.hit { HIT_GLYPH } else { MISS_GLYPH };
                let hint = if r.used_hint {
                    format!(" ({HINT_GLYPH})")
                } else {
                    String::new()
                };
                format!("#{}: {glyph}{hint}", i + 1)
            })
            .join("\n");

        let footer = format!("{}: {SHARE_URL}", locale.footer);

        if rounds.is_empty() {
            format!("{header}\n{stats}\n\n{footer}")
        } else {
            format!("{header}\n{stats}\n{rounds}\n\n{footer}")
        }
    }
}
