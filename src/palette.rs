//! Fixed colour and label table. Chart ordering comes from here: a record
//! whose repository or model-strategy pair is not listed never shows up in
//! the ordered panels.

use plotters::style::RGBColor;

pub struct Series {
    pub key: &'static str,
    pub model: &'static str,
    pub strategy: &'static str,
    pub color: RGBColor,
}

pub struct Repo {
    pub name: &'static str,
    pub label: &'static str,
    pub loc: &'static str,
}

pub const CORAL: RGBColor = RGBColor(0xFF, 0x6B, 0x6B);
pub const LIGHT_CORAL: RGBColor = RGBColor(0xFF, 0xB6, 0xB6);
pub const TEAL: RGBColor = RGBColor(0x4E, 0xCD, 0xC4);
pub const LIGHT_TEAL: RGBColor = RGBColor(0x95, 0xE1, 0xD3);
pub const TARGET_GREEN: RGBColor = RGBColor(0x00, 0x80, 0x00);
pub const WHEAT: RGBColor = RGBColor(0xF5, 0xDE, 0xB3);

/// Drawing order of the grouped bar charts.
pub const SERIES: [Series; 4] = [
    Series {
        key: "sonnet-4-5-refine",
        model: "sonnet-4-5",
        strategy: "refine",
        color: CORAL,
    },
    Series {
        key: "sonnet-4-5-base",
        model: "sonnet-4-5",
        strategy: "base",
        color: LIGHT_CORAL,
    },
    Series {
        key: "opus-4-1-refine",
        model: "opus-4-1",
        strategy: "refine",
        color: TEAL,
    },
    Series {
        key: "opus-4-1-base",
        model: "opus-4-1",
        strategy: "base",
        color: LIGHT_TEAL,
    },
];

pub const REPOS: [Repo; 3] = [
    Repo {
        name: "schedule",
        label: "Schedule",
        loc: "~400 LOC",
    },
    Repo {
        name: "mistune",
        label: "Mistune",
        loc: "~2600 LOC",
    },
    Repo {
        name: "click",
        label: "Click",
        loc: "~8000 LOC",
    },
];

pub const MODELS: [&str; 2] = ["sonnet-4-5", "opus-4-1"];
pub const STRATEGIES: [&str; 2] = ["refine", "base"];
pub const REFINE: &str = "refine";

pub fn series(key: &str) -> Option<&'static Series> {
    SERIES.iter().find(|s| s.key == key)
}

pub fn series_index(key: &str) -> Option<usize> {
    SERIES.iter().position(|s| s.key == key)
}

pub fn repo_index(name: &str) -> Option<usize> {
    REPOS.iter().position(|r| r.name == name)
}

/// Accent for strategy-level and model-level panels: refine and sonnet
/// share coral, everything else is teal.
#[must_use]
pub fn accent(name: &str) -> RGBColor {
    if name == REFINE || name.contains("sonnet") {
        CORAL
    } else {
        TEAL
    }
}

/// `"sonnet-4-5-refine"` → `"Sonnet 4 5 Refine"`.
#[must_use]
pub fn title_case(key: &str) -> String {
    key.split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compact bar label, e.g. `"sche sonnet-ref"`.
#[must_use]
pub fn short_label(repository: &str, model: &str, strategy: &str) -> String {
    let repo: String = repository.chars().take(4).collect();
    let family = model.split('-').next().unwrap_or(model);
    let strat: String = strategy.chars().take(3).collect();
    format!("{repo} {family}-{strat}")
}
