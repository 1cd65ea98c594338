//! Area identifiers: canonicalization, display names and lookup helpers.
//!
//! The projector exact-matches on canonical ids; everything here is for the
//! collaborators that build those ids and render them.

use anyhow::Result;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

use crate::record::OutageWindow;

/// Normalize a raw area identifier (e.g. a calendar asset name) into the
/// canonical id used by schedule records.
///
/// Strips a trailing `.ics` and collapses whitespace/underscore runs into `-`.
pub fn canonical_area_id(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_suffix(".ics").unwrap_or(s);

    s.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Case-insensitive substring search that treats `-` as a space on both sides.
pub fn matches_query(area: &str, query: &str) -> bool {
    let norm = |s: &str| s.replace('-', " ").to_lowercase();
    norm(area).contains(norm(query).trim())
}

/// Distinct area names present in `items`, sorted.
pub fn area_names<T: OutageWindow>(items: &[T]) -> Vec<String> {
    items
        .iter()
        .map(|i| i.area_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Ordered `(from, to)` rewrites applied after title-casing.
const STANDARD_RULES: &[(&str, &str)] = &[
    ("City Of Cape Town", "Cape Town"),
    ("Eastern Cape", "EC"),
    ("Free State", "FS"),
    ("Kwazulu Natal", "KZN"),
    ("Limpopo", "LP"),
    ("Mpumalanga", "MP"),
    ("North West", "NW"),
    ("Northern Cape", "NC"),
    ("Western Cape", "WC"),
    ("Gauteng Ekurhuleni Block", "Ekurhuleni"),
    ("Gauteng Tshwane Group", "Tshwane"),
];

/// Turns canonical ids like `western-cape-stellenbosch` into `WC Stellenbosch`.
#[derive(Debug, Clone)]
pub struct AreaPrettifier {
    word_re: Regex,
    rules: Vec<(String, String)>,
}

impl AreaPrettifier {
    pub fn new(rules: Vec<(String, String)>) -> Result<Self> {
        Ok(Self {
            word_re: Regex::new(r"\w\S*")?,
            rules,
        })
    }

    /// Province abbreviations and metro short names.
    pub fn standard() -> Result<Self> {
        Self::new(
            STANDARD_RULES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        )
    }

    pub fn prettify(&self, area: &str) -> String {
        let area = area.strip_suffix(".ics").unwrap_or(area);
        let spaced = area.replace('-', " ");

        let mut out = self
            .word_re
            .replace_all(&spaced, |caps: &Captures| {
                let word = &caps[0];
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .into_owned();

        for (from, to) in &self.rules {
            out = out.replacen(from.as_str(), to, 1);
        }
        out
    }
}
