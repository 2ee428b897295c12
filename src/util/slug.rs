// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project name normalization.
//!
//! Project names typed by users become storage keys, so they are reduced
//! to a lowercase ASCII identifier made of letters, digits and single
//! hyphens.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

fn diacritics() -> &'static Regex {
    static DIACRITIC_RE: OnceLock<Regex> = OnceLock::new();
    DIACRITIC_RE.get_or_init(|| Regex::new(r"\p{Diacritic}").expect("valid diacritic regex"))
}

fn separators() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid separator regex"))
}

/// Convert a free-text project name into a slug.
///
/// Characters with the Unicode `Diacritic` property are deleted after
/// canonical decomposition (accents, but also spacing marks such as `^` or
/// `ʼ`), every run of characters outside `[a-z0-9]` collapses to one hyphen,
/// and leading or trailing hyphens are trimmed. An empty result means the
/// name is unusable.
pub fn slugify(input: &str) -> String {
    let decomposed: String = input.to_lowercase().nfd().collect();
    let stripped = diacritics().replace_all(&decomposed, "");
    separators()
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_string()
}

/// Whether `key` is a usable, already normalized slug.
pub fn is_slug(key: &str) -> bool {
    !key.is_empty() && slugify(key) == key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
    }

    #[test]
    fn test_strips_diacritics_and_punctuation() {
        assert_eq!(slugify("Casa Áurea!!"), "casa-aurea");
        assert_eq!(slugify("Apartamento de Luxo"), "apartamento-de-luxo");
        assert_eq!(slugify("Ação São João"), "acao-sao-joao");
        assert_eq!(slugify("a^b"), "ab");
        assert_eq!(slugify("rock`n`roll"), "rocknroll");
        assert_eq!(slugify("l·l"), "ll");
        assert_eq!(slugify("oʼneil"), "oneil");
    }

    #[test]
    fn test_collapses_and_trims_separators() {
        assert_eq!(slugify("  --Projeto___Demo--  "), "projeto-demo");
        assert_eq!(slugify("a   b"), "a-b");
        assert_eq!(slugify("casa2024"), "casa2024");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify("日本"), "");
    }

    #[test]
    fn test_output_always_well_formed() {
        let samples = [
            "Casa Áurea!!",
            "-leading",
            "trailing-",
            "Ünïcödé   Tëxt",
            "ØRESUND bridge",
            "tab\tseparated\nlines",
            "100% pure",
            "ﬁ ligature",
            "",
        ];
        for sample in samples {
            let slug = slugify(sample);
            assert!(is_well_formed(&slug), "{:?} -> {:?}", sample, slug);
        }
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("casa-modelo"));
        assert!(!is_slug(""));
        assert!(!is_slug("Casa Nova"));
        assert!(!is_slug("-casa"));
    }

    #[test]
    fn test_idempotent() {
        let once = slugify("Casa Modelo – Térreo");
        assert_eq!(slugify(&once), once);
    }
}
