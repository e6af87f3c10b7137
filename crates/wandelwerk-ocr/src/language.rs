// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR language preparation — expands requested language codes, filters them
// against the engine's supported list, and selects vertical-script models
// for CJK material.

use std::collections::HashSet;

/// Language codes that imply vertically laid-out text by default.
const CJK_PREFIXES: [&str; 4] = ["jpn", "kor", "chi_tra", "chi_sim"];

/// Suffix selecting a trained model for vertical text.
const VERTICAL_SUFFIX: &str = "_vert";

/// The one viewing-direction value that disables the vertical models.
const LEFT_TO_RIGHT: &str = "left-to-right";

/// Turns a list of requested language codes and a viewing-direction hint
/// into the argument tesseract accepts.
///
/// The supported-language list is injected at construction — typically the
/// result of one `--list-langs` query at process start — so tests and
/// callers never touch global state.
#[derive(Debug, Clone)]
pub struct LanguagePreparer {
    requested: Vec<String>,
    viewing_direction: Option<String>,
    supported: Vec<String>,
}

impl LanguagePreparer {
    pub fn new(
        requested: Vec<String>,
        viewing_direction: Option<String>,
        supported: Vec<String>,
    ) -> Self {
        Self {
            requested,
            viewing_direction,
            supported,
        }
    }

    /// The validated, expanded, vertically-suffixed code list, in request
    /// order. Blank entries and codes the engine does not know are dropped;
    /// duplicates keep their first position.
    pub fn prepared_languages(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.requested
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .flat_map(expand)
            .filter(|code| self.supported.iter().any(|s| s == code))
            .filter(|code| seen.insert(code.clone()))
            .map(|code| self.vertical_variant(code))
            .collect()
    }

    /// The `+`-joined value for tesseract's `-l` flag, or `None` when no
    /// valid language remains — in which case the asset is not OCR-able.
    pub fn argument(&self) -> Option<String> {
        let prepared = self.prepared_languages();
        if prepared.is_empty() {
            None
        } else {
            Some(prepared.join("+"))
        }
    }

    /// CJK material is assumed vertically laid out right-to-left; only an
    /// explicit left-to-right hint keeps the horizontal model.
    fn vertical_variant(&self, code: String) -> String {
        if self.viewing_direction.as_deref() == Some(LEFT_TO_RIGHT) {
            return code;
        }
        if code.ends_with(VERTICAL_SUFFIX) {
            return code;
        }
        if CJK_PREFIXES.iter().any(|prefix| code.starts_with(prefix)) {
            format!("{code}{VERTICAL_SUFFIX}")
        } else {
            code
        }
    }
}

/// Some requested codes stand for several trained models: German material
/// regularly needs the Fraktur model too, and a bare "chi" request means
/// both Traditional and Simplified Chinese.
fn expand(code: &str) -> Vec<String> {
    match code {
        "deu" => vec!["deu".to_string(), "frk".to_string()],
        "chi" => vec!["chi_tra".to_string(), "chi_sim".to_string()],
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> Vec<String> {
        ["eng", "deu", "frk", "jpn", "kor", "chi_tra", "chi_sim"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn preparer(requested: &[&str], direction: Option<&str>) -> LanguagePreparer {
        LanguagePreparer::new(
            requested.iter().map(|s| s.to_string()).collect(),
            direction.map(String::from),
            supported(),
        )
    }

    #[test]
    fn german_includes_fraktur() {
        let prepared = preparer(&["deu"], None).prepared_languages();
        assert_eq!(prepared, ["deu", "frk"]);
    }

    #[test]
    fn chinese_defaults_to_vertical_models() {
        let prepared = preparer(&["chi"], None).prepared_languages();
        assert_eq!(prepared, ["chi_tra_vert", "chi_sim_vert"]);
    }

    #[test]
    fn left_to_right_keeps_horizontal_models() {
        let prepared = preparer(&["chi"], Some("left-to-right")).prepared_languages();
        assert_eq!(prepared, ["chi_tra", "chi_sim"]);
    }

    #[test]
    fn other_directions_still_go_vertical() {
        let prepared = preparer(&["jpn"], Some("right-to-left")).prepared_languages();
        assert_eq!(prepared, ["jpn_vert"]);
    }

    #[test]
    fn invalid_and_blank_entries_are_dropped() {
        let prepared = preparer(&["invalid", "", "  "], None).prepared_languages();
        assert!(prepared.is_empty());
    }

    #[test]
    fn unsupported_codes_are_filtered_before_suffixing() {
        let prepared = preparer(&["eng", "xyz", "jpn"], None).prepared_languages();
        assert_eq!(prepared, ["eng", "jpn_vert"]);
    }

    #[test]
    fn order_follows_the_request() {
        let prepared = preparer(&["jpn", "eng"], None).prepared_languages();
        assert_eq!(prepared, ["jpn_vert", "eng"]);
    }

    #[test]
    fn duplicates_keep_their_first_position() {
        let prepared = preparer(&["eng", "deu", "eng"], None).prepared_languages();
        assert_eq!(prepared, ["eng", "deu", "frk"]);
    }

    #[test]
    fn argument_joins_with_plus() {
        assert_eq!(
            preparer(&["eng", "deu"], None).argument().as_deref(),
            Some("eng+deu+frk")
        );
    }

    #[test]
    fn argument_is_absent_when_nothing_remains() {
        assert_eq!(preparer(&["invalid"], None).argument(), None);
        assert_eq!(preparer(&[], None).argument(), None);
    }

    #[test]
    fn already_vertical_codes_are_not_suffixed_twice() {
        let mut langs = supported();
        langs.push("jpn_vert".to_string());
        let preparer = LanguagePreparer::new(vec!["jpn_vert".to_string()], None, langs);
        assert_eq!(preparer.prepared_languages(), ["jpn_vert"]);
    }
}
