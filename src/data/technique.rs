//! Heuristic technique classification.
//!
//! Rules are evaluated in table order and the first match wins. CV and EIS
//! come before the battery / CA / CP rules because "current" or "time" on
//! their own are weak signals, and one file can satisfy several rules.

use super::model::Technique;
use crate::plotting::ColumnRole;

/// Lower-cased classification input: column headers plus a content snippet.
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    headers: Vec<String>,
    content: String,
}

impl Evidence {
    pub fn new<S: AsRef<str>>(headers: &[S], content: &str) -> Self {
        Evidence {
            headers: headers.iter().map(|h| h.as_ref().to_lowercase()).collect(),
            content: content.to_lowercase(),
        }
    }

    /// Some header contains `needle`.
    pub fn header_has(&self, needle: &str) -> bool {
        self.headers.iter().any(|h| h.contains(needle))
    }

    /// Every needle is found in some header (not necessarily the same one).
    pub fn headers_have_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.header_has(n))
    }

    /// Some header takes the given column role.
    pub fn header_is(&self, role: ColumnRole) -> bool {
        let matcher = role.matcher();
        self.headers.iter().any(|h| matcher.matches(h))
    }

    /// One header contains every needle.
    pub fn one_header_has_all(&self, needles: &[&str]) -> bool {
        self.headers
            .iter()
            .any(|h| needles.iter().all(|n| h.contains(n)))
    }

    /// Content contains the phrase anywhere.
    pub fn mentions(&self, phrase: &str) -> bool {
        self.content.contains(phrase)
    }

    /// Content contains the word as a standalone alphanumeric token.
    ///
    /// Short acronyms such as `cv` would otherwise fire inside `csv`.
    pub fn mentions_word(&self, word: &str) -> bool {
        self.content
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|tok| tok == word)
    }
}

/// One classifier rule: a predicate over the evidence and the tag it assigns.
#[derive(Clone, Copy)]
pub struct Rule {
    pub technique: Technique,
    pub matches: fn(&Evidence) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("technique", &self.technique).finish()
    }
}

/// `ewe` with a current column. A bare `i` only counts inside the `ewe`
/// header itself, since `time/s` carries one too.
fn is_cv(e: &Evidence) -> bool {
    (e.header_has("ewe") && e.header_is(ColumnRole::Current))
        || e.one_header_has_all(&["ewe", "i"])
        || e.mentions("cyclic voltammetry")
        || e.mentions_word("cv")
}

fn is_eis(e: &Evidence) -> bool {
    e.header_has("re(z)")
        || e.header_has("im(z)")
        || e.header_has("freq")
        || e.mentions("impedance")
        || e.mentions_word("eis")
}

fn is_battery(e: &Evidence) -> bool {
    e.header_has("cycle")
        || e.header_has("capacity")
        || e.header_has("charge")
        || e.mentions("battery")
        || e.mentions("cycling")
}

fn is_ca(e: &Evidence) -> bool {
    e.headers_have_all(&["time", "current"]) && e.mentions("chronoamperometry")
}

fn is_cp(e: &Evidence) -> bool {
    e.headers_have_all(&["time", "potential"]) && e.mentions("chronopotentiometry")
}

/// Ordered rule table. Order is significant.
pub const RULES: [Rule; 5] = [
    Rule { technique: Technique::CV, matches: is_cv },
    Rule { technique: Technique::EIS, matches: is_eis },
    Rule { technique: Technique::BatteryCycling, matches: is_battery },
    Rule { technique: Technique::CA, matches: is_ca },
    Rule { technique: Technique::CP, matches: is_cp },
];

/// Classify a dataset from its headers and a content snippet.
pub fn classify<S: AsRef<str>>(headers: &[S], content: &str) -> Technique {
    let evidence = Evidence::new(headers, content);
    let technique = RULES
        .iter()
        .find(|rule| (rule.matches)(&evidence))
        .map_or(Technique::Unknown, |rule| rule.technique);
    log::debug!("classified as {technique}");
    technique
}

/// Take at most `max_chars` characters from the start of `text`.
pub fn snippet(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
