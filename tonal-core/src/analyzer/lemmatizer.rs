//! Dictionary-validated morphological lemmatizer.
//!
//! Works like WordNet's `morphy`: an exception table handles irregular
//! forms, then suffix detachment rules propose candidate base forms and
//! the first candidate present in the base-form vocabulary wins. A word
//! that no rule can reduce to a known base form is returned unchanged, so
//! the lemmatizer never invents words.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::LoadError;

/// Noun detachment rules, tried first.
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Verb detachment rules.
const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

/// Irregular forms that no suffix rule can recover.
#[rustfmt::skip]
const EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"), ("men", "man"), ("women", "woman"), ("feet", "foot"),
    ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("lives", "life"),
    ("wives", "wife"), ("knives", "knife"), ("leaves", "leaf"), ("ran", "run"),
    ("went", "go"), ("gone", "go"), ("bought", "buy"), ("broke", "break"),
    ("broken", "break"), ("made", "make"), ("got", "get"), ("gotten", "get"),
    ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
    ("saw", "see"), ("seen", "see"), ("came", "come"), ("felt", "feel"),
    ("thought", "think"), ("told", "tell"), ("sold", "sell"), ("paid", "pay"),
    ("won", "win"), ("lost", "lose"), ("kept", "keep"), ("left", "leave"),
    ("brought", "bring"), ("built", "build"), ("sent", "send"), ("spent", "spend"),
    ("knew", "know"), ("known", "know"), ("wrote", "write"), ("written", "write"),
    ("drove", "drive"), ("driven", "drive"), ("fell", "fall"), ("fallen", "fall"),
];

/// Base forms known without any resource file.
#[rustfmt::skip]
const BASE_FORMS: &[&str] = &[
    // products and brands
    "apple", "google", "iphone", "ipad", "ipod", "mac", "macbook", "pixel", "android",
    "app", "store", "phone", "tablet", "laptop", "computer", "device", "gadget",
    "watch", "camera", "screen", "display", "battery", "charger", "cable", "case",
    "keyboard", "speaker", "headphone", "earbud", "map", "search", "browser", "email",
    "update", "version", "release", "feature", "design", "product", "brand", "company",
    "service", "network", "signal", "wifi", "game", "photo", "picture", "video",
    "music", "song", "playlist", "message", "text", "call", "line", "queue", "party",
    "session", "conference", "festival", "event", "talk", "panel", "launch", "demo",
    "preview", "review", "price", "deal", "discount", "sale", "buyer", "customer",
    "user", "fan", "friend", "people", "person", "day", "week", "year", "hour",
    "minute", "time", "thing", "way", "box", "glass", "class", "bus", "address",
    "crash", "bug", "glitch", "issue", "problem", "fix", "patch", "support",
    "storage", "memory", "chip", "processor", "speed", "life", "hand", "pocket",
    "window", "tab", "page", "site", "link", "account", "password", "privacy",
    "ad", "notification", "setting", "option", "choice", "idea", "question", "answer",
    // verbs
    "run", "use", "buy", "get", "make", "go", "work", "break", "wait", "need",
    "want", "look", "think", "feel", "try", "charge", "download", "upload", "install",
    "delete", "open", "close", "start", "stop", "show", "share", "send", "check",
    "love", "hate", "like", "dislike", "enjoy", "prefer", "miss", "win", "lose",
    "fail", "freeze", "lag", "drop", "die", "hang", "reboot", "restart", "sync",
    "stream", "play", "watch", "read", "write", "see", "say", "tell", "ask", "give",
    "take", "keep", "come", "leave", "bring", "build", "pay", "sell", "spend",
    "know", "drive", "fall", "improve", "impress", "disappoint", "annoy", "amaze",
    "excite", "thank", "help", "rock", "suck", "rule", "care", "worry", "complain",
    "announce", "introduce", "unveil", "ship", "plan", "hope", "expect", "wish",
];

/// Dictionary-validated lemmatizer.
///
/// # Examples
///
/// ```
/// use tonal_core::analyzer::Lemmatizer;
///
/// let lemmatizer = Lemmatizer::builtin();
/// assert_eq!(lemmatizer.lemmatize("batteries"), "battery");
/// assert_eq!(lemmatizer.lemmatize("running"), "run");
/// assert_eq!(lemmatizer.lemmatize("zyzzyva"), "zyzzyva");
/// ```
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    vocabulary: FxHashSet<String>,
    exceptions: FxHashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lemmatizer {
    /// Lemmatizer with the built-in vocabulary and exception table.
    pub fn builtin() -> Self {
        let mut lemmatizer = Self::empty();
        lemmatizer.extend_vocabulary(BASE_FORMS.iter().copied());
        for (form, base) in EXCEPTIONS {
            lemmatizer.add_exception(form, base);
        }
        lemmatizer
    }

    /// Lemmatizer that knows no words (every word is returned unchanged).
    pub fn empty() -> Self {
        Self {
            vocabulary: FxHashSet::default(),
            exceptions: FxHashMap::default(),
        }
    }

    /// Reads a lemma dictionary.
    ///
    /// One entry per line: a single word adds a base form, two words
    /// (`inflected base`) add an exception. Blank lines and `#` comments
    /// are skipped.
    ///
    /// # Errors
    /// [`LoadError::Io`] when unreadable, [`LoadError::Resource`] for a line
    /// with more than two fields.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let mut lemmatizer = Self::empty();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(base), None, None) => {
                    lemmatizer.vocabulary.insert(base.to_lowercase());
                }
                (Some(form), Some(base), None) => lemmatizer.add_exception(form, base),
                _ => {
                    return Err(LoadError::Resource {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        reason: "expected `base` or `inflected base`".to_string(),
                    })
                }
            }
        }

        Ok(lemmatizer)
    }

    /// Adds base forms to the vocabulary.
    pub fn extend_vocabulary<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocabulary
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Maps an irregular form to its base. The base joins the vocabulary.
    pub fn add_exception(&mut self, form: &str, base: &str) {
        let base = base.to_lowercase();
        self.vocabulary.insert(base.clone());
        self.exceptions.insert(form.to_lowercase(), base);
    }

    /// Number of known base forms.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Reduces a lowercase word to its base form.
    pub fn lemmatize<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if let Some(base) = self.exceptions.get(word) {
            return Cow::Owned(base.clone());
        }
        if self.vocabulary.contains(word) {
            return Cow::Borrowed(word);
        }

        for &(suffix, replacement) in NOUN_RULES.iter().chain(VERB_RULES) {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }

            let mut candidate = String::with_capacity(stem.len() + replacement.len());
            candidate.push_str(stem);
            candidate.push_str(replacement);
            if self.vocabulary.contains(&candidate) {
                return Cow::Owned(candidate);
            }

            // running -> runn -> run
            if replacement.is_empty() && (suffix == "ing" || suffix == "ed") {
                if let Some(undoubled) = undouble(stem) {
                    if self.vocabulary.contains(undoubled) {
                        return Cow::Owned(undoubled.to_string());
                    }
                }
            }
        }

        Cow::Borrowed(word)
    }
}

/// Drops the last byte of a stem ending in a doubled consonant.
fn undouble(stem: &str) -> Option<&str> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n < 3 {
        return None;
    }
    let (a, b) = (bytes[n - 2], bytes[n - 1]);
    if a == b && a.is_ascii_lowercase() && !matches!(a, b'a' | b'e' | b'i' | b'o' | b'u') {
        Some(&stem[..n - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lemma(word: &str) -> String {
        Lemmatizer::builtin().lemmatize(word).into_owned()
    }

    #[test]
    fn plural_nouns() {
        assert_eq!(lemma("phones"), "phone");
        assert_eq!(lemma("batteries"), "battery");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("glasses"), "glass");
        assert_eq!(lemma("parties"), "party");
    }

    #[test]
    fn verb_forms() {
        assert_eq!(lemma("loved"), "love");
        assert_eq!(lemma("loves"), "love");
        assert_eq!(lemma("crashing"), "crash");
        assert_eq!(lemma("charging"), "charge");
        assert_eq!(lemma("waited"), "wait");
    }

    #[test]
    fn doubled_consonants() {
        assert_eq!(lemma("running"), "run");
        assert_eq!(lemma("dropped"), "drop");
        assert_eq!(lemma("shipping"), "ship");
    }

    #[test]
    fn irregular_forms() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("bought"), "buy");
        assert_eq!(lemma("broken"), "break");
    }

    #[test]
    fn known_base_forms_unchanged() {
        assert_eq!(lemma("bus"), "bus");
        assert_eq!(lemma("iphone"), "iphone");
        assert_eq!(lemma("class"), "class");
    }

    #[test]
    fn unknown_words_unchanged() {
        assert_eq!(lemma("awesome"), "awesome");
        assert_eq!(lemma("this"), "this");
        assert_eq!(lemma("zzz"), "zzz");
    }

    #[test]
    fn borrowed_when_unchanged() {
        let l = Lemmatizer::builtin();
        assert!(matches!(l.lemmatize("zzz"), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_lemmatizer_is_identity() {
        let l = Lemmatizer::empty();
        assert_eq!(l.lemmatize("phones"), "phones");
        assert_eq!(l.vocabulary_len(), 0);
    }

    #[test]
    fn vocabulary_extension() {
        let mut l = Lemmatizer::empty();
        l.extend_vocabulary(["awesome"]);
        assert_eq!(l.lemmatize("awesomes"), "awesome");
    }

    #[test]
    fn undouble_requires_consonant_pair() {
        assert_eq!(undouble("runn"), Some("run"));
        assert_eq!(undouble("see"), None);
        assert_eq!(undouble("ab"), None);
    }

    #[test]
    fn from_file_reads_bases_and_exceptions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# lemmas").unwrap();
        writeln!(file, "tablet").unwrap();
        writeln!(file, "oxen ox").unwrap();

        let l = Lemmatizer::from_file(file.path()).unwrap();
        assert_eq!(l.lemmatize("tablets"), "tablet");
        assert_eq!(l.lemmatize("oxen"), "ox");
    }

    #[test]
    fn from_file_rejects_wide_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a b c").unwrap();

        let err = Lemmatizer::from_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Resource { line: 1, .. }));
    }
}
