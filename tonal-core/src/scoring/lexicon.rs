//! Rule-based valence scoring.
//!
//! Word valences live on a `[-4, 4]` scale. A text's compound score is the
//! sum of its word valences, after local adjustments, squashed into
//! `[-1, 1]` by `s / sqrt(s² + 15)`:
//!
//! - intensifiers and dampeners shift the next three words' valence,
//!   weaker the further away they are
//! - a negation within three words flips the valence and shrinks it
//! - words after `but` count 1.5x, words before it 0.5x
//! - an ALL-CAPS word in otherwise mixed-case text is emphasized
//! - up to four `!` and a run of `?` add to the magnitude
//!
//! The file format is the one VADER ships (`vader_lexicon.txt`): a token,
//! a tab, the mean valence, then optional columns that are ignored.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use tonal_types::PolarityScore;

use crate::error::LoadError;
use crate::scoring::PolarityScorer;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORM_ALPHA: f64 = 15.0;

const EXCLAIM_WEIGHT: f64 = 0.292;
const EXCLAIM_MAX: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;

#[rustfmt::skip]
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
    "ain't", "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't",
    "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
    "don't", "hadn't", "hasn't", "haven't", "isn't", "mightn't", "mustn't",
    "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing", "nowhere",
    "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't",
    "without", "wont", "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

#[rustfmt::skip]
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR), ("amazingly", B_INCR), ("awfully", B_INCR),
    ("completely", B_INCR), ("considerably", B_INCR), ("decidedly", B_INCR),
    ("deeply", B_INCR), ("effing", B_INCR), ("enormously", B_INCR),
    ("entirely", B_INCR), ("especially", B_INCR), ("exceptionally", B_INCR),
    ("extremely", B_INCR), ("fabulously", B_INCR), ("flipping", B_INCR),
    ("flippin", B_INCR), ("fricking", B_INCR), ("frickin", B_INCR),
    ("frigging", B_INCR), ("friggin", B_INCR), ("fully", B_INCR),
    ("greatly", B_INCR), ("hella", B_INCR), ("highly", B_INCR),
    ("hugely", B_INCR), ("incredibly", B_INCR), ("intensely", B_INCR),
    ("majorly", B_INCR), ("more", B_INCR), ("most", B_INCR),
    ("particularly", B_INCR), ("purely", B_INCR), ("quite", B_INCR),
    ("really", B_INCR), ("remarkably", B_INCR), ("so", B_INCR),
    ("substantially", B_INCR), ("thoroughly", B_INCR), ("totally", B_INCR),
    ("tremendously", B_INCR), ("uber", B_INCR), ("unbelievably", B_INCR),
    ("unusually", B_INCR), ("utterly", B_INCR), ("very", B_INCR),
    ("almost", B_DECR), ("barely", B_DECR), ("hardly", B_DECR),
    ("just enough", B_DECR), ("kind of", B_DECR), ("kinda", B_DECR),
    ("kindof", B_DECR), ("kind-of", B_DECR), ("less", B_DECR),
    ("little", B_DECR), ("marginally", B_DECR), ("occasionally", B_DECR),
    ("partly", B_DECR), ("scarcely", B_DECR), ("slightly", B_DECR),
    ("somewhat", B_DECR), ("sort of", B_DECR), ("sorta", B_DECR),
    ("sortof", B_DECR), ("sort-of", B_DECR),
];

/// Valences used when no lexicon file is configured.
#[rustfmt::skip]
const BUILTIN: &[(&str, f64)] = &[
    // positive
    ("love", 3.2), ("loved", 2.9), ("loves", 2.7), ("lovely", 2.8), ("loving", 2.9),
    ("like", 2.0), ("liked", 1.8), ("likes", 1.8), ("good", 1.9), ("great", 3.1),
    ("greatest", 3.2), ("awesome", 3.1), ("amazing", 2.8), ("amazed", 2.2),
    ("amaze", 2.5), ("excellent", 2.7), ("best", 3.2), ("better", 1.9),
    ("happy", 2.7), ("happiness", 2.6), ("glad", 2.0), ("nice", 1.8), ("cool", 1.3),
    ("fun", 2.3), ("funny", 1.9), ("perfect", 2.7), ("beautiful", 2.9),
    ("wonderful", 2.7), ("fantastic", 2.6), ("brilliant", 2.8), ("thanks", 1.9),
    ("thank", 1.5), ("win", 2.8), ("wins", 2.7), ("winner", 2.8), ("winning", 2.4),
    ("wow", 2.8), ("yay", 2.4), ("excited", 1.4), ("exciting", 2.2), ("excite", 2.1),
    ("enjoy", 2.2), ("enjoyed", 2.3), ("smart", 1.7), ("genius", 1.9),
    ("impressive", 2.3), ("impressed", 2.1), ("impress", 1.9), ("incredible", 2.2),
    ("innovative", 1.9), ("free", 1.9), ("sweet", 2.0), ("super", 2.9),
    ("favorite", 2.0), ("recommend", 1.5), ("helpful", 1.8), ("useful", 1.9),
    ("easy", 1.9), ("smooth", 1.2), ("gorgeous", 3.0), ("elegant", 2.1),
    ("stunning", 1.6), ("reliable", 1.6), ("pleased", 1.9), ("satisfied", 1.8),
    ("hope", 1.9), ("hopefully", 1.7), ("ready", 1.5), ("yes", 1.7), ("ok", 1.2),
    ("okay", 0.9), ("fine", 0.8), ("haha", 2.0), ("lol", 1.8), ("support", 1.7),
    ("improve", 1.9), ("improved", 2.1), ("improvement", 2.0), ("success", 2.7),
    ("successful", 2.8), ("popular", 1.8), ("worth", 0.9), ("clever", 2.0),
    ("epic", 2.0), ("kudos", 2.3), ("congrats", 2.4), ("congratulations", 2.9),
    ("blessed", 2.9), ("joy", 2.8), ("proud", 2.1), ("cute", 2.0), ("pretty", 2.2),
    ("kind", 2.4), ("win-win", 2.5), ("rock", 0.6), ("rocks", 1.6),
    ("solid", 0.6), ("fast", 0.9), ("fresh", 1.3), ("clean", 1.7), ("powerful", 1.8),
    ("wisely", 1.8), ("fair", 1.3), ("safe", 1.9), ("secure", 1.4), ("strong", 2.3),
    ("thrilled", 2.8), ("delighted", 2.9), ("pleasant", 2.3), ("grateful", 2.0),
    ("excellence", 3.1), ("masterpiece", 3.1), ("flawless", 2.3), ("neat", 2.0),
    // negative
    ("hate", -2.7), ("hated", -3.2), ("hates", -1.9), ("hating", -2.3), ("bad", -2.5),
    ("worse", -2.1), ("worst", -3.1), ("terrible", -2.1), ("awful", -2.0),
    ("horrible", -2.5), ("sad", -2.1), ("angry", -2.3), ("annoying", -1.7),
    ("annoyed", -1.6), ("annoy", -1.9), ("disappointed", -1.9),
    ("disappointing", -2.2), ("disappointment", -2.3), ("disappoint", -2.0),
    ("fail", -2.5), ("failed", -2.3), ("fails", -2.1), ("failure", -2.3),
    ("broken", -1.8), ("crash", -1.7), ("crashed", -1.8), ("crashes", -1.4),
    ("problem", -1.7), ("problems", -1.7), ("buggy", -1.5), ("slow", -1.0),
    ("expensive", -0.9), ("overpriced", -1.6), ("ugly", -2.3), ("stupid", -2.4),
    ("dumb", -2.3), ("sucks", -1.5), ("suck", -1.9), ("sucked", -2.0),
    ("useless", -1.8), ("boring", -1.3), ("poor", -2.1), ("wrong", -2.1),
    ("hurt", -2.4), ("pain", -2.3), ("painful", -2.4), ("lose", -1.6), ("lost", -1.3),
    ("loss", -1.3), ("lame", -1.8), ("fake", -2.1), ("scam", -2.2), ("sorry", -0.3),
    ("shame", -2.1), ("worried", -1.2), ("worry", -1.9), ("fear", -2.2),
    ("upset", -1.6), ("mad", -2.2), ("frustrated", -2.4), ("frustrating", -2.3),
    ("frustration", -2.1), ("confused", -1.3), ("confusing", -0.9),
    ("ridiculous", -1.5), ("pathetic", -2.3), ("crap", -1.6), ("damn", -1.7),
    ("wtf", -2.8), ("no", -1.2), ("miss", -0.6), ("missing", -1.2), ("dead", -3.3),
    ("die", -2.9), ("died", -2.6), ("kill", -3.7), ("trouble", -1.7),
    ("difficult", -1.5), ("hard", -0.4), ("glitch", -1.2), ("delay", -1.3),
    ("delayed", -0.9), ("cancel", -1.0), ("cancelled", -1.0), ("complain", -1.5),
    ("complaint", -1.2), ("blame", -1.4), ("weak", -1.9), ("weird", -0.7),
    ("waste", -1.8), ("wasted", -2.2), ("unhappy", -1.8), ("unfortunately", -1.4),
    ("unfair", -2.1), ("disaster", -3.1), ("mess", -1.5), ("messy", -1.4),
    ("evil", -3.4), ("greedy", -1.3), ("nightmare", -2.7), ("regret", -1.8),
    ("sick", -2.3), ("tired", -1.9), ("disgusting", -2.4), ("gross", -2.1),
    ("cheap", -0.6), ("joke", -0.8), ("fraud", -2.8), ("lies", -1.8), ("liar", -2.8),
    ("hurts", -2.2), ("outage", -1.5), ("sluggish", -1.7), ("laggy", -1.6),
    ("stuck", -1.0), ("ugh", -1.8), ("meh", -0.3), ("fuming", -2.7),
];

/// A word → valence table with VADER-style scoring rules.
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    valences: FxHashMap<String, f64>,
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ValenceLexicon {
    /// The compiled-in table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().copied())
    }

    /// Builds a lexicon from `(word, valence)` pairs. Words are lowercased.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let valences = entries
            .into_iter()
            .map(|(w, v)| (w.to_lowercase(), v))
            .collect();
        Self { valences }
    }

    /// Reads a VADER-format lexicon file.
    ///
    /// # Errors
    /// [`LoadError::Io`] when unreadable, [`LoadError::Resource`] for a line
    /// without a numeric second column.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let mut valences = FxHashMap::default();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or_default().trim();
            let valence = fields
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite());

            match valence {
                Some(v) if !word.is_empty() => {
                    valences.insert(word.to_lowercase(), v);
                }
                _ => {
                    return Err(LoadError::Resource {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        reason: "expected '<token>\\t<valence>'".to_string(),
                    })
                }
            }
        }

        debug!(path = %path.display(), entries = valences.len(), "read valence lexicon");
        Ok(Self { valences })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// True when no word carries a valence.
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    /// Valence of a lowercase word.
    #[inline]
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// All words with a valence.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.valences.keys().map(String::as_str)
    }

    /// Scores `text`.
    ///
    /// Returns 0.0 for text without any lexicon hit.
    pub fn compound(&self, text: &str) -> f64 {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| w.chars().count() > 1)
            .collect();
        if words.is_empty() {
            return 0.0;
        }

        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let cap_diff = mixed_caps(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            sentiments.push(self.word_valence(i, &words, &lower, cap_diff));
        }

        but_check(&lower, &mut sentiments);

        let mut sum: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        round4(normalize(sum))
    }

    fn word_valence(&self, i: usize, words: &[&str], lower: &[String], cap_diff: bool) -> f64 {
        let item = lower[i].as_str();
        if booster(item).is_some() {
            return 0.0;
        }
        if item == "kind" && lower.get(i + 1).is_some_and(|w| w == "of") {
            return 0.0;
        }
        let Some(mut valence) = self.valence(item) else {
            return 0.0;
        };

        if cap_diff && is_upper(words[i]) {
            valence += C_INCR.copysign(valence);
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let j = i - start - 1;
            if self.valence(&lower[j]).is_some() {
                continue;
            }

            let mut s = scalar_inc_dec(words[j], &lower[j], valence, cap_diff);
            if start == 1 {
                s *= 0.95;
            } else if start == 2 {
                s *= 0.9;
            }
            valence += s;
            valence = negation_check(valence, lower, start, i);
        }

        least_check(valence, lower, i, |w| self.valence(w).is_some())
    }
}

impl PolarityScorer for ValenceLexicon {
    fn polarity_compound(&self, text: &str) -> PolarityScore {
        PolarityScore::new(self.compound(text))
    }
}

fn booster(word: &str) -> Option<f64> {
    BOOSTERS.iter().find(|(w, _)| *w == word).map(|&(_, v)| v)
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// Drops leading and trailing punctuation unless that leaves two characters
/// or fewer, so emoticons like `:)` survive.
fn strip_punctuation(token: &str) -> &str {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token
    } else {
        stripped
    }
}

fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Some, but not all, words are in caps.
fn mixed_caps(words: &[&str]) -> bool {
    let upper = words.iter().filter(|w| is_upper(w)).count();
    upper > 0 && upper < words.len()
}

fn scalar_inc_dec(word: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_upper(word) {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn negation_check(valence: f64, lower: &[String], start: usize, i: usize) -> f64 {
    let prev = |n: usize| lower[i - n].as_str();
    match start {
        0 => {
            if is_negated(prev(1)) {
                return valence * N_SCALAR;
            }
        }
        1 => {
            if prev(2) == "never" && matches!(prev(1), "so" | "this") {
                return valence * 1.25;
            }
            if prev(2) == "without" && prev(1) == "doubt" {
                return valence;
            }
            if is_negated(prev(2)) {
                return valence * N_SCALAR;
            }
        }
        _ => {
            if prev(3) == "never"
                && (matches!(prev(2), "so" | "this") || matches!(prev(1), "so" | "this"))
            {
                return valence * 1.25;
            }
            if prev(3) == "without" && (prev(2) == "doubt" || prev(1) == "doubt") {
                return valence;
            }
            if is_negated(prev(3)) {
                return valence * N_SCALAR;
            }
        }
    }
    valence
}

/// "least good" flips, "at least good" does not.
fn least_check(valence: f64, lower: &[String], i: usize, known: impl Fn(&str) -> bool) -> f64 {
    if i == 0 || lower[i - 1] != "least" || known(&lower[i - 1]) {
        return valence;
    }
    if i > 1 && matches!(lower[i - 2].as_str(), "at" | "very") {
        return valence;
    }
    valence * N_SCALAR
}

fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(pivot) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (k, s) in sentiments.iter_mut().enumerate() {
        if k < pivot {
            *s *= 0.5;
        } else if k > pivot {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclaims = text.matches('!').count().min(EXCLAIM_MAX);
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => QUESTION_MAX,
    };
    exclaims as f64 * EXCLAIM_WEIGHT + question_amp
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORM_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
