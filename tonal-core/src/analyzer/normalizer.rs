use std::borrow::Cow;

use memchr::memchr;
use once_cell::sync::Lazy;
use regex::Regex;
use tonal_types::{AsRawText, HashtagPolicy, LinkPolicy, Variant};

use crate::analyzer::refiner::TokenRefiner;
use crate::resources::LinguisticResources;

// Applied in this order. A single alternation would let `@\w+` win over a
// URL that starts right after the `@`.
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("valid URL pattern"));
static URL_DOTTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\.\S+").expect("valid dotted URL pattern"));
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention pattern"));
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("valid hashtag pattern"));

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// What happens to URLs and `@mentions`.
    pub links: LinkPolicy,
    /// What happens to `#hashtag` tokens.
    pub hashtags: HashtagPolicy,
}

impl NormalizerConfig {
    /// Policies paired with a scoring variant.
    pub const fn for_variant(variant: Variant) -> Self {
        Self {
            links: variant.link_policy(),
            hashtags: variant.hashtag_policy(),
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Classifier)
    }
}

/// Deterministic text cleaner feeding the scoring backends.
///
/// Performs the following operations, in order:
/// - Lowercases (Unicode-aware)
/// - Removes URL-like runs (`http…` up to the next whitespace, plus `www…`
///   or only `www.…` depending on [`LinkPolicy`])
/// - Removes `@mentions`, leaving nothing or a space behind
/// - Removes `#hashtags` entirely, or only their `#` marker
/// - Turns every character other than `a`-`z` into a separator
/// - Collapses separators into single spaces and trims both ends
/// - Optionally refines tokens (stopwords, short tokens, lemmas)
///
/// Non-ASCII letters count as separators, so `"café"` becomes `"caf"`.
///
/// Normalization is total: it never fails, and input that cleans down to
/// nothing yields `""`.
///
/// # Examples
///
/// ```
/// use tonal_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::classifier();
/// assert_eq!(normalizer.normalize("I love my new iPhone 15!"), "i love my new iphone");
///
/// let raw: Option<&str> = None;
/// assert_eq!(normalizer.normalize_raw(&raw), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
    refiner: Option<TokenRefiner>,
}

impl TextNormalizer {
    /// Creates a normalizer with the specified configuration and no token
    /// refinement.
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            refiner: None,
        }
    }

    /// Adds stopword removal and lemmatization after character filtering.
    #[must_use]
    pub fn with_refiner(mut self, refiner: TokenRefiner) -> Self {
        self.refiner = Some(refiner);
        self
    }

    /// Cleaning used in front of the classifier: hashtags dropped whole,
    /// no token refinement.
    pub fn classifier() -> Self {
        Self::new(NormalizerConfig::for_variant(Variant::Classifier))
    }

    /// Cleaning used in front of the lexicon: links and mentions become
    /// separators, hashtag words kept, tokens refined with the given
    /// resources.
    pub fn lexicon(resources: &LinguisticResources) -> Self {
        Self::new(NormalizerConfig::for_variant(Variant::Lexicon))
            .with_refiner(resources.refiner())
    }

    /// The cleaning paired with a scoring variant.
    pub fn for_variant(variant: Variant, resources: &LinguisticResources) -> Self {
        match variant {
            Variant::Classifier => Self::classifier(),
            Variant::Lexicon => Self::lexicon(resources),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Whether tokens are refined after character filtering.
    pub fn refines_tokens(&self) -> bool {
        self.refiner.is_some()
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        if input.is_empty() {
            return;
        }

        let lowered = input.to_lowercase();
        let (url, gap) = match self.config.links {
            LinkPolicy::Remove => (&*URL, ""),
            LinkPolicy::Separate => (&*URL_DOTTED, " "),
        };
        let text = url.replace_all(&lowered, gap);
        let text = MENTION.replace_all(&text, gap);
        let text = match self.config.hashtags {
            HashtagPolicy::StripHashtagWords => HASHTAG.replace_all(&text, ""),
            HashtagPolicy::KeepHashtagText => strip_hash_markers(&text),
        };

        match &self.refiner {
            None => push_letters(&text, out),
            Some(refiner) => {
                let mut letters = String::with_capacity(text.len());
                push_letters(&text, &mut letters);
                refiner.refine_into(&letters, out);
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes any value; values that are not text yield `""`.
    pub fn normalize_raw<T: AsRawText + ?Sized>(&self, input: &T) -> String {
        match input.as_raw_text() {
            Some(text) => self.normalize(text),
            None => String::new(),
        }
    }
}

fn strip_hash_markers(text: &str) -> Cow<'_, str> {
    if memchr(b'#', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('#', ""))
}

/// Appends the `a`-`z` runs of `text` to `out`, one space between runs.
///
/// Every other byte, including each byte of a multi-byte character, is a
/// separator, so the output is ASCII without leading, trailing or double
/// spaces.
#[inline]
fn push_letters(text: &str, out: &mut String) {
    out.reserve(text.len());
    let mut pending_space = false;

    for &b in text.as_bytes() {
        if b.is_ascii_lowercase() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(b as char);
        } else {
            pending_space = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm_a(input: &str) -> String {
        TextNormalizer::classifier().normalize(input)
    }

    fn norm_b(input: &str) -> String {
        TextNormalizer::lexicon(&LinguisticResources::builtin()).normalize(input)
    }

    #[test]
    fn lowercase_and_strip_digits_punctuation() {
        assert_eq!(norm_a("I love my new iPhone 15!"), "i love my new iphone");
        assert_eq!(norm_a("GOOGLE MAPS!!!"), "google maps");
    }

    #[test]
    fn urls_removed() {
        assert_eq!(norm_a("check https://t.co/abc now"), "check now");
        assert_eq!(norm_a("visit www.apple.com today"), "visit today");
        assert_eq!(norm_a("HTTP://SHOUTY.COM ok"), "ok");
    }

    #[test]
    fn url_glued_to_word_keeps_prefix() {
        assert_eq!(norm_a("seehttp://x.co/a yes"), "see yes");
    }

    #[test]
    fn bare_https_word_is_a_url() {
        assert_eq!(norm_a("https rock"), "rock");
        assert_eq!(norm_a("http rocks"), "http rocks");
    }

    #[test]
    fn mentions_removed() {
        assert_eq!(norm_a("@apple fix this"), "fix this");
        assert_eq!(norm_a("hi @john_doe42 there"), "hi there");
    }

    #[test]
    fn email_loses_domain_part() {
        assert_eq!(norm_a("mail me@apple.com"), "mail me com");
    }

    #[test]
    fn url_removed_before_mentions() {
        assert_eq!(norm_a("@http://x.co yes"), "yes");
    }

    #[test]
    fn hashtag_words_stripped_for_classifier() {
        assert_eq!(norm_a("love it #sxsw"), "love it");
        assert_eq!(norm_a("#iPhone15 launch"), "launch");
    }

    #[test]
    fn hashtag_words_kept_for_lexicon() {
        assert_eq!(norm_b("#great camera"), "great camera");
    }

    #[test]
    fn lone_markers_vanish() {
        assert_eq!(norm_a("### wow"), "wow");
        assert_eq!(norm_b("### wow"), "wow");
    }

    #[test]
    fn whitespace_collapse_and_trim() {
        assert_eq!(norm_a("  hello   world  "), "hello world");
        assert_eq!(norm_a("hello\t\nworld"), "hello world");
        assert_eq!(norm_a("hello \r\n world"), "hello world");
    }

    #[test]
    fn no_double_spaces() {
        let out = norm_a("a - b -- c ... d");
        assert!(!out.contains("  "));
        assert_eq!(out, "a b c d");
    }

    #[test]
    fn accented_letters_are_dropped() {
        assert_eq!(norm_a("Café Olé"), "caf ol");
        assert_eq!(norm_a("naïve"), "na ve");
    }

    #[test]
    fn non_latin_scripts_vanish() {
        assert_eq!(norm_a("ПРИВЕТ"), "");
        assert_eq!(norm_a("你好 apple"), "apple");
        assert_eq!(norm_a("Hello 🌍 World"), "hello world");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(norm_a(""), "");
        assert_eq!(norm_a("   "), "");
        assert_eq!(norm_b(""), "");
        assert_eq!(norm_a("12345 !!!"), "");
    }

    #[test]
    fn non_string_input_is_empty() {
        let n = TextNormalizer::classifier();
        assert_eq!(n.normalize_raw(&serde_json::json!(42)), "");
        assert_eq!(n.normalize_raw(&serde_json::json!(null)), "");
        assert_eq!(n.normalize_raw(&serde_json::json!(["a"])), "");
        assert_eq!(n.normalize_raw(&None::<&str>), "");
        assert_eq!(n.normalize_raw(&serde_json::json!("Hi!")), "hi");
        assert_eq!(n.normalize_raw("Hi!"), "hi");
    }

    #[test]
    fn output_never_contains_url() {
        let inputs = [
            "see https://apple.com/iphone?x=1 now",
            "xhttp://a.b/c?d=1 yes",
            "www.google.com",
            "go to WWW.Pixel.COM/buy",
            "two http://a http://b links",
        ];
        for input in inputs {
            let out = norm_a(input);
            assert!(!URL.is_match(&out), "{input:?} -> {out:?}");
            let out = norm_b(input);
            assert!(!URL_DOTTED.is_match(&out), "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn output_alphabet() {
        let out = norm_a("Wow!! #1 phone @ $999, 100% <3 — ünïcödé");
        assert!(out.bytes().all(|b| b.is_ascii_lowercase() || b == b' '));
    }

    #[test]
    fn idempotent_on_clean_text() {
        let samples = [
            "hello world",
            "i love my new iphone",
            "https are weird",
            "wwwx is gone",
            "a b c",
            "",
        ];
        for s in samples {
            let once = norm_a(s);
            let twice = norm_a(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn idempotent_on_arbitrary_text() {
        let samples = ["I love my new iPhone 15!", "@user check http://x.co #great"];
        for s in samples {
            let once = norm_a(s);
            assert_eq!(norm_a(&once), once);
        }
    }

    #[test]
    fn lexicon_variant_refines_tokens() {
        assert_eq!(
            norm_b("The battery is a joke and I hate it"),
            "battery joke hate"
        );
        assert_eq!(norm_b("My phones keep crashing!!"), "phone keep crash");
    }

    #[test]
    fn lexicon_variant_keeps_hashtag_word() {
        let out = norm_b("@user check http://x.co #great");
        assert_eq!(out, "check great");
    }

    #[test]
    fn lexicon_variant_mentions_and_links_separate_words() {
        assert_eq!(norm_b("so good@apple#great"), "good great");
        assert_eq!(norm_b("nice@apple"), "nice");
        assert_eq!(norm_b("love!http://x.co/a#camera"), "love");
        assert_eq!(norm_b("good@x#fun"), "good fun");
    }

    #[test]
    fn classifier_variant_mentions_vanish() {
        assert_eq!(norm_a("so good@apple#great"), "so good");
        assert_eq!(norm_a("so good@apple great"), "so good great");
    }

    #[test]
    fn lexicon_variant_keeps_www_words() {
        assert_eq!(norm_b("wwwhat a great phone"), "wwwhat great phone");
        assert_eq!(norm_b("see www.pixel.com great"), "see great");
        assert_eq!(norm_a("wwwhat a great phone"), "a great phone");
    }

    #[test]
    fn lexicon_variant_can_empty_out() {
        assert_eq!(norm_b("@@@ http://a.b ###"), "");
        assert_eq!(norm_b("it is what it is"), "");
    }

    #[test]
    fn variant_constructors() {
        let res = LinguisticResources::builtin();
        let a = TextNormalizer::for_variant(Variant::Classifier, &res);
        let b = TextNormalizer::for_variant(Variant::Lexicon, &res);
        assert!(!a.refines_tokens());
        assert!(b.refines_tokens());
        assert_eq!(a.config().hashtags, HashtagPolicy::StripHashtagWords);
        assert_eq!(b.config().hashtags, HashtagPolicy::KeepHashtagText);
        assert_eq!(a.config().links, LinkPolicy::Remove);
        assert_eq!(b.config().links, LinkPolicy::Separate);
        assert_eq!(NormalizerConfig::default(), a.config());
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = TextNormalizer::classifier();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.normalize_into("HELLO", &mut buf);
        assert_eq!(buf, "hello");
        assert_eq!(buf.capacity(), cap);

        normalizer.normalize_into("WORLD", &mut buf);
        assert_eq!(buf, "world");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn never_panics_on_odd_input() {
        let long = "A".repeat(10_000);
        let inputs = [
            "\0\0\0",
            "İstanbul",
            "@",
            "#",
            "http",
            "www",
            "@#@#",
            "\u{200B}",
            long.as_str(),
        ];
        for input in inputs {
            let _ = norm_a(input);
            let _ = norm_b(input);
        }
    }

    #[test]
    fn very_long_ascii() {
        let input = "A".repeat(10_000);
        let out = norm_a(&input);
        assert_eq!(out.len(), 10_000);
        assert!(out.chars().all(|c| c == 'a'));
    }

    #[test]
    fn dotted_capital_i_splits_word() {
        // lowercases to `i` + U+0307, and the combining dot is a separator
        assert_eq!(norm_a("İstanbul"), "i stanbul");
    }
}
