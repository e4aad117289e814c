//! Streaming Tokenizer Module
//!
//! Splits cleaned text into words without allocating. It runs after the
//! character filter of the lexicon-oriented normalizer, right before
//! stopword removal and lemmatization.
//!
//! ## What It Does
//!
//! Given cleaned input like `"love new pixel camera"`, it emits each word
//! with its position:
//!
//! ```ignore
//! ("love", 0)
//! ("new", 1)
//! ("pixel", 2)
//! ("camera", 3)
//! ```
//!
//! ## The Input Contract
//!
//! The tokenizer expects text that already went through the character
//! filter:
//! - No leading or trailing whitespace
//! - No consecutive spaces between words
//!
//! If you violate this contract, the tokenizer will panic in debug mode
//! with a helpful message.

use core::str;
use memchr::memchr_iter;

/// Streaming tokenizer - splits cleaned text into words.
///
/// Tokens are not copied: they are slices (`&str`) into the input string,
/// found with a single forward scan for ASCII space bytes (0x20).
///
/// ## Example
///
/// ```
/// use tonal_core::analyzer::tokenizer::Tokenizer;
///
/// let mut count = 0;
/// Tokenizer.tokenize("hello world foo", |_text, _pos| {
///     count += 1;
/// });
///
/// assert_eq!(count, 3);
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenizes cleaned input and emits `(text, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop (overflow protection).
    #[inline(always)]
    #[allow(clippy::needless_lifetimes)]
    pub fn tokenize<'n, F>(&self, cleaned: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let bytes = cleaned.as_bytes();

        debug_assert!(
            bytes.first().is_none_or(|&b| b != b' '),
            "tokenizer: leading whitespace violates the normalizer contract"
        );

        debug_assert!(
            bytes.last().is_none_or(|&b| b != b' '),
            "tokenizer: trailing whitespace violates the normalizer contract"
        );

        debug_assert!(
            !cleaned.contains("  "),
            "tokenizer: consecutive spaces violates the normalizer contract"
        );

        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;
        let mut pos = 0u32;

        for i in memchr_iter(b' ', bytes) {
            if start < i {
                // SAFETY: `cleaned` is valid UTF-8. We split only on ASCII space (0x20),
                // which is never a continuation byte, so `bytes[start..i]` is always a
                // valid UTF-8 subslice.
                let text = unsafe { str::from_utf8_unchecked(&bytes[start..i]) };
                emit(text, pos);
                if pos == u32::MAX {
                    return;
                }
                pos += 1;
            }
            start = i + 1;
        }

        if start < bytes.len() {
            // SAFETY: same invariants as above.
            let text = unsafe { str::from_utf8_unchecked(&bytes[start..]) };
            emit(text, pos);
        }
    }
}
