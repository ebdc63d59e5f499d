//! Single-pass placeholder replacement.
//!
//! All tokens for a secret set are compiled into one byte-level matcher, so
//! each file is scanned once and replaced values are never re-scanned.

use super::format::PlaceholderFormat;
use crate::error::{Result, SubstituteError};
use crate::secrets::SecretSet;
use regex::bytes::{Captures, Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Compiled matcher size ceiling; large secret sets produce long alternations.
const MATCHER_SIZE_LIMIT: usize = 64 * 1024 * 1024;

pub struct Substituter {
    format: PlaceholderFormat,
    matcher: Option<Regex>,
    values: HashMap<Vec<u8>, Vec<u8>>,
}

impl Substituter {
    pub fn new(secrets: &SecretSet, format: PlaceholderFormat) -> Result<Self> {
        let mut tokens: Vec<(String, &str)> = secrets
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (format.placeholder(name), value))
            .collect();

        // Alternation is leftmost-first; longer tokens must be tried first.
        tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let matcher = if tokens.is_empty() {
            None
        } else {
            let pattern = tokens
                .iter()
                .map(|(token, _)| regex::escape(token))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&pattern)
                .size_limit(MATCHER_SIZE_LIMIT)
                .build()
                .map_err(|e| {
                    SubstituteError::Config(format!("cannot compile placeholder matcher: {e}"))
                })?;
            Some(regex)
        };

        debug!(
            "Compiled {} {} placeholder(s)",
            tokens.len(),
            format.as_str()
        );

        let values = tokens
            .into_iter()
            .map(|(token, value)| (token.into_bytes(), value.as_bytes().to_vec()))
            .collect();

        Ok(Self {
            format,
            matcher,
            values,
        })
    }

    pub fn format(&self) -> PlaceholderFormat {
        self.format
    }

    pub fn placeholder_count(&self) -> usize {
        self.values.len()
    }

    /// Replace every placeholder in `input`, returning the rewritten bytes
    /// and the number of replacements made.
    pub fn apply<'a>(&self, input: &'a [u8]) -> (Cow<'a, [u8]>, usize) {
        let Some(matcher) = &self.matcher else {
            return (Cow::Borrowed(input), 0);
        };

        let mut count = 0usize;
        let output = matcher.replace_all(input, |caps: &Captures<'_>| {
            count += 1;
            let token = &caps[0];
            self.values
                .get(token)
                .cloned()
                .unwrap_or_else(|| token.to_vec())
        });

        (output, count)
    }
}
