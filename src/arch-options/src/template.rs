// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Placeholder substitution for configuration templates.
//!
//! Templates are plain text with `@KEY@` placeholders, where `KEY` is an
//! upper-case identifier (`[A-Z][A-Z0-9_]*`). Anything else, including a
//! lone `@`, is literal text. Rendering is strict: a placeholder without a
//! value fails the render instead of substituting an empty string, since
//! the substituted values end up selecting executables.

use std::collections::BTreeMap;

/// Errors associated with rendering a template.
#[derive(Debug, PartialEq, Eq, thiserror::Error, displaydoc::Display)]
pub enum TemplateError {
    /// No value for placeholder @{0}@
    UnresolvedPlaceholder(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// A parsed configuration template.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wraps a template source.
    pub fn new<S: Into<String>>(source: S) -> Template {
        Template {
            source: source.into(),
        }
    }

    /// Placeholder names in order of first appearance, deduplicated.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for segment in self.segments() {
            if let Segment::Placeholder(key) = segment
                && !keys.contains(&key)
            {
                keys.push(key);
            }
        }
        keys
    }

    /// Substitutes every placeholder from `vars`.
    ///
    /// Deterministic: the same source and variables always produce
    /// byte-identical output.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(key) => match vars.get(key) {
                    Some(value) => out.push_str(value),
                    None => return Err(TemplateError::UnresolvedPlaceholder(String::from(key))),
                },
            }
        }
        Ok(out)
    }

    fn segments(&self) -> Vec<Segment<'_>> {
        let source = self.source.as_str();
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(at) = rest.find('@') {
            if at > 0 {
                segments.push(Segment::Literal(&rest[..at]));
            }
            let tail = &rest[at + 1..];
            match placeholder_len(tail) {
                Some(len) => {
                    segments.push(Segment::Placeholder(&tail[..len]));
                    // Skip both delimiting `@`s.
                    rest = &tail[len + 1..];
                }
                None => {
                    segments.push(Segment::Literal(&rest[at..=at]));
                    rest = tail;
                }
            }
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        segments
    }
}

/// Length of a well-formed placeholder name at the start of `tail`
/// (the text right after an `@`), excluding the closing `@`.
fn placeholder_len(tail: &str) -> Option<usize> {
    let bytes = tail.as_bytes();
    if !bytes.first()?.is_ascii_uppercase() {
        return None;
    }
    let len = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        .count();
    (bytes.get(len) == Some(&b'@')).then_some(len)
}
