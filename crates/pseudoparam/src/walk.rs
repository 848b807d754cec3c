//! recursive token substitution
//!
//! [TreeWalker::walk] visits every entry of a mapping or sequence:
//!
//! 1. a string mentioning a known region is promoted to the region token first (only with
//!    region replacement enabled)
//! 2. a string containing at least one token is handed to the [SubstitutionPolicy] and the
//!    entry is replaced by whatever the policy returns
//! 3. mappings and sequences are walked recursively
//! 4. everything else is left alone
//!
//! Sequence elements use their index as key. Keys of a mapping can not change while it is
//! walked, only values are replaced.
use crate::config::Options;
use crate::diagnostics::Diagnostics;
use crate::policy::SubstitutionPolicy;
use crate::regions;
use crate::token::TokenMatcher;
use crate::value::Value;
use std::borrow::Cow;

/// Human readable location of a node, e.g. `Resources::Bucket::Properties`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLabel(String);

impl PathLabel {
    pub fn root(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn child(&self, key: &str) -> Self {
        Self(format!("{}::{key}", self.0))
    }
}

impl std::fmt::Display for PathLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct TreeWalker<'a> {
    options: &'a Options,
    matcher: TokenMatcher,
    diagnostics: Diagnostics<'a>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(options: &'a Options, diagnostics: Diagnostics<'a>) -> Self {
        Self {
            options,
            matcher: TokenMatcher::new(options.allow_references),
            diagnostics,
        }
    }

    pub fn matcher(&self) -> TokenMatcher {
        self.matcher
    }

    pub fn diagnostics(&mut self) -> &mut Diagnostics<'a> {
        &mut self.diagnostics
    }

    /// Substitute tokens in all strings below `node`
    ///
    /// Returns `node` itself, mutated in place. Scalars are returned unchanged.
    pub fn walk<'v>(
        &mut self,
        node: &'v mut Value,
        label: &PathLabel,
        policy: &mut dyn SubstitutionPolicy,
    ) -> &'v mut Value {
        self.walk_children(node, label, policy, 0);
        node
    }

    #[tracing::instrument(level = "trace", skip(self, node, label, policy), fields(label = %label))]
    fn walk_children(
        &mut self,
        node: &mut Value,
        label: &PathLabel,
        policy: &mut dyn SubstitutionPolicy,
        depth: usize,
    ) {
        if depth >= self.options.max_depth {
            tracing::warn!(%label, depth, "maximum depth reached, subtree left untouched");
            return;
        }

        match node {
            Value::Object(object) => {
                for (key, value) in object.iter_mut() {
                    self.visit_entry(key, value, label, policy, depth);
                }
            }
            Value::Array(array) => {
                for (index, value) in array.iter_mut().enumerate() {
                    self.visit_entry(&index.to_string(), value, label, policy, depth);
                }
            }
            _ => {}
        }
    }

    fn visit_entry(
        &mut self,
        key: &str,
        value: &mut Value,
        label: &PathLabel,
        policy: &mut dyn SubstitutionPolicy,
        depth: usize,
    ) {
        match value {
            Value::String(text) => {
                if let Some(replacement) = self.substitute(key, text, label, policy) {
                    *value = replacement;
                }
            }
            Value::Object(_) | Value::Array(_) => {
                self.walk_children(value, &label.child(key), policy, depth + 1);
            }
            _ => {}
        }
    }

    /// The replacement for a single string, `None` if it contains no token
    fn substitute(
        &mut self,
        key: &str,
        text: &str,
        label: &PathLabel,
        policy: &mut dyn SubstitutionPolicy,
    ) -> Option<Value> {
        let text = if !self.options.skip_region_replace && regions::contains_region(text) {
            let promoted = regions::replace_first_region(text);
            tracing::trace!(%label, key, %promoted, "region promoted");
            promoted
        } else {
            Cow::Borrowed(text)
        };

        if !self.matcher.is_match(&text) {
            return None;
        }

        let replacement = policy.substitute(key, &text);
        tracing::trace!(%label, key, original = %text, ?replacement, "substituted");

        if self.diagnostics.is_enabled() {
            for token in self.matcher.tokens(&text) {
                self.diagnostics.replaced(label, key, token.name);
            }
        }

        Some(replacement)
    }
}
