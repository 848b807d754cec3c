//! placeholder tokens
//!
//! A token is written as `#{<name>}` inside any string of a template or service description.
//! Depending on `allowReferences` the name is either free-form (anything but `}`) or
//! restricted to pseudo parameters of the form `AWS::<Identifier>`.
//!
//! Scanning never carries state from one string to the next: every call starts a new
//! iteration over the given haystack.
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// The token automatic region promotion produces
pub const REGION_TOKEN: &str = "#{AWS::Region}";

static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\{([^}]+)\}").expect("reference pattern is valid"));

static PSEUDO_PARAMETER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\{(AWS::[a-zA-Z]+)\}").expect("pseudo parameter pattern is valid")
});

/// A single `#{...}` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    /// Byte range of the whole token within the scanned string
    pub span: Range<usize>,
    /// The full token text, delimiters included
    pub text: &'s str,
    /// The captured parameter name, e.g. `AWS::Region`
    pub name: &'s str,
}

impl<'s> Token<'s> {
    fn from_captures(captures: &Captures<'s>) -> Option<Self> {
        let whole = captures.get(0)?;
        let name = captures.get(1)?;
        Some(Self {
            span: whole.range(),
            text: whole.as_str(),
            name: name.as_str(),
        })
    }

    /// The same reference in substitution syntax: `${name}`
    pub fn substitution(&self) -> String {
        format!("${{{}}}", self.name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenMatcher {
    pattern: &'static Regex,
}

impl TokenMatcher {
    pub fn new(allow_references: bool) -> Self {
        let pattern = if allow_references {
            &*REFERENCE_PATTERN
        } else {
            &*PSEUDO_PARAMETER_PATTERN
        };
        tracing::trace!(allow_references, pattern = pattern.as_str(), "token matcher");

        Self { pattern }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }

    /// All non-overlapping tokens, left to right
    pub fn tokens<'s>(&self, haystack: &'s str) -> impl Iterator<Item = Token<'s>> + 's {
        let pattern = self.pattern;
        pattern
            .captures_iter(haystack)
            .filter_map(|captures| Token::from_captures(&captures))
    }

    /// Replace every token with whatever `replacer` returns for it
    ///
    /// Replacement text is never scanned again.
    pub fn replace_all<F>(&self, haystack: &str, mut replacer: F) -> String
    where
        F: FnMut(&Token<'_>) -> String,
    {
        self.pattern
            .replace_all(haystack, |captures: &Captures<'_>| {
                match Token::from_captures(captures) {
                    Some(token) => replacer(&token),
                    None => captures[0].to_string(),
                }
            })
            .into_owned()
    }

    /// `#{name}` becomes `${name}` for every token
    pub fn rewrite_delimiters(&self, haystack: &str) -> String {
        self.replace_all(haystack, |token| token.substitution())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names<'s>(matcher: &TokenMatcher, haystack: &'s str) -> Vec<&'s str> {
        matcher.tokens(haystack).map(|token| token.name).collect()
    }

    #[test]
    fn references_allowed() {
        let matcher = TokenMatcher::new(true);

        assert_eq!(
            names(&matcher, "#{AWS::Region}-#{custom.foo}-#{Bucket.Arn}"),
            vec!["AWS::Region", "custom.foo", "Bucket.Arn"]
        );
    }

    #[test]
    fn references_disallowed() {
        let matcher = TokenMatcher::new(false);

        assert_eq!(
            names(&matcher, "#{AWS::Region}-#{custom.foo}-#{AWS::AccountId}"),
            vec!["AWS::Region", "AWS::AccountId"]
        );
        assert!(!matcher.is_match("#{custom.foo}"));
        assert!(!matcher.is_match("#{AWS::Stack_Name}"));
    }

    #[test]
    fn token_spans() {
        let matcher = TokenMatcher::new(true);
        let tokens: Vec<_> = matcher.tokens("a#{AWS::Region}b").collect();

        assert_eq!(
            tokens,
            vec![Token {
                span: 1..15,
                text: "#{AWS::Region}",
                name: "AWS::Region",
            }]
        );
    }

    #[test]
    fn scans_do_not_leak_between_strings() {
        let matcher = TokenMatcher::new(true);

        // a long string first, then a short one whose token sits before the previous end
        assert_eq!(names(&matcher, "some long prefix text #{AWS::Region}").len(), 1);
        assert_eq!(names(&matcher, "#{AWS::AccountId}"), vec!["AWS::AccountId"]);
        assert!(matcher.is_match("#{x}"));
    }

    #[test]
    fn empty_and_unterminated_tokens_do_not_match() {
        let matcher = TokenMatcher::new(true);

        assert!(!matcher.is_match("#{}"));
        assert!(!matcher.is_match("#{AWS::Region"));
        assert!(!matcher.is_match("${AWS::Region}"));
    }

    #[test]
    fn rewrite_delimiters() {
        let matcher = TokenMatcher::new(true);

        assert_eq!(
            matcher.rewrite_delimiters("arn:aws:s3:#{AWS::Region}:#{AWS::AccountId}:x"),
            "arn:aws:s3:${AWS::Region}:${AWS::AccountId}:x"
        );
    }

    #[test]
    fn rewritten_output_no_longer_matches() {
        let matcher = TokenMatcher::new(true);
        let rewritten = matcher.rewrite_delimiters("#{AWS::Region}");

        assert!(!matcher.is_match(&rewritten));
    }
}
