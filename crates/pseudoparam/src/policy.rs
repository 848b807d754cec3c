//! substitution policies
//!
//! A policy receives the key and the full string of a single entry that contains at least
//! one token and returns the value that replaces it. It never looks at other entries.
//!
//! - [Resolve] replaces tokens with literal values, used for offline execution of a
//!   service description
//! - [Wrap] rewrites tokens into `${...}` references and wraps the string in `Fn::Sub`,
//!   used for compiled templates
use crate::token::TokenMatcher;
use crate::value::Value;
use indexmap::IndexMap;

/// Key of the substitution expression in compiled templates
pub const SUBSTITUTION_KEY: &str = "Fn::Sub";

pub const REGION: &str = "AWS::Region";
pub const ACCOUNT_ID: &str = "AWS::AccountId";

/// Account id used when resolving for offline execution
pub const OFFLINE_ACCOUNT_ID: &str = "123456789012";

pub trait SubstitutionPolicy {
    fn substitute(&mut self, key: &str, value: &str) -> Value;
}

// blanket impl for FnMut
impl<F> SubstitutionPolicy for F
where
    F: FnMut(&str, &str) -> Value,
{
    fn substitute(&mut self, key: &str, value: &str) -> Value {
        self(key, value)
    }
}

/// Known parameter values
///
/// Names without an entry are left unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionMap {
    values: IndexMap<String, String>,
}

impl ResolutionMap {
    /// Region (when known) and the given account id
    pub fn new(region: Option<&str>, account_id: &str) -> Self {
        let mut map = Self::default();
        if let Some(region) = region.filter(|region| !region.is_empty()) {
            map.insert(REGION, region);
        }
        map.insert(ACCOUNT_ID, account_id);
        map
    }

    /// Resolution for a service description, region taken from `provider.region`
    pub fn for_service_description(service: &Value, account_id: &str) -> Self {
        let region = service.get_path("provider.region").and_then(Value::as_str);
        if region.is_none() {
            tracing::debug!("provider.region is not set, AWS::Region stays unresolved");
        }

        Self::new(region, account_id)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Replace known tokens with their literal value
#[derive(derive_new::new, Debug)]
pub struct Resolve<'m> {
    matcher: TokenMatcher,
    resolution: &'m ResolutionMap,
}

impl SubstitutionPolicy for Resolve<'_> {
    fn substitute(&mut self, _key: &str, value: &str) -> Value {
        let resolution = self.resolution;
        self.matcher
            .replace_all(value, |token| match resolution.get(token.name) {
                Some(resolved) => resolved.to_string(),
                None => token.text.to_string(),
            })
            .into()
    }
}

/// Rewrite tokens to `${...}` inside an `Fn::Sub` expression
#[derive(derive_new::new, Debug)]
pub struct Wrap {
    matcher: TokenMatcher,
}

impl SubstitutionPolicy for Wrap {
    fn substitute(&mut self, key: &str, value: &str) -> Value {
        let rewritten = self.matcher.rewrite_delimiters(value);

        if key == SUBSTITUTION_KEY {
            return rewritten.into();
        }

        [(SUBSTITUTION_KEY, rewritten)].into_iter().collect()
    }
}
