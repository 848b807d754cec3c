//! known region codes
//!
//! Only consulted when automatic region promotion is enabled (`skipRegionReplace: false`).
//! A literal region such as `eu-west-1` inside a string is then rewritten into the region
//! token before any substitution happens.
use crate::token::REGION_TOKEN;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

pub const REGIONS: [&str; 15] = [
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

static REGION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = REGIONS.map(regex::escape).join("|");
    Regex::new(&alternation).expect("region alternation is a valid pattern")
});

/// Does `value` mention a known region anywhere?
pub fn contains_region(value: &str) -> bool {
    REGION_PATTERN.is_match(value)
}

/// Rewrite the leftmost region mention into the region token
///
/// Only a single occurrence is replaced, further regions in the same string stay as they are.
pub fn replace_first_region(value: &str) -> Cow<'_, str> {
    REGION_PATTERN.replace(value, NoExpand(REGION_TOKEN))
}
