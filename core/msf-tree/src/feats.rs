//! UD `FEATS` column codec.

use msf_protocol::FeatureMap;
use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while1},
    character::complete::char,
    combinator::{all_consuming, value},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

use crate::error::FeatsError;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '[' | ']' | '-' | '_')
}

fn feature(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_while1(is_name_char), char('='), take_till1(|c| c == '|'))(input)
}

fn feature_list(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    alt((value(Vec::new(), char('_')), separated_list1(char('|'), feature)))(input)
}

/// Parses `Number=Sing|Person=3`. `_` and the empty string give an empty map.
pub fn parse_features(input: &str) -> Result<FeatureMap, FeatsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(FeatureMap::new());
    }

    let (_, pairs) =
        all_consuming(feature_list)(trimmed).map_err(|_| FeatsError::Invalid(input.to_string()))?;

    Ok(pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}

/// Inverse of [`parse_features`]; an empty map prints as `_`.
pub fn format_features(feats: &FeatureMap) -> String {
    if feats.is_empty() {
        return "_".to_string();
    }
    feats
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("|")
}
