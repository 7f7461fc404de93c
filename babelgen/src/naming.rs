//! Naming-convention normalization.
//!
//! Identifiers are split into words on underscores and on lower-to-upper
//! case boundaries: `order_id` gives `["order", "id"]` and `orderId` gives
//! `["order", "Id"]`. Runs of capitals are kept together, so `HTTPServer`
//! stays a single word. Both casings are idempotent.

use convert_case::{Case, Casing};

use crate::error::{RenderError, RenderResult};

/// Split an identifier into words.
pub fn words(identifier: &str) -> RenderResult<Vec<&str>> {
    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(RenderError::invalid_identifier(
            identifier,
            "only ASCII letters, digits and underscores are allowed",
        ));
    }

    let mut words = Vec::new();
    for chunk in identifier.split('_').filter(|c| !c.is_empty()) {
        let bytes = chunk.as_bytes();
        let mut start = 0;
        for i in 1..bytes.len() {
            let prev = bytes[i - 1];
            if bytes[i].is_ascii_uppercase() && (prev.is_ascii_lowercase() || prev.is_ascii_digit())
            {
                words.push(&chunk[start..i]);
                start = i;
            }
        }
        words.push(&chunk[start..]);
    }

    match words.first() {
        None => Err(RenderError::invalid_identifier(identifier, "contains no words")),
        Some(first) if first.starts_with(|c: char| c.is_ascii_digit()) => Err(
            RenderError::invalid_identifier(identifier, "starts with a digit"),
        ),
        Some(_) => Ok(words),
    }
}

/// Convert to type case (`PascalCase`).
pub fn to_type_case(identifier: &str) -> RenderResult<String> {
    let mut out = String::with_capacity(identifier.len());
    for word in words(identifier)? {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    Ok(out)
}

/// Convert to member case (`camelCase`).
pub fn to_member_case(identifier: &str) -> RenderResult<String> {
    let type_case = to_type_case(identifier)?;
    let mut chars = type_case.chars();
    Ok(match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(type_case.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => type_case,
    })
}

/// Convert to a `snake_case` file stem.
pub fn to_file_stem(identifier: &str) -> RenderResult<String> {
    Ok(to_type_case(identifier)?.to_case(Case::Snake))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,20}"
    }

    proptest! {
        #[test]
        fn type_case_is_idempotent(id in arb_identifier()) {
            let once = to_type_case(&id).unwrap();
            let twice = to_type_case(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn member_case_is_idempotent(id in arb_identifier()) {
            let once = to_member_case(&id).unwrap();
            let twice = to_member_case(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn casings_agree(id in arb_identifier()) {
            let member = to_member_case(&id).unwrap();
            let pascal = to_type_case(&id).unwrap();
            prop_assert_eq!(to_type_case(&member).unwrap(), pascal.clone());
            prop_assert_eq!(member.to_lowercase(), pascal.to_lowercase());
        }
    }
}
