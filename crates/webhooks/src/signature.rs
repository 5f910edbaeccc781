//! Signature header parsing and candidate matching.

/// One `version,signature` pair from a signature header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureToken<'a> {
    /// Version tag, e.g. `v1`
    pub version: &'a str,
    /// Encoded signature after the first comma
    pub signature: &'a str,
}

/// Split a signature header into tokens, in header order.
///
/// Tokens are separated by single spaces and split on their first comma.
/// Tokens without a comma are dropped.
pub fn parse_signature_header(value: &str) -> impl Iterator<Item = SignatureToken<'_>> {
    value
        .split(' ')
        .filter_map(|token| token.split_once(','))
        .map(|(version, signature)| SignatureToken { version, signature })
}

/// Return true if any token tagged `version` satisfies `matches`.
///
/// Candidates are tried in header order and the scan stops at the first
/// match. Tokens with other versions are skipped without error.
pub fn any_signature_matches<F>(header: &str, version: &str, mut matches: F) -> bool
where
    F: FnMut(&str) -> bool,
{
    parse_signature_header(header)
        .filter(|token| token.version == version)
        .any(|token| matches(token.signature))
}
