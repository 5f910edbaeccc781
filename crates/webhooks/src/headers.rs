//! Header lookup.
//!
//! Receivers hand over whatever header container their HTTP stack uses, so
//! lookup goes through the small [`HeaderSource`] trait. Names are compared
//! ASCII case-insensitively. Each field is looked up under its canonical
//! `webhook-*` name first and then under the `svix-*` alias.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::VerificationError;

/// Header names for the three signed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderNames {
    /// Message id header
    pub id: &'static str,
    /// Signature list header
    pub signature: &'static str,
    /// Timestamp header
    pub timestamp: &'static str,
}

/// The canonical Standard Webhooks header names.
pub const CANONICAL_HEADERS: HeaderNames = HeaderNames {
    id: "webhook-id",
    signature: "webhook-signature",
    timestamp: "webhook-timestamp",
};

/// The alternate header names carrying the same fields.
pub const ALIAS_HEADERS: HeaderNames = HeaderNames {
    id: "svix-id",
    signature: "svix-signature",
    timestamp: "svix-timestamp",
};

/// A container that can look up a header value by name.
pub trait HeaderSource {
    /// Value of the header called `name`, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

impl<K, V, S> HeaderSource for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn header(&self, name: &str) -> Option<&str> {
        find(self.iter(), name)
    }
}

impl<K, V> HeaderSource for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn header(&self, name: &str) -> Option<&str> {
        find(self.iter(), name)
    }
}

impl<K, V> HeaderSource for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn header(&self, name: &str) -> Option<&str> {
        find(self.iter().map(|(k, v)| (k, v)), name)
    }
}

impl<K, V> HeaderSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<K, V, const N: usize> HeaderSource for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

/// Values that are not visible ASCII are treated as absent.
#[cfg(feature = "http")]
impl HeaderSource for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

fn find<'a, K, V, I>(entries: I, name: &str) -> Option<&'a str>
where
    K: AsRef<str> + 'a,
    V: AsRef<str> + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .find(|(k, _)| k.as_ref().eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_ref())
}

/// The three signed fields pulled out of a header container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookHeaders<'a> {
    /// Message id
    pub id: &'a str,
    /// Space-separated signature list
    pub signature: &'a str,
    /// Raw timestamp value, not yet parsed
    pub timestamp: &'a str,
}

impl<'a> WebhookHeaders<'a> {
    /// Extract the id, signature and timestamp values.
    ///
    /// Empty values count as missing. With `accept_alias` off only the
    /// canonical names are consulted.
    pub fn extract<H>(headers: &'a H, accept_alias: bool) -> Result<Self, VerificationError>
    where
        H: HeaderSource + ?Sized,
    {
        let id = lookup(headers, CANONICAL_HEADERS.id, ALIAS_HEADERS.id, accept_alias);
        let signature = lookup(
            headers,
            CANONICAL_HEADERS.signature,
            ALIAS_HEADERS.signature,
            accept_alias,
        );
        let timestamp = lookup(
            headers,
            CANONICAL_HEADERS.timestamp,
            ALIAS_HEADERS.timestamp,
            accept_alias,
        );

        match (id, signature, timestamp) {
            (Some(id), Some(signature), Some(timestamp)) => Ok(Self {
                id,
                signature,
                timestamp,
            }),
            _ => Err(VerificationError::MissingHeaders),
        }
    }
}

fn lookup<'a, H>(headers: &'a H, canonical: &str, alias: &str, accept_alias: bool) -> Option<&'a str>
where
    H: HeaderSource + ?Sized,
{
    let present = |name: &str| headers.header(name).filter(|value| !value.is_empty());
    present(canonical).or_else(|| if accept_alias { present(alias) } else { None })
}
