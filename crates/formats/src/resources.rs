use std::borrow::Cow;
use std::collections::HashMap;

/// Sibling files an asset references by relative URI (glTF `.bin` buffers),
/// keyed by the URI exactly as written in the asset.
#[derive(Debug, Default, Clone)]
pub struct ExternalResources {
    by_uri: HashMap<String, Vec<u8>>,
}

impl ExternalResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: impl Into<String>, bytes: Vec<u8>) {
        self.by_uri.insert(uri.into(), bytes);
    }

    pub fn get(&self, uri: &str) -> Option<&[u8]> {
        self.by_uri.get(uri).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }
}

/// A file referenced by a fetched asset: the URI as written, and the URL it
/// resolves to next to the asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalResource {
    pub uri: String,
    pub url: String,
}

impl ExternalResource {
    pub fn new(asset_path: &str, uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            url: resolve_uri(asset_path, uri).into_owned(),
        }
    }
}

/// Resolves `uri` against the directory of `asset_path`. Absolute paths and
/// URLs with a scheme are returned unchanged.
pub fn resolve_uri<'a>(asset_path: &str, uri: &'a str) -> Cow<'a, str> {
    if uri.starts_with('/') || uri.contains("://") {
        return Cow::Borrowed(uri);
    }
    let base = asset_path.split(['?', '#']).next().unwrap_or(asset_path);
    match base.rfind('/') {
        Some(slash) => Cow::Owned(format!("{}{uri}", &base[..=slash])),
        None => Cow::Borrowed(uri),
    }
}
