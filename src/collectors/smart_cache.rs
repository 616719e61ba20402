use crate::models::smart::InfoKind;

/// Last smartctl output held by one engine, and the kind it was fetched with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchCache {
    #[default]
    Empty,
    Filled {
        kind:  InfoKind,
        lines: Vec<String>,
    },
}

/// Whether output cached as `cached` can answer a request for `requested`.
pub fn is_compatible(cached: InfoKind, requested: InfoKind) -> bool {
    cached.covers(requested)
}

impl FetchCache {
    /// Cached lines if they satisfy `requested`.
    pub fn lookup(&self, requested: InfoKind) -> Option<&[String]> {
        match self {
            FetchCache::Filled { kind, lines } if is_compatible(*kind, requested) => Some(lines.as_slice()),
            _ => None,
        }
    }

    pub fn store(&mut self, kind: InfoKind, lines: Vec<String>) {
        *self = FetchCache::Filled { kind, lines };
    }

    pub fn clear(&mut self) {
        *self = FetchCache::Empty;
    }

    pub fn kind(&self) -> Option<InfoKind> {
        match self {
            FetchCache::Filled { kind, .. } => Some(*kind),
            FetchCache::Empty => None,
        }
    }
}
