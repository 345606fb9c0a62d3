//! Revocable preview references for selected images.
//!
//! Every selected file gets a `PreviewUrl` that stays live until it is
//! revoked. Replacing or removing a file must revoke its URL exactly once.

use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    live: HashSet<PreviewUrl>,
    revoked_count: usize,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str) -> PreviewUrl {
        self.next_id += 1;
        let url = PreviewUrl(format!("preview://{}/{}", self.next_id, name));
        log::debug!("Created preview {}", url);
        self.live.insert(url.clone());
        url
    }

    /// Returns false when the URL was never issued or is already revoked.
    pub fn revoke(&mut self, url: &PreviewUrl) -> bool {
        if self.live.remove(url) {
            log::debug!("Revoked preview {}", url);
            self.revoked_count += 1;
            true
        } else {
            log::warn!("Ignoring revoke of inactive preview {}", url);
            false
        }
    }

    pub fn is_live(&self, url: &PreviewUrl) -> bool {
        self.live.contains(url)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn revoked_count(&self) -> usize {
        self.revoked_count
    }
}
