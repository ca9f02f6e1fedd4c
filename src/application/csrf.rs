/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Anti-forgery token cache
//!
//! Every mutating portal call must carry a `csrf`/`csrf_ts` header pair
//! that the portal hands out on read responses of the same resource type.
//! Tokens are cached per [`ResourceKind`] for the lifetime of the session
//! and are dropped only through an explicit [`CsrfCache::clear`].

use crate::constants::{CSRF_HEADER, CSRF_TS_HEADER};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::fmt;

/// Closed set of resource families that need a primed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// App identifiers
    App,
    /// App groups
    AppGroup,
    /// Signing certificates
    Certificate,
    /// Registered devices
    Device,
    /// Provisioning profiles
    ProvisioningProfile,
    /// Website push identifiers
    WebsitePush,
    /// Team members
    TeamMember,
}

/// How a cold token is obtained for a resource family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfPrimer {
    /// List every instance of the family
    ListAll,
    /// Fetch a single provisioning profile; the full profile listing
    /// lives on another host and never yields a token
    SingleProfileProbe,
}

impl ResourceKind {
    /// Human readable tag
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::App => "App",
            ResourceKind::AppGroup => "App Group",
            ResourceKind::Certificate => "Certificate",
            ResourceKind::Device => "Device",
            ResourceKind::ProvisioningProfile => "Provisioning Profile",
            ResourceKind::WebsitePush => "Website Push",
            ResourceKind::TeamMember => "Team Member",
        }
    }

    /// Probe used to prime a token for this family
    #[must_use]
    pub fn primer(self) -> CsrfPrimer {
        match self {
            ResourceKind::ProvisioningProfile => CsrfPrimer::SingleProfileProbe,
            _ => CsrfPrimer::ListAll,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Token pair handed out by the portal
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfTokens {
    /// Value of the `csrf` header
    pub csrf: String,
    /// Value of the `csrf_ts` header
    pub csrf_ts: Option<String>,
    /// When the pair was captured
    pub captured_at: DateTime<Utc>,
}

impl CsrfTokens {
    /// Creates a token pair captured now
    pub fn new(csrf: &str, csrf_ts: Option<&str>) -> Self {
        Self {
            csrf: csrf.to_string(),
            csrf_ts: csrf_ts.map(str::to_string),
            captured_at: Utc::now(),
        }
    }

    /// Reads the pair from response headers, if the response carries one
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let csrf = headers.get(CSRF_HEADER)?.to_str().ok()?;
        if csrf.is_empty() {
            return None;
        }
        let csrf_ts = headers.get(CSRF_TS_HEADER).and_then(|v| v.to_str().ok());
        Some(Self::new(csrf, csrf_ts))
    }

    /// Request headers carrying the pair
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        let mut headers = vec![(CSRF_HEADER, self.csrf.as_str())];
        if let Some(ts) = &self.csrf_ts {
            headers.push((CSRF_TS_HEADER, ts.as_str()));
        }
        headers
    }
}

// Token values stay out of logs.
impl fmt::Debug for CsrfTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfTokens")
            .field("csrf", &"<redacted>")
            .field("csrf_ts", &self.csrf_ts)
            .field("captured_at", &self.captured_at)
            .finish()
    }
}

/// Active outgoing token plus the per-family cache
#[derive(Debug, Default, Clone)]
pub struct CsrfCache {
    active: Option<CsrfTokens>,
    by_kind: HashMap<ResourceKind, CsrfTokens>,
}

impl CsrfCache {
    /// Empty cache with no active token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token attached to outgoing requests
    #[must_use]
    pub fn active(&self) -> Option<&CsrfTokens> {
        self.active.as_ref()
    }

    /// Replaces the active token
    pub fn set_active(&mut self, tokens: Option<CsrfTokens>) {
        self.active = tokens;
    }

    /// Cached token for `kind`
    #[must_use]
    pub fn cached(&self, kind: ResourceKind) -> Option<&CsrfTokens> {
        self.by_kind.get(&kind)
    }

    /// Installs the cached token for `kind` as the active one
    ///
    /// Returns `false` on a cache miss, leaving the active token alone.
    pub fn install(&mut self, kind: ResourceKind) -> bool {
        match self.by_kind.get(&kind) {
            Some(tokens) => {
                self.active = Some(tokens.clone());
                true
            }
            None => false,
        }
    }

    /// Stores the active token under `kind`
    ///
    /// Returns `false` when there is no active token to store.
    pub fn capture(&mut self, kind: ResourceKind) -> bool {
        match &self.active {
            Some(tokens) => {
                self.by_kind.insert(kind, tokens.clone());
                true
            }
            None => false,
        }
    }

    /// Forgets the token of one family
    pub fn invalidate(&mut self, kind: ResourceKind) {
        self.by_kind.remove(&kind);
    }

    /// Forgets every cached token and the active one
    pub fn clear(&mut self) {
        self.active = None;
        self.by_kind.clear();
    }

    /// Number of families with a cached token
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// Whether no family has a cached token
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}
