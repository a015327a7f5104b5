use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::profile::{find_profile, DigestProfile};

/// How digests are written out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Hex,
    Raw,
}

/// User/CLI-selected hashing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashConfig {
    pub profile: String,           // e.g., "keccak256"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_len: Option<usize>, // overrides the profile when set
    pub encoding: Encoding,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            profile: "keccak256".to_string(),
            output_len: None,
            encoding: Encoding::Hex,
        }
    }
}

impl HashConfig {
    pub fn new<S: Into<String>>(profile: S, output_len: Option<usize>, encoding: Encoding) -> Self {
        Self {
            profile: profile.into(),
            output_len,
            encoding,
        }
    }

    /// Output length to request from the sponge. An explicit length is passed
    /// through unchecked; the sponge itself decides whether it is usable.
    pub fn resolve_output_len(&self, profiles: &[DigestProfile]) -> Result<usize> {
        if let Some(len) = self.output_len {
            return Ok(len);
        }
        find_profile(profiles, &self.profile)
            .map(|p| p.output_len)
            .ok_or_else(|| anyhow!("profile '{}' not found", self.profile))
    }
}
