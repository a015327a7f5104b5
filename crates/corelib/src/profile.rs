use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::keccak::STATE_BYTES;
use crate::crypto::sponge::rate_for;

/// Environment variable naming an extra profiles directory.
pub const PROFILES_DIR_ENV: &str = "XMRHASH_PROFILES_DIR";

/// A named sponge output length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DigestProfile {
    pub id: String,
    pub output_len: usize,
    #[serde(default)]
    pub description: Option<String>,
}

impl DigestProfile {
    fn builtin(id: &str, output_len: usize, description: &str) -> Self {
        Self {
            id: id.to_string(),
            output_len,
            description: Some(description.to_string()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(anyhow!("profile id cannot be empty"));
        }
        rate_for(self.output_len)
            .map(|_| ())
            .with_context(|| format!("profile '{}' has unusable output_len", self.id))
    }

    /// Sponge rate this profile hashes with.
    pub fn rate(&self) -> Result<usize> {
        Ok(rate_for(self.output_len)?)
    }
}

fn profiles_dir() -> PathBuf {
    std::env::var_os(PROFILES_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("profiles"))
}

fn read_one(path: &Path) -> Result<DigestProfile> {
    let s =
        fs::read_to_string(path).with_context(|| format!("reading profile {}", path.display()))?;
    let p: DigestProfile =
        toml::from_str(&s).with_context(|| format!("parsing profile {}", path.display()))?;
    p.validate()?;
    Ok(p)
}

pub fn builtin_profiles() -> Vec<DigestProfile> {
    let mut profiles = vec![
        DigestProfile::builtin("keccak256", 32, "32-byte digest, rate 136"),
        DigestProfile::builtin("keccak384", 48, "48-byte digest, rate 104"),
        DigestProfile::builtin("keccak512", 64, "64-byte digest, rate 72"),
        DigestProfile::builtin("keccak-state", STATE_BYTES, "full 200-byte state, rate 136"),
    ];
    profiles.sort_by(|a, b| a.id.cmp(&b.id));
    profiles
}

/// Load `*.toml` profiles from `dir` on top of the built-ins, sorted by id.
/// A file reusing a built-in id replaces it.
pub fn load_profiles_from(dir: &Path) -> Result<Vec<DigestProfile>> {
    let mut out = builtin_profiles();
    if dir.is_dir() {
        for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "toml").unwrap_or(false) {
                let p = read_one(&path)?;
                out.retain(|existing| existing.id != p.id);
                out.push(p);
            }
        }
    }
    out.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(out)
}

/// Load profiles from `$XMRHASH_PROFILES_DIR` (default `profiles/`).
pub fn load_all_profiles() -> Result<Vec<DigestProfile>> {
    load_profiles_from(&profiles_dir())
}

pub fn load_all_profiles_or_default() -> Vec<DigestProfile> {
    load_all_profiles().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load digest profiles, using built-ins");
        builtin_profiles()
    })
}

pub fn find_profile<'a>(profiles: &'a [DigestProfile], id: &str) -> Option<&'a DigestProfile> {
    let id = id.trim().to_ascii_lowercase();
    profiles.iter().find(|p| p.id == id)
}
