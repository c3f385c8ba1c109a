//! Connection profiles: simple JSON mapping of profile name -> { url, api_key }.
//! Stored under $XDG_CONFIG_HOME/opsdash/profiles.json (fallback ~/.config/opsdash/profiles.json).

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("opsdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opsdash")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    match fs::read_to_string(profiles_path()) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p)?;
    fs::write(path, data)
}

/// Outcome of combining CLI arguments with the profiles file. Resolution is
/// deterministic — the TUI owns the terminal, so there are no prompts.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolvedProfile {
    /// Runtime inputs win; the entry may have been created or updated.
    Direct { url: String, api_key: Option<String> },
    /// Loaded from an existing profile entry.
    Loaded { url: String, api_key: Option<String> },
    /// Named profile does not exist and no URL was given.
    Unknown(String),
    /// Nothing usable was provided.
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    /// Overwrite a differing saved entry without complaint (`--save`).
    pub save: bool,
}

impl ProfileRequest {
    /// Resolve against (and possibly mutate) the profiles file. Returns the
    /// resolution plus whether `pf` changed and should be persisted. A new
    /// profile name with a URL is recorded immediately; an existing entry is
    /// only overwritten when `save` is set.
    pub fn resolve(self, pf: &mut ProfilesFile) -> (ResolvedProfile, bool) {
        match (self.profile_name, self.url) {
            (Some(name), None) => match pf.profiles.get(&name) {
                Some(entry) => (
                    ResolvedProfile::Loaded {
                        url: entry.url.clone(),
                        api_key: entry.api_key.clone(),
                    },
                    false,
                ),
                None => (ResolvedProfile::Unknown(name), false),
            },
            (name, Some(url)) => {
                let mut changed = false;
                if let Some(name) = name {
                    let next = ProfileEntry {
                        url: url.clone(),
                        api_key: self.api_key.clone(),
                    };
                    let known = pf.profiles.get(&name);
                    if known.is_none() || (self.save && known != Some(&next)) {
                        pf.profiles.insert(name, next);
                        changed = true;
                    }
                }
                (
                    ResolvedProfile::Direct {
                        url,
                        api_key: self.api_key,
                    },
                    changed,
                )
            }
            (None, None) => (ResolvedProfile::None, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(
            name.into(),
            ProfileEntry {
                url: url.into(),
                api_key: Some("k".into()),
            },
        );
        pf
    }

    #[test]
    fn name_only_loads_existing_entry() {
        let mut pf = file_with("prod", "http://one:8080");
        let req = ProfileRequest {
            profile_name: Some("prod".into()),
            url: None,
            api_key: None,
            save: false,
        };
        let (resolved, changed) = req.resolve(&mut pf);
        assert_eq!(
            resolved,
            ResolvedProfile::Loaded {
                url: "http://one:8080".into(),
                api_key: Some("k".into()),
            }
        );
        assert!(!changed);
    }

    #[test]
    fn unknown_name_without_url_is_reported() {
        let mut pf = ProfilesFile::default();
        let req = ProfileRequest {
            profile_name: Some("ghost".into()),
            url: None,
            api_key: None,
            save: false,
        };
        let (resolved, changed) = req.resolve(&mut pf);
        assert_eq!(resolved, ResolvedProfile::Unknown("ghost".into()));
        assert!(!changed);
    }

    #[test]
    fn url_without_save_does_not_clobber_existing_entry() {
        let mut pf = file_with("prod", "http://one:8080");
        let req = ProfileRequest {
            profile_name: Some("prod".into()),
            url: Some("http://two:8080".into()),
            api_key: None,
            save: false,
        };
        let (resolved, changed) = req.resolve(&mut pf);
        assert!(matches!(resolved, ResolvedProfile::Direct { .. }));
        assert!(!changed);
        assert_eq!(pf.profiles["prod"].url, "http://one:8080");
    }

    #[test]
    fn save_flag_overwrites_changed_entry() {
        let mut pf = file_with("prod", "http://one:8080");
        let req = ProfileRequest {
            profile_name: Some("prod".into()),
            url: Some("http://two:8080".into()),
            api_key: None,
            save: true,
        };
        let (_, changed) = req.resolve(&mut pf);
        assert!(changed);
        assert_eq!(pf.profiles["prod"].url, "http://two:8080");
    }
}
