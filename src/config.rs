// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pagination::DEFAULT_PAGE_SIZE;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendlens", "spendlens"));

pub const ENV_API_BASE: &str = "SPENDLENS_API_BASE";
pub const ENV_TIMEOUT: &str = "SPENDLENS_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    pub timeout_secs: u64,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:3000".to_string(),
            timeout_secs: 15,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific directories")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.data_dir();
    fs::create_dir_all(dir).context("Failed to create data dir")?;
    Ok(dir.to_path_buf())
}

impl Settings {
    /// Defaults, then the config file, then the environment, then `--api-base`.
    pub fn load(api_base_flag: Option<&str>) -> Result<Self> {
        let path = config_path()?;
        Self::from_sources(Some(&path), |k| std::env::var(k).ok(), api_base_flag)
    }

    pub fn from_sources<F>(file: Option<&Path>, env: F, api_base_flag: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match file {
            Some(p) if p.exists() => {
                let raw = fs::read_to_string(p)
                    .with_context(|| format!("Read config at {}", p.display()))?;
                serde_json::from_str::<Settings>(&raw)
                    .with_context(|| format!("Parse config at {}", p.display()))?
            }
            _ => Settings::default(),
        };

        if let Some(base) = env(ENV_API_BASE).filter(|s| !s.is_empty()) {
            settings.api_base = base;
        }
        if let Some(secs) = env(ENV_TIMEOUT).filter(|s| !s.is_empty()) {
            settings.timeout_secs = secs
                .parse()
                .with_context(|| format!("Invalid {} '{}'", ENV_TIMEOUT, secs))?;
        }
        if let Some(base) = api_base_flag {
            settings.api_base = base.to_string();
        }
        settings.api_base = settings.api_base.trim_end_matches('/').to_string();
        settings.page_size = settings.page_size.max(1);
        tracing::debug!(api_base = %settings.api_base, "settings loaded");
        Ok(settings)
    }
}
