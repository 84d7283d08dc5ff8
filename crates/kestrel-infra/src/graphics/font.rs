// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Named font resources used by text drawing.

use ab_glyph::FontVec;
use kestrel_core::config::FontResource;
use kestrel_core::PlatformError;
use std::collections::HashMap;
use std::path::Path;

/// Parsed fonts keyed by the name render code refers to them by.
///
/// Owned by the window's canvas and dropped with it.
#[derive(Default)]
pub struct FontCache {
    fonts: HashMap<String, FontVec>,
}

impl FontCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every resource. Any unreadable or unparsable file fails the
    /// whole load.
    pub fn load(resources: &[FontResource]) -> Result<Self, PlatformError> {
        let mut cache = Self::new();
        for resource in resources {
            let font = load_font(&resource.name, &resource.path)?;
            log::info!(
                "Font '{}' loaded from {}",
                resource.name,
                resource.path.display()
            );
            cache.insert(resource.name.clone(), font);
        }
        Ok(cache)
    }

    /// Registers `font` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, font: FontVec) {
        self.fonts.insert(name.into(), font);
    }

    /// The font registered under `name`.
    pub fn get(&self, name: &str) -> Option<&FontVec> {
        self.fonts.get(name)
    }

    /// Number of registered fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no font is registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn load_font(name: &str, path: &Path) -> Result<FontVec, PlatformError> {
    let fail = |reason: String| PlatformError::FontLoad {
        name: name.to_string(),
        path: path.to_path_buf(),
        reason,
    };
    let data = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
    FontVec::try_from_vec(data).map_err(|e| fail(e.to_string()))
}
