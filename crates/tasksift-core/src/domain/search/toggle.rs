//! Feature toggles for search attributes

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

use super::entity::SearchAttribute;

/// Source of named boolean settings
///
/// An unset key reads as disabled.
#[async_trait]
pub trait ToggleSource: Send + Sync {
    async fn is_enabled(&self, key: &str) -> Result<bool>;
}

/// Fixed toggle set held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticToggles {
    flags: HashMap<String, bool>,
}

impl StaticToggles {
    /// Every attribute disabled
    pub fn none() -> Self {
        Self::default()
    }

    /// Every attribute enabled
    pub fn all() -> Self {
        SearchAttribute::ALL.into_iter().collect()
    }

    /// Enable one attribute
    pub fn with(mut self, attribute: SearchAttribute) -> Self {
        self.flags.insert(attribute.toggle_key().to_string(), true);
        self
    }

    /// Set a raw key
    pub fn set(&mut self, key: impl Into<String>, enabled: bool) {
        self.flags.insert(key.into(), enabled);
    }
}

impl FromIterator<SearchAttribute> for StaticToggles {
    fn from_iter<I: IntoIterator<Item = SearchAttribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

#[async_trait]
impl ToggleSource for StaticToggles {
    async fn is_enabled(&self, key: &str) -> Result<bool> {
        Ok(self.flags.get(key).copied().unwrap_or(false))
    }
}

/// Interpret a stored setting value as a toggle.
///
/// Enabled when the value is numeric and equal to 1 (`"1"`, `" 1"`, `"1.0"`,
/// `"01"`); words such as `"true"` are not numeric and read as disabled.
pub fn setting_enabled(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v == 1.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_toggles_default_disabled() {
        let toggles = StaticToggles::none();
        for attribute in SearchAttribute::ALL {
            assert!(!toggles.is_enabled(attribute.toggle_key()).await.unwrap());
        }
        assert!(!toggles.is_enabled("unknown_key").await.unwrap());
    }

    #[tokio::test]
    async fn test_static_toggles_with() {
        let toggles = StaticToggles::none().with(SearchAttribute::Title);
        assert!(toggles.is_enabled("title_search").await.unwrap());
        assert!(!toggles.is_enabled("comment_search").await.unwrap());

        let mut toggles = StaticToggles::all();
        toggles.set("title_search", false);
        assert!(!toggles.is_enabled("title_search").await.unwrap());
        assert!(toggles.is_enabled("project_search").await.unwrap());
    }

    #[test]
    fn test_setting_enabled() {
        assert!(setting_enabled("1"));
        assert!(setting_enabled(" 1 "));
        assert!(setting_enabled("1.0"));
        assert!(setting_enabled("01"));
        assert!(!setting_enabled("0"));
        assert!(!setting_enabled(""));
        assert!(!setting_enabled("true"));
        assert!(!setting_enabled("2"));
        assert!(!setting_enabled("NaN"));
    }
}
