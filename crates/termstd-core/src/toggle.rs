//! Category toggle set with an aggregate "select all" key.
//!
//! The set keeps one invariant after every transition: the aggregate key is
//! selected exactly when every category is selected. Toggling the aggregate
//! sets every category at once; toggling a category recomputes the aggregate
//! from the post-change values.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::catalog::WorkflowSpec;
use crate::error::{Error, Result};

/// Serializable view of the toggle set: categories in configuration order,
/// aggregate key last. Serializes as a flat JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySnapshot(Vec<(String, bool)>);

impl CategorySnapshot {
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: String, value: bool) {
        match self.0.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl Serialize for CategorySnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for CategorySnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = CategorySnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category keys to booleans")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut snapshot = CategorySnapshot::default();
                while let Some((key, value)) = access.next_entry::<String, bool>()? {
                    snapshot.insert(key, value);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// A validated toggle request.
///
/// Built by [`CategoryToggleSet::event`], which rejects unknown keys. The
/// event carries its key, so applying it to a set that lacks the key is a
/// logged no-op rather than a change to some other category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEvent {
    key: String,
    checked: bool,
    aggregate: bool,
}

impl ToggleEvent {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Category {
    key: String,
    selected: bool,
}

/// Boolean selection state for a fixed set of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryToggleSet {
    categories: Vec<Category>,
    all_key: String,
    all_selected: bool,
}

impl CategoryToggleSet {
    /// Create a set with every category and the aggregate selected.
    pub fn new<I, S>(keys: I, all_key: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let all_key = all_key.into();
        let mut categories: Vec<Category> = Vec::new();

        for key in keys {
            let key = key.into();
            if key == all_key {
                return Err(Error::Config(format!(
                    "category key '{}' collides with the aggregate key",
                    key
                )));
            }
            if categories.iter().any(|c| c.key == key) {
                return Err(Error::Config(format!("duplicate category key '{}'", key)));
            }
            categories.push(Category {
                key,
                selected: true,
            });
        }

        if categories.is_empty() {
            return Err(Error::Config(
                "toggle set needs at least one category".to_string(),
            ));
        }

        Ok(Self {
            categories,
            all_key,
            all_selected: true,
        })
    }

    /// Create the default set for a workflow page.
    pub fn from_spec(spec: &WorkflowSpec) -> Result<Self> {
        Self::new(spec.category_keys(), spec.all_key)
    }

    /// Validate `key` and build a toggle event for it.
    pub fn event(&self, key: &str, checked: bool) -> Result<ToggleEvent> {
        let aggregate = key == self.all_key;
        if !aggregate && !self.categories.iter().any(|c| c.key == key) {
            return Err(Error::UnknownCategory(key.to_string()));
        }
        Ok(ToggleEvent {
            key: key.to_string(),
            checked,
            aggregate,
        })
    }

    /// Apply a toggle event.
    pub fn toggle(&mut self, event: ToggleEvent) {
        if event.aggregate && event.key == self.all_key {
            for category in &mut self.categories {
                category.selected = event.checked;
            }
            self.all_selected = event.checked;
        } else if let Some(category) = self.categories.iter_mut().find(|c| c.key == event.key) {
            category.selected = event.checked;
            // Recompute against the post-change values.
            self.all_selected = self.categories.iter().all(|c| c.selected);
        } else {
            warn!(category = %event.key, "Toggle event does not belong to this set");
            return;
        }

        debug!(
            category = %event.key,
            checked = event.checked,
            all_selected = self.all_selected,
            "Category toggled"
        );
    }

    pub fn all_key(&self) -> &str {
        &self.all_key
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn is_selected(&self, key: &str) -> Option<bool> {
        if key == self.all_key {
            return Some(self.all_selected);
        }
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.selected)
    }

    /// Category keys in configuration order, aggregate excluded.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.key.as_str())
    }

    pub fn selected_keys(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.key.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn snapshot(&self) -> CategorySnapshot {
        let mut entries: Vec<(String, bool)> = self
            .categories
            .iter()
            .map(|c| (c.key.clone(), c.selected))
            .collect();
        entries.push((self.all_key.clone(), self.all_selected));
        CategorySnapshot(entries)
    }

    /// Whether the aggregate equals the AND of all categories.
    pub fn check_invariant(&self) -> bool {
        self.all_selected == self.categories.iter().all(|c| c.selected)
    }
}
