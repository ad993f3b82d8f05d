// ABOUTME: Used-food accumulator carried across days and weeks of one planning run
// ABOUTME: Keeps first-use order, deduplicates case-insensitively, builds the dislikes prompt
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::collections::HashSet;

/// Foods already served to a user, oldest first
///
/// The set is an explicit value owned by the run: it is loaded once from the
/// variety store, threaded through every day and week, and written back as a
/// side effect. Nothing here touches storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedFoodSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

fn key(description: &str) -> String {
    description.trim().to_lowercase()
}

impl UsedFoodSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored list, dropping blanks and duplicates
    #[must_use]
    pub fn from_stored(stored: Vec<String>) -> Self {
        let mut set = Self::new();
        set.extend_new(stored);
        set
    }

    /// Whether a description was already used
    #[must_use]
    pub fn contains(&self, description: &str) -> bool {
        self.seen.contains(&key(description))
    }

    /// Add one description; returns `false` if it was already present or blank
    pub fn insert(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        let trimmed = description.trim();
        if trimmed.is_empty() || !self.seen.insert(key(trimmed)) {
            return false;
        }
        self.order.push(trimmed.to_owned());
        true
    }

    /// Add every previously unseen description, returning how many were new
    pub fn extend_new<I, S>(&mut self, descriptions: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        descriptions
            .into_iter()
            .map(|d| usize::from(self.insert(d)))
            .sum()
    }

    /// The `limit` most recently added descriptions, oldest first
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[String] {
        let start = self.order.len().saturating_sub(limit);
        &self.order[start..]
    }

    /// Base dislikes plus the most recent used foods, comma separated
    #[must_use]
    pub fn augmented_dislikes(&self, base: &str, limit: usize) -> String {
        let base = base.trim().trim_end_matches(',').trim();
        let recent = self.recent(limit);
        if recent.is_empty() {
            return base.to_owned();
        }
        let used = recent.join(", ");
        if base.is_empty() {
            used
        } else {
            format!("{base}, {used}")
        }
    }

    /// Every description in first-use order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Number of distinct foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no food has been used yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_case_insensitive() {
        let mut used = UsedFoodSet::new();
        assert!(used.insert("100g Tofu"));
        assert!(!used.insert("100g tofu "));
        assert!(!used.insert("   "));
        assert_eq!(used.len(), 1);
        assert!(used.contains("100G TOFU"));
    }

    #[test]
    fn test_augmented_dislikes_caps_recent_foods() {
        let used = UsedFoodSet::from_stored(vec![
            "1 medium apple".to_owned(),
            "100g paneer".to_owned(),
            "30g almonds".to_owned(),
        ]);
        assert_eq!(
            used.augmented_dislikes("mushrooms,", 2),
            "mushrooms, 100g paneer, 30g almonds"
        );
        assert_eq!(used.augmented_dislikes("", 1), "30g almonds");
        assert_eq!(UsedFoodSet::new().augmented_dislikes(" okra ", 5), "okra");
    }

    #[test]
    fn test_extend_new_counts_only_unseen() {
        let mut used = UsedFoodSet::from_stored(vec!["100g white rice".to_owned()]);
        let added = used.extend_new(["100g white rice", "1 medium banana", "1 medium banana"]);
        assert_eq!(added, 1);
        assert_eq!(used.as_slice(), ["100g white rice", "1 medium banana"]);
    }
}
