//! Excluded field name handling.
//! Field names are given as a space separated list. Each entry is compiled as a
//! glob pattern, so a plain machine name matches only itself while `field_meta*`
//! style entries can drop a whole family of fields.

use crate::error::{Error, Result};
use crate::field::FieldDescriptor;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Default exclusion list, suppressing metadata tag fields.
pub const DEFAULT_EXCLUDED_FIELDS: &str = "field_metatags";

/// Compiled set of excluded field names.
#[derive(Debug, Clone)]
pub struct ExcludedFields {
    patterns: Vec<String>,
    glob_set: GlobSet,
}

impl ExcludedFields {
    /// Builds the set from individual names or patterns.
    ///
    /// # Errors
    /// * `Error::ExcludePatternError` if an entry is not a valid glob
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.into();
            if pattern.is_empty() {
                continue;
            }
            builder.add(Glob::new(&pattern).map_err(|e| {
                Error::ExcludePatternError(format!("'{}' is not a valid pattern: {}", pattern, e))
            })?);
            kept.push(pattern);
        }
        let glob_set = builder
            .build()
            .map_err(|e| Error::ExcludePatternError(format!("pattern loading failed: {}", e)))?;

        Ok(Self { patterns: kept, glob_set })
    }

    /// Parses a space separated list such as `"field_metatags field_seo"`.
    pub fn parse(list: &str) -> Result<Self> {
        Self::new(list.split_whitespace())
    }

    /// An exclusion set that matches nothing.
    pub fn none() -> Self {
        Self { patterns: Vec::new(), glob_set: GlobSet::empty() }
    }

    pub fn is_excluded(&self, field_name: &str) -> bool {
        self.glob_set.is_match(field_name)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Keeps the fields that are not excluded, preserving their order.
    pub fn filter<'a>(&self, fields: &'a [FieldDescriptor]) -> Vec<&'a FieldDescriptor> {
        fields
            .iter()
            .filter(|field| {
                let excluded = self.is_excluded(field.name());
                if excluded {
                    debug!("Excluding field '{}'", field.name());
                }
                !excluded
            })
            .collect()
    }
}

impl Default for ExcludedFields {
    fn default() -> Self {
        Self::none()
    }
}
