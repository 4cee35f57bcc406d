//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources,
//! with special handling for the accumulated `allowed_schemes` field.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use caminho::config::{Config, ConfigMerger};
///
/// let low = Config { expand_home: Some(true), ..Default::default() };
/// let high = Config { expand_home: Some(false), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.expand_home, Some(false));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Allowed schemes: accumulated (union, first occurrence kept)
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.platform.is_some() {
            target.platform = source.platform;
        }

        if source.expand_home.is_some() {
            target.expand_home = source.expand_home;
        }

        if source.allow_missing.is_some() {
            target.allow_missing = source.allow_missing;
        }

        if source.link_mode.is_some() {
            target.link_mode = source.link_mode;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_schemes) = source.allowed_schemes {
            Self::merge_schemes(&mut target.allowed_schemes, source_schemes);
        }
    }

    /// Add `source` schemes to `target`, skipping case-insensitive duplicates.
    ///
    /// A `None` target becomes the deduplicated source list.
    pub(crate) fn merge_schemes(target: &mut Option<Vec<String>>, source: &[String]) {
        let target_schemes = target.get_or_insert_with(Vec::new);
        for scheme in source {
            if !target_schemes
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(scheme))
            {
                target_schemes.push(scheme.clone());
            }
        }
    }
}
