//! Name -> factory registries (§2 component 5, §4.1).
//!
//! The configuration's `neuron_sources`/`neuron_sinks` name lists are
//! resolved against these registries to produce each agent's active input
//! and output layers. Unknown names are dropped, not an error (§4.1, §6).

use crate::config::{DEFAULT_SINKS, DEFAULT_SOURCES};
use crate::neuron::{SinkKind, SourceKind};

/// Resolves a configured name list into the set of kinds known to the
/// registry, preserving order and dropping unrecognised names silently.
/// If every name in the list is unrecognised (or the list was empty), the
/// resolved list falls back to the configuration's baked-in defaults
/// (§4.1: "empty resolved lists fall back to the defaults").
pub fn resolve_sources(names: &[String]) -> Vec<SourceKind> {
    let resolved: Vec<SourceKind> = names.iter().filter_map(|n| SourceKind::from_name(n)).collect();
    if resolved.is_empty() {
        DEFAULT_SOURCES.iter().filter_map(|n| SourceKind::from_name(n)).collect()
    } else {
        resolved
    }
}

pub fn resolve_sinks(names: &[String]) -> Vec<SinkKind> {
    let resolved: Vec<SinkKind> = names.iter().filter_map(|n| SinkKind::from_name(n)).collect();
    if resolved.is_empty() {
        DEFAULT_SINKS.iter().filter_map(|n| SinkKind::from_name(n)).collect()
    } else {
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_are_dropped_not_errors() {
        let names = vec!["west".to_string(), "not-a-source".to_string(), "east".to_string()];
        let resolved = resolve_sources(&names);
        assert_eq!(resolved, vec![SourceKind::West, SourceKind::East]);
    }

    #[test]
    fn all_unknown_names_fall_back_to_defaults() {
        let names = vec!["not-a-source".to_string(), "also-not-one".to_string()];
        let resolved = resolve_sources(&names);
        let expected: Vec<SourceKind> = DEFAULT_SOURCES.iter().filter_map(|n| SourceKind::from_name(n)).collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn all_unknown_sink_names_fall_back_to_defaults() {
        let names = vec!["not-a-sink".to_string()];
        let resolved = resolve_sinks(&names);
        let expected: Vec<SinkKind> = DEFAULT_SINKS.iter().filter_map(|n| SinkKind::from_name(n)).collect();
        assert_eq!(resolved, expected);
    }
}
