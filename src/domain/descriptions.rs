//! Fixed descriptive text for modules.
//!
//! Two tables drive `InfoStore::describe`: category rules add a one-line
//! heading to a report built from catalog data, and static descriptions
//! stand in for modules the catalog knows nothing about.

use crate::domain::topology::ModuleId;

/// How a rule matches a module name. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Prefix(String),
    Exact(String),
}

impl NameMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Prefix(prefix) => name.starts_with(prefix.as_str()),
            NameMatch::Exact(exact) => name == exact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub pattern: NameMatch,
    pub description: String,
}

const CATEGORY_PREFIXES: &[(&str, &str)] = &[
    ("CPU", "Central processing unit performance data"),
    ("L2Cache", "Level 2 cache performance data"),
    ("L3Cache", "Level 3 cache performance data"),
];

const CATEGORY_EXACT: &[(&str, &str)] = &[
    ("MemoryNode0", "Main memory performance data"),
    ("DMA", "DMA controller performance data"),
    ("cache_event_trace", "Cache event trace data"),
    ("Bus", "Bus system performance data"),
    ("L3Group", "L3 cache group aggregate data"),
];

const STATIC_DESCRIPTIONS: &[(&str, &str)] = &[
    ("CPU0", "CPU0 details: 2.5 GHz clock, 4 cores, task-scheduling hub."),
    ("CPU1", "CPU1 details: 2.4 GHz clock, handles graphics workloads."),
    ("CPU2", "CPU2 details: 2.6 GHz clock, runs background services."),
    ("CPU3", "CPU3 details: 2.3 GHz clock, manages I/O."),
    ("L2Cache0", "L2Cache0: attached to CPU0, 512 KB, low latency."),
    ("L2Cache1", "L2Cache1: attached to CPU1, 512 KB, used as a graphics buffer."),
    ("L2Cache2", "L2Cache2: attached to CPU2, 512 KB, enhanced data prefetch."),
    (
        "L2Cache3",
        "L2Cache3: attached to CPU3, 512 KB, fast access to I/O-related cache lines.",
    ),
    ("L3Cache0", "L3Cache0: attached to L2Cache0, 2 MB."),
    ("L3Cache1", "L3Cache1: attached to L2Cache1, 2 MB."),
    ("L3Cache2", "L3Cache2: attached to L2Cache2, 2 MB."),
    ("L3Cache3", "L3Cache3: attached to L2Cache3, 2 MB."),
    ("MemoryNode0", "Memory module MemoryNode0: 8 GB, DDR4."),
    (
        "DMA",
        "DMA controller: moves data between memory and devices without the CPUs.",
    ),
    ("Bus", "System bus: shared interconnect linking caches, memory and DMA."),
    (
        "cache_event_trace",
        "Cache event trace: samples hit and miss events from the L3 cache group.",
    ),
    (
        "L3Group",
        "L3 cache group overview: 4 L3 caches, shared design, 8 MB in total.",
    ),
    (
        "BusNode",
        "Bus node: core interconnect, each node serves several ports.",
    ),
];

/// Category rules plus exact-name descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionTable {
    rules: Vec<CategoryRule>,
    descriptions: Vec<(String, String)>,
}

impl DescriptionTable {
    pub fn new(rules: Vec<CategoryRule>, descriptions: Vec<(String, String)>) -> Self {
        Self {
            rules,
            descriptions,
        }
    }

    /// The built-in tables for the standard topology.
    pub fn standard() -> Self {
        let prefix_rules = CATEGORY_PREFIXES.iter().map(|(p, d)| CategoryRule {
            pattern: NameMatch::Prefix(p.to_string()),
            description: d.to_string(),
        });
        let exact_rules = CATEGORY_EXACT.iter().map(|(n, d)| CategoryRule {
            pattern: NameMatch::Exact(n.to_string()),
            description: d.to_string(),
        });
        let descriptions = STATIC_DESCRIPTIONS
            .iter()
            .map(|(n, d)| (n.to_string(), d.to_string()))
            .collect();

        Self::new(prefix_rules.chain(exact_rules).collect(), descriptions)
    }

    /// First matching category line, in rule order.
    pub fn category(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(name))
            .map(|rule| rule.description.as_str())
    }

    pub fn static_description(&self, name: &str) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.as_str())
    }

    pub fn describe_static(&self, id: ModuleId) -> Option<&str> {
        self.static_description(&id.name())
    }
}

impl Default for DescriptionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rules() {
        let table = DescriptionTable::standard();
        assert_eq!(
            table.category("CPU3"),
            Some("Central processing unit performance data")
        );
        // prefix match is not limited to topology names
        assert_eq!(
            table.category("CPU_cluster"),
            Some("Central processing unit performance data")
        );
        assert_eq!(table.category("L2Cache1"), Some("Level 2 cache performance data"));
        assert_eq!(table.category("L3Cache0"), Some("Level 3 cache performance data"));
    }

    #[test]
    fn test_exact_rules() {
        let table = DescriptionTable::standard();
        assert_eq!(table.category("DMA"), Some("DMA controller performance data"));
        assert_eq!(table.category("Bus"), Some("Bus system performance data"));
        assert_eq!(table.category("cache_event_trace"), Some("Cache event trace data"));
        assert_eq!(table.category("MemoryNode1"), None);
        assert_eq!(table.category("BusNode"), None);
        assert_eq!(table.category("DMA2"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        let table = DescriptionTable::new(
            vec![
                CategoryRule {
                    pattern: NameMatch::Prefix("L3".into()),
                    description: "broad".into(),
                },
                CategoryRule {
                    pattern: NameMatch::Exact("L3Group".into()),
                    description: "narrow".into(),
                },
            ],
            Vec::new(),
        );
        assert_eq!(table.category("L3Group"), Some("broad"));
    }

    #[test]
    fn test_static_descriptions_cover_drawn_components() {
        let table = DescriptionTable::standard();
        for id in ModuleId::all() {
            assert!(table.describe_static(id).is_some(), "{}", id);
        }
        assert_eq!(
            table.static_description("CPU0"),
            Some("CPU0 details: 2.5 GHz clock, 4 cores, task-scheduling hub.")
        );
    }
}
