use crate::domain::errors::ModuleIdError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of CPU / L2 / L3 lanes in the topology.
pub const CORE_COUNT: u8 = 4;

/// Broad component family, used for colours and category lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModuleKind {
    Cpu,
    L2Cache,
    L3Cache,
    Memory,
    Dma,
    BusNode,
    Bus,
    L3Group,
    CacheEventTrace,
}

/// Every component the diagram can select.
///
/// The canonical names (`Display`) are the section names used in the
/// performance-data file, e.g. `CPU0`, `L3Cache2`, `cache_event_trace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleId {
    Cpu(u8),
    L2Cache(u8),
    L3Cache(u8),
    MemoryNode0,
    Dma,
    BusNode,
    Bus,
    L3Group,
    CacheEventTrace,
}

impl ModuleId {
    /// All identifiers, in diagram order (top to bottom, left to right).
    pub fn all() -> Vec<ModuleId> {
        let mut ids = Vec::with_capacity(3 * CORE_COUNT as usize + 6);
        for lane in 0..CORE_COUNT {
            ids.push(ModuleId::Cpu(lane));
        }
        for lane in 0..CORE_COUNT {
            ids.push(ModuleId::L2Cache(lane));
        }
        ids.push(ModuleId::BusNode);
        ids.push(ModuleId::Bus);
        for lane in 0..CORE_COUNT {
            ids.push(ModuleId::L3Cache(lane));
        }
        ids.extend([
            ModuleId::L3Group,
            ModuleId::CacheEventTrace,
            ModuleId::MemoryNode0,
            ModuleId::Dma,
        ]);
        ids
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleId::Cpu(_) => ModuleKind::Cpu,
            ModuleId::L2Cache(_) => ModuleKind::L2Cache,
            ModuleId::L3Cache(_) => ModuleKind::L3Cache,
            ModuleId::MemoryNode0 => ModuleKind::Memory,
            ModuleId::Dma => ModuleKind::Dma,
            ModuleId::BusNode => ModuleKind::BusNode,
            ModuleId::Bus => ModuleKind::Bus,
            ModuleId::L3Group => ModuleKind::L3Group,
            ModuleId::CacheEventTrace => ModuleKind::CacheEventTrace,
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleId::Cpu(lane) => write!(f, "CPU{}", lane),
            ModuleId::L2Cache(lane) => write!(f, "L2Cache{}", lane),
            ModuleId::L3Cache(lane) => write!(f, "L3Cache{}", lane),
            ModuleId::MemoryNode0 => f.write_str("MemoryNode0"),
            ModuleId::Dma => f.write_str("DMA"),
            ModuleId::BusNode => f.write_str("BusNode"),
            ModuleId::Bus => f.write_str("Bus"),
            ModuleId::L3Group => f.write_str("L3Group"),
            ModuleId::CacheEventTrace => f.write_str("cache_event_trace"),
        }
    }
}

impl FromStr for ModuleId {
    type Err = ModuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ModuleIdError::Unknown {
            name: s.to_string(),
        };

        let lane = |suffix: &str| -> Result<u8, ModuleIdError> {
            // Reject "+1", "01" and friends so every id has exactly one spelling
            if suffix.len() != 1 {
                return Err(unknown());
            }
            match suffix.parse::<u8>() {
                Ok(lane) if lane < CORE_COUNT => Ok(lane),
                _ => Err(unknown()),
            }
        };

        match s {
            "MemoryNode0" => Ok(ModuleId::MemoryNode0),
            "DMA" => Ok(ModuleId::Dma),
            "BusNode" => Ok(ModuleId::BusNode),
            "Bus" => Ok(ModuleId::Bus),
            "L3Group" => Ok(ModuleId::L3Group),
            "cache_event_trace" => Ok(ModuleId::CacheEventTrace),
            _ => {
                if let Some(rest) = s.strip_prefix("CPU") {
                    lane(rest).map(ModuleId::Cpu)
                } else if let Some(rest) = s.strip_prefix("L2Cache") {
                    lane(rest).map(ModuleId::L2Cache)
                } else if let Some(rest) = s.strip_prefix("L3Cache") {
                    lane(rest).map(ModuleId::L3Cache)
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl Serialize for ModuleId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_round_trips_through_its_name() {
        for id in ModuleId::all() {
            let parsed: ModuleId = id.name().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_all_is_unique_and_complete() {
        let ids = ModuleId::all();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert_eq!(ids.len(), 18);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(ModuleId::Cpu(0).to_string(), "CPU0");
        assert_eq!(ModuleId::L2Cache(3).to_string(), "L2Cache3");
        assert_eq!(ModuleId::Dma.to_string(), "DMA");
        assert_eq!(ModuleId::CacheEventTrace.to_string(), "cache_event_trace");
    }

    #[test]
    fn test_rejects_out_of_range_and_unknown_names() {
        assert!("CPU4".parse::<ModuleId>().is_err());
        assert!("CPU01".parse::<ModuleId>().is_err());
        assert!("L3Cache".parse::<ModuleId>().is_err());
        assert!("cpu0".parse::<ModuleId>().is_err());
        assert_eq!(
            "GPU0".parse::<ModuleId>(),
            Err(ModuleIdError::Unknown {
                name: "GPU0".to_string()
            })
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ModuleId::Cpu(2).kind(), ModuleKind::Cpu);
        assert_eq!(ModuleId::MemoryNode0.kind(), ModuleKind::Memory);
        assert_eq!(ModuleId::CacheEventTrace.kind(), ModuleKind::CacheEventTrace);
    }
}
