use hwviz::application::{InfoStore, LoadStatus};
use hwviz::domain::topology::{ModuleId, TopologyLayout};
use hwviz::infrastructure::{FilePerfDataSource, InMemoryPerfData};
use std::io::Write;

fn load(text: &str) -> InfoStore {
    InfoStore::load(&InMemoryPerfData::new(text))
}

#[test]
fn test_describe_only_reports_own_metrics() {
    let store = load("[A]\nalpha = 1\nbeta = 2\n\n[B]\ngamma = 3\ndelta = 4\n");
    let text = store.describe_text("A");

    assert!(text.contains("alpha: 1"));
    assert!(text.contains("beta: 2"));
    assert!(!text.contains("gamma"));
    assert!(!text.contains("delta"));
}

#[test]
fn test_pair_before_any_header_is_ignored() {
    let store = load("key=value\n");
    assert!(store.catalog().is_empty());
    assert_eq!(store.summary().ignored_lines(), 1);
}

#[test]
fn test_duplicate_key_overwrites() {
    let store = load("[A]\nx=1\nx=2");
    let text = store.describe_text("A");
    assert!(text.contains("x: 2"));
    assert!(!text.contains("x: 1"));
}

#[test]
fn test_unknown_module_names_the_query() {
    let store = load("[A]\nx=1\n");
    let text = store.describe_text("QuantumCoprocessor");
    assert!(text.contains("QuantumCoprocessor"));
    assert!(text.contains("Unknown module"));
}

#[test]
fn test_cpu0_static_sentence_without_catalog_entry() {
    let store = load("[CPU1]\nipc = 1.4\n");
    assert_eq!(
        store.describe_text("CPU0"),
        "CPU0 details: 2.5 GHz clock, 4 cores, task-scheduling hub."
    );
}

#[test]
fn test_unopenable_file_falls_back_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let store = InfoStore::load(&FilePerfDataSource::new(dir.path().join("missing.txt")));

    assert!(matches!(store.summary().status, LoadStatus::Unavailable(_)));
    for id in ModuleId::all() {
        let report = store.describe_module(id);
        assert!(!report.has_metrics());
        assert!(!report.to_string().is_empty());
    }
    assert_eq!(store.describe_text("Nope"), "Unknown module: Nope");
}

#[test]
fn test_no_drawn_component_reports_unknown_without_data() {
    let store = load("");
    let layout = TopologyLayout::standard();
    let trace = layout.shape_of(ModuleId::CacheEventTrace).unwrap();
    let hit = layout.hit_test(trace.bounds.center()).unwrap();
    assert_eq!(hit, ModuleId::CacheEventTrace);
    for id in ModuleId::all() {
        assert!(
            !store.describe_module(id).to_string().contains("Unknown module"),
            "{}",
            id
        );
    }
}

#[test]
fn test_directory_instead_of_file_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = InfoStore::load(&FilePerfDataSource::new(dir.path()));
    assert!(store.catalog().is_empty());
    assert_ne!(store.summary().status, LoadStatus::Loaded);
}

#[test]
fn test_metrics_keep_file_order() {
    let store = load("[CPU2]\nzeta = 1\nalpha = 2\nmid = 3\nalpha = 9\n");
    assert_eq!(
        store.describe_text("CPU2"),
        "===== CPU2 Performance Data =====\n\n\
         Central processing unit performance data\n\n\
         zeta: 1\n\
         alpha: 9\n\
         mid: 3\n"
    );
}

#[test]
fn test_load_from_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "# rig 3\n[MemoryNode0]\ncapacity = 8 GB\ntype = DDR4\n\n[DMA]\nchannels = 8\n"
    )
    .unwrap();

    let store = InfoStore::load(&FilePerfDataSource::new(file.path()));
    assert_eq!(store.summary().status, LoadStatus::Loaded);
    assert_eq!(
        store.describe_module(ModuleId::MemoryNode0).to_string(),
        "===== MemoryNode0 Performance Data =====\n\n\
         Main memory performance data\n\n\
         capacity: 8 GB\n\
         type: DDR4\n"
    );
    assert!(
        store
            .describe_module(ModuleId::Dma)
            .to_string()
            .contains("DMA controller performance data")
    );
}

#[test]
fn test_clicking_each_shape_describes_its_module() {
    let store = load("[L2Cache3]\nhit_rate = 90%\n");
    let layout = TopologyLayout::standard();

    let l2 = layout.shape_of(ModuleId::L2Cache(3)).unwrap();
    let hit = layout.hit_test(l2.bounds.center()).unwrap();
    assert!(store.describe_module(hit).to_string().contains("hit_rate: 90%"));

    let node = layout.shape_of(ModuleId::BusNode).unwrap();
    let hit = layout.hit_test(node.bounds.center()).unwrap();
    assert_eq!(
        store.describe_module(hit).to_string(),
        "Bus node: core interconnect, each node serves several ports."
    );
}

#[test]
fn test_shipped_sample_data_parses_cleanly() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("HardwareVisualizer")
        .join("perfdata.txt");
    let store = InfoStore::load(&FilePerfDataSource::new(path));
    assert_eq!(store.summary().status, LoadStatus::Loaded);
    assert_eq!(store.summary().ignored_lines(), 0);
    for name in store.module_names() {
        assert!(name.parse::<ModuleId>().is_ok(), "{} is not drawn", name);
    }
}
