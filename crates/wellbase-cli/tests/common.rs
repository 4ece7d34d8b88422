//! Shared fixture for the CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use wellbase_testing::DataTree;
use wellbase_testing::samples::{
    DRILLING_CSV, POLYGON_CSV, PRODUCTION_CSV, RESERVES_CSV, SAMPLE_LAS, SEISMIC_CSV, TEST_CSV,
};

pub struct TestFixture {
    tree: DataTree,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Data directory laid out with the default root names.
    pub fn new() -> Self {
        let tree = DataTree::new()
            .file("forTreeView/heletz/north/W1-test.csv", TEST_CSV)
            .file("forTreeView/heletz/north/W1-production.csv", PRODUCTION_CSV)
            .file("forTreeView/heletz/north/W1-drilling.csv", DRILLING_CSV)
            .file("forTreeView/heletz/south/W2-production.csv", PRODUCTION_CSV)
            .file("forTreeView/heletz/south/W2-injection.csv", PRODUCTION_CSV)
            .file("csvFiles/2021/monthly_report.csv", PRODUCTION_CSV)
            .file("data/polygons/heletz.csv", POLYGON_CSV)
            .file("data/reserves/reserves.csv", RESERVES_CSV)
            .file("data/seismic/seismic_status.csv", SEISMIC_CSV)
            .file("data/las_docs/W1.las", SAMPLE_LAS);
        Self { tree }
    }

    pub fn tree(&self) -> &DataTree {
        &self.tree
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("wellbase");
        cmd.env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.tree.root());
        cmd
    }

    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(["--format", "json"])
            .args(args)
            .output()
            .expect("Failed to run wellbase");
        assert!(
            output.status.success(),
            "wellbase {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not JSON")
    }
}
