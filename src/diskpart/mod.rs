//! Disk and partition enumeration backed by the `diskpart` utility.
//!
//! Callers work against [`DiskInventory`]; the runner and the report
//! parsers stay behind it so another backend can replace them.

mod error;
mod inventory;
mod parsing;
mod runner;
mod script;

use serde::Serialize;

pub use inventory::DiskpartInventory;
pub use runner::DiskpartRunner;

/// One row of `list disk`. Size and free space are kept as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disk {
    pub number: u32,
    pub size: String,
    pub free: String,
    pub gpt: bool,
}

impl Disk {
    pub fn style(&self) -> &'static str {
        if self.gpt { "GPT" } else { "MBR" }
    }
}

/// One row of `list partition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub number: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
}

/// Fields scraped from `detail partition`; absent when not reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionAttributes {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PartitionAttributes {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.label.is_none()
    }
}

/// Read-only view of the disks attached to the machine.
///
/// Every call is a fresh query. Failures are reported through the log and
/// degrade to empty results.
pub trait DiskInventory {
    fn disks(&self) -> Vec<Disk>;

    fn partitions(&self, disk: u32) -> Vec<Partition>;

    fn partition_attributes(&self, disk: u32, partition: u32) -> PartitionAttributes;
}
