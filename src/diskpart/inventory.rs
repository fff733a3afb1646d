use super::error::DiskpartError;
use super::parsing::{parse_disks, parse_partition_attributes, parse_partitions};
use super::runner::{DiskpartRunner, ScriptRunner};
use super::script::Script;
use super::{Disk, DiskInventory, Partition, PartitionAttributes};
use crate::ui::prelude::*;

/// [`DiskInventory`] that scrapes diskpart reports.
pub struct DiskpartInventory<R = DiskpartRunner> {
    runner: R,
    excluded_disks: Vec<u32>,
}

impl<R: ScriptRunner> DiskpartInventory<R> {
    pub fn new(runner: R, excluded_disks: Vec<u32>) -> Self {
        Self {
            runner,
            excluded_disks,
        }
    }

    /// Runs `script` and returns stdout, or `None` after logging a failure.
    fn query(&self, script: &Script, code: &str, context: &str) -> Option<String> {
        let result = self.runner.run(script).and_then(|output| {
            emit(
                Level::Debug,
                "diskpart.exit",
                &format!("`{}` exited with {:?}", script, output.exit_code),
                None,
            );
            match DiskpartError::from_stderr(&output.stderr) {
                Some(err) => Err(err),
                None => Ok(output.stdout),
            }
        });

        match result {
            Ok(stdout) => Some(stdout),
            Err(e) => {
                emit(Level::Error, code, &format!("{}: {}", context, e), None);
                None
            }
        }
    }
}

impl<R: ScriptRunner> DiskInventory for DiskpartInventory<R> {
    fn disks(&self) -> Vec<Disk> {
        self.query(
            &Script::list_disks(),
            "diskpart.list_disks.failed",
            "Error listing disks",
        )
        .map(|out| parse_disks(&out, &self.excluded_disks))
        .unwrap_or_default()
    }

    fn partitions(&self, disk: u32) -> Vec<Partition> {
        self.query(
            &Script::list_partitions(disk),
            "diskpart.list_partitions.failed",
            &format!("Error selecting disk {}", disk),
        )
        .map(|out| parse_partitions(&out))
        .unwrap_or_default()
    }

    fn partition_attributes(&self, disk: u32, partition: u32) -> PartitionAttributes {
        self.query(
            &Script::detail_partition(disk, partition),
            "diskpart.detail_partition.failed",
            &format!("Error selecting partition {} on disk {}", partition, disk),
        )
        .map(|out| parse_partition_attributes(&out))
        .unwrap_or_default()
    }
}
