//! Regex scraping of diskpart's report text.
//!
//! The report layout depends on the diskpart version, so every parser here
//! is best effort: lines that do not match are ignored.

use super::{Disk, Partition, PartitionAttributes};
use regex::Regex;
use std::sync::LazyLock;

/// Partition-style token diskpart prints for GPT disks.
pub const GPT_MARKER: &str = "Gpt";

static DISK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(\d+)\s+(\d+)\s+(\d+)\s+(\w+)").expect("disk line pattern")
});

static PARTITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(\d+)\s+(\w+)\s+(\d+)").expect("partition line pattern")
});

static TYPE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Type\s+:\s+(.+)").expect("type field pattern"));

static LABEL_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Volume\s+Label\s+:\s+(.+)").expect("label field pattern"));

/// Parses `list disk` output, skipping any disk number in `excluded`.
pub fn parse_disks(output: &str, excluded: &[u32]) -> Vec<Disk> {
    let mut disks = Vec::new();
    for caps in DISK_LINE.captures_iter(output) {
        let Ok(number) = caps[1].parse::<u32>() else {
            continue;
        };
        if excluded.contains(&number) {
            continue;
        }
        disks.push(Disk {
            number,
            size: caps[2].to_string(),
            free: caps[3].to_string(),
            gpt: &caps[4] == GPT_MARKER,
        });
    }
    disks
}

/// Parses `list partition` output.
pub fn parse_partitions(output: &str) -> Vec<Partition> {
    PARTITION_LINE
        .captures_iter(output)
        .filter_map(|caps| {
            let number = caps[1].parse::<u32>().ok()?;
            Some(Partition {
                number,
                kind: caps[2].to_string(),
                size: caps[3].to_string(),
            })
        })
        .collect()
}

/// Parses `detail partition` output. Only the first match of each field counts.
pub fn parse_partition_attributes(output: &str) -> PartitionAttributes {
    PartitionAttributes {
        kind: first_capture(&TYPE_FIELD, output),
        label: first_capture(&LABEL_FIELD, output),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| caps[1].trim().to_string())
}
