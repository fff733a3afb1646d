//! Command batches fed to diskpart through `/s <file>`.

use std::fmt;

/// An ordered batch of diskpart commands, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    commands: Vec<String>,
}

impl Script {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn list_disks() -> Self {
        Self::new(["list disk"])
    }

    pub fn list_partitions(disk: u32) -> Self {
        Self::new([format!("select disk {disk}"), "list partition".to_string()])
    }

    pub fn detail_partition(disk: u32, partition: u32) -> Self {
        Self::new([
            format!("select disk {disk}"),
            format!("select partition {partition}"),
            "detail partition".to_string(),
        ])
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// File contents: commands joined by newlines, no trailing newline.
    pub fn render(&self) -> String {
        self.commands.join("\n")
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.commands().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_disks_is_a_single_command() {
        assert_eq!(Script::list_disks().render(), "list disk");
    }

    #[test]
    fn partition_listing_selects_the_disk_first() {
        assert_eq!(
            Script::list_partitions(2).render(),
            "select disk 2\nlist partition"
        );
    }

    #[test]
    fn detail_selects_disk_then_partition() {
        let script = Script::detail_partition(1, 3);
        assert_eq!(
            script.commands(),
            ["select disk 1", "select partition 3", "detail partition"]
        );
        assert!(!script.render().ends_with('\n'));
        assert_eq!(
            script.to_string(),
            "select disk 1; select partition 3; detail partition"
        );
    }
}
