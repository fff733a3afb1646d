mod config;
mod diskpart;
mod menu;
mod privileges;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::diskpart::{DiskInventory, DiskpartInventory, DiskpartRunner};
use crate::ui::prelude::*;

/// Terminal menu for inspecting disks through diskpart
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show the commands sent to the utility and its exit codes
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format for listing commands
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Partitioning utility to run instead of the configured one
    #[arg(long, global = true)]
    utility: Option<PathBuf>,

    /// Do not restart with administrator rights when running unelevated
    #[arg(long, global = true)]
    no_elevate: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List disks
    Disks,
    /// List the partitions of a disk
    Partitions {
        /// Disk number as shown by `disks`
        disk: u32,
    },
    /// Show type and volume label of a partition
    Detail {
        /// Disk number as shown by `disks`
        disk: u32,
        /// Partition number as shown by `partitions`
        partition: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(e) = run(cli) {
        emit(Level::Error, "diskmenu.error", &format!("Error: {:#}", e), None);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    emit(
        Level::Debug,
        "config.path",
        &format!("Using config {}", path.display()),
        None,
    );
    let mut config = Config::load_from(&path)?;
    if let Some(utility) = &cli.utility {
        config.utility = utility.clone();
    }
    if cli.no_elevate {
        config.elevate = false;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    if config.elevate {
        privileges::ensure_elevated()?;
    }

    let runner = DiskpartRunner::new(config.utility).with_script_dir(config.script_dir);
    let inventory = DiskpartInventory::new(runner, config.excluded_disks);

    match cli.command {
        None => menu::run(&inventory),
        Some(Commands::Disks) => {
            print_disks(&inventory);
            Ok(())
        }
        Some(Commands::Partitions { disk }) => {
            print_partitions(&inventory, disk);
            Ok(())
        }
        Some(Commands::Detail { disk, partition }) => {
            print_detail(&inventory, disk, partition);
            Ok(())
        }
    }
}

fn print_disks(inventory: &dyn DiskInventory) {
    let disks = inventory.disks();

    if get_output_format() == OutputFormat::Json {
        let data = serde_json::to_value(&disks).ok();
        emit(
            Level::Info,
            "disks.list",
            &format!("{} disks found", disks.len()),
            data,
        );
        return;
    }

    if disks.is_empty() {
        emit(Level::Warn, "disks.empty", "No drives!", None);
        return;
    }

    println!(
        "{: <8} {: <10} {: <10} {}",
        "Disk".bold(),
        "Size".bold(),
        "Free".bold(),
        "Style".bold()
    );
    println!("{}", "-".repeat(40));
    for disk in &disks {
        println!(
            "{: <8} {: <10} {: <10} {}",
            disk.number.to_string().cyan(),
            disk.size,
            disk.free,
            disk.style()
        );
    }
    emit(
        Level::Success,
        "disks.list",
        &format!("Found {} disks", disks.len()),
        None,
    );
}

fn print_partitions(inventory: &dyn DiskInventory, disk: u32) {
    let partitions = inventory.partitions(disk);

    if get_output_format() == OutputFormat::Json {
        let data = serde_json::to_value(&partitions).ok();
        emit(
            Level::Info,
            "partitions.list",
            &format!("{} partitions found on disk {}", partitions.len(), disk),
            data,
        );
        return;
    }

    if partitions.is_empty() {
        emit(
            Level::Warn,
            "partitions.empty",
            &format!("No partitions on disk {}", disk),
            None,
        );
        return;
    }

    println!(
        "{: <10} {: <16} {}",
        "Partition".bold(),
        "Type".bold(),
        "Size".bold()
    );
    println!("{}", "-".repeat(40));
    for partition in &partitions {
        println!(
            "{: <10} {: <16} {}",
            partition.number.to_string().cyan(),
            partition.kind,
            partition.size
        );
    }
    emit(
        Level::Success,
        "partitions.list",
        &format!("Found {} partitions on disk {}", partitions.len(), disk),
        None,
    );
}

fn print_detail(inventory: &dyn DiskInventory, disk: u32, partition: u32) {
    let attrs = inventory.partition_attributes(disk, partition);

    if get_output_format() == OutputFormat::Json {
        let data = serde_json::to_value(&attrs).ok();
        emit(
            Level::Info,
            "partition.detail",
            &format!("Partition {} on disk {}", partition, disk),
            data,
        );
        return;
    }

    if attrs.is_empty() {
        emit(
            Level::Warn,
            "partition.detail.empty",
            &format!("No details for partition {} on disk {}", partition, disk),
            None,
        );
        return;
    }

    if let Some(kind) = &attrs.kind {
        println!("{: <8} {}", "Type:".bold(), kind);
    }
    if let Some(label) = &attrs.label {
        println!("{: <8} {}", "Label:".bold(), label);
    }
}
