use anyhow::Result;
use clap::Parser;
use prettytable::{cell, row, Table};
use std::path::PathBuf;
use waymo2tfod::inspect_file;

#[derive(Debug, Clone, Parser)]
/// Print object statistics of a converted record file
struct Args {
    /// converted tf record
    pub file: PathBuf,
}

fn main() -> Result<()> {
    let Args { file } = Args::parse();
    let summary = inspect_file(&file)?;

    let mut table = Table::new();
    table.add_row(row!["class", "objects"]);
    summary.class_counts.iter().for_each(|(class, count)| {
        table.add_row(row![class, count]);
    });
    table.add_row(row!["total", summary.num_objects]);

    println!("{}: {} records", file.display(), summary.num_records);
    table.printstd();

    Ok(())
}
