// src/output.rs
use crate::streams::ConsumptionReport;
use std::fs::File;
use std::io::{self, Write};

pub fn write_consumption_to_csv(filename: &str, rounds: &[ConsumptionReport]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "round,stream,num_elems")?;
    for (round, report) in rounds.iter().enumerate() {
        for (stream, n) in report.counts().iter().enumerate() {
            writeln!(file, "{},{},{}", round, stream, n)?;
        }
    }
    Ok(())
}

/// Key/value run summary, one pair per row under a `key,value` header
pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "key,value")?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
