use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::measurement::Measurement;

pub const HEADER: [&str; 2] = ["timestamp", "air_quality"];

#[derive(Debug)]
pub struct CsvLog {
    writer: csv::Writer<File>,
}

impl CsvLog {
    /// Opens `path` for appending. The header is written only when the file is created.
    pub fn open(path: &Path) -> Result<Self, csv::Error> {
        let exists = path.try_exists()?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if !exists {
            log::info!("Creating {}", path.display());
            writer.write_record(HEADER)?;
        }

        Ok(Self { writer })
    }

    pub fn append(&mut self, data: &Measurement) -> Result<(), csv::Error> {
        self.writer.serialize(data)
    }

    pub fn flush(&mut self) -> Result<(), csv::Error> {
        self.writer.flush()?;
        Ok(())
    }
}
