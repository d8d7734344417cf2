use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

///
/// A (start, end) coordinate pair on a single chromosome. The chromosome itself is
/// contextual: every region in a run lives on the chromosome of the capture locus.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Deserialize)]
pub struct GenomicRegion {
    pub start: u64,
    pub end: u64,
}

impl GenomicRegion {
    pub fn new(start: u64, end: u64) -> Self {
        GenomicRegion { start, end }
    }

    pub fn width(&self) -> u64 {
        self.end - self.start
    }

    /// Coordinate midpoint, rounded down.
    pub fn midpoint(&self) -> u64 {
        self.start + self.width() / 2
    }
}

impl Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region: {}-{}", self.start, self.end)
    }
}

///
/// Named regions of interest, read from a headerless tsv file with one
/// `name <tab> start <tab> end` row per region.
///
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: HashMap<String, GenomicRegion>,
}

#[derive(Deserialize)]
struct RegionRow {
    name: String,
    start: u64,
    end: u64,
}

impl RegionTable {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open regions file: {:?}", path))?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_reader(file);

        let mut regions: HashMap<String, GenomicRegion> = HashMap::new();
        for (index, record) in reader.deserialize().enumerate() {
            let row: RegionRow = record.with_context(|| {
                format!("Failed to parse region row {} in {:?}", index + 1, path)
            })?;
            regions.insert(row.name, GenomicRegion::new(row.start, row.end));
        }

        Ok(RegionTable { regions })
    }

    pub fn get(&self, name: &str) -> Option<&GenomicRegion> {
        self.regions.get(name)
    }

    /// Lookup that fails with the region name in the message, for use where a
    /// missing region must abort the run.
    pub fn require(&self, name: &str) -> Result<&GenomicRegion> {
        self.regions
            .get(name)
            .with_context(|| format!("Region {:?} not found in the regions file", name))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_region_width_and_midpoint() {
        let region = GenomicRegion::new(2000, 4000);
        assert_eq!(region.width(), 2000);
        assert_eq!(region.midpoint(), 3000);
    }

    #[test]
    fn test_region_table_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "cap\t500\t999").unwrap();
        writeln!(tmp, "enhA\t2000\t4000").unwrap();

        let table = RegionTable::from_file(tmp.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("cap"), Some(&GenomicRegion::new(500, 999)));
        assert!(table.get("missing").is_none());
        assert!(table.require("missing").is_err());
    }
}
