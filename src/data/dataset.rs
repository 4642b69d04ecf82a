use burn::data::dataset::Dataset;

use crate::domain::record::CensusRecord;

/// In-memory census rows exposed through burn's Dataset trait so the
/// scorer can drive them through a DataLoader.
pub struct CensusDataset {
    records: Vec<CensusRecord>,
}

impl CensusDataset {
    pub fn new(records: Vec<CensusRecord>) -> Self { Self { records } }
}

impl Dataset<CensusRecord> for CensusDataset {
    fn get(&self, index: usize) -> Option<CensusRecord> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let mut r = CensusRecord::default();
        r.age = 31.0;
        let ds = CensusDataset::new(vec![CensusRecord::default(), r]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).map(|r| r.age), Some(31.0));
        assert!(ds.get(2).is_none());
    }
}
