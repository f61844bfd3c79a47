//! Aggregation of stored records.
use super::{AggregateRecorder, Record, RecordValue, Recorder};
use std::collections::BTreeSet;

/// Stores records and aggregates their scalar values.
///
/// On [`AggregateRecorder::flush`], every scalar key `k` becomes `k_mean`,
/// `k_min` and `k_max`; for any other value type the latest value is kept.
#[derive(Debug, Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

impl RecordStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// The number of stored records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn aggregate(&self) -> Record {
        let keys: BTreeSet<&String> = self.data.iter().flat_map(|r| r.keys()).collect();
        let mut record = Record::empty();

        for key in keys {
            let values: Vec<&RecordValue> = self.data.iter().filter_map(|r| r.get(key)).collect();
            let scalars: Vec<f32> = values
                .iter()
                .filter_map(|v| match v {
                    RecordValue::Scalar(x) => Some(*x),
                    _ => None,
                })
                .collect();

            if scalars.len() == values.len() && !scalars.is_empty() {
                let n = scalars.len() as f32;
                let min = scalars.iter().copied().fold(f32::INFINITY, f32::min);
                let max = scalars.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let mean = scalars.iter().sum::<f32>() / n;
                record.insert(format!("{}_mean", key), RecordValue::Scalar(mean));
                record.insert(format!("{}_min", key), RecordValue::Scalar(min));
                record.insert(format!("{}_max", key), RecordValue::Scalar(max));
            } else if let Some(v) = values.last() {
                record.insert(key.clone(), (*v).clone());
            }
        }

        record
    }
}

impl Recorder for RecordStorage {
    fn write(&mut self, record: Record) {
        self.store(record);
    }
}

impl AggregateRecorder for RecordStorage {
    fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    fn flush(&mut self) -> Record {
        let record = self.aggregate();
        self.data.clear();
        record
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_aggregate_scalars() {
        let mut storage = RecordStorage::new();
        for r in [1.0f32, 3.0, 2.0].iter() {
            let mut record = Record::from_scalar("episode_return", *r);
            record.insert("algorithm", RecordValue::String("TD(0)".to_string()));
            storage.store(record);
        }

        let record = storage.flush();
        assert_eq!(record.get_scalar("episode_return_mean"), Ok(2.0));
        assert_eq!(record.get_scalar("episode_return_min"), Ok(1.0));
        assert_eq!(record.get_scalar("episode_return_max"), Ok(3.0));
        assert_eq!(record.get_string("algorithm"), Ok("TD(0)".to_string()));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_flush_empty() {
        let mut storage = RecordStorage::new();
        assert!(storage.flush().is_empty());
    }
}
