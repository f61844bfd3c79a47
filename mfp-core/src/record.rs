//! Per-episode diagnostics of evaluators.
//!
//! Every call to [`Evaluator::run_episode`] returns a [`Record`] describing the
//! episode, e.g. its return and length. [`Evaluator::evaluate_with_recorder`]
//! forwards these records to a [`Recorder`]:
//!
//! * [`NullRecorder`] discards them,
//! * [`BufferedRecorder`] keeps them in memory,
//! * [`RecordStorage`] aggregates scalar values into mean, min and max.
//!
//! ```rust
//! use mfp_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("episode_return", 1.9);
//! record.insert("episode_length", RecordValue::Scalar(2.0));
//! assert_eq!(record.get_scalar("episode_length").unwrap(), 2.0);
//! ```
//!
//! [`Evaluator::run_episode`]: crate::Evaluator::run_episode
//! [`Evaluator::evaluate_with_recorder`]: crate::Evaluator::evaluate_with_recorder
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
