//! Empirical check of the expected treap height.
//!
//! Each trial inserts `0..size` in increasing order into a fresh treap. A plain binary search
//! tree would degrade to a path of height `size - 1` on that input, while a treap stays within a
//! small multiple of `log2(size)`.

use crate::treap::TreapSet;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_derive::Serialize;
use std::cmp;
use thiserror::Error;

/// An invalid experiment configuration.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ExperimentError {
    #[error("treap size must be positive")]
    EmptyTreap,
    #[error("trial count must be positive")]
    NoTrials,
}

/// Parameters of a height experiment.
///
/// # Examples
///
/// ```
/// use random_bst::experiment::Experiment;
///
/// let experiment = Experiment {
///     size: 100,
///     trials: 10,
///     seed: Some(1),
/// };
/// let report = experiment.run().unwrap();
/// assert_eq!(report.trials, 10);
/// assert!(report.average_height < 99.0);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Experiment {
    pub size: usize,
    pub trials: usize,
    pub seed: Option<u64>,
}

impl Default for Experiment {
    fn default() -> Self {
        Experiment {
            size: 1000,
            trials: 1000,
            seed: None,
        }
    }
}

/// Summary of the heights measured by `Experiment::run`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub size: usize,
    pub trials: usize,
    pub average_height: f64,
    pub min_height: usize,
    pub max_height: usize,
}

impl Experiment {
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.size == 0 {
            return Err(ExperimentError::EmptyTreap);
        }
        if self.trials == 0 {
            return Err(ExperimentError::NoTrials);
        }
        Ok(())
    }

    /// Runs every trial and summarizes the heights. With a seed, all trials draw from one seeded
    /// generator in order, so the report is reproducible.
    pub fn run(&self) -> Result<Report, ExperimentError> {
        self.validate()?;
        let mut heights = Vec::with_capacity(self.trials);
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                for trial in 0..self.trials {
                    let height = self.trial(&mut rng);
                    debug!("trial {}: height {}", trial, height);
                    heights.push(height);
                }
            },
            None => {
                for trial in 0..self.trials {
                    let height = self.trial(StdRng::from_entropy());
                    debug!("trial {}: height {}", trial, height);
                    heights.push(height);
                }
            },
        }

        let total: usize = heights.iter().sum();
        let report = Report {
            size: self.size,
            trials: self.trials,
            average_height: total as f64 / self.trials as f64,
            min_height: heights.iter().fold(usize::max_value(), |acc, &h| cmp::min(acc, h)),
            max_height: heights.iter().fold(0, |acc, &h| cmp::max(acc, h)),
        };
        info!(
            "{} trials of {} keys: average height {:.3}",
            report.trials, report.size, report.average_height,
        );
        Ok(report)
    }

    fn trial<R: Rng>(&self, rng: R) -> usize {
        let mut treap = TreapSet::with_rng(rng);
        for key in 0..self.size {
            treap.insert(key);
        }
        treap.height()
    }
}

#[cfg(test)]
mod tests {
    use super::{Experiment, ExperimentError, Report};
    use serde_test::{assert_ser_tokens, Token};

    #[test]
    fn test_validate() {
        let mut experiment = Experiment::default();
        assert_eq!(experiment.validate(), Ok(()));

        experiment.size = 0;
        assert_eq!(experiment.run(), Err(ExperimentError::EmptyTreap));

        experiment.size = 10;
        experiment.trials = 0;
        assert_eq!(experiment.run(), Err(ExperimentError::NoTrials));
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let experiment = Experiment {
            size: 200,
            trials: 20,
            seed: Some(42),
        };
        let first = experiment.run().unwrap();
        let second = experiment.run().unwrap();
        assert_eq!(first, second);
        assert!(first.min_height <= first.max_height);
        assert!(first.min_height as f64 <= first.average_height);
        assert!(first.average_height <= first.max_height as f64);
    }

    #[test]
    fn test_single_key() {
        let experiment = Experiment {
            size: 1,
            trials: 3,
            seed: None,
        };
        let report = experiment.run().unwrap();
        assert_eq!(report.average_height, 0.0);
        assert_eq!(report.min_height, 0);
        assert_eq!(report.max_height, 0);
    }

    #[test]
    fn test_report_serialization() {
        let report = Report {
            size: 1000,
            trials: 2,
            average_height: 20.5,
            min_height: 19,
            max_height: 22,
        };
        assert_ser_tokens(
            &report,
            &[
                Token::Struct {
                    name: "Report",
                    len: 5,
                },
                Token::Str("size"),
                Token::U64(1000),
                Token::Str("trials"),
                Token::U64(2),
                Token::Str("average_height"),
                Token::F64(20.5),
                Token::Str("min_height"),
                Token::U64(19),
                Token::Str("max_height"),
                Token::U64(22),
                Token::StructEnd,
            ],
        );
    }
}
