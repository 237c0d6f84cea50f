use serde::{Deserialize, Serialize};

use crate::error::ReportError;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// One measured run: a model + strategy against a repository under test.
///
/// Every field is required. A record without `tokens` fails to load
/// rather than being counted as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub repository: String,
    pub model: String,
    pub strategy: String,
    pub coverage: f64,
    pub pass_rate: f64,
    pub tests_added: u64,
    pub tokens: u64,
}

impl ConfigRecord {
    /// `"{model}-{strategy}"`, the key used by the colour table.
    #[must_use]
    pub fn series_key(&self) -> String {
        format!("{}-{}", self.model, self.strategy)
    }

    #[must_use]
    pub fn tokens_millions(&self) -> f64 {
        self.tokens as f64 / TOKENS_PER_MILLION
    }

    /// Tests generated per million tokens spent. A run that reports no
    /// tokens has no defined efficiency.
    pub fn efficiency(&self) -> Result<f64, ReportError> {
        self.require_tests()?;
        if self.tokens == 0 {
            return Err(ReportError::ZeroTokens {
                repository: self.repository.clone(),
                model: self.model.clone(),
                strategy: self.strategy.clone(),
            });
        }
        Ok(self.tests_added as f64 / self.tokens_millions())
    }

    pub fn tokens_per_test(&self) -> Result<f64, ReportError> {
        self.require_tests()?;
        Ok(self.tokens as f64 / self.tests_added as f64)
    }

    fn require_tests(&self) -> Result<(), ReportError> {
        if self.tests_added == 0 {
            return Err(ReportError::ZeroTestsAdded {
                repository: self.repository.clone(),
                model: self.model.clone(),
                strategy: self.strategy.clone(),
            });
        }
        Ok(())
    }
}

/// Numeric field of a record that panels aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Coverage,
    PassRate,
    TestsAdded,
    Tokens,
}

impl Metric {
    #[must_use]
    pub fn of(self, record: &ConfigRecord) -> f64 {
        match self {
            Self::Coverage => record.coverage,
            Self::PassRate => record.pass_rate,
            Self::TestsAdded => record.tests_added as f64,
            Self::Tokens => record.tokens as f64,
        }
    }
}

#[cfg(test)]
pub(crate) fn record(
    repository: &str,
    model: &str,
    strategy: &str,
    coverage: f64,
    pass_rate: f64,
    tests_added: u64,
    tokens: u64,
) -> ConfigRecord {
    ConfigRecord {
        repository: repository.into(),
        model: model.into(),
        strategy: strategy.into(),
        coverage,
        pass_rate,
        tests_added,
        tokens,
    }
}
