use serde::Serialize;

use crate::aggregate::{self, Partition};
use crate::error::ReportError;
use crate::types::{ConfigRecord, Metric};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standout {
    pub repository: String,
    pub series: String,
    pub value: f64,
}

/// Headline numbers for the text panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_tokens_millions: f64,
    pub total_tests: u64,
    pub avg_coverage: f64,
    pub avg_pass_rate: f64,
    pub refine_coverage: f64,
    pub base_coverage: f64,
    /// `refine_coverage - base_coverage`, signed.
    pub coverage_delta: f64,
    pub highest_coverage: Standout,
    /// Lowest tokens per test.
    pub most_efficient: Standout,
}

pub fn summarize(records: &[ConfigRecord]) -> Result<Summary, ReportError> {
    let Some(first) = records.first() else {
        return Err(ReportError::EmptyPartition {
            key: "benchmarks",
            value: "*".into(),
        });
    };

    let n = records.len() as f64;
    let total_tokens: u64 = records.iter().map(|r| r.tokens).sum();
    let total_tests: u64 = records.iter().map(|r| r.tests_added).sum();

    // Ties keep the first record seen.
    let mut best = first;
    for r in records {
        if r.coverage > best.coverage {
            best = r;
        }
    }

    let mut cheapest = first;
    let mut cheapest_ratio = first.tokens_per_test()?;
    for r in &records[1..] {
        let ratio = r.tokens_per_test()?;
        if ratio < cheapest_ratio {
            cheapest = r;
            cheapest_ratio = ratio;
        }
    }

    let refine_coverage = aggregate::mean_by(records, Partition::Strategy, "refine", Metric::Coverage)?;
    let base_coverage = aggregate::mean_by(records, Partition::Strategy, "base", Metric::Coverage)?;

    Ok(Summary {
        total_tokens_millions: total_tokens as f64 / 1_000_000.0,
        total_tests,
        avg_coverage: records.iter().map(|r| r.coverage).sum::<f64>() / n,
        avg_pass_rate: records.iter().map(|r| r.pass_rate).sum::<f64>() / n,
        refine_coverage,
        base_coverage,
        coverage_delta: refine_coverage - base_coverage,
        highest_coverage: Standout {
            repository: best.repository.clone(),
            series: best.series_key(),
            value: best.coverage,
        },
        most_efficient: Standout {
            repository: cheapest.repository.clone(),
            series: cheapest.series_key(),
            value: cheapest_ratio,
        },
    })
}

impl Summary {
    /// Text block drawn inside the summary box, one entry per line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            "SUMMARY STATISTICS".into(),
            String::new(),
            format!("Total Tokens Used: {:.1}M", self.total_tokens_millions),
            format!("Total Tests Added: {}", thousands(self.total_tests)),
            String::new(),
            format!("Average Coverage: {:.1}%", self.avg_coverage),
            format!("Average Pass Rate: {:.1}%", self.avg_pass_rate),
            String::new(),
            "Strategy Comparison:".into(),
            format!("Refine Avg Coverage: {:.1}%", self.refine_coverage),
            format!("Base Avg Coverage: {:.1}%", self.base_coverage),
            format!("Difference: {:+.1}%", self.coverage_delta),
            String::new(),
            "Best Performers:".into(),
            format!(
                "Highest Coverage: {} ({}%)",
                self.highest_coverage.repository, self.highest_coverage.value
            ),
            format!(
                "Most Efficient: {} {} ({:.0} tokens/test)",
                self.most_efficient.repository, self.most_efficient.series, self.most_efficient.value
            ),
        ]
    }
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
