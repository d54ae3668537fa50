// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Result bookkeeping and the session banner and summary.

use std::{fmt::Display, time::Duration};

use super::{runner::EndpointTestResult, scenario::BinanceTestConfig};
use crate::common::consts::BINANCE_SPOT_WS_API_TESTNET_URL;

const RULE: &str = "================================================================================";

/// Outcome of one check, as counted by [`TestSuite`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed,
    Skipped,
}

/// Overall verdict of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SuiteStatus {
    AllPassing,
    MostlyPassing,
    NeedsAttention,
}

impl Display for SuiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllPassing => write!(f, "ALL TESTS PASSING"),
            Self::MostlyPassing => write!(f, "MOSTLY PASSING"),
            Self::NeedsAttention => write!(f, "NEEDS ATTENTION"),
        }
    }
}

/// Endpoint check record with the typed value dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedResult {
    pub test_name: String,
    pub success: bool,
    pub duration: Duration,
    pub error: Option<String>,
}

/// Collects outcomes of a run.
#[derive(Clone, Debug, Default)]
pub struct TestSuite {
    results: Vec<RecordedResult>,
    collected: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
}

impl TestSuite {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of checks planned for the run.
    pub fn set_collected(&mut self, collected: usize) {
        self.collected = collected;
    }

    /// Records an endpoint check and counts it as passed or failed.
    pub fn record<T>(&mut self, result: &EndpointTestResult<T>) {
        self.results.push(RecordedResult {
            test_name: result.test_name.clone(),
            success: result.success,
            duration: result.duration,
            error: result.error.clone(),
        });
        self.record_outcome(if result.success {
            TestOutcome::Passed
        } else {
            TestOutcome::Failed
        });
    }

    pub fn record_outcome(&mut self, outcome: TestOutcome) {
        match outcome {
            TestOutcome::Passed => self.passed += 1,
            TestOutcome::Failed => self.failed += 1,
            TestOutcome::Skipped => self.skipped += 1,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[RecordedResult] {
        &self.results
    }

    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub const fn total_run(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// `(1 - failed / total) * 100`, or 0 when nothing ran.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        match self.total_run() {
            0 => 0.0,
            total => (1.0 - self.failed as f64 / total as f64) * 100.0,
        }
    }

    /// `passed / total * 100`, or 0 when nothing ran.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        match self.total_run() {
            0 => 0.0,
            total => self.passed as f64 / total as f64 * 100.0,
        }
    }

    #[must_use]
    pub fn status(&self) -> SuiteStatus {
        if self.failed == 0 {
            SuiteStatus::AllPassing
        } else if self.pass_rate() >= 90.0 {
            SuiteStatus::MostlyPassing
        } else {
            SuiteStatus::NeedsAttention
        }
    }

    /// Renders the end-of-run summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = vec![
            RULE.to_string(),
            "TEST SESSION SUMMARY".to_string(),
            RULE.to_string(),
        ];

        if self.total_run() > 0 {
            lines.extend([
                "Test Results:".to_string(),
                format!("  Total Collected: {}", self.collected),
                format!("  Tests Run: {}", self.total_run()),
                format!("  Passed: {}", self.passed),
                format!("  Failed: {}", self.failed),
                format!("  Skipped: {}", self.skipped),
                "Pass Rate Metrics:".to_string(),
                format!("  Pass Rate (1 - Failed Rate): {:.1}%", self.pass_rate()),
                format!("  Success Rate (Passed/Run): {:.1}%", self.success_rate()),
                format!("  Status: {}", self.status()),
            ]);
        }

        lines.extend(self.results.iter().filter(|r| !r.success).map(|failure| {
            format!(
                "  FAILED {}: {}",
                failure.test_name,
                failure.error.as_deref().unwrap_or("unknown error")
            )
        }));

        lines.push(RULE.to_string());
        lines.join("\n")
    }

    /// Logs the summary line by line.
    pub fn log_summary(&self) {
        for line in self.summary().lines() {
            tracing::info!("{line}");
        }
    }
}

/// Renders the start-of-run banner listing the available scenarios.
#[must_use]
pub fn session_banner(configs: &[BinanceTestConfig]) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "BINANCE SPOT WEBSOCKET API - INTEGRATION TESTS".to_string(),
        RULE.to_string(),
        format!("Server: Binance Testnet ({BINANCE_SPOT_WS_API_TESTNET_URL})"),
        "Safe for testing - no real money at risk".to_string(),
        RULE.to_string(),
        format!("Available Test Configurations: {}", configs.len()),
    ];
    lines.extend(
        configs
            .iter()
            .map(|config| format!("  - {}: {}", config.name, config.description)),
    );
    lines.extend(
        [
            "Run tests with:",
            "  cargo test -p binance-spot-ws",
            "  cargo test -p binance-spot-ws -- --ignored",
            "  cargo run -p binance-spot-ws --bin binance-ws-smoke",
            RULE,
        ]
        .map(str::to_string),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::*;

    fn suite_with(passed: usize, failed: usize, skipped: usize) -> TestSuite {
        let mut suite = TestSuite::new();
        for _ in 0..passed {
            suite.record_outcome(TestOutcome::Passed);
        }
        for _ in 0..failed {
            suite.record_outcome(TestOutcome::Failed);
        }
        for _ in 0..skipped {
            suite.record_outcome(TestOutcome::Skipped);
        }
        suite
    }

    #[rstest]
    fn test_empty_suite_rates_are_zero() {
        let suite = TestSuite::new();
        assert_eq!(suite.total_run(), 0);
        assert_eq!(suite.pass_rate(), 0.0);
        assert_eq!(suite.success_rate(), 0.0);
        assert!(!suite.summary().contains("Pass Rate"));
    }

    #[rstest]
    #[case(10, 0, 0, SuiteStatus::AllPassing)]
    #[case(5, 0, 5, SuiteStatus::AllPassing)]
    #[case(18, 1, 1, SuiteStatus::MostlyPassing)]
    #[case(9, 1, 0, SuiteStatus::MostlyPassing)]
    #[case(8, 2, 0, SuiteStatus::NeedsAttention)]
    fn test_status_labels(
        #[case] passed: usize,
        #[case] failed: usize,
        #[case] skipped: usize,
        #[case] expected: SuiteStatus,
    ) {
        assert_eq!(suite_with(passed, failed, skipped).status(), expected);
    }

    #[rstest]
    fn test_rates_count_skipped_as_run() {
        let suite = suite_with(6, 1, 3);
        assert_eq!(suite.total_run(), 10);
        assert!((suite.pass_rate() - 90.0).abs() < 1e-9);
        assert!((suite.success_rate() - 60.0).abs() < 1e-9);
    }

    #[rstest]
    fn test_record_keeps_failures_in_summary() {
        let mut suite = TestSuite::new();
        suite.set_collected(2);
        suite.record(&EndpointTestResult::<()> {
            test_name: "ping".to_string(),
            success: true,
            duration: Duration::from_millis(5),
            result: Some(()),
            error: None,
        });
        suite.record(&EndpointTestResult::<()> {
            test_name: "depth".to_string(),
            success: false,
            duration: Duration::from_millis(5),
            result: None,
            error: Some("Invalid symbol.".to_string()),
        });

        assert_eq!(suite.results().len(), 2);
        let summary = suite.summary();
        assert!(summary.contains("Total Collected: 2"));
        assert!(summary.contains("Pass Rate (1 - Failed Rate): 50.0%"));
        assert!(summary.contains("Status: NEEDS ATTENTION"));
        assert!(summary.contains("FAILED depth: Invalid symbol."));
        assert!(!summary.contains("FAILED ping"));
    }

    #[rstest]
    fn test_session_banner_lists_configs() {
        let banner = session_banner(&[BinanceTestConfig::public()]);
        assert!(banner.contains("Available Test Configurations: 1"));
        assert!(banner.contains(
            "  - Public-NoAuth: Test public endpoints that don't require authentication"
        ));
        assert!(banner.contains(BINANCE_SPOT_WS_API_TESTNET_URL));
    }

    #[rstest]
    fn test_rendered_blocks_are_framed_by_rules() {
        let summary = TestSuite::new().summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines, vec![RULE, "TEST SESSION SUMMARY", RULE, RULE]);

        let banner = session_banner(&[]);
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.first(), Some(&RULE));
        assert_eq!(lines.last(), Some(&RULE));
        assert_eq!(lines[6], "Available Test Configurations: 0");
        assert_eq!(lines[7], "Run tests with:");
        assert!(!banner.ends_with('\n'));
    }

    #[rstest]
    #[traced_test]
    fn test_log_summary_emits_status() {
        suite_with(3, 0, 0).log_summary();
        assert!(logs_contain("Status: ALL TESTS PASSING"));
    }
}
