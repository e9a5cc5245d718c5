// src/report.rs
// =============================================================================
// This module aggregates outcomes into a per-status-class report.
//
// Key functionality:
// - Classifies each status code into a 2xx/3xx/4xx/5xx bucket
// - Drains the result channel as the single, sequential consumer
// - Prints a progress line every 100 completions (and on the last one)
// - Produces the final report with elapsed wall-clock time
//
// The aggregator is deliberately single-threaded: because every outcome
// funnels through one channel into one loop, the tally needs no lock.
//
// Rust concepts:
// - Channels: Receiving values produced by other tasks
// - serde attributes: Renaming fields for JSON output
// =============================================================================

use std::time::Instant;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::dispatch::Outcome;

// How often we print a progress line (in completed outcomes)
const PROGRESS_INTERVAL: usize = 100;

// Counts of outcomes per status-code class
//
// The JSON field names are the class labels themselves, so a serialized
// tally reads {"2xx": 120, "3xx": 4, ...}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusClassTally {
    /// Codes below 300
    #[serde(rename = "2xx")]
    pub success: u64,
    /// Codes 300-399
    #[serde(rename = "3xx")]
    pub redirect: u64,
    /// Codes 400-499
    #[serde(rename = "4xx")]
    pub client_error: u64,
    /// Codes 500 and up (including our synthetic failures)
    #[serde(rename = "5xx")]
    pub server_error: u64,
}

impl StatusClassTally {
    // Counts one status code into its class bucket
    //
    // The thresholds check upper bounds only, so anything below 300
    // lands in the 2xx bucket - including the (practically unseen)
    // 1xx informational codes. That matches the tool's long-standing
    // reporting behavior, so keep the boundaries as they are.
    pub fn record(&mut self, code: u16) {
        if code < 300 {
            self.success += 1;
        } else if code < 400 {
            self.redirect += 1;
        } else if code < 500 {
            self.client_error += 1;
        } else {
            self.server_error += 1;
        }
    }

    // Total outcomes counted across all classes
    pub fn total(&self) -> u64 {
        self.success + self.redirect + self.client_error + self.server_error
    }
}

// Everything we know once the run has finished
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tally: StatusClassTally,
    /// How many outcomes were received
    pub total: usize,
    /// Wall-clock duration of the whole run
    pub elapsed_seconds: f64,
}

// Drains the result channel and builds the final report
//
// Parameters:
//   results: receiving end of the result channel
//   total: how many outcomes to expect (for the progress percentage)
//   started: when the run began (for the elapsed time)
//   show_progress: false in JSON mode, where stdout must stay clean
//
// The loop ends when the channel is closed AND drained, which the
// dispatcher guarantees happens only after all workers have finished -
// so ending the loop means every task has been accounted for.
pub async fn aggregate(
    mut results: mpsc::Receiver<Outcome>,
    total: usize,
    started: Instant,
    show_progress: bool,
) -> RunReport {
    let mut tally = StatusClassTally::default();
    let mut done = 0usize;

    while let Some(outcome) = results.recv().await {
        done += 1;
        tally.record(outcome.code);

        // Progress at 1% resolution, plus always the final outcome.
        // Which URL shows up here depends on completion order, so the
        // exact lines differ run to run - only the counts are stable
        if show_progress && (done % PROGRESS_INTERVAL == 0 || done == total) {
            let percent = done as f64 / total as f64 * 100.0;
            println!(
                "{:.2}% >>> {} / {} >>> {} {}",
                percent, done, total, outcome.code, outcome.url
            );
        }
    }

    // Every received outcome landed in exactly one bucket
    debug_assert_eq!(tally.total() as usize, done);

    RunReport {
        tally,
        total: done,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_thresholds() {
        let mut tally = StatusClassTally::default();
        for code in [200, 204, 299] {
            tally.record(code);
        }
        for code in [300, 301, 399] {
            tally.record(code);
        }
        for code in [400, 404, 499] {
            tally.record(code);
        }
        for code in [500, 503, 599] {
            tally.record(code);
        }

        assert_eq!(tally.success, 3);
        assert_eq!(tally.redirect, 3);
        assert_eq!(tally.client_error, 3);
        assert_eq!(tally.server_error, 3);
        assert_eq!(tally.total(), 12);
    }

    #[test]
    fn test_sub_200_codes_count_as_success() {
        // The first threshold is "below 300", so informational codes
        // land in the 2xx bucket. Intentional - see record()
        let mut tally = StatusClassTally::default();
        tally.record(100);
        tally.record(101);

        assert_eq!(tally.success, 2);
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn test_json_uses_class_labels_as_keys() {
        let tally = StatusClassTally {
            success: 7,
            redirect: 1,
            client_error: 2,
            server_error: 3,
        };

        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["2xx"], 7);
        assert_eq!(json["3xx"], 1);
        assert_eq!(json["4xx"], 2);
        assert_eq!(json["5xx"], 3);
    }

    #[tokio::test]
    async fn test_aggregate_counts_every_outcome() {
        let (tx, rx) = mpsc::channel(8);

        let feeder = tokio::spawn(async move {
            for code in [200, 301, 404, 500, 500] {
                tx.send(Outcome {
                    code,
                    url: format!("http://ping.test/{}", code),
                })
                .await
                .unwrap();
            }
            // tx drops here, closing the channel
        });

        let report = aggregate(rx, 5, Instant::now(), false).await;
        feeder.await.unwrap();

        assert_eq!(report.total, 5);
        assert_eq!(report.tally.success, 1);
        assert_eq!(report.tally.redirect, 1);
        assert_eq!(report.tally.client_error, 1);
        assert_eq!(report.tally.server_error, 2);
        assert_eq!(report.tally.total(), 5);
    }

    #[tokio::test]
    async fn test_aggregate_handles_empty_run() {
        let (tx, rx) = mpsc::channel::<Outcome>(1);
        drop(tx);

        let report = aggregate(rx, 0, Instant::now(), true).await;

        assert_eq!(report.total, 0);
        assert_eq!(report.tally.total(), 0);
    }
}
