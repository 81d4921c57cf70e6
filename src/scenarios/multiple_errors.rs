use std::io;

use rollbar_demo::{map, report_error, report_message, Level};

use super::Scenario;
use crate::util::wait_for_user;

/// Sends a sequence of related errors to demonstrate grouping.
pub struct MultipleErrors;

impl Scenario for MultipleErrors {
    fn name(&self) -> &'static str {
        "Multiple Errors"
    }

    fn description(&self) -> &'static str {
        "Send a sequence of related errors"
    }

    fn run(&self) {
        println!("\n>> DEMO: Multiple Related Errors");
        println!("Sending a sequence of related errors...\n");

        println!("Simulating a cascade of failures:");

        println!("  1. Database connection slow");
        report_message(
            "Database connection latency detected",
            Level::Warning,
            map! {
                latency_ms: 2500,
                threshold_ms: 1000,
                db_host: "db-primary.example.com",
            },
        );

        println!("  2. Query timeout");
        let timeout = io::Error::new(
            io::ErrorKind::TimedOut,
            "Query exceeded 5 second timeout",
        );
        report_error(
            &timeout,
            map! {
                query: "SELECT * FROM large_table",
                timeout_seconds: 5,
            },
        );

        println!("  3. Service degradation warning");
        report_message(
            "Service performance degraded",
            Level::Error,
            map! {
                service: "api_server",
                response_time_ms: 8000,
                error_rate: 0.15,
            },
        );

        println!("  4. Circuit breaker triggered");
        report_message(
            "Circuit breaker opened for database",
            Level::Critical,
            map! {
                failures: 5,
                threshold: 3,
                timeout_seconds: 60,
            },
        );

        println!("\nNote: These errors will appear in Rollbar with timestamps.");
        println!("You can track the sequence of events leading to the critical failure.");
        wait_for_user();
    }
}
