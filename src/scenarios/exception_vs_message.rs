use rollbar_demo::{map, report_error, report_message, Level};

use super::Scenario;
use crate::util::wait_for_user;

/// Compares message reporting with exception reporting.
pub struct ExceptionVsMessage;

impl Scenario for ExceptionVsMessage {
    fn name(&self) -> &'static str {
        "Exception vs Message"
    }

    fn description(&self) -> &'static str {
        "Compare reporting methods"
    }

    fn run(&self) {
        println!("\n>> DEMO: Exception vs Message Reporting");
        println!("Comparing two reporting methods...\n");

        println!("1. Message Reporting (manual log)");
        println!("   - No automatic stack trace");
        println!("   - Manual text description");
        println!("   - Good for business events\n");
        report_message(
            "User attempted invalid operation",
            Level::Warning,
            map! {
                operation: "delete_admin_account",
                reason: "insufficient_permissions",
            },
        );

        println!("2. Exception Reporting (caught error)");
        println!("   - Automatic stack trace capture");
        println!("   - Error type and message");
        println!("   - Good for actual errors\n");

        if let Err(err) = std::fs::read_to_string("/does/not/exist/report.txt") {
            report_error(
                &err,
                map! {
                    operation: "load_report",
                    path: "/does/not/exist/report.txt",
                },
            );
        }

        println!("Note: Check Rollbar to see the difference:");
        println!("  - Message reports show up as log entries");
        println!("  - Exception reports include full stack traces");
        wait_for_user();
    }
}
