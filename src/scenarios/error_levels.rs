use rollbar_demo::{map, report_message, Level};

use super::Scenario;
use crate::util::wait_for_user;

/// Sends one message at every severity level.
pub struct ErrorLevels;

impl Scenario for ErrorLevels {
    fn name(&self) -> &'static str {
        "Error Levels"
    }

    fn description(&self) -> &'static str {
        "Demonstrate all severity levels"
    }

    fn run(&self) {
        println!("\n>> DEMO: Error Levels");
        println!("Sending messages at all severity levels...\n");

        let levels = [
            (Level::Debug, "Debug: Variable value = 42"),
            (Level::Info, "Info: User logged in successfully"),
            (Level::Warning, "Warning: Disk space running low (15% remaining)"),
            (Level::Error, "Error: Failed to connect to external API"),
            (Level::Critical, "Critical: Database connection lost"),
        ];

        for (level, message) in levels {
            println!("  - {:8} | {}", level.to_string().to_uppercase(), message);
            report_message(message, level, map! {});
        }

        println!("\nNote: You can filter by level in Rollbar dashboard.");
        println!("Levels help prioritize which issues to address first.");
        wait_for_user();
    }
}
