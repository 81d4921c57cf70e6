use rollbar_demo::{map, report_message, Level};

use super::Scenario;
use crate::util::wait_for_user;

/// Tracks business events and milestones, not just errors.
pub struct BusinessEvents;

impl Scenario for BusinessEvents {
    fn name(&self) -> &'static str {
        "Business Events"
    }

    fn description(&self) -> &'static str {
        "Track important application events"
    }

    fn run(&self) {
        println!("\n>> DEMO: Business Events Tracking");
        println!("Logging important application events...\n");

        println!("  - INFO    | User completed onboarding");
        report_message(
            "User completed onboarding",
            Level::Info,
            map! {
                user_id: "user_new_123",
                signup_date: "2024-11-23",
                onboarding_steps: 5,
                time_to_complete_minutes: 8,
            },
        );

        println!("  - INFO    | Subscription upgraded");
        report_message(
            "Subscription upgraded",
            Level::Info,
            map! {
                user_id: "user_456",
                old_plan: "basic",
                new_plan: "premium",
                mrr_change: 20.00,
            },
        );

        println!("  - WARNING | Unusual activity detected");
        report_message(
            "Unusual activity detected",
            Level::Warning,
            map! {
                user_id: "user_789",
                activity: "rapid_api_calls",
                count: 500,
                time_window_minutes: 1,
            },
        );

        println!("  - INFO    | Daily backup completed");
        report_message(
            "Daily backup completed",
            Level::Info,
            map! {
                backup_size_gb: 45.2,
                duration_minutes: 23,
                destination: "s3://backups/daily/",
                success: true,
            },
        );

        println!("\nNote: Rollbar isn't just for errors!");
        println!("Track important business events, milestones, and system operations.");
        wait_for_user();
    }
}
