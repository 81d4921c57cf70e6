use rollbar_demo::{map, report_message, Level};

use super::Scenario;
use crate::util::wait_for_user;

/// Attaches rich custom metadata to error reports.
pub struct CustomData;

impl Scenario for CustomData {
    fn name(&self) -> &'static str {
        "Custom Data"
    }

    fn description(&self) -> &'static str {
        "Attach metadata to error reports"
    }

    fn run(&self) {
        println!("\n>> DEMO: Custom Data");
        println!("Sending errors with rich custom metadata...\n");

        println!("  - Payment processing failed");
        report_message(
            "Payment processing failed",
            Level::Error,
            map! {
                payment_id: "pay_abc123",
                payment_method: "credit_card",
                amount: 149.99,
                currency: "USD",
                merchant_id: "merchant_xyz",
                attempt_number: 3,
            },
        );

        println!("  - API rate limit exceeded");
        report_message(
            "API rate limit exceeded",
            Level::Error,
            map! {
                api_endpoint: "/api/v1/users",
                rate_limit: 100,
                current_usage: 105,
                window: "1 minute",
                client_ip: "192.168.1.100",
            },
        );

        println!("  - Database query timeout");
        report_message(
            "Database query timeout",
            Level::Error,
            map! {
                query: "SELECT * FROM orders WHERE date > ?",
                timeout_ms: 5000,
                actual_time_ms: 8500,
                table: "orders",
                row_count: 150000,
            },
        );

        println!("\nNote: All custom data fields are searchable in Rollbar using:");
        println!("  custom[payment_id]:pay_abc123");
        println!("  custom[api_endpoint]:/api/v1/users");
        wait_for_user();
    }
}
