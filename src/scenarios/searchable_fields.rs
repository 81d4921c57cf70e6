use rollbar_demo::{map, rollbar};

use super::Scenario;
use crate::util::wait_for_user;

/// Uses context and custom fields to make errors searchable.
pub struct SearchableFields;

impl Scenario for SearchableFields {
    fn name(&self) -> &'static str {
        "Searchable Fields"
    }

    fn description(&self) -> &'static str {
        "Use context and custom fields"
    }

    fn run(&self) {
        println!("\n>> DEMO: Searchable Fields");
        println!("Sending errors with searchable context and custom fields...\n");

        println!("  - Context: checkout#payment");
        println!("    Message: Payment gateway timeout");
        rollbar!(Error message = "Payment gateway timeout",
            { gateway: "stripe", order_id: "ORD-2024-001", amount: 299.99 },
            context = "checkout#payment");

        println!("  - Context: checkout#shipping");
        println!("    Message: Invalid shipping address");
        rollbar!(Error message = "Invalid shipping address",
            { address_validator: "usps", order_id: "ORD-2024-002", country: "US" },
            context = "checkout#shipping");

        println!("  - Context: user#authentication");
        println!("    Message: Failed login attempt");
        rollbar!(Error message = "Failed login attempt",
            { username: "testuser", ip_address: "192.168.1.50", attempt_count: 5 },
            context = "user#authentication");

        println!("  - Context: api#external");
        println!("    Message: Third-party API failure");
        rollbar!(Error message = "Third-party API failure",
            { api_name: "weather_service", endpoint: "/api/forecast", status_code: 503 },
            context = "api#external");

        println!("\nNote: In Rollbar search:");
        println!("  - Use 'context:checkout#payment' to find checkout payment errors");
        println!("  - Use 'custom[gateway]:stripe' to find Stripe-related issues");
        println!("  - Use 'custom[order_id]:ORD-2024-001' to find specific order");
        wait_for_user();
    }
}
