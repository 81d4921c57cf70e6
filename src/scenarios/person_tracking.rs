use rollbar_demo::{map, rollbar, Person};

use super::Scenario;
use crate::util::wait_for_user;

/// Associates errors with different user profiles.
pub struct PersonTracking;

impl Scenario for PersonTracking {
    fn name(&self) -> &'static str {
        "Person Tracking"
    }

    fn description(&self) -> &'static str {
        "Associate errors with different users"
    }

    fn run(&self) {
        println!("\n>> DEMO: Person Tracking");
        println!("Sending errors associated with different users...\n");

        let users = [
            ("user_123", "alice_smith", "alice@example.com", "premium"),
            ("user_456", "bob_jones", "bob@example.com", "free"),
            ("user_789", "charlie_brown", "charlie@example.com", "enterprise"),
        ];

        for (id, username, email, subscription) in users {
            println!("  - Reporting error for user: {} ({})", username, email);

            let person = Person {
                id: id.to_string(),
                username: Some(username.to_string()),
                email: Some(email.to_string()),
                extra: map! { subscription: subscription },
            };

            rollbar!(Error message = format!("User action failed for {}", username),
                { user_action: "checkout", cart_value: 99.99 },
                person = person);
        }

        println!("\nNote: In Rollbar, you can now search for errors by user ID, username, or email.");
        wait_for_user();
    }
}
