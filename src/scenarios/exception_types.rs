use rollbar_demo::{map, report_error};

use super::Scenario;
use crate::util::wait_for_user;

/// Triggers and reports a variety of error types.
pub struct ExceptionTypes;

impl Scenario for ExceptionTypes {
    fn name(&self) -> &'static str {
        "Exception Types"
    }

    fn description(&self) -> &'static str {
        "Various error types"
    }

    fn run(&self) {
        println!("\n>> DEMO: Different Exception Types");
        println!("Triggering various error types...\n");

        println!("  - Triggering ParseIntError...");
        if let Err(err) = "not_a_number".parse::<i32>() {
            report_error(&err, map! { exception_demo: "ParseIntError" });
        }

        println!("  - Triggering ParseFloatError...");
        if let Err(err) = "1.2.3".parse::<f64>() {
            report_error(&err, map! { exception_demo: "ParseFloatError" });
        }

        println!("  - Triggering Utf8Error...");
        if let Err(err) = std::str::from_utf8(&[0x80]) {
            report_error(&err, map! { exception_demo: "Utf8Error" });
        }

        println!("  - Triggering TryFromIntError...");
        if let Err(err) = u8::try_from(1000i32) {
            report_error(&err, map! { exception_demo: "TryFromIntError" });
        }

        println!("  - Triggering AddrParseError...");
        if let Err(err) = "300.1.1.1".parse::<std::net::IpAddr>() {
            report_error(&err, map! { exception_demo: "AddrParseError" });
        }

        println!("\nNote: Each error type is captured with a full stack trace.");
        println!("Rollbar groups similar exceptions together automatically.");
        wait_for_user();
    }
}
