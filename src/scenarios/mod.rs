//! The interactive demo scenarios.
//!
//! Each scenario demonstrates one Rollbar reporting feature by sending a
//! handful of payloads through the public reporting API.

mod business_events;
mod custom_data;
mod error_levels;
mod exception_types;
mod exception_vs_message;
mod multiple_errors;
mod person_tracking;
mod searchable_fields;

pub use business_events::BusinessEvents;
pub use custom_data::CustomData;
pub use error_levels::ErrorLevels;
pub use exception_types::ExceptionTypes;
pub use exception_vs_message::ExceptionVsMessage;
pub use multiple_errors::MultipleErrors;
pub use person_tracking::PersonTracking;
pub use searchable_fields::SearchableFields;

/// A single interactive demo.
pub trait Scenario {
    /// The display name shown in the menu.
    fn name(&self) -> &'static str;

    /// A brief description of what the scenario demonstrates.
    fn description(&self) -> &'static str;

    /// Runs the demo: prints what is being demonstrated and sends the
    /// matching payloads to Rollbar.
    fn run(&self);
}

/// All available scenarios, in display order.
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(PersonTracking),
        Box::new(CustomData),
        Box::new(ErrorLevels),
        Box::new(ExceptionVsMessage),
        Box::new(SearchableFields),
        Box::new(MultipleErrors),
        Box::new(ExceptionTypes),
        Box::new(BusinessEvents),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_scenarios_with_unique_names() {
        let scenarios = all();
        assert_eq!(scenarios.len(), 8);

        let mut names: Vec<&str> = scenarios.iter().map(|scenario| scenario.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);

        for scenario in &scenarios {
            assert!(!scenario.description().is_empty());
        }
    }
}
