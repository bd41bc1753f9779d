//! Admin dashboard command routing. Commands are string-matched in the same
//! priority-ordered-rule style as the customer classifier.

use std::fmt::Write;

use shopmate_core::QueryLogEntry;

use crate::insights::intent_tallies;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminCommand {
    Exit,
    ChangePlan,
    ConfigureFeatures,
    Insights,
    Guardrails,
    Unknown,
}

pub fn classify(input: &str) -> AdminCommand {
    let input = input.to_lowercase();
    if input == "exit" {
        AdminCommand::Exit
    } else if input.contains("change plan") {
        AdminCommand::ChangePlan
    } else if input.contains("configure features") {
        AdminCommand::ConfigureFeatures
    } else if input.contains("insights") {
        AdminCommand::Insights
    } else if input.contains("guardrails") {
        AdminCommand::Guardrails
    } else {
        AdminCommand::Unknown
    }
}

/// Output for one dashboard command. `Exit` is handled by the caller before
/// rendering and yields the empty string here.
pub fn render(command: AdminCommand, log: &[QueryLogEntry]) -> String {
    match command {
        AdminCommand::Exit => String::new(),
        AdminCommand::ChangePlan => "Plan changed. New features: [configured].".to_string(),
        AdminCommand::ConfigureFeatures => "Features configured. Added subscriptions.".to_string(),
        AdminCommand::Insights => render_insights(log),
        AdminCommand::Guardrails => {
            "Guardrails: PII masked, refunds auto-approved under $50 (enforced).".to_string()
        }
        AdminCommand::Unknown => {
            "Unknown admin command. Options: change plan, configure features, insights, guardrails."
                .to_string()
        }
    }
}

fn render_insights(log: &[QueryLogEntry]) -> String {
    let mut out = String::from("Customer Insights:");
    for (intent, count) in intent_tallies(log) {
        let _ = write!(out, "\n- {}: {} queries", intent.label(), count);
    }
    out.push_str("\nTrending: Frequent searches for shoes.");
    out.push_str("\nAlerts: Out-of-stock mentions (simulated).");
    out.push_str("\nAutomated Campaign: 'Flash sale on shoes! Buy now.'");
    out
}
