//! Text shown by the host: status labels, action hints and the shop sign.

use biz_core::BusinessState;
use biz_econ::Outlook;
use serde::Serialize;
use std::fmt;

/// Colour cue for a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Tone {
    Gain,
    Loss,
}

/// Label next to an action button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub text: String,
    pub tone: Tone,
}

/// Everything the status panel displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub business: String,
    pub day: String,
    pub budget: String,
    pub employees: String,
    pub upgrade: String,
    pub simulate_hint: Hint,
    pub hire_hint: Hint,
    pub upgrade_hint: Hint,
    pub sign: String,
}

impl StatusView {
    /// Hints come from `outlook` so they always agree with what the actions will do.
    pub fn new(state: &BusinessState, outlook: &Outlook) -> Self {
        let simulate_tone = if outlook.profit >= 0 {
            Tone::Gain
        } else {
            Tone::Loss
        };
        Self {
            business: format!("Business: {}", state.business_name),
            day: format!("Day: {}", state.day),
            budget: format!("Budget: {}", state.budget),
            employees: format!("Employees: {}", state.employees),
            upgrade: format!("Upgrade: {}", state.upgrade_level),
            simulate_hint: Hint {
                text: format!("Expected: {:+}", outlook.profit),
                tone: simulate_tone,
            },
            hire_hint: Hint {
                text: format!("Cost: -{}", outlook.hire_cost),
                tone: Tone::Loss,
            },
            upgrade_hint: Hint {
                text: format!("Cost: -{}", outlook.upgrade_cost),
                tone: Tone::Loss,
            },
            sign: format!(
                "Welcome to {}\nLevel: {}",
                state.business_name, state.upgrade_level
            ),
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.business)?;
        writeln!(f, "{} | {} | {} | {}", self.day, self.budget, self.employees, self.upgrade)?;
        writeln!(f, "[Simulate Work Day] {}", self.simulate_hint.text)?;
        writeln!(f, "[Hire Employee]     {}", self.hire_hint.text)?;
        writeln!(f, "[Upgrade Business]  {}", self.upgrade_hint.text)?;
        write!(f, "{}", self.sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::session;

    #[test]
    fn opening_labels() {
        let v = session().status();
        assert_eq!(v.business, "Business: Acme");
        assert_eq!(v.day, "Day: 0");
        assert_eq!(v.budget, "Budget: 1000");
        assert_eq!(v.employees, "Employees: 1");
        assert_eq!(v.upgrade, "Upgrade: 0");
        assert_eq!(v.simulate_hint.text, "Expected: +60");
        assert_eq!(v.simulate_hint.tone, Tone::Gain);
        assert_eq!(v.hire_hint.text, "Cost: -300");
        assert_eq!(v.upgrade_hint.text, "Cost: -200");
        assert_eq!(v.sign, "Welcome to Acme\nLevel: 0");
    }

    #[test]
    fn labels_follow_state() {
        let mut s = session();
        s.upgrade_business().unwrap();
        s.rename_business("Globex").unwrap();
        let v = s.status();
        assert_eq!(v.business, "Business: Globex");
        assert_eq!(v.upgrade_hint.text, "Cost: -300");
        assert_eq!(v.sign, "Welcome to Globex\nLevel: 1");
        assert!(v.to_string().contains("Budget: 800"));
    }

    #[test]
    fn losing_day_has_loss_tone() {
        let state = BusinessState {
            day: 3,
            budget: 0,
            employees: 1,
            upgrade_level: 0,
            business_name: "Acme".into(),
        };
        let outlook = Outlook {
            income: 10,
            expense: 40,
            profit: -30,
            hire_cost: 300,
            upgrade_cost: 200,
        };
        let v = StatusView::new(&state, &outlook);
        assert_eq!(v.simulate_hint.text, "Expected: -30");
        assert_eq!(v.simulate_hint.tone, Tone::Loss);
    }
}
