use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const PLANNER_KEY: &str = "dailyreset_planner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerField {
    Focus,
    Priority1,
    Priority2,
    Priority3,
    Win,
    Gratitude,
}

impl PlannerField {
    pub const ALL: [PlannerField; 6] = [
        PlannerField::Focus,
        PlannerField::Priority1,
        PlannerField::Priority2,
        PlannerField::Priority3,
        PlannerField::Win,
        PlannerField::Gratitude,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlannerField::Focus => "Today’s Focus",
            PlannerField::Priority1 => "Priority 1",
            PlannerField::Priority2 => "Priority 2",
            PlannerField::Priority3 => "Priority 3",
            PlannerField::Win => "One Small Win I Want Today",
            PlannerField::Gratitude => "Gratitude",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            PlannerField::Focus => "What matters most today?",
            PlannerField::Priority1 => "Priority one",
            PlannerField::Priority2 => "Priority two",
            PlannerField::Priority3 => "Priority three",
            PlannerField::Win => "A small win counts. What is it?",
            PlannerField::Gratitude => "What are you grateful for right now?",
        }
    }
}

impl FromStr for PlannerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "focus" => Ok(PlannerField::Focus),
            "p1" | "priority1" => Ok(PlannerField::Priority1),
            "p2" | "priority2" => Ok(PlannerField::Priority2),
            "p3" | "priority3" => Ok(PlannerField::Priority3),
            "win" => Ok(PlannerField::Win),
            "gratitude" => Ok(PlannerField::Gratitude),
            _ => Err(format!(
                "Unknown planner field '{}'. Expected one of: focus, p1, p2, p3, win, gratitude",
                s
            )),
        }
    }
}

/// Today's page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerPage {
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub p1: String,
    #[serde(default)]
    pub p2: String,
    #[serde(default)]
    pub p3: String,
    #[serde(default)]
    pub win: String,
    #[serde(default)]
    pub gratitude: String,
}

impl PlannerPage {
    pub fn get(&self, field: PlannerField) -> &str {
        match field {
            PlannerField::Focus => &self.focus,
            PlannerField::Priority1 => &self.p1,
            PlannerField::Priority2 => &self.p2,
            PlannerField::Priority3 => &self.p3,
            PlannerField::Win => &self.win,
            PlannerField::Gratitude => &self.gratitude,
        }
    }

    pub fn set(&mut self, field: PlannerField, value: impl Into<String>) {
        let slot = match field {
            PlannerField::Focus => &mut self.focus,
            PlannerField::Priority1 => &mut self.p1,
            PlannerField::Priority2 => &mut self.p2,
            PlannerField::Priority3 => &mut self.p3,
            PlannerField::Win => &mut self.win,
            PlannerField::Gratitude => &mut self.gratitude,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        PlannerField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }
}
