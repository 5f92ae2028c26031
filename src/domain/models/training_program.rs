#[cfg(test)]
#[path = "training_program_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::wire;

pub const NO_PROGRAM_TEXT: &str = "운동 프로그램이 없습니다.";
const BODYWEIGHT_TEXT: &str = "자체 무게";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default, deserialize_with = "wire::string_or_number")]
    pub reps: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub weight_type: Option<String>,
    #[serde(default)]
    pub weight_value: Option<f64>,
    #[serde(default)]
    pub rest: u32,
}

impl Exercise {
    fn weight_label(&self) -> String {
        match &self.weight_type {
            Some(weight_type) if !weight_type.is_empty() => {
                let value = self
                    .weight_value
                    .map(|val| return val.to_string())
                    .unwrap_or_default();
                return format!("{value}{weight_type}");
            }
            _ => return BODYWEIGHT_TEXT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub focus_area: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub day_index: u32,
    pub exercise_type: String,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub training_cycle_length: u32,
    #[serde(default)]
    pub cycles: Vec<Cycle>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TrainingProgram {
    /// Renders the program as the text block the assistant shows in the chat.
    pub fn format(&self) -> String {
        let mut text = format!(
            "📋 운동 프로그램 ({}일 주기)\n\n",
            self.training_cycle_length
        );

        for cycle in &self.cycles {
            text += &format!("🔹 Day {}: {}\n", cycle.day_index, cycle.exercise_type);

            for set in &cycle.sets {
                text += &format!("  • {}\n", set.focus_area);

                for exercise in &set.exercises {
                    text += &format!(
                        "    - {}: {}세트 x {}{} ({}, 휴식: {}초)\n",
                        exercise.name,
                        exercise.sets,
                        exercise.reps,
                        exercise.unit,
                        exercise.weight_label(),
                        exercise.rest
                    );
                }

                text += "\n";
            }
        }

        if let Some(notes) = &self.notes {
            if !notes.is_empty() {
                text += &format!("📝 참고사항: {notes}\n");
            }
        }

        return text;
    }
}

pub fn format_training_program(program: Option<&TrainingProgram>) -> String {
    if let Some(program) = program {
        return program.format();
    }

    return NO_PROGRAM_TEXT.to_string();
}
