//! Plan data model - exercises as supplied by the host
//!
//! All presence checks for optional fields live here. Rendering code asks
//! the accessors and never inspects raw values.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Repetition target: either a plain count or free text like "8-10"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(n) => write!(f, "{}", n),
            Reps::Text(s) => f.write_str(s),
        }
    }
}

/// One exercise entry of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reps: Option<Reps>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: None,
            reps: None,
            weight: None,
            rest_seconds: None,
            notes: None,
        }
    }

    pub fn with_sets(mut self, sets: u32) -> Self {
        self.sets = Some(sets);
        self
    }

    pub fn with_reps(mut self, reps: Reps) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn with_rest(mut self, rest_seconds: u32) -> Self {
        self.rest_seconds = Some(rest_seconds);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets, missing counts as 0
    pub fn sets_or_zero(&self) -> u32 {
        self.sets.unwrap_or(0)
    }

    /// Rest between sets in seconds, missing counts as 0
    pub fn rest(&self) -> u32 {
        self.rest_seconds.unwrap_or(0)
    }

    pub fn reps(&self) -> Option<&Reps> {
        self.reps.as_ref()
    }

    /// Weight label; empty strings count as absent
    pub fn weight(&self) -> Option<&str> {
        non_empty(self.weight.as_deref())
    }

    /// Coaching notes; empty strings count as absent
    pub fn notes(&self) -> Option<&str> {
        non_empty(self.notes.as_deref())
    }
}

/// Stable identity of an exercise inside one plan.
///
/// Names are not unique, so position is part of the key. Reordering the
/// list would change keys; the plan is immutable per session so this holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExerciseKey {
    pub name: String,
    pub position: usize,
}

/// Workout plan, immutable for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Plan {
    pub fn new(name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            name: name.into(),
            exercises,
        }
    }

    /// Parse a plan from the host JSON contract
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Exercise> {
        self.exercises.get(position)
    }

    pub fn key(&self, position: usize) -> Option<ExerciseKey> {
        self.get(position).map(|ex| ExerciseKey {
            name: ex.name.clone(),
            position,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Deserialize an optional field, treating a mistyped value as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Built-in plan used when the host supplies none
pub fn demo_plan() -> Plan {
    Plan::new(
        "Chest & Triceps Day",
        vec![
            Exercise::new("Barbell Bench Press")
                .with_sets(4)
                .with_reps(Reps::Text("6-8".into()))
                .with_weight("185 lbs")
                .with_rest(180)
                .with_notes("Keep chest up, explosive concentric, controlled eccentric"),
            Exercise::new("Incline Dumbbell Press")
                .with_sets(3)
                .with_reps(Reps::Text("8-10".into()))
                .with_weight("70 lbs")
                .with_rest(120)
                .with_notes("30 degree angle, full range of motion"),
            Exercise::new("Cable Flyes")
                .with_sets(3)
                .with_reps(Reps::Text("10-12".into()))
                .with_weight("50 lbs per side")
                .with_rest(90)
                .with_notes("Stretch at bottom, squeeze at top"),
            Exercise::new("Tricep Dips")
                .with_sets(3)
                .with_reps(Reps::Text("8-12".into()))
                .with_rest(120)
                .with_notes("Add weight if needed for progressive overload"),
            Exercise::new("Rope Pushdown")
                .with_sets(3)
                .with_reps(Reps::Text("12-15".into()))
                .with_weight("80 lbs")
                .with_rest(60)
                .with_notes("Control the weight, avoid swinging"),
            Exercise::new("Overhead Tricep Extension")
                .with_sets(3)
                .with_reps(Reps::Text("10-12".into()))
                .with_weight("60 lbs")
                .with_rest(90)
                .with_notes("Keep elbows stationary, feel the stretch"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_exercise() {
        let plan = Plan::from_json(
            r#"{"name":"Push","exercises":[
                {"name":"Bench","sets":4,"reps":"6-8","weight":"185 lbs","restSeconds":180,"notes":"Chest up"}
            ]}"#,
        )
        .unwrap();
        let ex = &plan.exercises[0];
        assert_eq!(ex.sets, Some(4));
        assert_eq!(ex.reps(), Some(&Reps::Text("6-8".into())));
        assert_eq!(ex.weight(), Some("185 lbs"));
        assert_eq!(ex.rest(), 180);
        assert_eq!(ex.notes(), Some("Chest up"));
    }

    #[test]
    fn test_parse_integer_reps() {
        let plan = Plan::from_json(r#"{"name":"P","exercises":[{"name":"Curl","reps":12}]}"#).unwrap();
        assert_eq!(plan.exercises[0].reps(), Some(&Reps::Count(12)));
        assert_eq!(plan.exercises[0].reps().unwrap().to_string(), "12");
    }

    #[test]
    fn test_missing_optional_fields_are_absent() {
        let plan = Plan::from_json(r#"{"name":"P","exercises":[{"name":"Plank"}]}"#).unwrap();
        let ex = &plan.exercises[0];
        assert_eq!(ex.sets_or_zero(), 0);
        assert_eq!(ex.rest(), 0);
        assert!(ex.reps().is_none());
        assert!(ex.weight().is_none());
        assert!(ex.notes().is_none());
    }

    #[test]
    fn test_mistyped_optional_fields_are_absent() {
        let plan = Plan::from_json(
            r#"{"name":"P","exercises":[
                {"name":"Row","sets":"four","restSeconds":-30,"weight":42,"notes":null}
            ]}"#,
        )
        .unwrap();
        let ex = &plan.exercises[0];
        assert_eq!(ex.sets, None);
        assert_eq!(ex.rest_seconds, None);
        assert_eq!(ex.weight, None);
        assert_eq!(ex.notes, None);
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let ex = Exercise::new("Dips").with_weight("").with_notes("  ");
        assert!(ex.weight().is_none());
        assert!(ex.notes().is_none());
    }

    #[test]
    fn test_missing_exercise_name_is_error() {
        assert!(Plan::from_json(r#"{"name":"P","exercises":[{"sets":3}]}"#).is_err());
    }

    #[test]
    fn test_missing_exercises_is_empty_plan() {
        let plan = Plan::from_json(r#"{"name":"Rest day"}"#).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_keys_distinguish_duplicate_names() {
        let plan = Plan::new(
            "P",
            vec![Exercise::new("Curl"), Exercise::new("Curl")],
        );
        assert_ne!(plan.key(0), plan.key(1));
        assert!(plan.key(2).is_none());
    }

    #[test]
    fn test_demo_plan_shape() {
        let plan = demo_plan();
        assert_eq!(plan.len(), 6);
        assert!(plan.exercises[3].weight().is_none());
    }
}
