use serde::{Deserialize, Serialize};

/// Name shared by every rest segment. Never used by a catalog exercise.
pub const REST_PERIOD: &str = "rest period";

/// Builder settings that are not per-build parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineConfig {
    #[serde(default = "default_rest_period_name")]
    pub rest_period_name: String,
    #[serde(default = "default_rest_description")]
    pub rest_description: String,
    /// Exercise duration used by the test routine.
    #[serde(default = "default_test_exercise_secs")]
    pub test_exercise_secs: u32,
    /// Rest duration used by the test routine.
    #[serde(default = "default_test_rest_secs")]
    pub test_rest_secs: u32,
}

fn default_rest_period_name() -> String {
    REST_PERIOD.into()
}
fn default_rest_description() -> String {
    "catch your breath".into()
}
fn default_test_exercise_secs() -> u32 {
    8
}
fn default_test_rest_secs() -> u32 {
    4
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            rest_period_name: default_rest_period_name(),
            rest_description: default_rest_description(),
            test_exercise_secs: default_test_exercise_secs(),
            test_rest_secs: default_test_rest_secs(),
        }
    }
}
