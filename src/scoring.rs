use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_SPERM_VALUE: i64 = 50;
pub const MAX_SPERM_VALUE: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoking {
    Never,
    Quit,
    Occasionally,
    Regularly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alcohol {
    None,
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exercise {
    Sedentary,
    Light,
    Moderate,
    Intense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietQuality {
    Poor,
    Average,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

/// Onboarding quiz answers. The first six fields feed the score; the rest
/// are collected for the profile but carry no weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifestyleAnswers {
    #[serde(default, deserialize_with = "lenient")]
    pub smoking: Option<Smoking>,
    #[serde(default, deserialize_with = "lenient")]
    pub alcohol: Option<Alcohol>,
    #[serde(default, deserialize_with = "lenient")]
    pub exercise: Option<Exercise>,
    #[serde(default, deserialize_with = "lenient")]
    pub diet_quality: Option<DietQuality>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub stress_level: Option<StressLevel>,
    #[serde(default)]
    pub tight_clothing: bool,
    #[serde(default)]
    pub hot_baths: bool,
    #[serde(default)]
    pub masturbation_frequency: Option<String>,
    #[serde(default)]
    pub sexual_activity: Option<String>,
    #[serde(default)]
    pub supplements: Option<String>,
    #[serde(default)]
    pub career_status: Option<String>,
    #[serde(default)]
    pub family_pledge: Option<String>,
}

/// An unrecognized answer string degrades to `None` (zero contribution)
/// instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Weighted lifestyle score, clamped to [50, 5000]. Total: missing answers
/// contribute nothing, out-of-range ages are penalized rather than rejected.
pub fn compute_sperm_value(age: i64, lifestyle: &LifestyleAnswers) -> i64 {
    let mut value = 50.0;

    let age = age as f64;
    if (20.0..=35.0).contains(&age) {
        value += 500.0;
    } else {
        value -= (age - 27.5).abs() * 10.0;
    }

    value += match lifestyle.smoking {
        Some(Smoking::Never) => 400.0,
        Some(Smoking::Quit) => 200.0,
        Some(Smoking::Occasionally) => -200.0,
        Some(Smoking::Regularly) => -600.0,
        None => 0.0,
    };

    value += match lifestyle.alcohol {
        Some(Alcohol::None) => 300.0,
        Some(Alcohol::Light) => 150.0,
        Some(Alcohol::Moderate) => -150.0,
        Some(Alcohol::Heavy) => -500.0,
        None => 0.0,
    };

    value += match lifestyle.exercise {
        Some(Exercise::Sedentary) => -300.0,
        Some(Exercise::Light) => 0.0,
        Some(Exercise::Moderate) => 300.0,
        Some(Exercise::Intense) => 250.0,
        None => 0.0,
    };

    value += match lifestyle.diet_quality {
        Some(DietQuality::Poor) => -300.0,
        Some(DietQuality::Average) => 0.0,
        Some(DietQuality::Good) => 300.0,
        Some(DietQuality::Excellent) => 500.0,
        None => 0.0,
    };

    let sleep_hours = lifestyle.sleep_hours.unwrap_or(7.0);
    if (7.0..=9.0).contains(&sleep_hours) {
        value += 300.0;
    } else {
        value -= (8.0 - sleep_hours).abs() * 50.0;
    }

    value += match lifestyle.stress_level {
        Some(StressLevel::Low) => 300.0,
        Some(StressLevel::Moderate) => 0.0,
        Some(StressLevel::High) => -300.0,
        Some(StressLevel::Extreme) => -500.0,
        None => 0.0,
    };

    if lifestyle.tight_clothing {
        value -= 100.0;
    }
    if lifestyle.hot_baths {
        value -= 100.0;
    }

    (value.round() as i64).clamp(MIN_SPERM_VALUE, MAX_SPERM_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimal() -> LifestyleAnswers {
        LifestyleAnswers {
            smoking: Some(Smoking::Never),
            alcohol: Some(Alcohol::None),
            exercise: Some(Exercise::Moderate),
            diet_quality: Some(DietQuality::Excellent),
            sleep_hours: Some(8.0),
            stress_level: Some(StressLevel::Low),
            tight_clothing: false,
            hot_baths: false,
            ..LifestyleAnswers::default()
        }
    }

    #[test]
    fn optimal_profile_scores_2650() {
        // 50 + 500 + 400 + 300 + 300 + 500 + 300 + 300
        assert_eq!(compute_sperm_value(28, &optimal()), 2650);
    }

    #[test]
    fn worst_case_clamps_to_floor() {
        let lifestyle = LifestyleAnswers {
            smoking: Some(Smoking::Regularly),
            alcohol: Some(Alcohol::Heavy),
            exercise: Some(Exercise::Sedentary),
            diet_quality: Some(DietQuality::Poor),
            sleep_hours: Some(3.0),
            stress_level: Some(StressLevel::Extreme),
            tight_clothing: true,
            hot_baths: true,
            ..LifestyleAnswers::default()
        };
        // raw sum is -2775
        assert_eq!(compute_sperm_value(45, &lifestyle), MIN_SPERM_VALUE);
    }

    #[test]
    fn empty_answers_still_score() {
        let value = compute_sperm_value(28, &LifestyleAnswers::default());
        // 50 + 500 (age) + 300 (default 7h sleep)
        assert_eq!(value, 850);
    }

    #[test]
    fn age_penalty_grows_both_directions() {
        let lifestyle = LifestyleAnswers::default();
        assert!(compute_sperm_value(18, &lifestyle) > compute_sperm_value(100, &lifestyle));
        assert!(compute_sperm_value(40, &lifestyle) > compute_sperm_value(60, &lifestyle));
    }

    #[test]
    fn sleep_outside_window_is_penalized() {
        let mut lifestyle = optimal();
        lifestyle.sleep_hours = Some(12.0);
        // loses the +300 bonus and takes -50 * |8 - 12|
        assert_eq!(compute_sperm_value(28, &lifestyle), 2650 - 300 - 200);
    }

    #[test]
    fn output_always_within_bounds() {
        let smoking = [None, Some(Smoking::Never), Some(Smoking::Regularly)];
        let alcohol = [None, Some(Alcohol::None), Some(Alcohol::Heavy)];
        let exercise = [None, Some(Exercise::Moderate), Some(Exercise::Sedentary)];
        let diet = [None, Some(DietQuality::Excellent), Some(DietQuality::Poor)];
        let stress = [None, Some(StressLevel::Low), Some(StressLevel::Extreme)];
        for age in [0, 18, 27, 35, 100, 250] {
            for &s in &smoking {
                for &a in &alcohol {
                    for &e in &exercise {
                        for &d in &diet {
                            for &st in &stress {
                                for sleep in [None, Some(0.0), Some(8.0), Some(24.0)] {
                                    let lifestyle = LifestyleAnswers {
                                        smoking: s,
                                        alcohol: a,
                                        exercise: e,
                                        diet_quality: d,
                                        sleep_hours: sleep,
                                        stress_level: st,
                                        tight_clothing: true,
                                        hot_baths: true,
                                        ..LifestyleAnswers::default()
                                    };
                                    let value = compute_sperm_value(age, &lifestyle);
                                    assert!((MIN_SPERM_VALUE..=MAX_SPERM_VALUE).contains(&value));
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let lifestyle = optimal();
        assert_eq!(
            compute_sperm_value(31, &lifestyle),
            compute_sperm_value(31, &lifestyle)
        );
    }

    #[test]
    fn unknown_answer_strings_degrade_to_none() {
        let parsed: LifestyleAnswers = serde_json::from_str(
            r#"{"smoking": "vaping", "alcohol": "none", "stress_level": 3}"#,
        )
        .unwrap();
        assert_eq!(parsed.smoking, None);
        assert_eq!(parsed.alcohol, Some(Alcohol::None));
        assert_eq!(parsed.stress_level, None);
    }

    #[test]
    fn partial_record_deserializes() {
        let parsed: LifestyleAnswers = serde_json::from_str(r#"{"sleep_hours": 6.5}"#).unwrap();
        assert_eq!(parsed.sleep_hours, Some(6.5));
        assert!(!parsed.tight_clothing);
    }
}
