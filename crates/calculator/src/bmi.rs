use crate::CalculatorError;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BmiResult {
    pub weight: f64,
    pub height: f64,
    pub bmi: String,
}

/// Classifies the body mass index for `height_cm` and `weight_kg`.
///
/// # Errors
///
/// Returns [`CalculatorError::InvalidMeasurement`] unless both values are finite and positive.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Result<BmiResult, CalculatorError> {
    if !(height_cm.is_finite() && weight_kg.is_finite()) || height_cm <= 0.0 || weight_kg <= 0.0
    {
        return Err(CalculatorError::InvalidMeasurement);
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    let category = if bmi < 25.0 {
        "Normal (healthy weight)"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    };

    Ok(BmiResult {
        weight: weight_kg,
        height: height_cm,
        bmi: category.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_band() {
        assert_eq!(calculate_bmi(180.0, 74.0).unwrap().bmi, "Normal (healthy weight)");
        assert_eq!(calculate_bmi(180.0, 85.0).unwrap().bmi, "Overweight");
        assert_eq!(calculate_bmi(180.0, 100.0).unwrap().bmi, "Obese");
    }

    #[test]
    fn band_edges_round_up() {
        // 25.0 exactly is overweight, 30.0 exactly is obese.
        assert_eq!(calculate_bmi(200.0, 100.0).unwrap().bmi, "Overweight");
        assert_eq!(calculate_bmi(200.0, 120.0).unwrap().bmi, "Obese");
    }

    #[test]
    fn echoes_inputs() {
        let result = calculate_bmi(180.0, 74.0).unwrap();
        assert_eq!(result.height, 180.0);
        assert_eq!(result.weight, 74.0);
    }

    #[test]
    fn rejects_nonsense_measurements() {
        for (h, w) in [(0.0, 70.0), (-180.0, 70.0), (180.0, 0.0), (f64::NAN, 70.0), (180.0, f64::INFINITY)] {
            assert_eq!(calculate_bmi(h, w), Err(CalculatorError::InvalidMeasurement));
        }
    }
}
