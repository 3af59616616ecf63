use serde::Serialize;

/// Qualitative banding for a single lab metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Normal,
    BelowOptimal,
    Low,
    NotAvailable,
}

/// The six semen-analysis metrics a YO report can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabMetric {
    Concentration,
    Motility,
    ProgressiveMotility,
    MotileSpermConcentration,
    ProgressiveMotileSpermConcentration,
    Morphology,
}

impl LabMetric {
    /// WHO-reference lower bound for "Normal".
    pub fn normal_min(self) -> f64 {
        match self {
            LabMetric::Concentration => 16.0,
            LabMetric::Motility => 42.0,
            LabMetric::ProgressiveMotility => 30.0,
            LabMetric::MotileSpermConcentration => 7.0,
            LabMetric::ProgressiveMotileSpermConcentration => 5.0,
            LabMetric::Morphology => 4.0,
        }
    }

    /// Floor of the "Below optimal" band; anything under this is "Low".
    pub fn low_threshold(self) -> Option<f64> {
        match self {
            LabMetric::Concentration => Some(10.0),
            LabMetric::Motility => Some(30.0),
            LabMetric::ProgressiveMotility => Some(20.0),
            LabMetric::MotileSpermConcentration => Some(4.0),
            LabMetric::ProgressiveMotileSpermConcentration => Some(3.0),
            LabMetric::Morphology => Some(2.0),
        }
    }
}

pub fn classify(value: Option<f64>, normal_min: f64, low_threshold: Option<f64>) -> MetricStatus {
    let Some(value) = value else {
        return MetricStatus::NotAvailable;
    };
    if value >= normal_min {
        return MetricStatus::Normal;
    }
    if let Some(low) = low_threshold {
        if value >= low {
            return MetricStatus::BelowOptimal;
        }
    }
    MetricStatus::Low
}

pub fn status_for(metric: LabMetric, value: Option<f64>) -> MetricStatus {
    classify(value, metric.normal_min(), metric.low_threshold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_bands() {
        assert_eq!(classify(Some(20.0), 16.0, Some(10.0)), MetricStatus::Normal);
        assert_eq!(
            classify(Some(12.0), 16.0, Some(10.0)),
            MetricStatus::BelowOptimal
        );
        assert_eq!(classify(Some(5.0), 16.0, Some(10.0)), MetricStatus::Low);
        assert_eq!(classify(None, 16.0, Some(10.0)), MetricStatus::NotAvailable);
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(classify(Some(16.0), 16.0, Some(10.0)), MetricStatus::Normal);
        assert_eq!(
            classify(Some(10.0), 16.0, Some(10.0)),
            MetricStatus::BelowOptimal
        );
        assert_eq!(classify(Some(9.99), 16.0, Some(10.0)), MetricStatus::Low);
    }

    #[test]
    fn missing_low_threshold_skips_middle_band() {
        assert_eq!(classify(Some(12.0), 16.0, None), MetricStatus::Low);
    }

    #[test]
    fn per_metric_thresholds() {
        assert_eq!(
            status_for(LabMetric::Motility, Some(42.0)),
            MetricStatus::Normal
        );
        assert_eq!(
            status_for(LabMetric::Morphology, Some(3.0)),
            MetricStatus::BelowOptimal
        );
        assert_eq!(
            status_for(LabMetric::ProgressiveMotileSpermConcentration, Some(1.0)),
            MetricStatus::Low
        );
        assert_eq!(
            status_for(LabMetric::Concentration, None),
            MetricStatus::NotAvailable
        );
    }
}
