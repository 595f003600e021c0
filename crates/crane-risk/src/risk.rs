//! Risk scoring for crane acquisitions
//!
//! Four independent 0-100 sub-scores (market, condition, age, location),
//! each paired with a label taken from the same band that produced it, and
//! an overall average.

use serde::{Deserialize, Serialize};

/// Risk level of an acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// 0-30
    #[default]
    Low = 0,
    /// 31-60
    Medium = 1,
    /// 61-80
    High = 2,
    /// 81-100
    Critical = 3,
}

impl RiskLevel {
    /// Get risk level from a score (0-100)
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=30 => RiskLevel::Low,
            31..=60 => RiskLevel::Medium,
            61..=80 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    /// Whether the purchase should go through a second review
    pub fn requires_review(&self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High | RiskLevel::Critical)
    }

    pub fn score_range(&self) -> (u32, u32) {
        match self {
            RiskLevel::Low => (0, 30),
            RiskLevel::Medium => (31, 60),
            RiskLevel::High => (61, 80),
            RiskLevel::Critical => (81, 100),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Regional price volatility
    Market,
    /// Physical wear
    Condition,
    Age,
    /// Regional transaction risk
    Location,
}

/// One scored sub-risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub category: RiskCategory,
    /// 0-100
    pub score: u32,
    /// Band label (ex: "Moderate wear")
    pub label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl RiskFactor {
    pub fn new(
        category: RiskCategory,
        score: u32,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            score,
            label: label.into(),
            description: description.into(),
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, rec: impl Into<String>) -> Self {
        self.recommendation = Some(rec.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub market_risk: u32,
    pub condition_risk: u32,
    pub age_risk: u32,
    pub location_risk: u32,
    /// Rounded mean of the four sub-scores
    pub overall_score: u32,
    pub level: RiskLevel,
    /// Always market, condition, age, location in that order
    pub factors: Vec<RiskFactor>,
    pub explanation: String,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    fn from_factors(market: RiskFactor, condition: RiskFactor, age: RiskFactor, location: RiskFactor) -> Self {
        let total = market.score + condition.score + age.score + location.score;
        let overall_score = (total as f64 / 4.0).round() as u32;
        let level = RiskLevel::from_score(overall_score);
        let factors = vec![market, condition, age, location];
        let explanation = Self::generate_explanation(&factors, level);
        let recommendations = Self::generate_recommendations(&factors, level);

        Self {
            market_risk: factors[0].score,
            condition_risk: factors[1].score,
            age_risk: factors[2].score,
            location_risk: factors[3].score,
            overall_score,
            level,
            factors,
            explanation,
            recommendations,
        }
    }

    pub fn factor(&self, category: RiskCategory) -> Option<&RiskFactor> {
        self.factors.iter().find(|f| f.category == category)
    }

    fn generate_explanation(factors: &[RiskFactor], level: RiskLevel) -> String {
        let level_desc = match level {
            RiskLevel::Low => "Low risk acquisition",
            RiskLevel::Medium => "Moderate risk acquisition - review recommended",
            RiskLevel::High => "High risk acquisition - inspection required",
            RiskLevel::Critical => "Critical risk acquisition - extreme caution needed",
        };

        let mut ranked: Vec<&RiskFactor> = factors.iter().filter(|f| f.score > 50).collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        if ranked.is_empty() {
            level_desc.to_string()
        } else {
            let labels: Vec<&str> = ranked.iter().map(|f| f.label.as_str()).collect();
            format!("{}. Key factors: {}", level_desc, labels.join(", "))
        }
    }

    fn generate_recommendations(factors: &[RiskFactor], level: RiskLevel) -> Vec<String> {
        let mut recs = Vec::new();

        match level {
            RiskLevel::Low => {}
            RiskLevel::Medium => {
                recs.push("Review the valuation before committing".to_string());
            }
            RiskLevel::High => {
                recs.push("Require an independent inspection before purchase".to_string());
                recs.push("Negotiate price protection or warranty terms".to_string());
            }
            RiskLevel::Critical => {
                recs.push("STOP: do not proceed without a full third-party survey".to_string());
                recs.push("Consider renting equivalent capacity instead".to_string());
            }
        }

        for factor in factors {
            if let Some(rec) = &factor.recommendation {
                if !recs.contains(rec) {
                    recs.push(rec.clone());
                }
            }
        }

        recs
    }
}

/// Input for risk calculation
#[derive(Debug, Clone, Default)]
pub struct RiskInput {
    /// Regional market volatility, 0.0 to 1.0
    pub volatility: f64,
    /// Wear score from deal scoring, 0-100
    pub wear_score: u32,
    pub age: u32,
    /// Regional transaction risk, 0.0 to 1.0
    pub regional_risk: f64,
}

impl RiskInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_wear_score(mut self, wear_score: u32) -> Self {
        self.wear_score = wear_score;
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_regional_risk(mut self, risk: f64) -> Self {
        self.regional_risk = risk;
        self
    }
}

/// Risk calculator with configurable bands
#[derive(Debug, Clone)]
pub struct RiskCalculator {
    /// (max age, score, label), ascending; first band with `age <= max` wins
    pub age_bands: Vec<(u32, u32, &'static str)>,
    /// Score and label past the last age band
    pub age_beyond: (u32, &'static str),
    /// (min wear score, label), descending
    pub wear_bands: Vec<(u32, &'static str)>,
    pub wear_floor_label: &'static str,
    /// (max market risk score, label), ascending
    pub volatility_bands: Vec<(u32, &'static str)>,
    pub volatility_beyond: &'static str,
    /// (max location risk score, label), ascending
    pub location_bands: Vec<(u32, &'static str)>,
    pub location_beyond: &'static str,
    /// Sub-scores above this attach a mitigation recommendation
    pub attention_threshold: u32,
}

impl Default for RiskCalculator {
    fn default() -> Self {
        Self {
            age_bands: vec![
                (5, 20, "Modern"),
                (10, 40, "Mid-life"),
                (15, 60, "Mature"),
            ],
            age_beyond: (80, "Legacy"),
            wear_bands: vec![
                (80, "Minimal wear"),
                (60, "Moderate wear"),
                (40, "Significant wear"),
            ],
            wear_floor_label: "Heavy wear",
            volatility_bands: vec![(20, "Low volatility"), (30, "Moderate volatility")],
            volatility_beyond: "High volatility",
            location_bands: vec![(20, "Stable market"), (35, "Moderate exposure")],
            location_beyond: "Elevated exposure",
            attention_threshold: 50,
        }
    }
}

impl RiskCalculator {
    pub fn calculate(&self, input: &RiskInput) -> RiskAssessment {
        let market_score = (input.volatility * 100.0).round().max(0.0) as u32;
        let mut market = RiskFactor::new(
            RiskCategory::Market,
            market_score,
            band_at_most(&self.volatility_bands, market_score, self.volatility_beyond),
            format!("Regional price volatility of {:.0}%", input.volatility * 100.0),
        );
        if market_score > self.attention_threshold {
            market = market.with_recommendation("Plan for a shorter holding period or price hedge");
        }

        let wear = input.wear_score.min(100);
        let condition_score = 100 - wear;
        let wear_label = self
            .wear_bands
            .iter()
            .find(|(min, _)| wear >= *min)
            .map(|(_, label)| *label)
            .unwrap_or(self.wear_floor_label);
        let mut condition = RiskFactor::new(
            RiskCategory::Condition,
            condition_score,
            wear_label,
            format!("Wear score {} of 100", wear),
        );
        if condition_score > self.attention_threshold {
            condition = condition.with_recommendation("Commission an independent mechanical inspection");
        }

        let (age_score, age_label) = self
            .age_bands
            .iter()
            .find(|(max, _, _)| input.age <= *max)
            .map(|(_, score, label)| (*score, *label))
            .unwrap_or(self.age_beyond);
        let mut age = RiskFactor::new(
            RiskCategory::Age,
            age_score,
            age_label,
            format!("{} years in service", input.age),
        );
        if age_score > self.attention_threshold {
            age = age.with_recommendation("Review maintenance records and load-test certification");
        }

        let location_score = (input.regional_risk * 100.0).round().max(0.0) as u32;
        let mut location = RiskFactor::new(
            RiskCategory::Location,
            location_score,
            band_at_most(&self.location_bands, location_score, self.location_beyond),
            format!("Regional transaction risk of {:.0}%", input.regional_risk * 100.0),
        );
        if location_score > self.attention_threshold {
            location = location.with_recommendation("Verify title, export and import documentation");
        }

        RiskAssessment::from_factors(market, condition, age, location)
    }
}

fn band_at_most(bands: &[(u32, &'static str)], score: u32, beyond: &'static str) -> &'static str {
    bands
        .iter()
        .find(|(max, _)| score <= *max)
        .map(|(_, label)| *label)
        .unwrap_or(beyond)
}

/// Convenience function using the default bands
pub fn calculate_risk(input: &RiskInput) -> RiskAssessment {
    RiskCalculator::default().calculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_from_score() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(31), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(61), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(81), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn test_age_bands() {
        let cases = [(0, 20, "Modern"), (5, 20, "Modern"), (6, 40, "Mid-life"), (10, 40, "Mid-life"),
            (11, 60, "Mature"), (15, 60, "Mature"), (16, 80, "Legacy"), (40, 80, "Legacy")];
        for (age, score, label) in cases {
            let assessment = calculate_risk(&RiskInput::new().with_age(age).with_wear_score(100));
            let factor = assessment.factor(RiskCategory::Age).unwrap();
            assert_eq!(assessment.age_risk, score, "age {}", age);
            assert_eq!(factor.score, score);
            assert_eq!(factor.label, label);
        }
    }

    #[test]
    fn test_condition_risk_mirrors_wear() {
        let assessment = calculate_risk(&RiskInput::new().with_wear_score(69));
        assert_eq!(assessment.condition_risk, 31);
        assert_eq!(assessment.factor(RiskCategory::Condition).unwrap().label, "Moderate wear");

        let worn = calculate_risk(&RiskInput::new().with_wear_score(10));
        assert_eq!(worn.condition_risk, 90);
        let factor = worn.factor(RiskCategory::Condition).unwrap();
        assert_eq!(factor.label, "Heavy wear");
        assert!(factor.recommendation.is_some());
    }

    #[test]
    fn test_overall_is_rounded_mean() {
        let input = RiskInput::new()
            .with_volatility(0.15)
            .with_wear_score(69)
            .with_age(5)
            .with_regional_risk(0.15);
        let assessment = calculate_risk(&input);

        assert_eq!(assessment.market_risk, 15);
        assert_eq!(assessment.location_risk, 15);
        // (15 + 31 + 20 + 15) / 4 = 20.25
        assert_eq!(assessment.overall_score, 20);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.recommendations.is_empty());
        assert_eq!(assessment.explanation, "Low risk acquisition");
    }

    #[test]
    fn test_high_risk_collects_recommendations() {
        let input = RiskInput::new()
            .with_volatility(0.9)
            .with_wear_score(5)
            .with_age(30)
            .with_regional_risk(0.8);
        let assessment = calculate_risk(&input);

        assert_eq!(assessment.level, RiskLevel::Critical);
        assert!(assessment.level.requires_review());
        assert_eq!(assessment.recommendations.len(), 6);
        assert!(assessment.explanation.starts_with("Critical risk acquisition"));
        assert!(assessment.explanation.contains("Heavy wear"));
    }

    #[test]
    fn test_serializes_levels_in_caps() {
        let assessment = calculate_risk(&RiskInput::new().with_wear_score(100));
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["level"], "LOW");
        assert_eq!(json["factors"][0]["category"], "market");
        assert!(json["factors"][0].get("recommendation").is_none());
    }
}
