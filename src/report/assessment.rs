//! Human-readable bands for credibility and bias scores.

pub fn credibility_assessment(score: f64) -> &'static str {
    if score >= 0.8 {
        "Very High Credibility"
    } else if score >= 0.65 {
        "High Credibility"
    } else if score >= 0.5 {
        "Moderate Credibility"
    } else if score >= 0.35 {
        "Low Credibility"
    } else {
        "Very Low Credibility"
    }
}

pub fn credibility_recommendation(score: f64) -> &'static str {
    if score >= 0.8 {
        "Highly reliable source with strong credibility indicators"
    } else if score >= 0.65 {
        "Generally reliable with good credibility markers"
    } else if score >= 0.5 {
        "Moderately reliable - verify claims with additional sources"
    } else if score >= 0.35 {
        "Low reliability - cross-reference with multiple trusted sources"
    } else {
        "Very low reliability - treat with significant skepticism"
    }
}

pub fn bias_assessment(score: f64) -> &'static str {
    if score <= 0.3 {
        "Low bias - appears balanced and objective"
    } else if score <= 0.5 {
        "Moderate bias - some subjective elements present"
    } else if score <= 0.7 {
        "High bias - significant subjective language or perspective"
    } else {
        "Very high bias - heavily subjective or one-sided reporting"
    }
}
