use crate::domain::{
    AnswerFeatures, CheckMap, CheckValue, JsDependence, CONTENT_CHECKS, JS_DEPENDENCE_CHECK,
    TECHNICAL_CHECKS,
};

/// Pillar weights. The four totals sum to 100; the scenario component
/// weights sum to `per_scenario`.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub content_quality: f64,
    pub technical_foundation: f64,
    pub authority_trust: f64,
    pub prompt_scenarios: ScenarioWeights,
}

#[derive(Debug, Clone)]
pub struct ScenarioWeights {
    pub total: f64,
    pub per_scenario: f64,
    pub self_presence: f64,
    pub citation_quality: f64,
    pub competitor_share: f64,
    pub mention_coverage: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            content_quality: 40.0,
            technical_foundation: 20.0,
            authority_trust: 15.0,
            prompt_scenarios: ScenarioWeights {
                total: 25.0,
                per_scenario: 3.0,
                self_presence: 1.0,
                citation_quality: 0.75,
                competitor_share: 0.5,
                mention_coverage: 0.75,
            },
        }
    }
}

/// The scored output for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub content_quality_score: f64,
    pub technical_score: f64,
    pub authority_score: f64,
    pub scenarios_score: f64,
    pub total_score: f64,
    pub readiness_rank: String,
}

/// Deterministic scoring over the persisted crawl checks and answer
/// features of one run. Zero applicable data for any pillar scores that
/// pillar 0 rather than failing.
pub fn calculate_scores(
    pages: &[CheckMap],
    queries: &[Vec<AnswerFeatures>],
    weights: &ScoringWeights,
) -> ScoreCard {
    let content_quality_score = content_quality(pages, weights.content_quality);
    let technical_score = technical_foundation(pages, weights.technical_foundation);
    let authority_score = authority_trust(queries, weights.authority_trust);
    let scenarios_score = prompt_scenarios(queries, &weights.prompt_scenarios);

    let total_score = content_quality_score + technical_score + authority_score + scenarios_score;

    ScoreCard {
        content_quality_score,
        technical_score,
        authority_score,
        scenarios_score,
        total_score,
        readiness_rank: readiness_rank(total_score).to_string(),
    }
}

/// Pass rate over the 9 content checks across all pages, scaled by the
/// pillar weight. A page missing a check key contributes no instance.
fn content_quality(pages: &[CheckMap], weight: f64) -> f64 {
    let mut total_checks = 0u32;
    let mut passed_checks = 0u32;

    for checks in pages {
        for name in CONTENT_CHECKS {
            if let Some(value) = checks.get(name) {
                total_checks += 1;
                if *value == CheckValue::Passed(true) {
                    passed_checks += 1;
                }
            }
        }
    }

    if total_checks == 0 {
        return 0.0;
    }
    round2(passed_checks as f64 / total_checks as f64 * weight)
}

/// Pass rate over the 8 boolean technical checks plus graded credit for
/// js dependence (low = 1, medium = 0.5, high = 0 of one instance).
fn technical_foundation(pages: &[CheckMap], weight: f64) -> f64 {
    let mut total_checks = 0u32;
    let mut passed_checks = 0f64;

    for checks in pages {
        for name in TECHNICAL_CHECKS {
            if let Some(value) = checks.get(name) {
                total_checks += 1;
                if *value == CheckValue::Passed(true) {
                    passed_checks += 1.0;
                }
            }
        }

        if let Some(CheckValue::Graded(level)) = checks.get(JS_DEPENDENCE_CHECK) {
            total_checks += 1;
            passed_checks += match level {
                JsDependence::Low => 1.0,
                JsDependence::Medium => 0.5,
                JsDependence::High => 0.0,
            };
        }
    }

    if total_checks == 0 {
        return 0.0;
    }
    round2(passed_checks / total_checks as f64 * weight)
}

/// Rate of answers citing a Tier A source, over all answers in the run.
fn authority_trust(queries: &[Vec<AnswerFeatures>], weight: f64) -> f64 {
    let mut total_answers = 0u32;
    let mut tier_a_count = 0u32;

    for answers in queries {
        for features in answers {
            total_answers += 1;
            if features.tier_a_present {
                tier_a_count += 1;
            }
        }
    }

    if total_answers == 0 {
        return 0.0;
    }
    round2(tier_a_count as f64 / total_answers as f64 * weight)
}

/// Per-query score from presence/citation/competitor/coverage components,
/// averaged across queries and rescaled onto the pillar budget.
fn prompt_scenarios(queries: &[Vec<AnswerFeatures>], weights: &ScenarioWeights) -> f64 {
    if queries.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    for answers in queries {
        if answers.is_empty() {
            continue;
        }

        let mut scenario_score = 0.0;

        if answers.iter().any(|a| a.brand_mentioned) {
            scenario_score += weights.self_presence;
        }
        if answers.iter().any(|a| a.self_cited) {
            scenario_score += weights.citation_quality;
        }

        let avg_competitors = answers
            .iter()
            .map(|a| a.competitor_count as f64)
            .sum::<f64>()
            / answers.len() as f64;
        let competitor_penalty = (avg_competitors / 3.0).min(1.0);
        scenario_score += weights.competitor_share * (1.0 - competitor_penalty);

        let mention_rate =
            answers.iter().filter(|a| a.brand_mentioned).count() as f64 / answers.len() as f64;
        scenario_score += weights.mention_coverage * mention_rate;

        total += scenario_score;
    }

    let avg = total / queries.len() as f64;
    round2(avg / weights.per_scenario * weights.total)
}

/// Five-level label, inclusive at the lower edge of each band.
pub fn readiness_rank(score: f64) -> &'static str {
    if score >= 80.0 {
        "Elite"
    } else if score >= 65.0 {
        "Strong"
    } else if score >= 50.0 {
        "Moderate"
    } else if score >= 35.0 {
        "Weak"
    } else {
        "Critical"
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{calculate_scores, readiness_rank, ScoringWeights};
    use crate::domain::{AnswerFeatures, CheckMap, CheckValue, JsDependence};

    fn page(entries: &[(&str, CheckValue)]) -> CheckMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn features(
        brand_mentioned: bool,
        self_cited: bool,
        tier_a_present: bool,
        competitor_count: u32,
    ) -> AnswerFeatures {
        AnswerFeatures {
            brand_mentioned,
            self_cited,
            tier_a_present,
            competitor_count,
        }
    }

    #[test]
    fn no_data_scores_zero_everywhere() {
        let card = calculate_scores(&[], &[], &ScoringWeights::default());

        assert_eq!(card.content_quality_score, 0.0);
        assert_eq!(card.technical_score, 0.0);
        assert_eq!(card.authority_score, 0.0);
        assert_eq!(card.scenarios_score, 0.0);
        assert_eq!(card.total_score, 0.0);
        assert_eq!(card.readiness_rank, "Critical");
    }

    #[test]
    fn missing_check_keys_do_not_count_as_failures() {
        // Only two content keys present: pass rate 1/2, sub-score 20.00.
        let pages = vec![page(&[
            ("faq_present", CheckValue::Passed(true)),
            ("question_headings", CheckValue::Passed(false)),
        ])];

        let card = calculate_scores(&pages, &[], &ScoringWeights::default());

        assert_eq!(card.content_quality_score, 20.0);
    }

    #[test]
    fn js_dependence_gets_graded_credit() {
        let weights = ScoringWeights::default();

        let low = vec![page(&[(
            "js_dependence_level",
            CheckValue::Graded(JsDependence::Low),
        )])];
        let medium = vec![page(&[(
            "js_dependence_level",
            CheckValue::Graded(JsDependence::Medium),
        )])];
        let high = vec![page(&[(
            "js_dependence_level",
            CheckValue::Graded(JsDependence::High),
        )])];

        assert_eq!(calculate_scores(&low, &[], &weights).technical_score, 20.0);
        assert_eq!(calculate_scores(&medium, &[], &weights).technical_score, 10.0);
        assert_eq!(calculate_scores(&high, &[], &weights).technical_score, 0.0);
    }

    #[test]
    fn authority_is_tier_a_rate_over_answers() {
        let queries = vec![vec![
            features(true, true, false, 0),
            features(false, false, false, 0),
        ]];

        let card = calculate_scores(&[], &queries, &ScoringWeights::default());

        // 0 of 2 answers cite a tier A source.
        assert_eq!(card.authority_score, 0.0);
    }

    #[test]
    fn scenario_credit_is_per_query_not_per_answer() {
        let weights = ScoringWeights::default();
        let queries = vec![vec![
            features(true, true, false, 0),
            features(false, false, false, 0),
        ]];

        let card = calculate_scores(&[], &queries, &weights);

        // self_presence 1.0 + citation_quality 0.75 (each once) +
        // competitor_share 0.5 (no competitors) + mention_coverage 0.375
        // (rate 0.5) = 2.625 of 3.0, rescaled to 25 => 21.88.
        assert_eq!(card.scenarios_score, 21.88);
    }

    #[test]
    fn perfect_inputs_hit_the_pillar_ceilings() {
        let all_checks: Vec<(&str, CheckValue)> = crate::domain::CONTENT_CHECKS
            .iter()
            .chain(crate::domain::TECHNICAL_CHECKS.iter())
            .map(|name| (*name, CheckValue::Passed(true)))
            .chain([(
                "js_dependence_level",
                CheckValue::Graded(JsDependence::Low),
            )])
            .collect();
        let pages = vec![page(&all_checks)];
        let queries: Vec<Vec<AnswerFeatures>> =
            (0..7).map(|_| vec![features(true, true, true, 0)]).collect();

        let card = calculate_scores(&pages, &queries, &ScoringWeights::default());

        assert_eq!(card.content_quality_score, 40.0);
        assert_eq!(card.technical_score, 20.0);
        assert_eq!(card.authority_score, 15.0);
        assert_eq!(card.scenarios_score, 25.0);
        assert_eq!(card.total_score, 100.0);
        assert_eq!(card.readiness_rank, "Elite");
    }

    #[test]
    fn totals_stay_within_bounds() {
        let weights = ScoringWeights::default();
        let pages = vec![
            page(&[("h1_ok", CheckValue::Passed(true))]),
            page(&[("canonical_ok", CheckValue::Passed(false))]),
        ];
        let queries = vec![
            vec![features(true, false, true, 5)],
            vec![],
            vec![features(false, false, false, 0)],
        ];

        let card = calculate_scores(&pages, &queries, &weights);

        assert!(card.total_score >= 0.0);
        assert!(card.total_score <= 100.0);
    }

    #[test]
    fn rank_boundaries_are_inclusive_at_the_lower_edge() {
        assert_eq!(readiness_rank(80.0), "Elite");
        assert_eq!(readiness_rank(79.99), "Strong");
        assert_eq!(readiness_rank(65.0), "Strong");
        assert_eq!(readiness_rank(50.0), "Moderate");
        assert_eq!(readiness_rank(35.0), "Weak");
        assert_eq!(readiness_rank(34.99), "Critical");
        assert_eq!(readiness_rank(0.0), "Critical");
    }

    #[test]
    fn competitor_share_decays_with_average_count() {
        let weights = ScoringWeights::default();

        // avg 3 competitors caps the penalty at 1: no competitor credit.
        let crowded = vec![vec![features(false, false, false, 3)]];
        // avg 1.5 competitors: half the competitor credit (0.25 of 3.0).
        let mixed = vec![vec![
            features(false, false, false, 3),
            features(false, false, false, 0),
        ]];

        let crowded_card = calculate_scores(&[], &crowded, &weights);
        let mixed_card = calculate_scores(&[], &mixed, &weights);

        assert_eq!(crowded_card.scenarios_score, 0.0);
        assert_eq!(mixed_card.scenarios_score, 2.08);
    }

    #[test]
    fn empty_pages_and_answerless_queries_are_not_an_error() {
        let card = calculate_scores(&[CheckMap::new()], &[vec![]], &ScoringWeights::default());
        assert_eq!(card.total_score, 0.0);
    }
}
