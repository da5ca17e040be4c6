//! Scholarship evaluation scenarios drawn from the transport office's student records,
//! plus invariants checked across a sweep of profiles.

use fleet_fees::workflows::fees::{
    EvaluationResult, FeeBasis, ScholarshipEvaluator, ScholarshipProgram,
    StudentEligibilityProfile,
};

fn profile(income: f64, academic: f64, attendance: f64) -> StudentEligibilityProfile {
    StudentEligibilityProfile {
        family_annual_income: income,
        academic_score_percent: academic,
        attendance_percent: attendance,
        has_sibling_enrolled: false,
        is_single_parent_household: false,
        has_sports_achievement: false,
    }
}

fn evaluate(profile: &StudentEligibilityProfile, base_fee: f64) -> EvaluationResult {
    ScholarshipEvaluator::new()
        .evaluate(profile, FeeBasis::monthly(base_fee))
        .expect("profile within domain")
}

fn programs(result: &EvaluationResult) -> Vec<ScholarshipProgram> {
    result
        .eligible_awards
        .iter()
        .map(|award| award.program)
        .collect()
}

#[test]
fn high_scorer_below_merit_income_cap_gets_merit() {
    let result = evaluate(&profile(45_000.0, 92.0, 95.0), 2000.0);

    assert_eq!(programs(&result), vec![ScholarshipProgram::Merit]);
    let merit = result.recommended_award.as_ref().expect("merit recommended");
    assert_eq!(merit.program, ScholarshipProgram::Merit);
    // 20 + (92 - 90) * 2
    assert_eq!(merit.percentage, 24.0);
    assert_eq!(merit.amount, 480.0);
    assert_eq!(merit.reason, "Academic score: 92%");
    assert_eq!(result.total_savings, 480.0);
    assert_eq!(result.final_fee, 1520.0);
}

#[test]
fn low_income_family_gets_need_based_support() {
    let result = evaluate(&profile(25_000.0, 78.0, 88.0), 2200.0);

    assert_eq!(programs(&result), vec![ScholarshipProgram::NeedBased]);
    let award = result.recommended_award.as_ref().expect("need-based");
    assert_eq!(award.percentage, 35.0);
    assert_eq!(award.amount, 770.0);
    assert_eq!(result.final_fee, 1430.0);
}

#[test]
fn athlete_with_strong_attendance_gets_sports_award() {
    let mut student = profile(35_000.0, 85.0, 97.0);
    student.has_sports_achievement = true;
    let result = evaluate(&student, 1800.0);

    assert_eq!(programs(&result), vec![ScholarshipProgram::Sports]);
    let award = result.recommended_award.as_ref().expect("sports");
    assert_eq!(award.percentage, 30.0);
    assert_eq!(award.amount, 540.0);
    assert_eq!(result.final_fee, 1260.0);
}

#[test]
fn ineligible_student_pays_the_base_fee() {
    let result = evaluate(&profile(75_000.0, 88.0, 91.0), 2500.0);

    assert!(result.eligible_awards.is_empty());
    assert!(result.recommended_award.is_none());
    assert_eq!(result.total_savings, 0.0);
    assert_eq!(result.final_fee, 2500.0);
    assert_eq!(result.base_fee, 2500.0);
}

#[test]
fn single_parent_beats_sibling_discount() {
    let mut student = profile(38_000.0, 80.0, 90.0);
    student.has_sibling_enrolled = true;
    student.is_single_parent_household = true;
    let result = evaluate(&student, 2000.0);

    assert_eq!(
        programs(&result),
        vec![ScholarshipProgram::Sibling, ScholarshipProgram::SingleParent]
    );
    assert_eq!(result.eligible_awards[0].amount, 300.0);
    assert_eq!(result.eligible_awards[1].percentage, 22.0);
    assert_eq!(result.eligible_awards[1].amount, 440.0);
    assert_eq!(
        result.recommended_program(),
        Some(ScholarshipProgram::SingleParent)
    );
    assert_eq!(result.final_fee, 1560.0);
}

#[test]
fn merit_percentage_rises_with_score_until_capped() {
    let mut previous = None;
    for score in [90.0, 91.0, 92.0, 93.0, 94.0, 95.0] {
        let result = evaluate(&profile(60_000.0, score, 80.0), 1000.0);
        let percentage = result.eligible_awards[0].percentage;
        if let Some(previous) = previous {
            assert!(percentage > previous, "{percentage} should exceed {previous}");
        }
        assert!(percentage <= 30.0);
        previous = Some(percentage);
    }
    assert_eq!(previous, Some(30.0));

    let capped = evaluate(&profile(60_000.0, 99.5, 80.0), 1000.0);
    assert_eq!(capped.eligible_awards[0].percentage, 30.0);
}

fn sweep() -> Vec<(StudentEligibilityProfile, f64)> {
    let incomes = [
        0.0, 9_999.0, 25_000.0, 30_000.0, 38_500.0, 40_000.0, 50_000.0, 60_000.0, 70_000.0,
        90_000.0,
    ];
    let scores = [0.0, 75.0, 90.0, 92.5, 96.0, 100.0];
    let attendances = [50.0, 95.0, 97.0, 98.0, 100.0];
    let fees = [1.0, 1800.0, 2345.67];

    let mut cases = Vec::new();
    for (i, income) in incomes.into_iter().enumerate() {
        for (j, score) in scores.into_iter().enumerate() {
            for (k, attendance) in attendances.into_iter().enumerate() {
                let flags = i + j + k;
                let student = StudentEligibilityProfile {
                    family_annual_income: income,
                    academic_score_percent: score,
                    attendance_percent: attendance,
                    has_sibling_enrolled: flags % 2 == 0,
                    is_single_parent_household: flags % 3 == 0,
                    has_sports_achievement: flags % 4 != 1,
                };
                cases.push((student, fees[flags % fees.len()]));
            }
        }
    }
    cases
}

#[test]
fn final_fee_is_base_fee_minus_savings() {
    for (student, fee) in sweep() {
        let result = evaluate(&student, fee);
        assert_eq!(result.final_fee, result.base_fee - result.total_savings);
        assert!(result.final_fee >= 0.0);
    }
}

#[test]
fn savings_come_from_exactly_one_award() {
    for (student, fee) in sweep() {
        let result = evaluate(&student, fee);
        match &result.recommended_award {
            None => {
                assert_eq!(result.total_savings, 0.0);
                assert!(result.eligible_awards.is_empty());
            }
            Some(recommended) => {
                assert_eq!(result.total_savings, recommended.amount);
                assert!(result.eligible_awards.contains(recommended));
            }
        }
    }
}

#[test]
fn recommendation_is_the_largest_award_and_earliest_on_ties() {
    for (student, fee) in sweep() {
        let result = evaluate(&student, fee);
        let Some(recommended) = &result.recommended_award else {
            continue;
        };
        let position = result
            .eligible_awards
            .iter()
            .position(|award| award == recommended)
            .expect("recommended award listed");
        for (index, award) in result.eligible_awards.iter().enumerate() {
            assert!(recommended.amount >= award.amount);
            if index < position {
                assert!(award.amount < recommended.amount);
            }
        }
    }
}

#[test]
fn awards_follow_evaluation_order_and_stay_in_range() {
    for (student, fee) in sweep() {
        let result = evaluate(&student, fee);
        let listed = programs(&result);
        let mut sorted = listed.clone();
        sorted.sort();
        assert_eq!(listed, sorted);
        for award in &result.eligible_awards {
            assert!((0.0..=100.0).contains(&award.percentage));
            assert_eq!(award.amount, fee * award.percentage / 100.0);
        }
    }
}

#[test]
fn evaluation_is_idempotent() {
    let evaluator = ScholarshipEvaluator::new();
    for (student, fee) in sweep() {
        let first = evaluator
            .evaluate(&student, FeeBasis::monthly(fee))
            .expect("first run");
        let second = evaluator
            .evaluate(&student, FeeBasis::monthly(fee))
            .expect("second run");
        assert_eq!(first, second);
        assert_eq!(first.final_fee.to_bits(), second.final_fee.to_bits());
    }
}

#[test]
fn evaluator_can_be_shared_across_threads() {
    let evaluator = ScholarshipEvaluator::new();
    let student = profile(25_000.0, 78.0, 88.0);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || evaluator.evaluate(&student, FeeBasis::monthly(2200.0)))
        })
        .collect();
    for handle in handles {
        let result = handle.join().expect("thread").expect("evaluation");
        assert_eq!(result.final_fee, 1430.0);
    }
}
