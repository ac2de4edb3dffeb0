//! End-to-end scoring scenarios built from raw extract JSON

use pretty_assertions::assert_eq;
use serde_json::json;
use skill_core::{
    user_skill_reducer, DifficultyRecord, Judgment, LevelUpStrategy, Mode, SkillConfig,
};

fn judgments(value: serde_json::Value) -> Vec<Judgment> {
    serde_json::from_value(value).unwrap()
}

fn difficulties(values: &[f64]) -> Vec<DifficultyRecord> {
    values.iter().map(|d| DifficultyRecord::new([*d])).collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn binary_single_success_lacks_volume() {
    let extracts = judgments(json!([{"feedback": {"success": [1]}}]));
    let records: Vec<DifficultyRecord> =
        serde_json::from_value(json!([{"difficulty": [0.2]}])).unwrap();

    let result = user_skill_reducer(&extracts, &records, &SkillConfig::default()).unwrap();

    assert_eq!(result.classes, vec!["True", "False"]);
    assert_eq!(result.confusion_simple, vec![vec![1, 0], vec![0, 0]]);
    assert!(approx(result.confusion_subject[0][0], 0.8));
    assert!(approx(result.weighted_skill["True"], 1.0));
    assert_eq!(result.count["True"], 1);
    assert!(!result.level_up, "count 1 is below the threshold of 10");
}

#[test]
fn binary_ten_successes_level_up() {
    let extracts = judgments(serde_json::Value::Array(vec![
        json!({"feedback": {"success": [1]}});
        10
    ]));
    let records = difficulties(&[0.2; 10]);

    let result = user_skill_reducer(&extracts, &records, &SkillConfig::default()).unwrap();

    assert_eq!(result.count["True"], 10);
    assert!(approx(result.weighted_skill["True"], 1.0));
    assert!(approx(result.mean_skill, 1.0));
    assert!(result.level_up);
}

#[test]
fn many_to_many_missed_class_pairs_with_null() {
    let extracts = judgments(json!([{
        "cat": 1,
        "feedback": {"strategy": "surveySimple", "true_choiceIds": ["cat", "dog"]}
    }]));
    let config = SkillConfig::default().with_mode(Mode::ManyToMany);

    let result = user_skill_reducer(&extracts, &difficulties(&[0.3]), &config).unwrap();

    assert_eq!(result.classes, vec!["cat", "dog", "NONE"]);
    // rows: cat, dog, NONE; columns likewise
    assert_eq!(
        result.confusion_simple,
        vec![vec![1, 0, 0], vec![0, 0, 1], vec![0, 0, 0]]
    );
    assert!(approx(result.confusion_subject[0][0], 0.7));
    assert!(approx(result.confusion_subject[1][2], 0.3));
    assert_eq!(result.count["dog"], 1);
    assert_eq!(result.skill["dog"], 0.0);
    assert!(approx(result.skill["cat"], 1.0));
}

#[test]
fn survey_labels_are_case_folded() {
    let extracts = judgments(json!([
        {"CAT": 1, "feedback": {"strategy": "surveySimple", "true_choiceIds": ["Cat"]}},
        {"dog": 1, "feedback": {"strategy": "surveySimple", "true_choiceIds": ["DOG"]}}
    ]));
    let config = SkillConfig::default().with_mode(Mode::OneToOne);

    let result = user_skill_reducer(&extracts, &difficulties(&[0.5, 0.5]), &config).unwrap();
    assert_eq!(result.classes, vec!["cat", "dog"]);
    assert_eq!(result.confusion_simple, vec![vec![1, 0], vec![0, 1]]);
}

#[test]
fn binary_tokens_are_not_case_folded() {
    let extracts = judgments(json!([{"feedback": {"success": [0]}}]));
    let result =
        user_skill_reducer(&extracts, &difficulties(&[0.5]), &SkillConfig::default()).unwrap();
    assert!(result.skill.contains_key("True"));
    assert!(result.skill.contains_key("False"));
    assert!(!result.skill.contains_key("true"));
}

#[test]
fn one_to_one_mixed_batch() {
    let extracts = judgments(json!([
        {"cat": 1, "feedback": {"strategy": "surveySimple", "true_choiceIds": ["cat"]}},
        {"cat": 1, "feedback": {"strategy": "surveySimple", "true_choiceIds": ["dog"]}},
        {"dog": 1, "feedback": {"strategy": "surveySimple", "true_choiceIds": ["dog"]}},
        {"feedback": {"strategy": "surveySimple", "true_choiceIds": ["dog"]}}
    ]));
    let config = SkillConfig::default()
        .with_mode(Mode::OneToOne)
        .with_strategy(LevelUpStrategy::All)
        .with_thresholds(0.5, 1);

    let result =
        user_skill_reducer(&extracts, &difficulties(&[0.5, 0.5, 0.5, 0.5]), &config).unwrap();

    assert_eq!(result.classes, vec!["cat", "dog", "NONE"]);
    assert_eq!(
        result.confusion_simple,
        vec![vec![1, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]
    );
    assert_eq!(result.count["dog"], 3);
    assert!(approx(result.skill["dog"], 1.0 / 3.0));
    assert!(!result.level_up, "dog skill is below 0.5");
}

#[test]
fn degenerate_classes_reported() {
    // "owl" is only ever chosen, never a true label
    let extracts = judgments(json!([
        {"owl": 1, "feedback": {"strategy": "surveySimple", "true_choiceIds": ["cat"]}}
    ]));
    let config = SkillConfig::default()
        .with_mode(Mode::OneToOne)
        .with_thresholds(0.0, 0);

    let result = user_skill_reducer(&extracts, &difficulties(&[0.5]), &config).unwrap();
    assert_eq!(result.degenerate_classes, vec!["owl".to_string()]);
    assert_eq!(result.weighted_skill["owl"], 0.0);
}

#[test]
fn empty_batch_is_well_defined() {
    for mode in [Mode::Binary, Mode::OneToOne, Mode::ManyToMany] {
        let config = SkillConfig::default().with_mode(mode);
        let result = user_skill_reducer(&[], &[], &config).unwrap();
        assert_eq!(result.mean_skill, 0.0, "mode {}", mode);
        assert!(result.weighted_skill.values().all(|v| *v == 0.0));
        assert!(!result.level_up, "mode {}", mode);
    }

    let result = user_skill_reducer(&[], &[], &SkillConfig::default()).unwrap();
    assert_eq!(result.degenerate_classes, vec!["True".to_string()]);
}

#[test]
fn multiple_measurements_are_averaged() {
    let extracts = judgments(json!([{"feedback": {"success": [1, 1]}}]));
    let records = vec![DifficultyRecord::new([0.1, 0.3])];

    let result = user_skill_reducer(&extracts, &records, &SkillConfig::default()).unwrap();
    assert_eq!(result.count["True"], 2);
    assert!(approx(result.confusion_subject[0][0], 1.6));
}
