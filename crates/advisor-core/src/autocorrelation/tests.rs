use super::*;

fn no_exclusions() -> CommonWordSet {
    CommonWordSet::new()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_position_scores_single_kernel() {
    let scores = position_scores(b"aaa bbb aaa", &[3]);
    // The last two windows wrap into the leading "aaa"
    assert_eq!(scores, vec![4, 1, 1, 1, 1, 1, 1, 1, 4, 4, 4]);
}

#[test]
fn test_position_scores_accumulate_over_kernels() {
    assert_eq!(position_scores(b"abab", &[2]), vec![2, 2, 2, 2]);
    assert_eq!(position_scores(b"abcab", &[2]), vec![2, 1, 1, 2, 1]);
    assert_eq!(position_scores(b"abcab", &[1, 2]), vec![4, 3, 2, 4, 3]);
}

#[test]
fn test_word_scores_skip_spaces() {
    let positions = position_scores(b"aaa bbb aaa", &[3]);
    let words = word_scores(b"aaa bbb aaa", &positions, 3);
    assert_eq!(words, vec![6, 3, 12]);
}

#[test]
fn test_repeated_word_outscores_single_word() {
    let result = autocorrelate("aaa bbb aaa", &no_exclusions(), &[3]).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.top().unwrap().word, "aaa");
    assert_eq!(result.get("aaa"), Some(1.0));
    assert_close(result.get("bbb").unwrap(), 1.0 / 6.0);
}

#[test]
fn test_shared_roots_rank_above_unrelated_word() {
    let result = autocorrelate(
        "Gravity, gravitational graviton banana",
        &no_exclusions(),
        DEFAULT_KERNELS,
    )
    .unwrap();

    let words: Vec<&str> = result.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words, vec!["gravity", "graviton", "gravitational", "banana"]);
    assert_eq!(result.get("gravity"), Some(1.0));
}

#[test]
fn test_scores_are_normalized() {
    let text = "We study the gravitational collapse of dark matter halos and \
                the gravitational lensing they induce in dark galaxies.";
    let result = autocorrelate(text, &no_exclusions(), DEFAULT_KERNELS).unwrap();

    assert!(result.iter().all(|e| (0.0..=1.0).contains(&e.score)));
    assert_eq!(result.top().unwrap().score, 1.0);
    assert!(result
        .entries()
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn test_deterministic() {
    let text = "Quasinormal modes of rotating black holes and their overtones";
    let excluded = CommonWordSet::from_words(["of", "and", "their"]);

    let first = autocorrelate(text, &excluded, &[3]).unwrap();
    let second = autocorrelate(text, &excluded, &[3]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_excluded_words_removed() {
    let excluded = CommonWordSet::from_words(["the", "of"]);
    let result = autocorrelate("the theory of the thermal states", &excluded, &[3]).unwrap();

    assert!(!result.contains("the"));
    assert!(!result.contains("of"));
    assert!(result.contains("theory"));
    assert!(result.contains("thermal"));
}

#[test]
fn test_single_remaining_word_scores_one() {
    let excluded = CommonWordSet::from_words(["aaa"]);
    let result = autocorrelate("aaa bbb aaa", &excluded, &[3]).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.get("bbb"), Some(1.0));
}

#[test]
fn test_equal_scores_keep_first_appearance_order() {
    // Every window is unique, so both words score the same
    let result = autocorrelate("xyz abc", &no_exclusions(), &[3]).unwrap();
    assert_eq!(result.get("xyz"), result.get("abc"));
    assert_eq!(result.top().unwrap().word, "xyz");

    let result = autocorrelate("qrs tuv wxy", &no_exclusions(), &[2]).unwrap();
    let words: Vec<&str> = result.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words[0], "qrs");
    assert_eq!(result.get("qrs"), result.get("tuv"));
    assert_eq!(words[1], "tuv");
}

#[test]
fn test_punctuation_removed_without_separator() {
    let result = autocorrelate("spin-1/2 fields", &no_exclusions(), &[3]).unwrap();
    assert!(result.contains("spin-"));
    assert!(result.contains("fields"));

    let result = autocorrelate("end.Start end", &no_exclusions(), &[3]).unwrap();
    assert!(result.contains("endstart"));
}

#[test]
fn test_empty_word_entry_preserved() {
    // The stripped "(1)" leaves a leading space, producing an empty word
    let result = autocorrelate("(1) hello hello", &no_exclusions(), &[3]).unwrap();

    assert_eq!(result.get(""), Some(0.0));
    assert_eq!(result.top().unwrap().word, "hello");
    assert_eq!(result.entries().last().unwrap().word, "");
}

#[test]
fn test_empty_text_is_invalid_kernel() {
    let err = autocorrelate("", &no_exclusions(), &[3]).unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::InvalidKernel {
            kernel: 3,
            text_len: 0
        }
    ));
}

#[test]
fn test_kernel_not_shorter_than_text() {
    let err = autocorrelate("abc", &no_exclusions(), &[3]).unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidKernel { kernel: 3, .. }));

    // Length is measured after cleaning
    let err = autocorrelate("a1b2c3d", &no_exclusions(), &[4]).unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::InvalidKernel {
            kernel: 4,
            text_len: 4
        }
    ));
}

#[test]
fn test_zero_kernel_rejected() {
    let err = autocorrelate("some text", &no_exclusions(), &[3, 0]).unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidKernel { kernel: 0, .. }));
}

#[test]
fn test_empty_kernel_list_rejected() {
    let err = autocorrelate("some text", &no_exclusions(), &[]).unwrap_err();
    assert_eq!(err.error_type(), "invalid_value");
}

#[test]
fn test_all_words_excluded() {
    let excluded = CommonWordSet::from_words(["of", "the", "and"]);
    let err = autocorrelate("of the and the", &excluded, &[3]).unwrap_err();
    assert!(matches!(err, AdvisorError::EmptyVocabulary));
}

#[test]
fn test_kernel_count_enters_damping() {
    let single = autocorrelate("abab cdcd", &no_exclusions(), &[2]).unwrap();
    let double = autocorrelate("abab cdcd", &no_exclusions(), &[2, 2]).unwrap();

    // Doubling the kernel doubles every raw score, but the damping term differs
    // by the same constant for both words, so the ranking is unchanged
    let single_words: Vec<&str> = single.iter().map(|e| e.word.as_str()).collect();
    let double_words: Vec<&str> = double.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(single_words, double_words);
}
