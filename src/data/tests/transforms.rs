//! transforms 模块单元测试

use crate::data::transforms::{argmax, invert_ink, normalize_pixels, softmax};
use approx::assert_abs_diff_eq;

#[test]
fn test_normalize_pixels_basic() {
    let normalized = normalize_pixels(&[0, 51, 255]);

    assert_eq!(normalized.len(), 3);
    assert_eq!(normalized[0], 0.0);
    assert_abs_diff_eq!(normalized[1], 0.2, epsilon = 1e-6);
    assert_eq!(normalized[2], 1.0);
}

#[test]
fn test_invert_ink() {
    let inverted = invert_ink(&[0, 255, 51]);

    assert_eq!(inverted[0], 1.0);
    assert_eq!(inverted[1], 0.0);
    assert_abs_diff_eq!(inverted[2], 0.8, epsilon = 1e-6);
}

#[test]
fn test_softmax_sums_to_one() {
    let probs = softmax(&[1.0, 2.0, 3.0, -1.0]);

    assert_abs_diff_eq!(probs.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    assert!(probs[2] > probs[1] && probs[1] > probs[0] && probs[0] > probs[3]);
}

/// 分数很大时不溢出
#[test]
fn test_softmax_large_scores() {
    let probs = softmax(&[1000.0, 1000.0]);

    assert_abs_diff_eq!(probs[0], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(probs[1], 0.5, epsilon = 1e-6);
}

#[test]
fn test_argmax_basic() {
    let scores = [0.1, 0.05, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    assert_eq!(argmax(&scores), Some(2));
}

/// 并列时取最小索引
#[test]
fn test_argmax_ties() {
    assert_eq!(argmax(&[0.0; 10]), Some(0));
    assert_eq!(argmax(&[0.1, 0.7, 0.3, 0.7]), Some(1));
}

#[test]
fn test_argmax_empty_and_nan() {
    assert_eq!(argmax(&[]), None);
    assert_eq!(argmax(&[f32::NAN, f32::NAN]), None);
    assert_eq!(argmax(&[f32::NAN, -1.0, -2.0]), Some(1));
}
