/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : MnistClassifier 单元测试（合成权重，不依赖真实模型文件）
 */

use approx::assert_abs_diff_eq;
use image::GrayImage;
use rand::Rng;

use super::synthetic_resources;
use crate::data::{ResourceError, WeightBundle};
use crate::errors::MnistError;
use crate::mnist::{IMAGE_SIZE, LAYER_RESOURCES, MnistClassifier, NUM_CLASSES, load_bundles};
use crate::nn::{BuildError, InferenceError, LayerKind, Shape};

#[test]
fn test_classifier_topology() {
    let classifier = MnistClassifier::new(&synthetic_resources(0)).unwrap();
    let network = classifier.network();

    assert_eq!(network.len(), 6);
    assert_eq!(network.input_shape(), Some(Shape::new(28, 28, 1)));
    assert_eq!(network.output_shape(), Some(Shape::flat(NUM_CLASSES)));
}

#[test]
fn test_classifier_predicts_bias_digit() {
    let classifier = MnistClassifier::new(&synthetic_resources(7)).unwrap();

    assert_eq!(classifier.predict(&[0.0; IMAGE_SIZE]).unwrap(), 7);
    assert_eq!(classifier.predict(&[1.0; IMAGE_SIZE]).unwrap(), 7);

    let scores = classifier.scores(&[0.5; IMAGE_SIZE]).unwrap();
    assert_eq!(scores.len(), NUM_CLASSES);
    assert_eq!(scores[7], 1.0);
}

#[test]
fn test_classifier_predict_bytes_extremes() {
    let classifier = MnistClassifier::new(&synthetic_resources(3)).unwrap();

    assert_eq!(classifier.predict_bytes(&[0u8; IMAGE_SIZE]).unwrap(), 3);
    assert_eq!(classifier.predict_bytes(&[255u8; IMAGE_SIZE]).unwrap(), 3);
}

#[test]
fn test_classifier_deterministic() {
    let classifier = MnistClassifier::new(&synthetic_resources(5)).unwrap();
    let mut rng = rand::thread_rng();
    let input: Vec<f32> = (0..IMAGE_SIZE).map(|_| rng.gen_range(0.0..1.0)).collect();

    let first = classifier.scores(&input).unwrap();
    let second = classifier.scores(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(classifier.predict(&input).unwrap(), 5);
}

#[test]
fn test_classifier_probabilities() {
    let classifier = MnistClassifier::new(&synthetic_resources(9)).unwrap();
    let probs = classifier.probabilities(&[0.0; IMAGE_SIZE]).unwrap();

    assert_eq!(probs.len(), NUM_CLASSES);
    assert_abs_diff_eq!(probs.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    assert!(probs.iter().enumerate().all(|(i, &p)| i == 9 || p < probs[9]));
}

#[test]
fn test_classifier_wrong_input_length() {
    let classifier = MnistClassifier::new(&synthetic_resources(1)).unwrap();

    for len in [0, 783, 785] {
        let err = classifier.predict(&vec![0.0; len]).unwrap_err();
        assert!(matches!(
            err,
            MnistError::Inference(InferenceError::LayerFailed {
                index: 0,
                kind: LayerKind::Convolution,
                ..
            })
        ));
    }
    assert!(classifier.predict_bytes(&[0u8; 100]).is_err());
}

#[test]
fn test_classifier_missing_resource() {
    let mut resources = synthetic_resources(0);
    resources.remove("model-h3b-1024");

    let err = MnistClassifier::new(&resources).unwrap_err();
    match err {
        MnistError::Resource(ResourceError::NotFound { name }) => {
            assert_eq!(name, "model-h3b-1024");
        }
        other => panic!("意外的错误: {other:?}"),
    }
}

#[test]
fn test_classifier_misaligned_resource() {
    let mut resources = synthetic_resources(0);
    resources.insert("model-h1b-32", vec![0u8; 127]);

    let err = MnistClassifier::new(&resources).unwrap_err();
    assert!(matches!(
        err,
        MnistError::Resource(ResourceError::Misaligned { len: 127, .. })
    ));
}

#[test]
fn test_classifier_length_mismatch_resource() {
    let resources = synthetic_resources(0).with_floats("model-h2b-64", &[0.0; 63]);

    let err = MnistClassifier::new(&resources).unwrap_err();
    assert!(matches!(
        err,
        MnistError::Resource(ResourceError::LengthMismatch {
            expected: 64,
            got: 63,
            ..
        })
    ));
}

/// 绕过资源校验直接给错误尺寸的权重，由网络构建报错
#[test]
fn test_classifier_from_bad_bundles() {
    let [h1, h2, h3, h4] = load_bundles(&synthetic_resources(0)).unwrap();
    let bad_h2 = WeightBundle::new(vec![0.0; 3 * 3 * 32 * 64], h2.bias);

    let err = MnistClassifier::from_bundles([h1, bad_h2, h3, h4]).unwrap_err();
    assert!(matches!(
        err,
        MnistError::Build(BuildError::Layer {
            index: 2,
            kind: LayerKind::Convolution,
            ..
        })
    ));
}

#[test]
fn test_layer_resource_names() {
    let names: Vec<&str> = LAYER_RESOURCES
        .iter()
        .flat_map(|layer| [layer.weights.0, layer.bias.0])
        .collect();
    assert_eq!(
        names,
        vec![
            "model-h1w-5x5x1x32",
            "model-h1b-32",
            "model-h2w-5x5x32x64",
            "model-h2b-64",
            "model-h3w-3136x1024",
            "model-h3b-1024",
            "model-h4w-1024x10",
            "model-h4b-10",
        ]
    );
}

#[test]
fn test_classifier_predict_image() {
    let classifier = MnistClassifier::new(&synthetic_resources(4)).unwrap();

    assert_eq!(classifier.predict_image(&GrayImage::new(28, 28)).unwrap(), 4);

    let err = classifier.predict_image(&GrayImage::new(28, 27)).unwrap_err();
    assert!(matches!(
        err,
        MnistError::InvalidImage {
            width: 28,
            height: 27,
            ..
        }
    ));
}

#[test]
fn test_classifier_predict_batch() {
    let classifier = MnistClassifier::new(&synthetic_resources(2)).unwrap();
    let inputs: Vec<Vec<f32>> = vec![vec![0.0; IMAGE_SIZE], vec![0.0; 10], vec![1.0; IMAGE_SIZE]];

    let results = classifier.predict_batch(&inputs);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().ok(), Some(&2));
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().ok(), Some(&2));
}
