//! ClassifierConfig 单元测试

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::synthetic_resources;
use crate::data::ResourceProvider;
use crate::errors::MnistError;
use crate::mnist::{ClassifierConfig, IMAGE_SIZE, LAYER_RESOURCES, MnistClassifier};

#[test]
fn test_config_default() {
    let config = ClassifierConfig::default();

    assert_eq!(config.weights_dir, PathBuf::from("assets"));
    assert_eq!(config.extension.as_deref(), Some("bin"));
    assert_eq!(ClassifierConfig::new("assets"), config);
}

#[test]
fn test_config_from_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "weights_dir": "/opt/mnist", "extension": null }"#).unwrap();

    let config = ClassifierConfig::from_json_file(&path).unwrap();
    assert_eq!(config.weights_dir, PathBuf::from("/opt/mnist"));
    assert_eq!(config.extension, None);
    assert_eq!(config.resources().root(), PathBuf::from("/opt/mnist").as_path());
}

#[test]
fn test_config_extension_defaults_to_bin() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "weights_dir": "weights" }"#).unwrap();

    let config = ClassifierConfig::from_json_file(&path).unwrap();
    assert_eq!(config.extension.as_deref(), Some("bin"));
}

#[test]
fn test_config_bad_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ weights_dir = ").unwrap();

    let err = ClassifierConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, MnistError::ConfigFormat { .. }));
}

#[test]
fn test_config_missing_file() {
    let dir = tempdir().unwrap();
    let err = ClassifierConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();

    assert!(matches!(err, MnistError::ConfigIo { .. }));
}

/// 按配置从磁盘目录加载 `<name>.bin` 形式的权重文件
#[test]
fn test_classifier_from_config() {
    let dir = tempdir().unwrap();
    let resources = synthetic_resources(6);
    for layer in LAYER_RESOURCES {
        for (name, _) in [layer.weights, layer.bias] {
            let bytes = resources.load(name).unwrap();
            fs::write(dir.path().join(format!("{name}.bin")), bytes).unwrap();
        }
    }

    let classifier = MnistClassifier::from_config(&ClassifierConfig::new(dir.path())).unwrap();
    assert_eq!(classifier.predict(&[0.0; IMAGE_SIZE]).unwrap(), 6);
}
