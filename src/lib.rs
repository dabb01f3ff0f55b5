//! # Digit Recognizer
//!
//! 手写数字识别的推理核心：用链式构建器按固定拓扑组装一个小型卷积神经网络
//! （conv → pool → conv → pool → fc → fc），从平铺的权重资源加载参数，
//! 对 28×28 的灰度输入做前向推理，给出 0-9 中的一个数字。
//!
//! 不包含训练、反向传播、任意拓扑或 GPU 调度。
//!
//! ```ignore
//! use digit_recognizer::mnist::{ClassifierConfig, MnistClassifier};
//!
//! let classifier = MnistClassifier::from_config(&ClassifierConfig::new("assets"))?;
//! let digit = classifier.predict_bytes(&pixels)?;
//! ```

pub mod data;
pub mod errors;
pub mod mnist;
pub mod nn;

pub use errors::MnistError;
pub use mnist::{ClassifierConfig, MnistClassifier};
