use std::path::PathBuf;

use thiserror::Error;

use crate::data::ResourceError;
use crate::nn::{BuildError, InferenceError};

/// 分类器对外的统一错误类型
///
/// 构建期错误（资源、网络构建、配置）都会让分类器无法创建；
/// 推理期错误只影响当次调用。
#[derive(Error, Debug)]
pub enum MnistError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Inference(#[from] InferenceError),

    // 配置文件
    #[error("读取配置文件 {path:?} 失败: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("配置文件 {path:?} 格式错误: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("输入图像尺寸须为{expected_width}x{expected_height}，实际为{width}x{height}")]
    InvalidImage {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
}
