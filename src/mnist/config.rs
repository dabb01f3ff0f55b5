//! 分类器配置
//!
//! JSON 格式，例如：
//! ```json
//! { "weights_dir": "assets", "extension": "bin" }
//! ```
//! `extension` 可省略，默认 `"bin"`；显式写 `null` 则只按资源名原样查找。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::DirectoryResources;
use crate::errors::MnistError;

const DEFAULT_WEIGHTS_DIR: &str = "assets";
const DEFAULT_EXTENSION: &str = "bin";

fn default_extension() -> Option<String> {
    Some(DEFAULT_EXTENSION.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// 8 个权重资源所在目录
    pub weights_dir: PathBuf,
    /// 资源文件的备选扩展名
    #[serde(default = "default_extension")]
    pub extension: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            weights_dir: PathBuf::from(DEFAULT_WEIGHTS_DIR),
            extension: default_extension(),
        }
    }
}

impl ClassifierConfig {
    pub fn new(weights_dir: impl Into<PathBuf>) -> Self {
        Self {
            weights_dir: weights_dir.into(),
            ..Self::default()
        }
    }

    /// 从 JSON 文件读取配置
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MnistError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MnistError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| MnistError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 按配置生成目录资源源
    pub fn resources(&self) -> DirectoryResources {
        let resources = DirectoryResources::new(self.weights_dir.clone());
        match &self.extension {
            Some(ext) => resources.with_extension(ext.as_str()),
            None => resources,
        }
    }
}
