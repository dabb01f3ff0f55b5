//! 权重资源加载错误类型定义

use thiserror::Error;

/// 权重资源加载相关错误
#[derive(Debug, Error)]
pub enum ResourceError {
    /// 资源不存在
    #[error("找不到权重资源: {name}")]
    NotFound { name: String },

    /// IO 错误
    #[error("读取权重资源 {name} 失败: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// 字节数不是 4 的倍数，无法解析为 f32
    #[error("权重资源 {name} 的字节数 {len} 不是 4 的倍数")]
    Misaligned { name: String, len: usize },

    /// 元素个数与该层需要的不一致
    #[error("权重资源 {name} 的元素个数不匹配: 期望 {expected}, 实际 {got}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

impl ResourceError {
    /// 出错资源的名称
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name }
            | Self::Io { name, .. }
            | Self::Misaligned { name, .. }
            | Self::LengthMismatch { name, .. } => name,
        }
    }
}
