//! 数据加载模块
//!
//! 提供权重资源加载与输入/输出变换功能。
//!
//! # 主要组件
//!
//! - [`ResourceProvider`]: 按名字提供原始字节的资源源
//! - [`DirectoryResources`] / [`MemoryResources`]: 磁盘目录与内存两种实现
//! - [`WeightBundle`]: 一个可学习层的 (权重, 偏置)
//! - [`transforms`]: 像素归一化、softmax、argmax
//! - [`ResourceError`]: 资源加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use digit_recognizer::data::{DirectoryResources, WeightBundle};
//!
//! let resources = DirectoryResources::new("assets").with_extension("bin");
//! let h1 = WeightBundle::load(
//!     &resources,
//!     ("model-h1w-5x5x1x32", 5 * 5 * 32),
//!     ("model-h1b-32", 32),
//! )?;
//! ```

pub mod error;
mod loader;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::ResourceError;
pub use loader::{
    DirectoryResources, MemoryResources, ResourceProvider, WeightBundle, decode_f32_le,
    encode_f32_le, load_floats,
};
