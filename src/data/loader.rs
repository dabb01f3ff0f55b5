//! 权重加载
//!
//! 权重以具名二进制资源的形式存放，内容是小端序 IEEE-754 f32 的平铺数组。
//! 资源从哪里来由 [`ResourceProvider`] 决定：
//! - [`DirectoryResources`]: 从磁盘目录按名字读取
//! - [`MemoryResources`]: 内存中的资源表（嵌入式资源、测试）

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};

use crate::data::error::ResourceError;

/// 按名字提供原始字节的资源源
pub trait ResourceProvider {
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError>;
}

/// 从目录读取资源：先找 `<root>/<name>`，不存在再找 `<root>/<name>.<extension>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResources {
    root: PathBuf,
    extension: Option<String>,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: None,
        }
    }

    /// 设置备选扩展名（不含点号）
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let exact = self.root.join(name);
        if exact.is_file() {
            return Some(exact);
        }
        let ext = self.extension.as_deref()?;
        let with_ext = self.root.join(format!("{name}.{ext}"));
        with_ext.is_file().then_some(with_ext)
    }
}

impl ResourceProvider for DirectoryResources {
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.resolve(name).ok_or_else(|| ResourceError::NotFound {
            name: name.to_string(),
        })?;
        log::debug!("读取权重资源 {}", path.display());
        fs::read(&path).map_err(|source| ResourceError::Io {
            name: name.to_string(),
            source,
        })
    }
}

/// 内存中的资源表
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加资源
    pub fn with(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// 添加（或替换）资源
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.blobs.insert(name.into(), bytes);
    }

    /// 以小端序 f32 的形式添加资源
    pub fn with_floats(self, name: impl Into<String>, values: &[f32]) -> Self {
        self.with(name, encode_f32_le(values))
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.blobs.remove(name)
    }
}

impl ResourceProvider for MemoryResources {
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        self.blobs
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }
}

/// 把小端序字节解析为 f32 数组
pub fn decode_f32_le(name: &str, bytes: &[u8]) -> Result<Vec<f32>, ResourceError> {
    if bytes.len() % 4 != 0 {
        return Err(ResourceError::Misaligned {
            name: name.to_string(),
            len: bytes.len(),
        });
    }
    let mut floats = vec![0.0f32; bytes.len() / 4];
    LittleEndian::read_f32_into(bytes, &mut floats);
    Ok(floats)
}

/// 把 f32 数组编码为小端序字节
pub fn encode_f32_le(values: &[f32]) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * 4];
    LittleEndian::write_f32_into(values, &mut bytes);
    bytes
}

/// 读取资源并校验元素个数
pub fn load_floats<P: ResourceProvider + ?Sized>(
    resources: &P,
    name: &str,
    expected: usize,
) -> Result<Vec<f32>, ResourceError> {
    let floats = decode_f32_le(name, &resources.load(name)?)?;
    if floats.len() != expected {
        return Err(ResourceError::LengthMismatch {
            name: name.to_string(),
            expected,
            got: floats.len(),
        });
    }
    Ok(floats)
}

/// 一个可学习层的 (权重, 偏置)，组装网络时被消耗
#[derive(Debug, Clone, PartialEq)]
pub struct WeightBundle {
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
}

impl WeightBundle {
    pub fn new(weights: Vec<f32>, bias: Vec<f32>) -> Self {
        Self { weights, bias }
    }

    /// 按资源名读取一对权重与偏置，并校验各自的元素个数
    pub fn load<P: ResourceProvider + ?Sized>(
        resources: &P,
        weights: (&str, usize),
        bias: (&str, usize),
    ) -> Result<Self, ResourceError> {
        Ok(Self {
            weights: load_floats(resources, weights.0, weights.1)?,
            bias: load_floats(resources, bias.0, bias.1)?,
        })
    }
}
