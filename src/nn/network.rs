/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 组装好的神经网络：按顺序执行的编译层序列，构建后不可变
 */

use std::fmt;

use super::error::InferenceError;
use super::layer::{CompiledLayer, TraitLayer};
use super::shape::Shape;

/// 不可变的前馈网络
///
/// 只通过 `&self` 做推理，可在多个线程间共享同一个实例并发调用。
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<CompiledLayer>,
}

impl Network {
    pub(crate) fn new(layers: Vec<CompiledLayer>) -> Self {
        Self { layers }
    }

    /// 依次执行各层。任何一层执行失败都返回空向量（而非部分结果），
    /// 调用方须把空结果当作失败处理
    pub fn apply(&self, input: &[f32]) -> Vec<f32> {
        match self.try_apply(input) {
            Ok(outputs) => outputs,
            Err(e) => {
                log::warn!("{e}");
                Vec::new()
            }
        }
    }

    /// 与 `apply` 相同，但保留失败的具体原因
    pub fn try_apply(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError> {
        let mut outputs: Option<Vec<f32>> = None;
        for (index, layer) in self.layers.iter().enumerate() {
            let inputs = outputs.as_deref().unwrap_or(input);
            let next = layer
                .forward(inputs)
                .map_err(|source| InferenceError::LayerFailed {
                    index,
                    kind: layer.kind(),
                    source,
                })?;
            outputs = Some(next);
        }
        outputs.ok_or(InferenceError::EmptyOutput)
    }

    pub fn layers(&self) -> &[CompiledLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// 第一层的输入形状
    pub fn input_shape(&self) -> Option<Shape> {
        self.layers.first().map(TraitLayer::input_shape)
    }

    /// 最后一层的输出形状
    pub fn output_shape(&self) -> Option<Shape> {
        self.layers.last().map(TraitLayer::output_shape)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network（{}层）", self.layers.len())?;
        for (index, layer) in self.layers.iter().enumerate() {
            writeln!(f, "  [{index}] {layer}")?;
        }
        Ok(())
    }
}
