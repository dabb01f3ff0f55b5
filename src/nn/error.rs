/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : nn 模块的错误类型：构建期（BuildError）与推理期（InferenceError）
 */

use ndarray::ShapeError;
use thiserror::Error;

use super::layer::LayerKind;
use super::shape::{Kernel, Shape, Stride};

/// 单个层无法编译的具体原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildFailure {
    #[error("添加该层前尚未声明输入形状")]
    MissingInputShape,
    #[error("该层之后没有声明输出形状")]
    MissingOutputShape,
    #[error("添加卷积层前尚未设置卷积核")]
    MissingKernel,
    #[error("形状{0}的各维度须大于0")]
    InvalidShape(Shape),
    #[error("卷积核{0}的宽高须大于0")]
    InvalidKernel(Kernel),
    #[error("步长{0}须大于0")]
    InvalidStride(Stride),
    #[error("卷积核{kernel}超出输入尺寸{input}")]
    KernelExceedsInput { kernel: Kernel, input: Shape },
    #[error("由输出形状{output}反推出的填充为负：输入{input}，核{kernel}，步长{stride}")]
    NegativePadding {
        input: Shape,
        output: Shape,
        kernel: Kernel,
        stride: Stride,
    },
    #[error("按核与步长计算出的输出为{width}×{height}，与声明的输出{output}不符")]
    GeometryMismatch {
        width: usize,
        height: usize,
        output: Shape,
    },
    #[error("池化前后通道数须一致：输入{input}，输出{output}")]
    ChannelMismatch { input: usize, output: usize },
    #[error("形状参数过大，尺寸计算溢出")]
    Overflow,
    #[error("权重长度不匹配：期望 {expected}, 实际 {got}")]
    WeightsLength { expected: usize, got: usize },
    #[error("偏置长度不匹配：期望 {expected}, 实际 {got}")]
    BiasLength { expected: usize, got: usize },
}

/// 网络构建失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("网络中没有任何层")]
    Empty,
    #[error("第{index}层（{kind}）无法构建：{reason}")]
    Layer {
        index: usize,
        kind: LayerKind,
        reason: BuildFailure,
    },
}

impl BuildError {
    /// 出错层的序号（从0开始），`Empty` 时为 None
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Layer { index, .. } => Some(*index),
        }
    }
}

/// 推理失败（只影响本次调用，网络本身仍可继续使用）
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("网络输出为空，无法给出预测")]
    EmptyOutput,
    #[error("第{index}层（{kind}）执行失败：{source}")]
    LayerFailed {
        index: usize,
        kind: LayerKind,
        #[source]
        source: ShapeError,
    },
}
