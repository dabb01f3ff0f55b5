/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : Layer 模块 - 层的声明（LayerSpec）与编译后的可执行层（CompiledLayer）
 *
 * LayerSpec 只记录参数，由 builder 配上输入/输出形状后编译成 CompiledLayer。
 * CompiledLayer 持有各自的后端数据（ndarray 矩阵、填充等），随 Network 一起释放。
 */

mod conv2d;
mod linear;
mod max_pool2d;

pub use conv2d::Conv2d;
pub use linear::Linear;
pub use max_pool2d::MaxPool2d;

use std::fmt;

use enum_dispatch::enum_dispatch;
use ndarray::{ErrorKind, ShapeError};

use super::error::BuildFailure;
use super::shape::{Activation, Kernel, Shape, Stride};

/// 层的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Convolution,
    MaxPooling,
    FullyConnected,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Convolution => "卷积层",
            Self::MaxPooling => "最大池化层",
            Self::FullyConnected => "全连接层",
        };
        write!(f, "{name}")
    }
}

/// 尚未编译的层声明
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSpec {
    /// 权重布局 [out_c][in_c][ky][kx]
    Convolution {
        kernel: Option<Kernel>,
        stride: Stride,
        weights: Vec<f32>,
        bias: Vec<f32>,
        activation: Activation,
    },
    /// 步长隐式等于窗口大小
    MaxPooling { kernel: Kernel },
    /// 权重布局按输出优先：W[o * in_size + i]
    FullyConnected {
        weights: Vec<f32>,
        bias: Vec<f32>,
        activation: Activation,
    },
}

impl LayerSpec {
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Convolution { .. } => LayerKind::Convolution,
            Self::MaxPooling { .. } => LayerKind::MaxPooling,
            Self::FullyConnected { .. } => LayerKind::FullyConnected,
        }
    }

    /// 配上输入/输出形状，编译为可执行层
    pub fn compile(self, input: Shape, output: Shape) -> Result<CompiledLayer, BuildFailure> {
        let layer = match self {
            Self::Convolution {
                kernel,
                stride,
                weights,
                bias,
                activation,
            } => {
                let kernel = kernel.ok_or(BuildFailure::MissingKernel)?;
                Conv2d::new(input, output, kernel, stride, weights, bias, activation)?.into()
            }
            Self::MaxPooling { kernel } => MaxPool2d::new(input, output, kernel)?.into(),
            Self::FullyConnected {
                weights,
                bias,
                activation,
            } => Linear::new(input, output, weights, bias, activation)?.into(),
        };
        Ok(layer)
    }
}

/// 可执行层的公共接口
#[enum_dispatch]
pub trait TraitLayer {
    fn kind(&self) -> LayerKind;

    fn input_shape(&self) -> Shape;

    fn output_shape(&self) -> Shape;

    /// 前向计算。输入长度须等于 `input_shape().size()`，否则后端拒绝执行并返回错误
    fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ShapeError>;
}

/// 编译后的层，由 Network 独占持有
#[enum_dispatch(TraitLayer)]
#[derive(Debug, Clone)]
pub enum CompiledLayer {
    Conv2d(Conv2d),
    MaxPool2d(MaxPool2d),
    Linear(Linear),
}

impl fmt::Display for CompiledLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.kind(),
            self.input_shape(),
            self.output_shape()
        )
    }
}

// ==================== 各层共用的构建期校验 ====================

fn check_shapes(input: Shape, output: Shape) -> Result<(), BuildFailure> {
    if !input.is_valid() {
        return Err(BuildFailure::InvalidShape(input));
    }
    if !output.is_valid() {
        return Err(BuildFailure::InvalidShape(output));
    }
    if input.checked_size().is_none() || output.checked_size().is_none() {
        return Err(BuildFailure::Overflow);
    }
    Ok(())
}

fn check_len(actual: usize, expected: usize) -> Result<(), ShapeError> {
    if actual != expected {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape));
    }
    Ok(())
}

/// 由目标输出形状反推对称填充：
/// pad = (stride * (out - 1) + kernel - in) / 2
///
/// 反推结果须满足 (in + 2 * pad - kernel) / stride + 1 == out，否则构建失败。
fn padding_for(
    input: Shape,
    output: Shape,
    kernel: Kernel,
    stride: Stride,
) -> Result<(usize, usize), BuildFailure> {
    if !kernel.is_valid() {
        return Err(BuildFailure::InvalidKernel(kernel));
    }
    if !stride.is_valid() {
        return Err(BuildFailure::InvalidStride(stride));
    }
    if kernel.width > input.width || kernel.height > input.height {
        return Err(BuildFailure::KernelExceedsInput { kernel, input });
    }

    let negative = || BuildFailure::NegativePadding {
        input,
        output,
        kernel,
        stride,
    };
    let axis = |step: usize, out: usize, k: usize, inp: usize| {
        let span = step
            .checked_mul(out - 1)
            .and_then(|v| v.checked_add(k))
            .ok_or(BuildFailure::Overflow)?;
        let numerator = span.checked_sub(inp).ok_or_else(negative)?;
        let pad = numerator / 2;
        let padded = pad
            .checked_mul(2)
            .and_then(|v| v.checked_add(inp))
            .ok_or(BuildFailure::Overflow)?;
        // k <= inp <= padded
        Ok::<_, BuildFailure>((pad, (padded - k) / step + 1))
    };

    let (pad_x, width) = axis(stride.x, output.width, kernel.width, input.width)?;
    let (pad_y, height) = axis(stride.y, output.height, kernel.height, input.height)?;

    if width != output.width || height != output.height {
        return Err(BuildFailure::GeometryMismatch {
            width,
            height,
            output,
        });
    }
    Ok((pad_x, pad_y))
}
