/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 2D 卷积层（推理用）
 *
 * 设计决策：
 * - 单个层处理多通道，权重布局 [C_out, C_in, kH, kW]
 * - 填充由声明的输出形状反推（见 `padding_for`），越界位置按 0 参与计算
 * - 前向计算走 im2col + 矩阵乘法，矩阵乘法交给 ndarray
 *
 * 计算：output = activation(conv2d(x, K) + b)
 */

use ndarray::{Array1, Array2, ArrayView3, Axis, ShapeError};

use super::{LayerKind, TraitLayer, check_len, check_shapes, padding_for};
use crate::nn::error::BuildFailure;
use crate::nn::shape::{Activation, Kernel, Shape, Stride};

/// 2D 卷积层
#[derive(Debug, Clone)]
pub struct Conv2d {
    input: Shape,
    output: Shape,
    kernel: Kernel,
    stride: Stride,
    padding: (usize, usize), // (pX, pY)
    /// 卷积核展平后的矩阵 [C_out, C_in * kH * kW]
    weights: Array2<f32>,
    /// 偏置 [C_out]
    bias: Array1<f32>,
    activation: Activation,
}

impl Conv2d {
    /// 创建卷积层
    ///
    /// # 参数
    /// - `input` / `output`: 输入、输出形状（输出决定填充）
    /// - `kernel`: 卷积核大小
    /// - `stride`: 步长
    /// - `weights`: 长度须为 kW * kH * C_in * C_out
    /// - `bias`: 长度须为 C_out
    pub fn new(
        input: Shape,
        output: Shape,
        kernel: Kernel,
        stride: Stride,
        weights: Vec<f32>,
        bias: Vec<f32>,
        activation: Activation,
    ) -> Result<Self, BuildFailure> {
        check_shapes(input, output)?;
        let padding = padding_for(input, output, kernel, stride)?;

        // kernel 不超过输入平面，patch 不会溢出
        let patch = input.channels * kernel.height * kernel.width;
        let expected = patch
            .checked_mul(output.channels)
            .ok_or(BuildFailure::Overflow)?;
        if weights.len() != expected {
            return Err(BuildFailure::WeightsLength {
                expected,
                got: weights.len(),
            });
        }
        if bias.len() != output.channels {
            return Err(BuildFailure::BiasLength {
                expected: output.channels,
                got: bias.len(),
            });
        }

        let got = weights.len();
        let weights = Array2::from_shape_vec((output.channels, patch), weights)
            .map_err(|_| BuildFailure::WeightsLength { expected, got })?;

        log::debug!(
            "卷积层 {input} -> {output}，核 {kernel}，步长 {stride}，填充 {padding:?}"
        );

        Ok(Self {
            input,
            output,
            kernel,
            stride,
            padding,
            weights,
            bias: Array1::from_vec(bias),
            activation,
        })
    }

    /// 获取填充 (pX, pY)
    pub const fn padding(&self) -> (usize, usize) {
        self.padding
    }

    pub const fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub const fn stride(&self) -> Stride {
        self.stride
    }

    /// 把输入展开成 [C_in * kH * kW, outH * outW] 的列矩阵
    fn im2col(&self, x: &ArrayView3<f32>) -> Array2<f32> {
        let (k_w, k_h) = (self.kernel.width, self.kernel.height);
        let (s_x, s_y) = (self.stride.x, self.stride.y);
        let (pad_x, pad_y) = self.padding;
        let (out_w, out_h) = (self.output.width, self.output.height);
        let (in_w, in_h) = (self.input.width, self.input.height);

        let mut cols = Array2::<f32>::zeros((self.input.channels * k_h * k_w, out_h * out_w));
        for c in 0..self.input.channels {
            for ky in 0..k_h {
                for kx in 0..k_w {
                    let row = (c * k_h + ky) * k_w + kx;
                    for oy in 0..out_h {
                        // 落在填充区的位置保持为 0
                        let Some(iy) = (oy * s_y + ky).checked_sub(pad_y) else {
                            continue;
                        };
                        if iy >= in_h {
                            continue;
                        }
                        for ox in 0..out_w {
                            let Some(ix) = (ox * s_x + kx).checked_sub(pad_x) else {
                                continue;
                            };
                            if ix >= in_w {
                                continue;
                            }
                            cols[[row, oy * out_w + ox]] = x[[c, iy, ix]];
                        }
                    }
                }
            }
        }
        cols
    }
}

impl TraitLayer for Conv2d {
    fn kind(&self) -> LayerKind {
        LayerKind::Convolution
    }

    fn input_shape(&self) -> Shape {
        self.input
    }

    fn output_shape(&self) -> Shape {
        self.output
    }

    fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ShapeError> {
        check_len(input.len(), self.input.size())?;
        let x = ArrayView3::from_shape(
            (self.input.channels, self.input.height, self.input.width),
            input,
        )?;

        let cols = self.im2col(&x);
        // [C_out, outH * outW]，行优先展平后正好是按通道分平面的布局
        let mut y = self.weights.dot(&cols);
        y += &self.bias.view().insert_axis(Axis(1));
        let activation = self.activation;
        y.mapv_inplace(|v| activation.apply(v));

        Ok(y.into_raw_vec())
    }
}
