/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 2D 最大池化层（推理用）
 *
 * 设计决策：
 * - 步长固定等于窗口大小（窗口互不重叠）
 * - 填充公式与卷积层相同，落在填充区的格子不参与取最大值
 * - 无权重、无偏置，激活恒为 identity
 */

use ndarray::{Array3, ArrayView3, ShapeError};

use super::{LayerKind, TraitLayer, check_len, check_shapes, padding_for};
use crate::nn::error::BuildFailure;
use crate::nn::shape::{Kernel, Shape, Stride};

/// 2D 最大池化层
#[derive(Debug, Clone)]
pub struct MaxPool2d {
    input: Shape,
    output: Shape,
    kernel: Kernel,
    padding: (usize, usize), // (pX, pY)
}

impl MaxPool2d {
    pub fn new(input: Shape, output: Shape, kernel: Kernel) -> Result<Self, BuildFailure> {
        check_shapes(input, output)?;
        if input.channels != output.channels {
            return Err(BuildFailure::ChannelMismatch {
                input: input.channels,
                output: output.channels,
            });
        }
        let padding = padding_for(input, output, kernel, Self::stride_of(kernel))?;

        log::debug!("最大池化层 {input} -> {output}，窗口 {kernel}，填充 {padding:?}");

        Ok(Self {
            input,
            output,
            kernel,
            padding,
        })
    }

    const fn stride_of(kernel: Kernel) -> Stride {
        Stride::new(kernel.width, kernel.height)
    }

    pub const fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub const fn padding(&self) -> (usize, usize) {
        self.padding
    }
}

impl TraitLayer for MaxPool2d {
    fn kind(&self) -> LayerKind {
        LayerKind::MaxPooling
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

        let (k_w, k_h) = (self.kernel.width, self.kernel.height);
        let (pad_x, pad_y) = self.padding;
        let (in_w, in_h) = (self.input.width, self.input.height);

        let y = Array3::from_shape_fn(
            (self.output.channels, self.output.height, self.output.width),
            |(c, oy, ox)| {
                let mut max_val = f32::NEG_INFINITY;
                for ky in 0..k_h {
                    let Some(iy) = (oy * k_h + ky).checked_sub(pad_y) else {
                        continue;
                    };
                    if iy >= in_h {
                        continue;
                    }
                    for kx in 0..k_w {
                        let Some(ix) = (ox * k_w + kx).checked_sub(pad_x) else {
                            continue;
                        };
                        if ix >= in_w {
                            continue;
                        }
                        max_val = max_val.max(x[[c, iy, ix]]);
                    }
                }
                // 窗口完全落在填充区
                if max_val == f32::NEG_INFINITY { 0.0 } else { max_val }
            },
        );

        Ok(y.into_raw_vec())
    }
}
