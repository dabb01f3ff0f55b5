/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 全连接层（推理用）
 *
 * 输入/输出都按一维向量看待：in_size = input.size()，out_size = output.size()
 * 计算：output = activation(W · x + b)，W 形状 [out_size, in_size]
 */

use ndarray::{Array1, Array2, ArrayView1, ShapeError};

use super::{LayerKind, TraitLayer, check_len, check_shapes};
use crate::nn::error::BuildFailure;
use crate::nn::shape::{Activation, Shape};

/// 全连接层
#[derive(Debug, Clone)]
pub struct Linear {
    input: Shape,
    output: Shape,
    /// 权重 [out_size, in_size]
    weights: Array2<f32>,
    /// 偏置 [out_size]
    bias: Array1<f32>,
    activation: Activation,
}

impl Linear {
    pub fn new(
        input: Shape,
        output: Shape,
        weights: Vec<f32>,
        bias: Vec<f32>,
        activation: Activation,
    ) -> Result<Self, BuildFailure> {
        check_shapes(input, output)?;

        let (in_size, out_size) = (input.size(), output.size());
        let expected = in_size
            .checked_mul(out_size)
            .ok_or(BuildFailure::Overflow)?;
        let got = weights.len();
        if got != expected {
            return Err(BuildFailure::WeightsLength { expected, got });
        }
        if bias.len() != out_size {
            return Err(BuildFailure::BiasLength {
                expected: out_size,
                got: bias.len(),
            });
        }

        let weights = Array2::from_shape_vec((out_size, in_size), weights)
            .map_err(|_| BuildFailure::WeightsLength { expected, got })?;

        log::debug!("全连接层 {in_size} -> {out_size}，激活 {activation}");

        Ok(Self {
            input,
            output,
            weights,
            bias: Array1::from_vec(bias),
            activation,
        })
    }

    pub fn in_size(&self) -> usize {
        self.input.size()
    }

    pub fn out_size(&self) -> usize {
        self.output.size()
    }
}

impl TraitLayer for Linear {
    fn kind(&self) -> LayerKind {
        LayerKind::FullyConnected
    }

    fn input_shape(&self) -> Shape {
        self.input
    }

    fn output_shape(&self) -> Shape {
        self.output
    }

    fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ShapeError> {
        check_len(input.len(), self.input.size())?;
        let x = ArrayView1::from_shape(self.input.size(), input)?;

        let activation = self.activation;
        let y = (self.weights.dot(&x) + &self.bias).mapv(|v| activation.apply(v));

        Ok(y.into_raw_vec())
    }
}
