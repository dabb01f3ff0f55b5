/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : MNIST 手写数字分类器：加载 8 个权重资源，按固定拓扑构建 CNN 并做推理
 *
 * 网络结构：
 * ```text
 * Input [28×28×1]
 *     ↓
 * conv1 (1→32, 5x5, stride 1) → ReLU → [28×28×32]
 *     ↓
 * max_pool1 (2x2) → [14×14×32]
 *     ↓
 * conv2 (32→64, 5x5, stride 1) → ReLU → [14×14×64]
 *     ↓
 * max_pool2 (2x2) → [7×7×64]
 *     ↓
 * fc1 (3136 → 1024) → ReLU
 *     ↓
 * fc2 (1024 → 10) → 原始分数（argmax / softmax 在外部做）
 * ```
 */

mod config;

#[cfg(test)]
mod tests;

pub use config::ClassifierConfig;

use image::GrayImage;
use rayon::prelude::*;

use crate::data::transforms::{argmax, normalize_pixels, softmax};
use crate::data::{ResourceProvider, WeightBundle};
use crate::errors::MnistError;
use crate::nn::{Activation, BuildError, InferenceError, Network, NetworkBuilder};

/// 输入图像宽度
pub const IMAGE_WIDTH: usize = 28;
/// 输入图像高度
pub const IMAGE_HEIGHT: usize = 28;
/// 输入向量长度
pub const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;
/// 类别数（数字 0-9）
pub const NUM_CLASSES: usize = 10;

/// 一个可学习层对应的两个资源：(名字, 元素个数)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerResources {
    pub weights: (&'static str, usize),
    pub bias: (&'static str, usize),
}

/// 4 个可学习层的权重资源，按网络中的先后顺序排列
pub const LAYER_RESOURCES: [LayerResources; 4] = [
    LayerResources {
        weights: ("model-h1w-5x5x1x32", 5 * 5 * 32),
        bias: ("model-h1b-32", 32),
    },
    LayerResources {
        weights: ("model-h2w-5x5x32x64", 5 * 5 * 32 * 64),
        bias: ("model-h2b-64", 64),
    },
    LayerResources {
        weights: ("model-h3w-3136x1024", 3136 * 1024),
        bias: ("model-h3b-1024", 1024),
    },
    LayerResources {
        weights: ("model-h4w-1024x10", 1024 * 10),
        bias: ("model-h4b-10", 10),
    },
];

/// 按顺序读取 4 组权重，任何一个资源缺失或长度不符都会失败
pub fn load_bundles<P: ResourceProvider + ?Sized>(
    resources: &P,
) -> Result<[WeightBundle; 4], MnistError> {
    let [h1, h2, h3, h4] = LAYER_RESOURCES;
    Ok([
        WeightBundle::load(resources, h1.weights, h1.bias)?,
        WeightBundle::load(resources, h2.weights, h2.bias)?,
        WeightBundle::load(resources, h3.weights, h3.bias)?,
        WeightBundle::load(resources, h4.weights, h4.bias)?,
    ])
}

/// 用固定拓扑组装网络
pub fn build_network(bundles: [WeightBundle; 4]) -> Result<Network, BuildError> {
    let [h1, h2, h3, h4] = bundles;
    NetworkBuilder::new()
        .set_shape(28, 28, 1)
        .set_kernel(5, 5)
        .set_stride(1, 1)
        .set_activation(Activation::ReLU)
        .add_convolution(h1.weights, h1.bias)
        .set_shape(28, 28, 32)
        .add_max_pooling(2, 2)
        .set_shape(14, 14, 32)
        .add_convolution(h2.weights, h2.bias)
        .set_shape(14, 14, 64)
        .add_max_pooling(2, 2)
        .set_shape(7, 7, 64)
        .add_fully_connected(h3.weights, h3.bias)
        .set_flat_shape(1024)
        .set_activation(Activation::Identity)
        .add_fully_connected(h4.weights, h4.bias)
        .set_flat_shape(NUM_CLASSES)
        .build()
}

/// MNIST 手写数字分类器
///
/// 只有在全部资源加载成功且网络构建成功时才能创建；创建后不可变，
/// 可在多线程间共享。
#[derive(Debug, Clone)]
pub struct MnistClassifier {
    network: Network,
}

impl MnistClassifier {
    /// 从资源源加载权重并构建网络
    pub fn new<P: ResourceProvider + ?Sized>(resources: &P) -> Result<Self, MnistError> {
        let bundles = load_bundles(resources)?;
        Self::from_bundles(bundles)
    }

    /// 按配置从磁盘目录加载
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, MnistError> {
        Self::new(&config.resources())
    }

    /// 直接用已解码的权重构建
    pub fn from_bundles(bundles: [WeightBundle; 4]) -> Result<Self, MnistError> {
        let network = build_network(bundles)?;
        log::info!("MNIST 分类器已就绪\n{network}");
        Ok(Self { network })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// 10 个类别的原始分数
    ///
    /// `input` 为 784 个 [0, 1] 范围的浮点数（28×28 行优先，墨迹越多值越大）
    pub fn scores(&self, input: &[f32]) -> Result<Vec<f32>, MnistError> {
        self.network.try_apply(input).map_err(MnistError::from)
    }

    /// 10 个类别的 softmax 概率
    pub fn probabilities(&self, input: &[f32]) -> Result<Vec<f32>, MnistError> {
        Ok(softmax(&self.scores(input)?))
    }

    /// 预测数字；分数并列时取最小的数字
    pub fn predict(&self, input: &[f32]) -> Result<usize, MnistError> {
        let scores = self.scores(input)?;
        argmax(&scores).ok_or_else(|| InferenceError::EmptyOutput.into())
    }

    /// 对 0-255 的原始像素做 `v / 255` 归一化后预测
    pub fn predict_bytes(&self, pixels: &[u8]) -> Result<usize, MnistError> {
        self.predict(&normalize_pixels(pixels))
    }

    /// 对已预处理好的 28×28 灰度图预测（墨迹越多像素值越大）
    pub fn predict_image(&self, image: &GrayImage) -> Result<usize, MnistError> {
        let (width, height) = image.dimensions();
        if width as usize != IMAGE_WIDTH || height as usize != IMAGE_HEIGHT {
            return Err(MnistError::InvalidImage {
                expected_width: IMAGE_WIDTH as u32,
                expected_height: IMAGE_HEIGHT as u32,
                width,
                height,
            });
        }
        self.predict_bytes(image.as_raw())
    }

    /// 多个样本并行预测，每个样本的结果互不影响
    pub fn predict_batch<I>(&self, inputs: &[I]) -> Vec<Result<usize, MnistError>>
    where
        I: AsRef<[f32]> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.predict(input.as_ref()))
            .collect()
    }
}
