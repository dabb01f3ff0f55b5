/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 网络构建器 - 链式声明形状与层，一次性编译成不可变的 Network
 *
 * 声明顺序须严格交替：形状、层、形状、层……、形状。
 * 某层的输入是它之前最近声明的形状，输出是它之后紧跟着声明的形状。
 *
 * 构建分两步：
 * 1. 记录：链式调用只把条目按顺序追加进列表，不回头改动已添加的层；
 * 2. 配对 + 编译：`build` 时给每个层配上前后两个形状，再按顺序逐层编译，
 *    任何一层失败都会中止整个构建。
 */

use super::error::{BuildError, BuildFailure};
use super::layer::LayerSpec;
use super::network::Network;
use super::shape::{Activation, Kernel, Shape, Stride};

/// 构建器中记录的一个条目
#[derive(Debug, Clone)]
enum Entry {
    Shape(Shape),
    Layer(LayerSpec),
}

/// 配对好输入/输出形状、待编译的层
#[derive(Debug)]
struct ResolvedLayer {
    spec: LayerSpec,
    input: Shape,
    output: Shape,
}

/// 网络构建器
///
/// # 使用示例
/// ```
/// use digit_recognizer::nn::{Activation, NetworkBuilder};
///
/// let network = NetworkBuilder::new()
///     .set_shape(4, 4, 1)
///     .add_max_pooling(2, 2)
///     .set_shape(2, 2, 1)
///     .set_activation(Activation::Identity)
///     .add_fully_connected(vec![1.0; 4 * 3], vec![0.0; 3])
///     .set_flat_shape(3)
///     .build()
///     .unwrap();
/// assert_eq!(network.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    entries: Vec<Entry>,
    kernel: Option<Kernel>,
    stride: Stride,
    activation: Activation,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    /// 默认步长 (1, 1)，默认激活 ReLU，卷积核须显式设置
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            kernel: None,
            stride: Stride::default(),
            activation: Activation::ReLU,
        }
    }

    /// 声明当前形状：既是上一层的输出，也是下一层的输入
    pub fn set_shape(mut self, width: usize, height: usize, channels: usize) -> Self {
        self.entries.push(Entry::Shape(Shape::new(width, height, channels)));
        self
    }

    /// 声明一维形状 `size × 1 × 1`
    pub fn set_flat_shape(self, size: usize) -> Self {
        self.set_shape(size, 1, 1)
    }

    pub fn set_kernel(mut self, width: usize, height: usize) -> Self {
        self.kernel = Some(Kernel::new(width, height));
        self
    }

    pub fn set_stride(mut self, x: usize, y: usize) -> Self {
        self.stride = Stride::new(x, y);
        self
    }

    pub fn set_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// 添加卷积层，使用当前的卷积核、步长、激活设置
    pub fn add_convolution(mut self, weights: Vec<f32>, bias: Vec<f32>) -> Self {
        self.entries.push(Entry::Layer(LayerSpec::Convolution {
            kernel: self.kernel,
            stride: self.stride,
            weights,
            bias,
            activation: self.activation,
        }));
        self
    }

    /// 添加最大池化层，窗口 `width × height`，步长等于窗口
    pub fn add_max_pooling(mut self, width: usize, height: usize) -> Self {
        self.entries.push(Entry::Layer(LayerSpec::MaxPooling {
            kernel: Kernel::new(width, height),
        }));
        self
    }

    /// 添加全连接层，使用当前的激活设置
    pub fn add_fully_connected(mut self, weights: Vec<f32>, bias: Vec<f32>) -> Self {
        self.entries.push(Entry::Layer(LayerSpec::FullyConnected {
            weights,
            bias,
            activation: self.activation,
        }));
        self
    }

    /// 配对形状并逐层编译
    pub fn build(self) -> Result<Network, BuildError> {
        let resolved = resolve(self.entries)?;

        let mut layers = Vec::with_capacity(resolved.len());
        for (index, ResolvedLayer { spec, input, output }) in resolved.into_iter().enumerate() {
            let kind = spec.kind();
            let layer = spec
                .compile(input, output)
                .map_err(|reason| BuildError::Layer {
                    index,
                    kind,
                    reason,
                })?;
            layers.push(layer);
        }

        let network = Network::new(layers);
        log::info!("网络构建完成，共{}层", network.len());
        Ok(network)
    }
}

/// 给每个层配上它前后的形状
fn resolve(entries: Vec<Entry>) -> Result<Vec<ResolvedLayer>, BuildError> {
    let missing = |index: usize, spec: &LayerSpec, reason: BuildFailure| BuildError::Layer {
        index,
        kind: spec.kind(),
        reason,
    };

    let mut resolved = Vec::new();
    let mut current: Option<Shape> = None;
    let mut pending: Option<(Shape, LayerSpec)> = None;

    for entry in entries {
        match entry {
            Entry::Shape(shape) => {
                if let Some((input, spec)) = pending.take() {
                    resolved.push(ResolvedLayer {
                        spec,
                        input,
                        output: shape,
                    });
                }
                current = Some(shape);
            }
            Entry::Layer(spec) => {
                if let Some((_, previous)) = &pending {
                    return Err(missing(
                        resolved.len(),
                        previous,
                        BuildFailure::MissingOutputShape,
                    ));
                }
                let Some(input) = current else {
                    return Err(missing(
                        resolved.len(),
                        &spec,
                        BuildFailure::MissingInputShape,
                    ));
                };
                pending = Some((input, spec));
            }
        }
    }

    if let Some((_, spec)) = &pending {
        return Err(missing(
            resolved.len(),
            spec,
            BuildFailure::MissingOutputShape,
        ));
    }
    if resolved.is_empty() {
        return Err(BuildError::Empty);
    }
    Ok(resolved)
}
