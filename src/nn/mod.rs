/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 负责神经网络（neural network）的构建与前向推理
 */

mod builder;
mod error;
pub mod layer;
mod network;
mod shape;

pub use builder::NetworkBuilder;
pub use error::{BuildError, BuildFailure, InferenceError};
pub use layer::{CompiledLayer, LayerKind, LayerSpec, TraitLayer};
pub use network::Network;
pub use shape::{Activation, Kernel, Shape, Stride};
