mod classifier;
mod config;

use crate::data::MemoryResources;
use crate::mnist::{LAYER_RESOURCES, NUM_CLASSES};

/// 全 0 权重，最后一层偏置在 `digit` 处为 1：任何输入都被判为 `digit`
fn synthetic_resources(digit: usize) -> MemoryResources {
    let mut resources = MemoryResources::new();
    for layer in LAYER_RESOURCES {
        let (w_name, w_len) = layer.weights;
        let (b_name, b_len) = layer.bias;
        let mut bias = vec![0.0; b_len];
        if b_len == NUM_CLASSES {
            bias[digit] = 1.0;
        }
        resources = resources
            .with_floats(w_name, &vec![0.0; w_len])
            .with_floats(b_name, &bias);
    }
    resources
}
