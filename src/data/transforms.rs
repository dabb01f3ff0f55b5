//! 数据变换函数
//!
//! 输入侧的像素归一化，以及输出侧的 softmax、argmax。

/// 将 0-255 像素值归一化到 0-1（墨迹越多值越大）
///
/// # 参数
/// - `pixels`: 原始像素，值范围 [0, 255]
///
/// # 返回
/// 归一化后的数组，值范围 [0, 1]
pub fn normalize_pixels(pixels: &[u8]) -> Vec<f32> {
    pixels.iter().map(|&p| f32::from(p) / 255.0).collect()
}

/// 白底黑字的位图转换为墨迹高值约定：`1 - p / 255`
pub fn invert_ink(pixels: &[u8]) -> Vec<f32> {
    pixels.iter().map(|&p| 1.0 - f32::from(p) / 255.0).collect()
}

/// softmax，先减去最大值以避免溢出
///
/// # 示例
/// ```
/// use digit_recognizer::data::transforms::softmax;
///
/// let probs = softmax(&[1.0, 1.0]);
/// assert!((probs[0] - 0.5).abs() < 1e-6);
/// ```
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|&s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// 最大值所在的索引；并列时取最小的索引，NaN 不参与比较
///
/// 空数组（或全为 NaN）返回 None
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, max)) if score <= max => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
