/*
 * @Author       : 老董
 * @Date         : 2026-10-17
 * @Description  : 层与层之间流动的形状描述，以及卷积核、步长、激活函数这些小积木
 *
 * 缓冲区布局约定：按通道分平面，每个平面内行优先，
 * 即 index = c * height * width + y * width + x
 */

use std::fmt;

/// 特征图堆叠的形状：宽 × 高 × 通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl Shape {
    pub const fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// 一维形状（向量），等价于 `size × 1 × 1`
    pub const fn flat(size: usize) -> Self {
        Self::new(size, 1, 1)
    }

    /// 元素总数，也就是该形状对应缓冲区的长度
    ///
    /// 编译层时已用 [`Shape::checked_size`] 校验过不会溢出
    pub const fn size(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// 元素总数，溢出时返回 None
    pub fn checked_size(&self) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(self.channels)
    }

    /// 单个通道平面的元素数
    pub const fn plane(&self) -> usize {
        self.width * self.height
    }

    /// 各维度是否都大于0
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.channels > 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.width, self.height, self.channels)
    }
}

/// 卷积核（或池化窗口）的空间尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kernel {
    pub width: usize,
    pub height: usize,
}

impl Kernel {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// 步长，默认 (1, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride {
    pub x: usize,
    pub y: usize,
}

impl Stride {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn is_valid(&self) -> bool {
        self.x > 0 && self.y > 0
    }
}

impl Default for Stride {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 逐元素激活函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    Identity,
    ReLU,
}

impl Activation {
    #[inline]
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Self::Identity => value,
            Self::ReLU => value.max(0.0),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identity => "identity",
            Self::ReLU => "relu",
        };
        write!(f, "{name}")
    }
}
