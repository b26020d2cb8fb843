//! 事件名（EventBody）
//!
//! 由载荷类型自身声明稳定的事件名，避免依赖 `type_name::<T>()` 等运行时内省。
//! 自定义类型通常通过 `#[derive(EventBody)]` 获得实现。
//!
use std::any::Any;

/// 可作为事件载荷并携带规范名称的类型
///
/// 关联常量：
/// - `NAME`：事件的稳定名称（不含模块路径与泛型参数），用于发布与按名过滤。
///   允许为空字符串：空名事件照常发布，不做拒绝。
pub trait EventBody: Any + Send + Sync {
    const NAME: &'static str;
}

macro_rules! impl_event_body {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl EventBody for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

impl_event_body! {
    String => "String",
    &'static str => "str",
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    // 匿名类型没有名称
    () => "",
}
