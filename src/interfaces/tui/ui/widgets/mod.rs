//! 可复用 UI 组件

mod input_field;

pub use input_field::InputField;
