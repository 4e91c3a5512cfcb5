// Elementwise arithmetic between same-shaped operands, and scaling by a constant.
pub mod add;
pub mod mul;

pub(crate) use add::{add_backward, add_forward};
pub(crate) use mul::{mul_backward, mul_forward};
