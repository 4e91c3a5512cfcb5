pub mod ln;

pub(crate) use ln::{ln_backward, ln_forward};
