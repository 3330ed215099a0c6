#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullSettings {}
