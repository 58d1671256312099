use std::fmt;

/// A weighted link to the node at position
/// `target` in a network's evaluation order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub target: usize,
    pub weight: f32,
}

impl Connection {
    /// Returns the contribution of `value` to the target's input sum.
    pub fn transmit(&self, value: f32) -> f32 {
        value * self.weight
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-({:.3})-> {}", self.weight, self.target)
    }
}
