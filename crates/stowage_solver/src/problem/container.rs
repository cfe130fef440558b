use serde::Serialize;

/// The single capacity constraint of one solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Container {
    capacity: u32,
}

impl Container {
    pub fn new(capacity: u32) -> Self {
        Container { capacity }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
