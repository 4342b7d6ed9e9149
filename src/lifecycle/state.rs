//! Process lifecycle states.

/// Where the process is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    Starting = 0,
    Listening = 1,
    ShuttingDown = 2,
    Terminated = 3,
}

impl LifecycleState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => LifecycleState::Starting,
            1 => LifecycleState::Listening,
            2 => LifecycleState::ShuttingDown,
            _ => LifecycleState::Terminated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_round_trip() {
        for state in [
            LifecycleState::Starting,
            LifecycleState::Listening,
            LifecycleState::ShuttingDown,
            LifecycleState::Terminated,
        ] {
            assert_eq!(LifecycleState::from_u8(state as u8), state);
        }
    }
}
