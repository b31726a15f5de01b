//! Walls of the room visible from the overview.

state_enum! {
    #[derive(Copy, Eq, Hash, Default)]
    pub enum RoomSide {
        #[default]
        Main,
        Right,
        Left,
    }
}

impl RoomSide {
    /// Turn right: Main, Right, Left, then back to Main.
    pub fn next(self) -> Self {
        match self {
            Self::Main => Self::Right,
            Self::Right => Self::Left,
            Self::Left => Self::Main,
        }
    }

    /// Turn left: Main, Left, Right, then back to Main.
    pub fn previous(self) -> Self {
        match self {
            Self::Main => Self::Left,
            Self::Left => Self::Right,
            Self::Right => Self::Main,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_cycle_in_opposite_directions() {
        let mut side = RoomSide::Main;
        let mut visited = Vec::new();
        for _ in 0..3 {
            side = side.next();
            visited.push(side);
        }
        assert_eq!(visited, vec![RoomSide::Right, RoomSide::Left, RoomSide::Main]);

        assert_eq!(RoomSide::Main.previous(), RoomSide::Left);
        for side in [RoomSide::Main, RoomSide::Right, RoomSide::Left] {
            assert_eq!(side.next().previous(), side);
        }
    }

    #[test]
    fn default_is_main() {
        assert_eq!(RoomSide::default(), RoomSide::Main);
    }
}
