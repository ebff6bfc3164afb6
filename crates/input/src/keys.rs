use glam::Vec3;

/// Movement keys understood by the controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `w`
    Forward,
    /// `a`
    Left,
    /// `s`
    Back,
    /// `d`
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Forward, Key::Left, Key::Back, Key::Right];

    /// Map a key name such as `"w"` to a movement key. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "w" => Some(Self::Forward),
            "a" => Some(Self::Left),
            "s" => Some(Self::Back),
            "d" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "w",
            Self::Left => "a",
            Self::Back => "s",
            Self::Right => "d",
        }
    }
}

/// Pressed/released state of the four movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub left: bool,
    pub back: bool,
    pub right: bool,
}

impl KeyState {
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Forward => self.forward = pressed,
            Key::Left => self.left = pressed,
            Key::Back => self.back = pressed,
            Key::Right => self.right = pressed,
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Forward => self.forward,
            Key::Left => self.left,
            Key::Back => self.back,
            Key::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.left || self.back || self.right
    }

    /// One frame of movement on the XZ plane.
    ///
    /// `a`/`d` move along -x/+x and `w`/`s` along -z/+z. Opposite keys cancel
    /// and diagonals are not normalized.
    pub fn planar_step(&self, speed: f32) -> Vec3 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -speed,
            (false, true) => speed,
            _ => 0.0,
        };
        Vec3::new(
            axis(self.left, self.right),
            0.0,
            axis(self.forward, self.back),
        )
    }
}
