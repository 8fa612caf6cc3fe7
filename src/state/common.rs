macro_rules! define_roles {
    ($($variant:ident => $file:literal),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Role {
            $($variant),+
        }

        impl Role {
            pub const ALL: &'static [Role] = &[
                $(Role::$variant),+
            ];

            pub const fn file_name(self) -> &'static str {
                match self {
                    $(Role::$variant => $file),+
                }
            }
        }
    };
}

define_roles! {
    Player  => "robot.png",
    Coin    => "coin.png",
    Monster => "monster.png",
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoundingBox {
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.x + self.w <= other.x
            || other.x + other.w <= self.x
            || self.y + self.h <= other.y
            || other.y + other.h <= self.y)
    }
}
