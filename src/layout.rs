//! Board layout for the two screen orientations
//!
//! Positions are in design units (a 900-unit-wide board). Scaling to pixels
//! is the renderer's business.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Bounds, Heading};

/// Screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    /// Portrait when the screen is taller than it is wide
    pub fn from_screen(width: u32, height: u32) -> Self {
        if width < height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Every position and size the game needs, resolved for one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    /// Side of both pattern boxes
    pub box_size: i32,
    /// Top-left of the goal box (left or top)
    pub goal_box: IVec2,
    /// Top-left of the player box (right or bottom)
    pub player_box: IVec2,
    /// First number card
    pub numbers: IVec2,
    pub number_size: i32,
    pub number_gap: i32,
    /// Goal turtle start and line length
    pub goal_origin: IVec2,
    pub goal_unit: i32,
    /// Player turtle start and line length
    pub player_origin: IVec2,
    pub player_unit: i32,
    /// Vertical position of the success/failure banners
    pub banner_y: i32,
    pub label_size: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::landscape()
    }
}

impl LayoutConfig {
    pub fn landscape() -> Self {
        Self {
            orientation: Orientation::Landscape,
            box_size: 400,
            goal_box: IVec2::new(25, 25),
            player_box: IVec2::new(475, 25),
            numbers: IVec2::new(475, 475),
            number_size: 75,
            number_gap: 7,
            goal_origin: IVec2::new(200, 350),
            goal_unit: 50,
            player_origin: IVec2::new(650, 350),
            player_unit: 50,
            banner_y: 500,
            label_size: 24,
        }
    }

    pub fn portrait() -> Self {
        Self {
            orientation: Orientation::Portrait,
            box_size: 400,
            goal_box: IVec2::new(25, 25),
            player_box: IVec2::new(25, 475),
            numbers: IVec2::new(475, 475),
            number_size: 75,
            number_gap: 7,
            goal_origin: IVec2::new(225, 350),
            goal_unit: 50,
            player_origin: IVec2::new(225, 775),
            player_unit: 50,
            banner_y: 950,
            label_size: 24,
        }
    }

    pub fn for_orientation(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Landscape => Self::landscape(),
            Orientation::Portrait => Self::portrait(),
        }
    }

    /// Square the player's turtle must stay inside.
    ///
    /// This is the player box; the goal turtle is never bounds-checked.
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.player_box, self.box_size)
    }

    /// Top-left of the number card for `slot`: a row in landscape, a column
    /// in portrait
    pub fn number_position(&self, slot: usize) -> IVec2 {
        let stride = (self.number_size + self.number_gap) * slot as i32;
        match self.orientation {
            Orientation::Landscape => self.numbers + IVec2::new(stride, 0),
            Orientation::Portrait => self.numbers + IVec2::new(0, stride),
        }
    }

    /// Sprite position of the player turtle standing at its start point
    pub fn player_turtle_home(&self) -> IVec2 {
        self.player_origin - IVec2::new(self.player_unit / 2, 0)
    }

    /// Sprite position of the goal turtle
    pub fn goal_turtle_home(&self) -> IVec2 {
        self.goal_origin - IVec2::new(self.goal_unit / 2, 0)
    }

    /// Sprite position of the player turtle after stepping to `at` while
    /// facing `heading`, so the sprite sits ahead of the line end
    pub fn turtle_sprite_position(&self, at: IVec2, heading: Heading) -> IVec2 {
        let dd = self.player_unit;
        let half = dd / 2;
        match heading {
            Heading::Up => at - IVec2::new(half, dd),
            Heading::Right => at - IVec2::new(0, half),
            Heading::Down => at - IVec2::new(half, 0),
            Heading::Left => at - IVec2::new(dd, half),
        }
    }

    /// Where the splot mark goes so it sits over the edge that was crossed
    pub fn splot_position(&self, at: IVec2, heading: Heading) -> IVec2 {
        let dd = self.player_unit;
        let half = dd / 2;
        match heading {
            Heading::Up => at - IVec2::new(half, 0),
            Heading::Right => at - IVec2::new(dd, half),
            Heading::Down => at - IVec2::new(half, dd),
            Heading::Left => at - IVec2::new(0, half),
        }
    }
}
