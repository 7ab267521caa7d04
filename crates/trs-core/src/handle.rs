//! Gizmo handle identifiers and their axis constraints

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Cartesian axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Axis direction in a frame; `None` means world axes.
    pub fn direction(self, basis: Option<Mat3>) -> Vec3 {
        match basis {
            Some(basis) => basis.col(self.index()),
            None => self.unit(),
        }
    }

    /// In-plane reference direction used as the zero angle when rotating about this axis.
    pub fn side(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    pub fn mask(self) -> AxisMask {
        match self {
            Axis::X => AxisMask::X,
            Axis::Y => AxisMask::Y,
            Axis::Z => AxisMask::Z,
        }
    }
}

/// Set of constrained axes.
///
/// One axis means motion along a line, two mean motion in a plane, all three
/// mean uniform (scale only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisMask(u8);

impl AxisMask {
    pub const NONE: Self = Self(0);
    pub const X: Self = Self(0b001);
    pub const Y: Self = Self(0b010);
    pub const Z: Self = Self(0b100);
    pub const XY: Self = Self(0b011);
    pub const XZ: Self = Self(0b101);
    pub const YZ: Self = Self(0b110);
    pub const XYZ: Self = Self(0b111);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, axis: Axis) -> bool {
        self.0 & axis.mask().0 != 0
    }

    /// True when every axis in `other` is also in `self`.
    pub fn covers(self, other: AxisMask) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |axis| self.contains(*axis))
    }

    /// The single axis of a one-axis mask.
    pub fn single_axis(self) -> Option<Axis> {
        match self {
            AxisMask::X => Some(Axis::X),
            AxisMask::Y => Some(Axis::Y),
            AxisMask::Z => Some(Axis::Z),
            _ => None,
        }
    }

    /// The axis missing from a two-axis mask, i.e. the plane normal.
    pub fn missing_axis(self) -> Option<Axis> {
        match self {
            AxisMask::YZ => Some(Axis::X),
            AxisMask::XZ => Some(Axis::Y),
            AxisMask::XY => Some(Axis::Z),
            _ => None,
        }
    }

    /// Keep the components of `v` that belong to this mask, zero the rest.
    pub fn select(self, v: Vec3) -> Vec3 {
        Vec3::new(
            if self.contains(Axis::X) { v.x } else { 0.0 },
            if self.contains(Axis::Y) { v.y } else { 0.0 },
            if self.contains(Axis::Z) { v.z } else { 0.0 },
        )
    }
}

impl BitOr for AxisMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AxisMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Manipulation mode a handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Translate,
    Rotate,
    Scale,
}

/// Shape class of a handle's constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleClass {
    Axis,
    Plane,
    Uniform,
}

/// A pickable part of the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Handle {
    #[default]
    None,
    TranslatePosX,
    TranslatePosY,
    TranslatePosZ,
    TranslateNegX,
    TranslateNegY,
    TranslateNegZ,
    TranslateXy,
    TranslateXz,
    TranslateYz,
    RotateX,
    RotateY,
    RotateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    ScaleXy,
    ScaleXz,
    ScaleYz,
    ScaleXyz,
}

impl Handle {
    /// Every handle except `None`, in declaration order.
    pub const ALL: [Handle; 19] = [
        Handle::TranslatePosX,
        Handle::TranslatePosY,
        Handle::TranslatePosZ,
        Handle::TranslateNegX,
        Handle::TranslateNegY,
        Handle::TranslateNegZ,
        Handle::TranslateXy,
        Handle::TranslateXz,
        Handle::TranslateYz,
        Handle::RotateX,
        Handle::RotateY,
        Handle::RotateZ,
        Handle::ScaleX,
        Handle::ScaleY,
        Handle::ScaleZ,
        Handle::ScaleXy,
        Handle::ScaleXz,
        Handle::ScaleYz,
        Handle::ScaleXyz,
    ];

    pub fn axis_mask(self) -> AxisMask {
        use Handle::*;
        match self {
            None => AxisMask::NONE,
            TranslatePosX | TranslateNegX | RotateX | ScaleX => AxisMask::X,
            TranslatePosY | TranslateNegY | RotateY | ScaleY => AxisMask::Y,
            TranslatePosZ | TranslateNegZ | RotateZ | ScaleZ => AxisMask::Z,
            TranslateXy | ScaleXy => AxisMask::XY,
            TranslateXz | ScaleXz => AxisMask::XZ,
            TranslateYz | ScaleYz => AxisMask::YZ,
            ScaleXyz => AxisMask::XYZ,
        }
    }

    pub fn kind(self) -> Option<HandleKind> {
        use Handle::*;
        match self {
            None => Option::None,
            TranslatePosX | TranslatePosY | TranslatePosZ | TranslateNegX | TranslateNegY
            | TranslateNegZ | TranslateXy | TranslateXz | TranslateYz => Some(HandleKind::Translate),
            RotateX | RotateY | RotateZ => Some(HandleKind::Rotate),
            ScaleX | ScaleY | ScaleZ | ScaleXy | ScaleXz | ScaleYz | ScaleXyz => {
                Some(HandleKind::Scale)
            }
        }
    }

    pub fn class(self) -> Option<HandleClass> {
        self.kind()?;
        match self.axis_mask().count() {
            1 => Some(HandleClass::Axis),
            2 => Some(HandleClass::Plane),
            3 => Some(HandleClass::Uniform),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Handle::None
    }

    pub fn label(self) -> &'static str {
        use Handle::*;
        match self {
            None => "None",
            TranslatePosX => "Translate +X",
            TranslatePosY => "Translate +Y",
            TranslatePosZ => "Translate +Z",
            TranslateNegX => "Translate -X",
            TranslateNegY => "Translate -Y",
            TranslateNegZ => "Translate -Z",
            TranslateXy => "Translate XY",
            TranslateXz => "Translate XZ",
            TranslateYz => "Translate YZ",
            RotateX => "Rotate X",
            RotateY => "Rotate Y",
            RotateZ => "Rotate Z",
            ScaleX => "Scale X",
            ScaleY => "Scale Y",
            ScaleZ => "Scale Z",
            ScaleXy => "Scale XY",
            ScaleXz => "Scale XZ",
            ScaleYz => "Scale YZ",
            ScaleXyz => "Scale XYZ",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
