//! Line overlays drawn while a rotation drag is active

use std::f32::consts::TAU;

use glam::Vec3;
use trs_core::{Axis, AxisMask};

use crate::constants::protractor::{self, colors};

/// Over-bright line color of the axis a mask rotates about or is normal to
pub fn axis_color(mask: AxisMask) -> [f32; 4] {
    let axis = mask.single_axis().or_else(|| mask.missing_axis());
    match axis {
        Some(Axis::X) => colors::AXIS_X,
        Some(Axis::Y) => colors::AXIS_Y,
        Some(Axis::Z) => colors::AXIS_Z,
        None => colors::AXIS_UNIFORM,
    }
}

/// World-space line segment with a color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLine {
    /// Start point
    pub start: Vec3,
    /// End point
    pub end: Vec3,
    /// RGBA color
    pub color: [f32; 4],
}

impl OverlayLine {
    fn new(start: Vec3, end: Vec3, color: [f32; 4]) -> Self {
        Self { start, end, color }
    }
}

/// Protractor drawn in the rotation plane around the rotation center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Protractor {
    /// Rotation center
    pub center: Vec3,
    /// Rotation axis (unit)
    pub normal: Vec3,
    /// Zero-angle direction in the rotation plane (unit)
    pub reference: Vec3,
    /// Unsnapped pointer angle (radians)
    pub angle: f32,
    /// Snapped angle actually applied (radians)
    pub snapped_angle: f32,
    /// Snap step in radians, when snapping
    pub snap: Option<f32>,
    /// Screen-constant scale factor
    pub scale: f32,
    /// Color of the rotation axis line
    pub axis_color: [f32; 4],
}

impl Protractor {
    /// Angle between ticks: the snap step while snapping, otherwise 10 degrees
    pub fn tick_step(&self) -> f32 {
        match self.snap {
            Some(step) if step > 0.0 && step.is_finite() => step,
            _ => TAU / protractor::DEFAULT_TICKS as f32,
        }
    }

    /// Ticks at multiples of the step below a full turn
    pub fn tick_count(&self) -> u32 {
        let count = (TAU / self.tick_step() - 1e-3).ceil();
        if count.is_finite() {
            (count as u32).clamp(1, protractor::MAX_TICKS)
        } else {
            protractor::MAX_TICKS
        }
    }

    /// In-plane unit direction at `angle` from the reference
    pub fn direction(&self, angle: f32) -> Vec3 {
        let side = self.normal.cross(self.reference);
        self.reference * angle.cos() + side * angle.sin()
    }

    /// Ring, ticks, pointer / snapped radius lines and the axis line
    pub fn lines(&self) -> Vec<OverlayLine> {
        let p = self.center;
        let r1 = protractor::OUTER_RADIUS * self.scale;
        let ticks = self.tick_count();
        let mut lines = Vec::with_capacity((protractor::RING_SEGMENTS + ticks + 3) as usize);

        for i in 0..protractor::RING_SEGMENTS {
            let a0 = (i as f32 / protractor::RING_SEGMENTS as f32) * TAU;
            let a1 = ((i + 1) as f32 / protractor::RING_SEGMENTS as f32) * TAU;
            lines.push(OverlayLine::new(
                p + self.direction(a0) * r1,
                p + self.direction(a1) * r1,
                colors::TICKS,
            ));
        }

        let step = self.tick_step();
        for i in 0..ticks {
            let direction = self.direction(i as f32 * step);
            // Every 10th tick is major; the first one reaches the center
            let r0 = if i == 0 {
                0.0
            } else if i % protractor::MAJOR_TICK_EVERY == 0 {
                protractor::MAJOR_TICK_INNER * self.scale
            } else {
                protractor::MINOR_TICK_INNER * self.scale
            };
            lines.push(OverlayLine::new(p + direction * r0, p + direction * r1, colors::TICKS));
        }

        lines.push(OverlayLine::new(p, p + self.direction(self.angle) * r1, colors::POINTER));
        lines.push(OverlayLine::new(
            p,
            p + self.direction(self.snapped_angle) * r1,
            colors::SNAPPED,
        ));

        let axis_extent = self.normal * protractor::AXIS_HALF_LENGTH * self.scale;
        lines.push(OverlayLine::new(p - axis_extent, p + axis_extent, self.axis_color));
        lines
    }
}
