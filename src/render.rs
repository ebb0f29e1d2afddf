//! Pure render model: history in, draw program out
//!
//! No I/O and no host types here. The host interprets the returned ops in
//! order against whatever surface it owns.

use crate::color::Color;
use crate::config::WidgetConfig;
use crate::core::constants::{FREQ_CAPPED_BIT, TEMP_LOW, TEMP_RANGE, THROTTLED_BIT};
use crate::history::History;
use serde::Serialize;

/// Size of the drawing surface in pixels, border excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// One instruction of the draw program, in paint order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    /// Fill the whole surface
    Fill { color: Color },
    /// One-pixel-wide vertical bar rising from the bottom edge at column `x`.
    /// `height` is a fraction of the surface height and is deliberately not
    /// clamped to [0, 1]; readings outside the 40-90 degree window produce
    /// bars that extend past the surface.
    Bar { x: u32, height: f64, color: Color },
    /// One-pixel border around the surface
    Border { color: Color },
    /// Centered numeric overlay
    Label {
        text: String,
        font_size: u32,
        color: Color,
    },
}

const BORDER_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Compute the draw program for the current history.
///
/// Bars walk the history oldest to newest, one column per sample, skipping
/// never-written (zero) slots. Bar color follows the throttle flags: the
/// actively-throttled bit wins over the frequency-capped bit, which wins over
/// the plain foreground. Deterministic for identical inputs.
pub fn render(history: &History, surface: SurfaceSize, config: &WidgetConfig) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(history.capacity() + 3);

    ops.push(DrawOp::Fill {
        color: config.background,
    });

    for (x, (sample, flags)) in history
        .iter_chronological()
        .take(surface.width as usize)
        .enumerate()
    {
        if sample == 0.0 {
            continue;
        }
        let color = if flags & THROTTLED_BIT != 0 {
            config.high_throttle
        } else if flags & FREQ_CAPPED_BIT != 0 {
            config.low_throttle
        } else {
            config.foreground
        };
        let height = (f64::from(sample) * 100.0 - TEMP_LOW) / TEMP_RANGE;
        ops.push(DrawOp::Bar {
            x: x as u32,
            height,
            color,
        });
    }

    ops.push(DrawOp::Border {
        color: BORDER_COLOR,
    });

    if config.show_percent {
        let degrees = (f64::from(history.latest()) * 100.0) as i32;
        let font_size = if surface.width > 50 {
            surface.height / 3
        } else {
            12
        };
        ops.push(DrawOp::Label {
            text: format!("{:3}°", degrees),
            font_size,
            color: BORDER_COLOR,
        });
    }

    ops
}
