use image::{Rgba, RgbaImage};

use crate::model::Layout;

/// Rendering controls for layout previews.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Units-to-pixels factor.
    pub scale: f64,
    /// Draw the effective (padded) boundary as a 1px outline around each
    /// card.
    pub draw_padding: bool,
    /// Draw the usable-area frame.
    pub draw_bounds: bool,
    pub background: [u8; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            draw_padding: true,
            draw_bounds: true,
            background: [253, 253, 253, 255],
        }
    }
}

const PINNED_FILL: Rgba<u8> = Rgba([20, 20, 20, 255]);
const BOUNDS_COLOR: Rgba<u8> = Rgba([169, 169, 169, 255]);
const CARD_EDGE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fill colors cycled across movable cards.
const PALETTE: [[u8; 4]; 8] = [
    [68, 1, 84, 255],
    [70, 50, 127, 255],
    [54, 92, 141, 255],
    [39, 127, 142, 255],
    [31, 161, 135, 255],
    [74, 194, 109, 255],
    [159, 218, 58, 255],
    [253, 231, 37, 255],
];

/// Draws every placed card of `layout` into a fresh RGBA canvas: actual box
/// filled (pinned cards black, movables palette-cycled), effective boundary
/// outlined. Unplaced cards are not drawn. The canvas spans the full strip
/// width and the layout extent plus a bottom margin equal to the top padding.
pub fn render_layout<K>(layout: &Layout<K>, opts: &RenderOptions) -> RgbaImage {
    let space = &layout.space;
    let scale = opts.scale;
    let canvas_w = ((space.width * scale).ceil() as u32).max(1);
    let canvas_h = (((layout.extent + space.top_padding) * scale).ceil() as u32).max(1);

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, Rgba(opts.background));

    if opts.draw_bounds {
        outline_rect(
            &mut canvas,
            px(space.left_bound(), scale),
            px(space.top_bound(), scale),
            px(space.right_bound(), scale),
            canvas_h as i64 - 1,
            BOUNDS_COLOR,
        );
    }

    let mut movable_idx = 0usize;
    for card in &layout.placed {
        let fill = if card.pinned {
            PINNED_FILL
        } else {
            let color = PALETTE[movable_idx % PALETTE.len()];
            movable_idx += 1;
            Rgba(color)
        };

        if opts.draw_padding {
            let eff = card.effective_region();
            outline_rect(
                &mut canvas,
                px(eff.x, scale),
                px(eff.y, scale),
                px(eff.right(), scale),
                px(eff.bottom(), scale),
                fill,
            );
        }

        let x0 = px(card.pos.x, scale);
        let y0 = px(card.pos.y, scale);
        let x1 = px(card.pos.x + card.card.width(), scale);
        let y1 = px(card.pos.y + card.card.height(), scale);
        fill_rect(&mut canvas, x0, y0, x1, y1, fill);
        outline_rect(&mut canvas, x0, y0, x1, y1, CARD_EDGE);
    }

    canvas
}

#[inline]
fn px(v: f64, scale: f64) -> i64 {
    (v * scale).round() as i64
}

fn fill_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (cw, ch) = canvas.dimensions();
    let xa = x0.max(0) as u32;
    let ya = y0.max(0) as u32;
    for y in ya..(y1.max(0) as u32).min(ch) {
        for x in xa..(x1.max(0) as u32).min(cw) {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn outline_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (cw, ch) = canvas.dimensions();
    let in_bounds = |x: i64, y: i64| x >= 0 && y >= 0 && (x as u32) < cw && (y as u32) < ch;
    for x in x0..=x1 {
        if in_bounds(x, y0) {
            canvas.put_pixel(x as u32, y0 as u32, color);
        }
        if in_bounds(x, y1) {
            canvas.put_pixel(x as u32, y1 as u32, color);
        }
    }
    for y in y0..=y1 {
        if in_bounds(x0, y) {
            canvas.put_pixel(x0 as u32, y as u32, color);
        }
        if in_bounds(x1, y) {
            canvas.put_pixel(x1 as u32, y as u32, color);
        }
    }
}
