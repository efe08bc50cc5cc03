use crate::assets::ImageAsset;
use crate::ir::Transform;

use super::types::{Circle, Placement, Rect};

/// Cover-fit a photo into a rectangle, then apply the user's zoom and pan.
///
/// Returns `None` when there is nothing to place. The result may extend past
/// the region; callers clip to it.
pub fn fit_rect(region: Rect, image: Option<&ImageAsset>, transform: Transform) -> Option<Placement> {
    let (iw, ih) = source_size(image)?;
    let ratio = (region.width / iw).max(region.height / ih) * transform.zoom;
    let width = iw * ratio;
    let height = ih * ratio;
    Some(Placement {
        x: region.x + (region.width - width) / 2.0 + transform.offset_x as f32,
        y: region.y + (region.height - height) / 2.0 + transform.offset_y as f32,
        width,
        height,
    })
}

/// Cover-fit a photo into a circle: the shorter image side spans the diameter.
pub fn fit_circle(region: Circle, image: Option<&ImageAsset>, transform: Transform) -> Option<Placement> {
    let (iw, ih) = source_size(image)?;
    let ratio = (region.r * 2.0 / iw.min(ih)) * transform.zoom;
    let width = iw * ratio;
    let height = ih * ratio;
    Some(Placement {
        x: region.cx - width / 2.0 + transform.offset_x as f32,
        y: region.cy - height / 2.0 + transform.offset_y as f32,
        width,
        height,
    })
}

fn source_size(image: Option<&ImageAsset>) -> Option<(f32, f32)> {
    let (width, height) = image?.dimensions();
    // A zero-sized bitmap has no aspect ratio to cover with.
    if width == 0 || height == 0 {
        return None;
    }
    Some((width as f32, height as f32))
}
