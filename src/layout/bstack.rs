use super::{Layout, LayoutParams, TiledClient, master_extent, partition_weights, weighted_split};
use crate::geometry::Rect;

/// Master row across the top, stack as columns along the bottom.
pub struct BstackLayout;

impl Layout for BstackLayout {
    fn name(&self) -> &'static str {
        super::LayoutKind::Bstack.as_str()
    }

    fn symbol(&self) -> &'static str {
        "TTT"
    }

    fn arrange(&self, clients: &[TiledClient], area: Rect, params: &LayoutParams) -> Vec<Rect> {
        if clients.is_empty() {
            return Vec::new();
        }

        let master_height = master_extent(area.height, clients.len(), params);
        let (master_weights, stack_weights) = partition_weights(clients, params.master_count);

        let mut geometries = Vec::with_capacity(clients.len());

        let mut x = area.x;
        for width in weighted_split(area.width, &master_weights) {
            geometries.push(Rect::new(x, area.y, width, master_height));
            x += width;
        }

        let mut x = area.x;
        for width in weighted_split(area.width, &stack_weights) {
            geometries.push(Rect::new(
                x,
                area.y + master_height,
                width,
                area.height - master_height,
            ));
            x += width;
        }

        geometries
    }
}
