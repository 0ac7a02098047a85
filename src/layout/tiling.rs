use super::{Layout, LayoutParams, TiledClient, master_extent, partition_weights, weighted_split};
use crate::geometry::Rect;

pub struct TilingLayout;

impl Layout for TilingLayout {
    fn name(&self) -> &'static str {
        super::LayoutKind::Tile.as_str()
    }

    fn symbol(&self) -> &'static str {
        "[]="
    }

    fn arrange(&self, clients: &[TiledClient], area: Rect, params: &LayoutParams) -> Vec<Rect> {
        if clients.is_empty() {
            return Vec::new();
        }

        let master_width = master_extent(area.width, clients.len(), params);
        let (master_weights, stack_weights) = partition_weights(clients, params.master_count);

        let mut geometries = Vec::with_capacity(clients.len());

        let mut y = area.y;
        for height in weighted_split(area.height, &master_weights) {
            geometries.push(Rect::new(area.x, y, master_width, height));
            y += height;
        }

        let mut y = area.y;
        for height in weighted_split(area.height, &stack_weights) {
            geometries.push(Rect::new(
                area.x + master_width,
                y,
                area.width - master_width,
                height,
            ));
            y += height;
        }

        geometries
    }
}
