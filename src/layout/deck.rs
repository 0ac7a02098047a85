use super::{Layout, LayoutParams, TiledClient, master_extent, partition_weights, weighted_split};
use crate::geometry::Rect;

/// Like tile, but the stack clients all share one rectangle.
pub struct DeckLayout;

impl Layout for DeckLayout {
    fn name(&self) -> &'static str {
        super::LayoutKind::Deck.as_str()
    }

    fn symbol(&self) -> &'static str {
        "[D]"
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

        let deck = Rect::new(
            area.x + master_width,
            area.y,
            area.width - master_width,
            area.height,
        );
        geometries.extend(std::iter::repeat_n(deck, stack_weights.len()));

        geometries
    }
}
