use super::{Layout, LayoutParams, TiledClient};
use crate::geometry::Rect;

pub struct FloatingLayout;

// Clients keep whatever geometry they have.
impl Layout for FloatingLayout {
    fn name(&self) -> &'static str {
        super::LayoutKind::Floating.as_str()
    }

    fn symbol(&self) -> &'static str {
        "><>"
    }

    fn arrange(&self, _clients: &[TiledClient], _area: Rect, _params: &LayoutParams) -> Vec<Rect> {
        Vec::new()
    }
}
