use super::{Layout, LayoutParams, TiledClient};
use crate::geometry::Rect;

pub struct MonocleLayout;

impl Layout for MonocleLayout {
    fn name(&self) -> &'static str {
        super::LayoutKind::Monocle.as_str()
    }

    fn symbol(&self) -> &'static str {
        "[M]"
    }

    fn arrange(&self, clients: &[TiledClient], area: Rect, _params: &LayoutParams) -> Vec<Rect> {
        vec![area; clients.len()]
    }
}
