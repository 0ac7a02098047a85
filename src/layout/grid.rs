use super::{Layout, LayoutParams, TiledClient};
use crate::geometry::Rect;

/// Gapless grid. Weights and the master area are ignored.
pub struct GridLayout;

impl GridLayout {
    fn columns(count: usize) -> usize {
        if count == 5 {
            return 2;
        }
        let mut columns = 0;
        while columns <= count / 2 && columns * columns < count {
            columns += 1;
        }
        columns
    }
}

impl Layout for GridLayout {
    fn name(&self) -> &'static str {
        super::LayoutKind::Grid.as_str()
    }

    fn symbol(&self) -> &'static str {
        "###"
    }

    fn arrange(&self, clients: &[TiledClient], area: Rect, _params: &LayoutParams) -> Vec<Rect> {
        let count = clients.len();
        if count == 0 {
            return Vec::new();
        }

        let columns = Self::columns(count);
        let mut rows = count / columns;
        let cell_width = area.width / columns as i32;

        let mut geometries = Vec::with_capacity(count);
        let (mut column, mut row) = (0, 0);

        for index in 0..count {
            // The last `count % columns` columns take one extra row.
            if index / rows + 1 > columns - count % columns {
                rows = count / columns + 1;
            }
            let cell_height = area.height / rows as i32;

            geometries.push(Rect::new(
                area.x + column * cell_width,
                area.y + row * cell_height,
                cell_width,
                cell_height,
            ));

            row += 1;
            if row >= rows as i32 {
                row = 0;
                column += 1;
            }
        }

        geometries
    }
}
