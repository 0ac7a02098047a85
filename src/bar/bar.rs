use super::font::{Font, FontDraw};
use super::model::{self, BarModel, BarRegions, Tab};
use crate::errors::WmResult;
use crate::geometry::Rect;
use crate::{ColorScheme, Config};
use x11rb::COPY_DEPTH_FROM_PARENT;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

/// Override-redirect strip window with a GC and an Xft draw target.
struct Strip {
    window: Window,
    width: u16,
    height: u16,
    graphics_context: Gcontext,
    font_draw: FontDraw,
}

impl Strip {
    fn new(
        connection: &RustConnection,
        screen: &Screen,
        font: &Font,
        geometry: Rect,
        background: u32,
    ) -> WmResult<Self> {
        let window = connection.generate_id()?;
        let graphics_context = connection.generate_id()?;
        let width = geometry.width.max(1) as u16;
        let height = geometry.height.max(1) as u16;

        connection.create_window(
            COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            geometry.x as i16,
            geometry.y as i16,
            width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &CreateWindowAux::new()
                .background_pixel(background)
                .event_mask(EventMask::EXPOSURE | EventMask::BUTTON_PRESS)
                .override_redirect(1),
        )?;

        connection.create_gc(
            graphics_context,
            window,
            &CreateGCAux::new().foreground(background).background(background),
        )?;

        connection.map_window(window)?;
        connection.flush()?;

        let font_draw = font.create_draw(window as x11::xlib::Drawable)?;

        Ok(Strip {
            window,
            width,
            height,
            graphics_context,
            font_draw,
        })
    }

    fn place(&mut self, connection: &RustConnection, geometry: Rect) -> WmResult<()> {
        self.width = geometry.width.max(1) as u16;
        connection.configure_window(
            self.window,
            &ConfigureWindowAux::new()
                .x(geometry.x)
                .y(geometry.y)
                .width(self.width as u32)
                .height(self.height as u32),
        )?;
        Ok(())
    }

    fn fill(&self, connection: &RustConnection, color: u32, x: i16, width: u16) -> WmResult<()> {
        self.fill_rect(connection, color, x, 0, width, self.height)
    }

    fn fill_rect(
        &self,
        connection: &RustConnection,
        color: u32,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
    ) -> WmResult<()> {
        connection.change_gc(self.graphics_context, &ChangeGCAux::new().foreground(color))?;
        connection.poly_fill_rectangle(
            self.window,
            self.graphics_context,
            &[Rectangle {
                x,
                y,
                width,
                height,
            }],
        )?;
        Ok(())
    }

    /// Underline along the bottom of a cell.
    fn underline(
        &self,
        connection: &RustConnection,
        font: &Font,
        color: u32,
        x: i16,
        width: u16,
    ) -> WmResult<()> {
        let underline_height = (font.height() / 8).max(1);
        let bottom_gap = 3;
        let y = self.height as i16 - underline_height as i16 - bottom_gap;
        let padding = 4;
        self.fill_rect(
            connection,
            color,
            x + (padding / 2) as i16,
            y,
            width.saturating_sub(padding),
            underline_height,
        )
    }

    /// Text cell: background, then `text` left-aligned after `padding`.
    fn cell(
        &self,
        connection: &RustConnection,
        font: &Font,
        scheme: &ColorScheme,
        x: i16,
        width: u16,
        padding: u16,
        text: &str,
    ) -> WmResult<()> {
        self.fill(connection, scheme.background, x, width)?;
        // Xft draws over a second connection; the fill has to land first.
        connection.flush()?;
        self.font_draw.draw_text(
            font,
            scheme.foreground,
            x + padding as i16,
            font.baseline(self.height),
            text,
        );
        Ok(())
    }

    fn destroy(&self, connection: &RustConnection) -> WmResult<()> {
        connection.free_gc(self.graphics_context)?;
        connection.destroy_window(self.window)?;
        Ok(())
    }
}

/// The status bar of one monitor: tags, layout symbol, title and status.
pub struct Bar {
    strip: Strip,
    horizontal_padding: u16,
    regions: BarRegions,
}

impl Bar {
    pub fn new(
        connection: &RustConnection,
        screen: &Screen,
        font: &Font,
        geometry: Rect,
        config: &Config,
    ) -> WmResult<Self> {
        let strip = Strip::new(connection, screen, font, geometry, config.scheme_normal.background)?;
        let horizontal_padding = (font.height() as f32 * 0.4) as u16;

        Ok(Bar {
            strip,
            horizontal_padding,
            regions: BarRegions::default(),
        })
    }

    /// Bar height for a font: one and a half lines.
    pub fn height_for(font: &Font) -> i32 {
        (font.height() as f32 * 1.5) as i32
    }

    pub fn window(&self) -> Window {
        self.strip.window
    }

    pub fn place(&mut self, connection: &RustConnection, geometry: Rect) -> WmResult<()> {
        self.strip.place(connection, geometry)
    }

    pub fn click(&self, x: i32) -> model::BarClick {
        self.regions.click(x)
    }

    fn text_cell_width(&self, font: &Font, text: &str) -> u16 {
        font.text_width(text) + self.horizontal_padding * 2
    }

    pub fn draw(
        &mut self,
        connection: &RustConnection,
        font: &Font,
        model: &BarModel,
        config: &Config,
    ) -> WmResult<()> {
        let strip = &self.strip;
        let padding = self.horizontal_padding;
        strip.fill(connection, config.scheme_normal.background, 0, strip.width)?;

        let mut x_position: i16 = 0;
        let mut tag_widths = Vec::with_capacity(model.tags.len());

        for tag in &model.tags {
            let scheme = if tag.urgent {
                &config.scheme_urgent
            } else if tag.selected {
                &config.scheme_selected
            } else if tag.occupied {
                &config.scheme_occupied
            } else {
                &config.scheme_normal
            };

            let tag_width = font.text_width(&tag.name) + padding * 2;
            strip.cell(connection, font, scheme, x_position, tag_width, padding, &tag.name)?;

            if tag.occupied {
                let size = (font.height() / 4).max(2);
                let corner = x_position + 1;
                if tag.has_focused_client {
                    strip.fill_rect(connection, scheme.foreground, corner, 1, size, size)?;
                } else {
                    connection.change_gc(
                        strip.graphics_context,
                        &ChangeGCAux::new().foreground(scheme.foreground),
                    )?;
                    connection.poly_rectangle(
                        strip.window,
                        strip.graphics_context,
                        &[Rectangle {
                            x: corner,
                            y: 1,
                            width: size,
                            height: size,
                        }],
                    )?;
                }
            }

            if tag.selected {
                strip.underline(connection, font, scheme.underline, x_position, tag_width)?;
            }

            tag_widths.push(tag_width as i32);
            x_position += tag_width as i16;
        }

        let layout_width = font.text_width(&model.layout_symbol) + padding * 2;
        strip.cell(
            connection,
            font,
            &config.scheme_normal,
            x_position,
            layout_width,
            padding,
            &model.layout_symbol,
        )?;
        x_position += layout_width as i16;

        let color_count = config.status_colors.len();
        let status_width = model.status.as_ref().map_or(0, |status| {
            self.text_cell_width(font, &model::plain_status(status, color_count))
        });

        let title_width = (strip.width as i16 - status_width as i16 - x_position).max(0) as u16;
        if title_width > 0 {
            match &model.title {
                Some(title) if model.is_selected_monitor => {
                    strip.cell(
                        connection,
                        font,
                        &config.scheme_selected,
                        x_position,
                        title_width,
                        padding,
                        title,
                    )?;
                    strip.underline(
                        connection,
                        font,
                        config.scheme_selected.underline,
                        x_position,
                        title_width,
                    )?;
                }
                Some(title) => {
                    strip.cell(
                        connection,
                        font,
                        &config.scheme_normal,
                        x_position,
                        title_width,
                        padding,
                        title,
                    )?;
                }
                None => {
                    strip.fill(connection, config.scheme_normal.background, x_position, title_width)?;
                }
            }
        }

        if let Some(status) = &model.status {
            let status_start = strip.width as i16 - status_width as i16;
            strip.fill(connection, config.scheme_normal.background, status_start, status_width)?;
            connection.flush()?;

            let mut status_x = status_start + padding as i16;
            let baseline = font.baseline(strip.height);
            for segment in model::status_segments(status, color_count) {
                let color = config
                    .status_colors
                    .get(segment.color)
                    .copied()
                    .unwrap_or(config.scheme_normal.foreground);
                strip
                    .font_draw
                    .draw_text(font, color, status_x, baseline, &segment.text);
                status_x += font.text_width(&segment.text) as i16;
            }
        }

        connection.flush()?;
        font.flush();

        self.regions = BarRegions {
            tag_widths,
            layout_width: layout_width as i32,
            status_width: status_width as i32,
            width: strip.width as i32,
        };
        Ok(())
    }

    pub fn destroy(&self, connection: &RustConnection) -> WmResult<()> {
        self.strip.destroy(connection)
    }
}

/// The tab bar of one monitor, one tab per visible client.
pub struct TabBar {
    strip: Strip,
    horizontal_padding: u16,
    tabs: Vec<Tab>,
}

impl TabBar {
    pub fn new(
        connection: &RustConnection,
        screen: &Screen,
        font: &Font,
        geometry: Rect,
        config: &Config,
    ) -> WmResult<Self> {
        let strip = Strip::new(connection, screen, font, geometry, config.scheme_tab_normal.background)?;
        let horizontal_padding = (font.height() as f32 * 0.4) as u16;

        Ok(TabBar {
            strip,
            horizontal_padding,
            tabs: Vec::new(),
        })
    }

    pub fn window(&self) -> Window {
        self.strip.window
    }

    pub fn place(&mut self, connection: &RustConnection, geometry: Rect) -> WmResult<()> {
        self.strip.place(connection, geometry)
    }

    /// Tab index under `x` as last drawn.
    pub fn click(&self, x: i32) -> Option<usize> {
        model::tab_at(&self.tabs, x)
    }

    pub fn draw(
        &mut self,
        connection: &RustConnection,
        font: &Font,
        tabs: Vec<Tab>,
        config: &Config,
    ) -> WmResult<()> {
        let strip = &self.strip;
        let mut x_position: i16 = 0;

        for tab in &tabs {
            let scheme = match (tab.master, tab.selected) {
                (true, true) => &config.scheme_tab_master_selected,
                (true, false) => &config.scheme_tab_master,
                (false, true) => &config.scheme_tab_selected,
                (false, false) => &config.scheme_tab_normal,
            };
            let width = tab.width.max(0) as u16;
            strip.cell(
                connection,
                font,
                scheme,
                x_position,
                width,
                self.horizontal_padding,
                &tab.title,
            )?;
            strip.underline(connection, font, scheme.underline, x_position, width)?;
            x_position += width as i16;
        }

        let rest = (strip.width as i16 - x_position).max(0) as u16;
        strip.fill(connection, config.scheme_tab_normal.background, x_position, rest)?;

        connection.flush()?;
        font.flush();

        self.tabs = tabs;
        Ok(())
    }

    pub fn destroy(&self, connection: &RustConnection) -> WmResult<()> {
        self.strip.destroy(connection)
    }
}
