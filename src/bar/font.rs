use crate::errors::X11Error;
use std::ffi::CString;
use x11::xft::{XftColor, XftDraw, XftDrawStringUtf8, XftFont, XftFontOpenName};
use x11::xlib::{Display, Drawable};
use x11::xrender::XRenderColor;

/// An Xft font on its own Xlib connection. The bars draw text through it
/// while every other request goes over x11rb.
pub struct Font {
    xft_font: *mut XftFont,
    display: *mut Display,
    screen: i32,
}

impl Font {
    pub fn open(screen: i32, font_name: &str) -> Result<Self, X11Error> {
        let display = unsafe { x11::xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            return Err(X11Error::DisplayOpenFailed);
        }

        let font_name_cstr = CString::new(font_name)
            .map_err(|_| X11Error::FontLoadFailed(font_name.to_string()))?;
        let xft_font = unsafe { XftFontOpenName(display, screen, font_name_cstr.as_ptr()) };

        if xft_font.is_null() {
            unsafe {
                x11::xlib::XCloseDisplay(display);
            }
            return Err(X11Error::FontLoadFailed(font_name.to_string()));
        }

        Ok(Font {
            xft_font,
            display,
            screen,
        })
    }

    pub fn height(&self) -> u16 {
        unsafe {
            let font = &*self.xft_font;
            font.height as u16
        }
    }

    pub fn ascent(&self) -> i16 {
        unsafe {
            let font = &*self.xft_font;
            font.ascent as i16
        }
    }

    pub fn text_width(&self, text: &str) -> u16 {
        unsafe {
            let mut extents = std::mem::zeroed();
            x11::xft::XftTextExtentsUtf8(
                self.display,
                self.xft_font,
                text.as_ptr(),
                text.len() as i32,
                &mut extents,
            );
            extents.xOff as u16
        }
    }

    /// Baseline that centres a line of text in a bar of `bar_height`.
    pub fn baseline(&self, bar_height: u16) -> i16 {
        (bar_height.saturating_sub(self.height()) / 2) as i16 + self.ascent()
    }

    pub fn create_draw(&self, drawable: Drawable) -> Result<FontDraw, X11Error> {
        let visual = unsafe { x11::xlib::XDefaultVisual(self.display, self.screen) };
        let colormap = unsafe { x11::xlib::XDefaultColormap(self.display, self.screen) };
        let xft_draw = unsafe { x11::xft::XftDrawCreate(self.display, drawable, visual, colormap) };

        if xft_draw.is_null() {
            return Err(X11Error::DrawCreateFailed);
        }

        Ok(FontDraw { xft_draw })
    }

    /// Push the queued Xft requests out.
    pub fn flush(&self) {
        unsafe {
            x11::xlib::XFlush(self.display);
        }
    }
}

impl Drop for Font {
    fn drop(&mut self) {
        unsafe {
            x11::xft::XftFontClose(self.display, self.xft_font);
            x11::xlib::XCloseDisplay(self.display);
        }
    }
}

/// Xft drawing target bound to one bar window. Must be dropped before the
/// [`Font`] that created it.
pub struct FontDraw {
    xft_draw: *mut XftDraw,
}

impl FontDraw {
    pub fn draw_text(&self, font: &Font, color: u32, x: i16, y: i16, text: &str) {
        if text.is_empty() {
            return;
        }

        let red = ((color >> 16) & 0xFF) as u16;
        let green = ((color >> 8) & 0xFF) as u16;
        let blue = (color & 0xFF) as u16;

        let render_color = XRenderColor {
            red: red << 8 | red,
            green: green << 8 | green,
            blue: blue << 8 | blue,
            alpha: 0xFFFF,
        };

        let mut xft_color: XftColor = unsafe { std::mem::zeroed() };

        unsafe {
            x11::xft::XftColorAllocValue(
                x11::xft::XftDrawDisplay(self.xft_draw),
                x11::xft::XftDrawVisual(self.xft_draw),
                x11::xft::XftDrawColormap(self.xft_draw),
                &render_color,
                &mut xft_color,
            );

            XftDrawStringUtf8(
                self.xft_draw,
                &xft_color,
                font.xft_font,
                x as i32,
                y as i32,
                text.as_ptr(),
                text.len() as i32,
            );

            x11::xft::XftColorFree(
                x11::xft::XftDrawDisplay(self.xft_draw),
                x11::xft::XftDrawVisual(self.xft_draw),
                x11::xft::XftDrawColormap(self.xft_draw),
                &mut xft_color,
            );
        }
    }
}

impl Drop for FontDraw {
    fn drop(&mut self) {
        unsafe {
            if !self.xft_draw.is_null() {
                x11::xft::XftDrawDestroy(self.xft_draw);
            }
        }
    }
}
