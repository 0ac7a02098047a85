//! Keysyms the configuration can bind. Latin-1 keysyms equal their
//! character code; the function and XF86 keys come from keysymdef.h and
//! XF86keysym.h.

pub type Keysym = u32;

const fn latin1(ch: char) -> Keysym {
    ch as Keysym
}

const fn function_key(n: Keysym) -> Keysym {
    0xffbd + n
}

pub const XK_SPACE: Keysym = latin1(' ');
pub const XK_APOSTROPHE: Keysym = latin1('\'');
pub const XK_COMMA: Keysym = latin1(',');
pub const XK_MINUS: Keysym = latin1('-');
pub const XK_PERIOD: Keysym = latin1('.');
pub const XK_SLASH: Keysym = latin1('/');
pub const XK_SEMICOLON: Keysym = latin1(';');
pub const XK_EQUAL: Keysym = latin1('=');
pub const XK_LEFT_BRACKET: Keysym = latin1('[');
pub const XK_BACKSLASH: Keysym = latin1('\\');
pub const XK_RIGHT_BRACKET: Keysym = latin1(']');
pub const XK_GRAVE: Keysym = latin1('`');

pub const XK_0: Keysym = latin1('0');
pub const XK_1: Keysym = latin1('1');
pub const XK_2: Keysym = latin1('2');
pub const XK_3: Keysym = latin1('3');
pub const XK_4: Keysym = latin1('4');
pub const XK_5: Keysym = latin1('5');
pub const XK_6: Keysym = latin1('6');
pub const XK_7: Keysym = latin1('7');
pub const XK_8: Keysym = latin1('8');
pub const XK_9: Keysym = latin1('9');

pub const XK_A: Keysym = latin1('a');
pub const XK_B: Keysym = latin1('b');
pub const XK_C: Keysym = latin1('c');
pub const XK_D: Keysym = latin1('d');
pub const XK_E: Keysym = latin1('e');
pub const XK_F: Keysym = latin1('f');
pub const XK_G: Keysym = latin1('g');
pub const XK_H: Keysym = latin1('h');
pub const XK_I: Keysym = latin1('i');
pub const XK_J: Keysym = latin1('j');
pub const XK_K: Keysym = latin1('k');
pub const XK_L: Keysym = latin1('l');
pub const XK_M: Keysym = latin1('m');
pub const XK_N: Keysym = latin1('n');
pub const XK_O: Keysym = latin1('o');
pub const XK_P: Keysym = latin1('p');
pub const XK_Q: Keysym = latin1('q');
pub const XK_R: Keysym = latin1('r');
pub const XK_S: Keysym = latin1('s');
pub const XK_T: Keysym = latin1('t');
pub const XK_U: Keysym = latin1('u');
pub const XK_V: Keysym = latin1('v');
pub const XK_W: Keysym = latin1('w');
pub const XK_X: Keysym = latin1('x');
pub const XK_Y: Keysym = latin1('y');
pub const XK_Z: Keysym = latin1('z');

// TTY functions and cursor control
pub const XK_BACKSPACE: Keysym = 0xff08;
pub const XK_TAB: Keysym = 0xff09;
pub const XK_RETURN: Keysym = 0xff0d;
pub const XK_ESCAPE: Keysym = 0xff1b;
pub const XK_DELETE: Keysym = 0xffff;
pub const XK_HOME: Keysym = 0xff50;
pub const XK_LEFT: Keysym = 0xff51;
pub const XK_UP: Keysym = 0xff52;
pub const XK_RIGHT: Keysym = 0xff53;
pub const XK_DOWN: Keysym = 0xff54;
pub const XK_PAGE_UP: Keysym = 0xff55;
pub const XK_PAGE_DOWN: Keysym = 0xff56;
pub const XK_END: Keysym = 0xff57;
pub const XK_PRINT: Keysym = 0xff61;
pub const XK_INSERT: Keysym = 0xff63;
pub const XK_NUM_LOCK: Keysym = 0xff7f;

pub const XK_F1: Keysym = function_key(1);
pub const XK_F2: Keysym = function_key(2);
pub const XK_F3: Keysym = function_key(3);
pub const XK_F4: Keysym = function_key(4);
pub const XK_F5: Keysym = function_key(5);
pub const XK_F6: Keysym = function_key(6);
pub const XK_F7: Keysym = function_key(7);
pub const XK_F8: Keysym = function_key(8);
pub const XK_F9: Keysym = function_key(9);
pub const XK_F10: Keysym = function_key(10);
pub const XK_F11: Keysym = function_key(11);
pub const XK_F12: Keysym = function_key(12);

pub const XF86_MON_BRIGHTNESS_UP: Keysym = 0x1008ff02;
pub const XF86_MON_BRIGHTNESS_DOWN: Keysym = 0x1008ff03;
pub const XF86_AUDIO_LOWER_VOLUME: Keysym = 0x1008ff11;
pub const XF86_AUDIO_MUTE: Keysym = 0x1008ff12;
pub const XF86_AUDIO_RAISE_VOLUME: Keysym = 0x1008ff13;

const NAMES: &[(Keysym, &str)] = &[
    (XK_SPACE, "Space"),
    (XK_BACKSPACE, "Backspace"),
    (XK_TAB, "Tab"),
    (XK_RETURN, "Return"),
    (XK_ESCAPE, "Escape"),
    (XK_DELETE, "Delete"),
    (XK_HOME, "Home"),
    (XK_LEFT, "Left"),
    (XK_UP, "Up"),
    (XK_RIGHT, "Right"),
    (XK_DOWN, "Down"),
    (XK_PAGE_UP, "PageUp"),
    (XK_PAGE_DOWN, "PageDown"),
    (XK_END, "End"),
    (XK_PRINT, "Print"),
    (XK_INSERT, "Insert"),
    (XK_NUM_LOCK, "NumLock"),
    (XF86_MON_BRIGHTNESS_UP, "MonBrightnessUp"),
    (XF86_MON_BRIGHTNESS_DOWN, "MonBrightnessDown"),
    (XF86_AUDIO_LOWER_VOLUME, "AudioLowerVolume"),
    (XF86_AUDIO_MUTE, "AudioMute"),
    (XF86_AUDIO_RAISE_VOLUME, "AudioRaiseVolume"),
];

/// Readable name of a keysym for log output.
pub fn format_keysym(keysym: Keysym) -> String {
    if let Some((_, name)) = NAMES.iter().find(|(candidate, _)| *candidate == keysym) {
        return name.to_string();
    }
    if (XK_F1..=XK_F12).contains(&keysym) {
        return format!("F{}", keysym - function_key(0));
    }

    match char::from_u32(keysym) {
        Some(ch) if ch.is_ascii_graphic() => ch.to_ascii_uppercase().to_string(),
        _ => format!("{:#x}", keysym),
    }
}
