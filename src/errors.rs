use thiserror::Error;

pub type WmResult<T> = Result<T, WmError>;

#[derive(Debug, Error)]
pub enum WmError {
    #[error(transparent)]
    X11(X11Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("fatal X error {error} for request opcode {request}")]
    Protocol { request: u8, error: String },
}

#[derive(Debug, Error)]
pub enum X11Error {
    #[error(transparent)]
    ConnectError(#[from] x11rb::errors::ConnectError),
    #[error(transparent)]
    ConnectionError(#[from] x11rb::errors::ConnectionError),
    #[error(transparent)]
    ReplyError(#[from] x11rb::errors::ReplyError),
    #[error(transparent)]
    ReplyOrIdError(#[from] x11rb::errors::ReplyOrIdError),
    #[error("failed to open X11 display")]
    DisplayOpenFailed,
    #[error("failed to load Xft font: {0}")]
    FontLoadFailed(String),
    #[error("failed to create XftDraw")]
    DrawCreateFailed,
    #[error("another window manager is already running")]
    OtherWindowManager,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse RON config: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),
    #[error("config needs at least one tag")]
    NoTags,
    #[error("too many tags: {0} (at most 31)")]
    TooManyTags(usize),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("invalid variable name '{0}': must start with $")]
    InvalidVariableName(String),
    #[error("invalid #DEFINE syntax: '{0}'. Expected: #DEFINE $var_name = value")]
    InvalidDefine(String),
    #[error("undefined variable '{0}': define it with #DEFINE before use")]
    UndefinedVariable(String),
}

impl<T: Into<X11Error>> From<T> for WmError {
    fn from(value: T) -> Self {
        Self::X11(value.into())
    }
}

/// Errors the window manager tolerates: requests racing against windows that
/// have already gone away, or grabs another client holds.
pub fn is_ignorable(request_opcode: u8, kind: x11rb::protocol::ErrorKind) -> bool {
    use x11rb::protocol::ErrorKind;
    use x11rb::protocol::xproto::{
        CONFIGURE_WINDOW_REQUEST, COPY_AREA_REQUEST, GRAB_BUTTON_REQUEST, GRAB_KEY_REQUEST,
        POLY_FILL_RECTANGLE_REQUEST, POLY_SEGMENT_REQUEST, POLY_TEXT8_REQUEST,
        SET_INPUT_FOCUS_REQUEST,
    };

    match kind {
        ErrorKind::Window => true,
        ErrorKind::Match => {
            request_opcode == SET_INPUT_FOCUS_REQUEST || request_opcode == CONFIGURE_WINDOW_REQUEST
        }
        ErrorKind::Drawable => matches!(
            request_opcode,
            POLY_TEXT8_REQUEST | POLY_FILL_RECTANGLE_REQUEST | POLY_SEGMENT_REQUEST | COPY_AREA_REQUEST
        ),
        ErrorKind::Access => {
            request_opcode == GRAB_BUTTON_REQUEST || request_opcode == GRAB_KEY_REQUEST
        }
        _ => false,
    }
}
