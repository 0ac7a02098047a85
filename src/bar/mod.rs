mod bar;
mod font;
pub mod model;

pub use bar::{Bar, TabBar};
pub use font::Font;
pub use model::{BarClick, BarModel, Tab};
