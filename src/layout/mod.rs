pub mod bstack;
pub mod deck;
pub mod floating;
pub mod grid;
pub mod monocle;
pub mod tiling;

use crate::geometry::Rect;
use serde::Deserialize;
use x11rb::protocol::xproto::Window;

pub type LayoutBox = Box<dyn Layout>;

/// One visible, non-floating client in tiling order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiledClient {
    pub window: Window,
    pub weight: f32,
}

/// Per-tag parameters handed to every arrange call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub master_count: usize,
    pub master_fraction: f32,
}

/// How a layout treats client borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Strip the border of a sole client, restore it once others appear.
    StripSingle,
    /// Clients cover each other completely, borders always go.
    AlwaysStrip,
    /// Never touch borders.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum LayoutKind {
    Tile,
    Floating,
    Monocle,
    Bstack,
    Grid,
    Deck,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 6] = [
        Self::Tile,
        Self::Floating,
        Self::Monocle,
        Self::Bstack,
        Self::Grid,
        Self::Deck,
    ];

    pub fn new(&self) -> LayoutBox {
        match self {
            Self::Tile => Box::new(tiling::TilingLayout),
            Self::Floating => Box::new(floating::FloatingLayout),
            Self::Monocle => Box::new(monocle::MonocleLayout),
            Self::Bstack => Box::new(bstack::BstackLayout),
            Self::Grid => Box::new(grid::GridLayout),
            Self::Deck => Box::new(deck::DeckLayout),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Tile => Self::Bstack,
            Self::Bstack => Self::Deck,
            Self::Deck => Self::Monocle,
            Self::Monocle => Self::Grid,
            Self::Grid => Self::Floating,
            Self::Floating => Self::Tile,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Floating => "floating",
            Self::Monocle => "monocle",
            Self::Bstack => "bstack",
            Self::Grid => "grid",
            Self::Deck => "deck",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "tile" | "tiling" => Ok(Self::Tile),
            "floating" | "float" => Ok(Self::Floating),
            "monocle" => Ok(Self::Monocle),
            "bstack" => Ok(Self::Bstack),
            "grid" | "gaplessgrid" => Ok(Self::Grid),
            "deck" => Ok(Self::Deck),
            _ => Err(format!("Invalid Layout Type: {}", s)),
        }
    }

    /// False only for the floating layout, which leaves geometry alone.
    pub fn arranges(&self) -> bool {
        !matches!(self, Self::Floating)
    }

    /// Layouts with a master area that nmaster and mfact act on.
    pub fn has_master_area(&self) -> bool {
        matches!(self, Self::Tile | Self::Bstack | Self::Deck)
    }

    pub fn border_policy(&self) -> BorderPolicy {
        match self {
            Self::Tile | Self::Bstack | Self::Grid => BorderPolicy::StripSingle,
            Self::Monocle => BorderPolicy::AlwaysStrip,
            Self::Deck | Self::Floating => BorderPolicy::Keep,
        }
    }

    /// Symbol shown in the bar. Monocle reports the position of the focused
    /// client among `tiled_count`, deck the number of hidden stack clients.
    pub fn symbol(&self, tiled_count: usize, master_count: usize, focused_position: usize) -> String {
        match self {
            Self::Monocle if tiled_count > 0 => format!("[{}/{}]", focused_position, tiled_count),
            Self::Deck if tiled_count > master_count => {
                format!(" D {}", tiled_count - master_count)
            }
            _ => self.new().symbol().to_string(),
        }
    }
}

pub trait Layout {
    /// Outer rectangles, border included, one per entry of `clients`.
    fn arrange(&self, clients: &[TiledClient], area: Rect, params: &LayoutParams) -> Vec<Rect>;
    fn name(&self) -> &'static str;
    fn symbol(&self) -> &'static str;
}

/// Greedy weighted split of `extent` among `weights`. Each share is taken
/// from what is left so rounding never piles up, and the last share ends
/// exactly at the far edge.
pub fn weighted_split(extent: i32, weights: &[f32]) -> Vec<i32> {
    let mut remaining = extent;
    let mut remaining_weight: f32 = weights.iter().sum();
    let mut shares = Vec::with_capacity(weights.len());

    for (index, &weight) in weights.iter().enumerate() {
        let share = if index + 1 == weights.len() || remaining_weight <= 0.0 {
            remaining
        } else {
            (remaining as f32 * (weight / remaining_weight)) as i32
        };
        shares.push(share);
        remaining -= share;
        remaining_weight -= weight;
    }

    shares
}

/// Size of the master area along the split axis.
pub(crate) fn master_extent(total: i32, client_count: usize, params: &LayoutParams) -> i32 {
    if client_count > params.master_count {
        if params.master_count == 0 {
            0
        } else {
            (total as f32 * params.master_fraction) as i32
        }
    } else {
        total
    }
}

/// Split `clients` into weights of the master and the stack partition.
pub(crate) fn partition_weights(clients: &[TiledClient], master_count: usize) -> (Vec<f32>, Vec<f32>) {
    let split = master_count.min(clients.len());
    let weights: Vec<f32> = clients.iter().map(|client| client.weight).collect();
    let (master, stack) = weights.split_at(split);
    (master.to_vec(), stack.to_vec())
}
