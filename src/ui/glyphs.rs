//! Pixel maps for the ghost figures. Each map is 15 rows of 14 pixels; every
//! pixel is drawn as two terminal cells.
//!
//! `.` blank, `P` body, `B` body highlight, `D` body shade, `A` accent,
//! `C` cap / gear, `F` feet, `W` eye white, `E` pupil.
//! The three top-right pixels of rows 0-2 stay blank for the sleep "z"s.

use crate::domain::ToolKind;

pub const PIXEL_ROWS: usize = 15;
pub const PIXEL_COLS: usize = 14;

pub type PixelMap = [&'static str; PIXEL_ROWS];

const CLAUDE: PixelMap = [
    "..............",
    "..............",
    ".....CCCC.....",
    "...CCCCCCCC...",
    "..CCCCCCCCCCCC",
    "..PPPPPPPPPP..",
    ".PPPPPPPPPPPP.",
    ".PPWEPPPPWEPP.",
    ".PPWEPPPPWEPP.",
    ".PBPPPPPPPPPP.",
    ".PPPPPAAPPPPP.",
    ".PPPPPPPPPPPP.",
    ".PDPPPPPPPPDP.",
    ".PP.PPPP.PPPP.",
    ".FF..FFFF..FF.",
];

const CODEX: PixelMap = [
    "..............",
    "......AA......",
    ".......C......",
    "....PPPPPP....",
    "..PPPPPPPPPP..",
    ".PCCCCCCCCCCP.",
    ".CWECCCCCCWEC.",
    ".PCCCCCCCCCCP.",
    ".PPPPPPPPPPPP.",
    ".PBPPPPPPPPPP.",
    ".PPPPDDDDPPPP.",
    ".PPPPPPPPPPPP.",
    ".PDPPPPPPPPDP.",
    ".PP.PPPP.PPPP.",
    ".FF..FFFF..FF.",
];

const COPILOT: PixelMap = [
    "..............",
    "..............",
    "....CCCCCC....",
    "..CC......CC..",
    "..CPPPPPPPPC..",
    "CCPPPPPPPPPPCC",
    "CCPPWEPPWEPPCC",
    "CCPPWEPPWEPPCC",
    ".PPPPPPPPPPPP.",
    ".PBPPPPPPPPPP.",
    ".PPPPPAAPPPPP.",
    ".PPPPPPPPPPPP.",
    ".PDPPPPPPPPDP.",
    ".PP.PPPP.PPPP.",
    ".FF..FFFF..FF.",
];

const OPENCODE: PixelMap = [
    "..............",
    "..............",
    "....PPPPPP....",
    "..PPPPPPPPPP..",
    ".PPPPPPPPPPPP.",
    ".PPPPPPPPPPPP.",
    ".PPWEPPPPWEPP.",
    ".PPWEPPPPWEPP.",
    ".PPPPPPPPPPPP.",
    ".PBPAPPPPAPPP.",
    ".PPAPPPPPPAPP.",
    ".PPPAPPPPAPPP.",
    ".PDPPPPPPPPDP.",
    ".PP.PPPP.PPPP.",
    ".FF..FFFF..FF.",
];

/// Sleep animation: pixels added on top of blank cells, one list per frame.
pub const ZZZ_FRAMES: [&[(usize, usize, char)]; 3] = [
    &[(2, 11, 'z')],
    &[(2, 11, 'z'), (1, 12, 'z')],
    &[(2, 11, 'z'), (1, 12, 'z'), (0, 13, 'Z')],
];

pub fn pixel_map(kind: ToolKind) -> &'static PixelMap {
    match kind {
        ToolKind::Claude => &CLAUDE,
        ToolKind::Codex => &CODEX,
        ToolKind::Copilot => &COPILOT,
        ToolKind::OpenCode => &OPENCODE,
    }
}
