//! Dealing with which game the script files come from

use std::str::FromStr;

use anyhow::{anyhow, Result};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::helpers::stringify_choices;
use crate::parse::TextEncoding;

/// Enum specifying which game a script file belongs to.
///
/// The games differ in which text encodings their files are written in, so this decides the order
/// in which encodings are tried when reading a file.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Game {
    #[strum(serialize = "EU4")]
    Eu4,
    #[strum(serialize = "HoI3")]
    Hoi3,
    #[strum(serialize = "HoI3_vanilla")]
    Hoi3Vanilla,
    #[default]
    #[strum(serialize = "HoI4")]
    Hoi4,
    #[strum(serialize = "HoI4_beta")]
    Hoi4Beta,
    #[strum(serialize = "Stellaris")]
    Stellaris,
}

impl Game {
    /// The candidate encodings for this game's files, in the order they should be tried.
    pub fn encodings(self) -> &'static [TextEncoding] {
        use TextEncoding::{Utf8Sig, Windows1252};
        match self {
            Game::Eu4 | Game::Hoi3 | Game::Hoi3Vanilla => &[Windows1252, Utf8Sig],
            Game::Hoi4 | Game::Hoi4Beta | Game::Stellaris => &[Utf8Sig, Windows1252],
        }
    }

    /// Like [`FromStr`] but with an error message that lists the known games.
    pub fn from_name(name: &str) -> Result<Self> {
        Game::from_str(name).map_err(|_| {
            let choices: Vec<&str> = Game::iter().map(<&'static str>::from).collect();
            anyhow!("unknown game `{name}`, expected {}", stringify_choices(&choices))
        })
    }
}
