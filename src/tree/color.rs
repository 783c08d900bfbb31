use std::fmt::{Display, Error, Formatter};

use serde::Serialize;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/// The color models that a color literal like `rgb { 255 0 0 }` can be written in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Colorspace {
    /// Red, green, blue, each 0 to 255.
    Rgb,
    /// Hue, saturation, value, each 0 to 1.
    Hsv,
    /// Hue 0 to 360, saturation and value 0 to 100.
    Hsv360,
}

/// One channel of a color, kept the way it was written: `255` stays an integer and `0.5` a real.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Channel {
    Int(i64),
    Real(f64),
}

impl Channel {
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Channel::Int(i) => i as f64,
            Channel::Real(r) => r,
        }
    }
}

impl From<i64> for Channel {
    fn from(i: i64) -> Self {
        Channel::Int(i)
    }
}

impl From<f64> for Channel {
    fn from(r: f64) -> Self {
        Channel::Real(r)
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Channel::Int(i) => write!(f, "{i}"),
            Channel::Real(r) => write!(f, "{r}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    colorspace: Colorspace,
    channels: [Channel; 3],
}

impl Color {
    pub fn new<C: Into<Channel>>(colorspace: Colorspace, channels: [C; 3]) -> Self {
        Color { colorspace, channels: channels.map(Into::into) }
    }

    pub fn colorspace(&self) -> Colorspace {
        self.colorspace
    }

    pub fn channels(&self) -> [Channel; 3] {
        self.channels
    }

    /// Convert to 8-bit RGB, for the map and flag renderers.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb(&self) -> [u8; 3] {
        let [a, b, c] = self.channels.map(Channel::as_f64);
        let (r, g, b) = match self.colorspace {
            Colorspace::Rgb => (a / 255.0, b / 255.0, c / 255.0),
            Colorspace::Hsv => hsv_to_rgb(a, b, c),
            Colorspace::Hsv360 => hsv_to_rgb(a / 360.0, b / 100.0, c / 100.0),
        };
        [r, g, b].map(|x| (x.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// All inputs and outputs are in the range 0 to 1.
#[allow(clippy::many_single_char_names, clippy::cast_possible_truncation)]
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = (h.rem_euclid(1.0)) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as i64 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let [a, b, c] = self.channels;
        write!(f, "{} {{ {a} {b} {c} }}", self.colorspace)
    }
}
