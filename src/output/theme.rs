use serde::{Deserialize, Serialize};

pub type Rgb = (u8, u8, u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub card: Rgb,
    pub card_hover: Rgb,
    pub text: Rgb,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                card: (0xff, 0xff, 0xff),
                card_hover: (0xea, 0xea, 0xea),
                text: (0x21, 0x21, 0x21),
            },
            Self::Dark => Palette {
                card: (0x1e, 0x1e, 0x1e),
                card_hover: (0x2c, 0x2c, 0x2c),
                text: (0xff, 0xff, 0xff),
            },
        }
    }
}
