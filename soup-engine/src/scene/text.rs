// text.rs - Shell text in each supported language

use std::str::FromStr;

use crate::error::SoupError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl FromStr for Language {
    type Err = SoupError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.to_ascii_lowercase().as_str() {
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            _ => Err(SoupError::UnknownLanguage(code.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texts {
    pub title: &'static str,
    pub description: &'static str,
    pub start_button: &'static str,
    /// Caption next to the stir button when the hint is visible.
    pub scatter_hint: &'static str,
}

const ZH: Texts = Texts {
    title: "療育雞湯",
    description: "累了嗎？上次喝雞湯是什麼時候呢？\n喝雞湯的時候，點一點油滴間的界線，\n小油滴就會融為一個大油滴，\n試著把所有油滴都點在一起吧！\n請慢慢品嘗。",
    start_button: "開始喝雞湯",
    scatter_hint: "攪拌一下",
};

const EN: Texts = Texts {
    title: "Healing Chicken Soup",
    description: "Tired? When was the last time you had chicken soup?\nClick the boundaries between droplets to merge them.\nLet the warmth heal you.",
    start_button: "Start Sipping",
    scatter_hint: "Stir",
};

impl Language {
    pub fn texts(self) -> &'static Texts {
        match self {
            Language::Zh => &ZH,
            Language::En => &EN,
        }
    }
}
