use std::collections::BTreeSet;

use eframe::egui::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movie,
    Tv,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Film",
            Self::Tv => "Series",
        }
    }
}

/// Tags are ASCII-lowercased on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub tags: BTreeSet<String>,
    pub kind: ItemKind,
    pub anchor: Vec2,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
        kind: ItemKind,
        anchor: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: tags
                .into_iter()
                .map(|tag| Into::<String>::into(tag).to_ascii_lowercase())
                .collect(),
            kind,
            anchor,
        }
    }
}
