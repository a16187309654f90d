//! Typed domain model handed to renderers.
//!
//! Values here own all their data and know nothing about the parse tree
//! they were decoded from.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::padding::Padding;
use crate::schema;

/// Any decodable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Model {
    Page(Page),
    App(App),
    Book(Book),
}

impl Model {
    pub fn as_page(&self) -> Option<&Page> {
        match self {
            Model::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_app(&self) -> Option<&App> {
        match self {
            Model::App(app) => Some(app),
            _ => None,
        }
    }

    pub fn as_book(&self) -> Option<&Book> {
        match self {
            Model::Book(book) => Some(book),
            _ => None,
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub color: String,
    pub background_color: String,
    pub padding: Padding,
    pub scrollable: bool,
    pub elements: Vec<UIElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UIElement {
    Text(TextElement),
    Button(ButtonElement),
    Image(ImageElement),
    Spacer(SpacerElement),
    Video(VideoElement),
    Youtube(YoutubeElement),
    Sound(SoundElement),
    Row(ContainerElement),
    Column(ContainerElement),
    Markdown(MarkdownElement),
    Scene(SceneElement),
}

impl UIElement {
    /// The SML element name this value was decoded from.
    pub fn name(&self) -> &'static str {
        match self {
            UIElement::Text(_) => "Text",
            UIElement::Button(_) => "Button",
            UIElement::Image(_) => "Image",
            UIElement::Spacer(_) => "Spacer",
            UIElement::Video(_) => "Video",
            UIElement::Youtube(_) => "Youtube",
            UIElement::Sound(_) => "Sound",
            UIElement::Row(_) => "Row",
            UIElement::Column(_) => "Column",
            UIElement::Markdown(_) => "Markdown",
            UIElement::Scene(_) => "Scene",
        }
    }

    /// Nested elements of a `Row` or `Column`; empty for everything else.
    pub fn children(&self) -> &[UIElement] {
        match self {
            UIElement::Row(c) | UIElement::Column(c) => &c.children,
            _ => &[],
        }
    }
}

/// Layout hints shared by most elements. Zero means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub weight: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub text: String,
    pub color: Color,
    pub font_size: i64,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonElement {
    pub label: String,
    /// `None` leaves the renderer's theme color in place.
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub link: String,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub src: String,
    pub scale: String,
    pub link: String,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacerElement {
    pub amount: i64,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoElement {
    pub src: String,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeElement {
    pub id: String,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundElement {
    pub src: String,
}

/// Body of a `Row` or `Column`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerElement {
    pub padding: Padding,
    pub size: Size,
    pub children: Vec<UIElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownElement {
    pub text: String,
    pub color: Color,
    pub font_size: i64,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneElement {
    pub glb: String,
    pub gltf: String,
    pub ibl: String,
    pub skybox: String,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    #[default]
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Look up a weight by its SML name. The empty string is `Normal`.
    pub fn from_name(name: &str) -> Option<Self> {
        let weight = match name {
            "" | "normal" => FontWeight::Normal,
            "thin" => FontWeight::Thin,
            "extralight" => FontWeight::ExtraLight,
            "light" => FontWeight::Light,
            "medium" => FontWeight::Medium,
            "semibold" => FontWeight::SemiBold,
            "bold" => FontWeight::Bold,
            "extrabold" => FontWeight::ExtraBold,
            "black" => FontWeight::Black,
            _ => return None,
        };
        Some(weight)
    }

    /// CSS-style numeric weight, 100 to 900.
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Unspecified,
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "" => Some(TextAlign::Unspecified),
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        }
    }
}

// =============================================================================
// Apps
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub name: String,
    pub icon: String,
    pub id: String,
    pub sml_version: String,
    pub theme: Theme,
    pub navigation: Navigation,
    pub deployment: Deployment,
}

/// Defaults are the ones an empty `App {}` decodes to.
impl Default for App {
    fn default() -> Self {
        let default = |prop: &str| schema::default_str("App", prop).to_string();
        Self {
            name: default("name"),
            icon: default("icon"),
            id: default("id"),
            sml_version: default("smlVersion"),
            theme: Theme::default(),
            navigation: Navigation::default(),
            deployment: Deployment::default(),
        }
    }
}

/// Material color roles. Values are kept as written, usually `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,
    pub on_primary: String,
    pub primary_container: String,
    pub on_primary_container: String,
    pub secondary: String,
    pub on_secondary: String,
    pub secondary_container: String,
    pub on_secondary_container: String,
    pub tertiary: String,
    pub on_tertiary: String,
    pub tertiary_container: String,
    pub on_tertiary_container: String,
    pub error: String,
    pub error_container: String,
    pub on_error: String,
    pub on_error_container: String,
    pub background: String,
    pub on_background: String,
    pub surface: String,
    pub on_surface: String,
    pub surface_variant: String,
    pub on_surface_variant: String,
    pub outline: String,
    pub inverse_on_surface: String,
    pub inverse_surface: String,
    pub inverse_primary: String,
    pub surface_tint: String,
    pub outline_variant: String,
    pub scrim: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<NavigationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationItem {
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deployment {
    pub files: Vec<DeployedFile>,
}

/// A file uploaded by the deploy step, with its modification time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeployedFile {
    pub path: String,
    /// `None` when the time is missing or not in `YYYY.MM.DD HH.MM.SS` form.
    pub time: Option<NaiveDateTime>,
    #[serde(rename = "type")]
    pub kind: String,
}

// =============================================================================
// Books
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub sml_version: String,
    pub theme: String,
    pub name: String,
    pub language: String,
    pub creator: String,
    pub creator_link: String,
    pub book_link: String,
    pub parts: Vec<Part>,
}

/// Defaults are the ones an empty `Ebook {}` decodes to.
impl Default for Book {
    fn default() -> Self {
        let default = |prop: &str| schema::default_str("Ebook", prop).to_string();
        Self {
            sml_version: default("smlVersion"),
            theme: default("theme"),
            name: default("name"),
            language: default("language"),
            creator: default("creator"),
            creator_link: default("creatorLink"),
            book_link: default("bookLink"),
            parts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub src: String,
    /// Only included in the PDF export.
    pub pdf_only: bool,
}
