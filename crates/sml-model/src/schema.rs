//! Static schema: every element the decoder recognizes, the properties each
//! one accepts, their kinds and their defaults.
//!
//! The decoder reads names and defaults from here, and editors can use the
//! `doc` strings for hover text and completion.

use sml_parser::PropertyValue;

// ── Property kinds ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    /// Free-form string.
    Text,
    /// Integer literal.
    Int,
    /// Hex color string (`#RRGGBB` or `#AARRGGBB`).
    Color,
    /// One, two or four space-separated integers in a string.
    Padding,
    /// `"true"` or `"false"`.
    Flag,
    /// Font weight name such as `"bold"`.
    FontWeight,
    /// `"left"`, `"center"` or `"right"`.
    TextAlign,
    /// Timestamp string `YYYY.MM.DD HH.MM.SS`.
    Timestamp,
}

impl PropKind {
    /// Whether a literal of this variant is accepted for the kind.
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match self {
            PropKind::Int => matches!(value, PropertyValue::Int(_)),
            _ => matches!(value, PropertyValue::String(_)),
        }
    }

    /// The literal the kind expects, used in diagnostics.
    pub fn literal_name(&self) -> &'static str {
        match self {
            PropKind::Int => "integer",
            _ => "string",
        }
    }
}

/// Value used when a property is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropDefault {
    Str(&'static str),
    Int(i64),
    /// No value; the model field is optional.
    Unset,
}

impl PropDefault {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropDefault::Str(s) => *s,
            _ => "",
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            PropDefault::Int(n) => *n,
            _ => 0,
        }
    }
}

// ── Property schema ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct PropSchema {
    pub name: &'static str,
    pub kind: PropKind,
    pub default: PropDefault,
    /// Absence produces a warning.
    pub required: bool,
    pub doc: &'static str,
}

const fn prop(name: &'static str, kind: PropKind, default: PropDefault, doc: &'static str) -> PropSchema {
    PropSchema {
        name,
        kind,
        default,
        required: false,
        doc,
    }
}

const fn required(name: &'static str, doc: &'static str) -> PropSchema {
    PropSchema {
        name,
        kind: PropKind::Text,
        default: PropDefault::Str(""),
        required: true,
        doc,
    }
}

const fn text(name: &'static str, default: &'static str, doc: &'static str) -> PropSchema {
    prop(name, PropKind::Text, PropDefault::Str(default), doc)
}

const fn int(name: &'static str, default: i64, doc: &'static str) -> PropSchema {
    prop(name, PropKind::Int, PropDefault::Int(default), doc)
}

// ── Element schema ────────────────────────────────────────────────────────

pub struct ElementSchema {
    pub name: &'static str,
    pub doc: &'static str,
    pub props: &'static [PropSchema],
    /// Names of elements allowed directly inside this one.
    pub children: &'static [&'static str],
}

impl ElementSchema {
    pub fn prop(&self, name: &str) -> Option<&'static PropSchema> {
        self.props.iter().find(|p| p.name == name)
    }

    pub fn accepts_child(&self, name: &str) -> bool {
        self.children.contains(&name)
    }
}

/// Look up an element by name. `Book` resolves to the `Ebook` schema.
pub fn element(name: &str) -> Option<&'static ElementSchema> {
    let name = if name == "Book" { "Ebook" } else { name };
    ELEMENTS.iter().find(|e| e.name == name)
}

/// Default string of `prop` on `element`, or `""` when either is unknown.
pub fn default_str(element_name: &str, prop: &str) -> &'static str {
    element(element_name)
        .and_then(|e| e.prop(prop))
        .map_or("", |p| p.default.as_str())
}

/// Elements that may appear at the top of a document.
pub const ROOTS: &[&str] = &["Page", "App", "Ebook", "Book"];

// ── Shared sets ───────────────────────────────────────────────────────────

const UI_ELEMENTS: &[&str] = &[
    "Text", "Button", "Image", "Spacer", "Video", "Youtube", "Sound", "Row", "Column", "Markdown",
    "Scene",
];

const SIZE_PROPS: [PropSchema; 3] = [
    int("weight", 0, "Share of the remaining space in a row or column."),
    int("width", 0, "Fixed width; 0 leaves it to the layout."),
    int("height", 0, "Fixed height; 0 leaves it to the layout."),
];

const THEME_PROPS: &[PropSchema] = &[
    text("primary", "", "Primary brand color."),
    text("onPrimary", "", "Content drawn on `primary`."),
    text("primaryContainer", "", ""),
    text("onPrimaryContainer", "", ""),
    text("secondary", "", ""),
    text("onSecondary", "", ""),
    text("secondaryContainer", "", ""),
    text("onSecondaryContainer", "", ""),
    text("tertiary", "", ""),
    text("onTertiary", "", ""),
    text("tertiaryContainer", "", ""),
    text("onTertiaryContainer", "", ""),
    text("error", "", ""),
    text("errorContainer", "", ""),
    text("onError", "", ""),
    text("onErrorContainer", "", ""),
    text("background", "", "Window background."),
    text("onBackground", "", ""),
    text("surface", "", ""),
    text("onSurface", "", ""),
    text("surfaceVariant", "", ""),
    text("onSurfaceVariant", "", ""),
    text("outline", "", ""),
    text("inverseOnSurface", "", ""),
    text("inverseSurface", "", ""),
    text("inversePrimary", "", ""),
    text("surfaceTint", "", ""),
    text("outlineVariant", "", ""),
    text("scrim", "", ""),
];

// ── Registry ──────────────────────────────────────────────────────────────

pub static ELEMENTS: &[ElementSchema] = &[
    // ── Pages ─────────────────────────────────────────────────────────────
    ElementSchema {
        name: "Page",
        doc: "The base element of an app page. Every other UI element lives inside a Page.",
        props: &[
            prop("color", PropKind::Color, PropDefault::Str(""), "Default text color."),
            prop("backgroundColor", PropKind::Color, PropDefault::Str(""), "Page background color."),
            prop("padding", PropKind::Padding, PropDefault::Str("0"), "Inner spacing: `\"8\"`, `\"4 8\"` or `\"1 2 3 4\"`."),
            prop("scrollable", PropKind::Flag, PropDefault::Str("false"), "Whether the page scrolls vertically."),
        ],
        children: UI_ELEMENTS,
    },
    ElementSchema {
        name: "Text",
        doc: "Renders a piece of text.",
        props: &[
            required("text", "The text to show."),
            prop("color", PropKind::Color, PropDefault::Str("#000000"), "Text color."),
            int("fontSize", 14, "Font size."),
            prop("fontWeight", PropKind::FontWeight, PropDefault::Str(""), "One of thin, extralight, light, medium, semibold, bold, extrabold, black."),
            prop("textAlign", PropKind::TextAlign, PropDefault::Str(""), "left, center or right."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Button",
        doc: "A clickable button. Clicking loads another page or opens a link.",
        props: &[
            required("label", "Caption of the button."),
            prop("color", PropKind::Color, PropDefault::Unset, "Caption color; the theme decides when unset."),
            prop("backgroundColor", PropKind::Color, PropDefault::Unset, "Button color; the theme decides when unset."),
            text("link", "", "`page:<name>` or `web:<url>`."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Image",
        doc: "Displays an image from the project's images folder.",
        props: &[
            required("src", "Image file name."),
            text("scale", "fit", "How the image fills its box."),
            text("link", "", "Target opened when the image is clicked."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Spacer",
        doc: "Empty space between two elements.",
        props: &[
            int("amount", 0, "Size of the gap."),
            SIZE_PROPS[0],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Video",
        doc: "Shows and plays a video.",
        props: &[
            required("src", "Video file name or URL."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Youtube",
        doc: "Shows and plays a YouTube video.",
        props: &[
            required("id", "The YouTube video id."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Sound",
        doc: "Plays a sound when the page is loaded.",
        props: &[required("src", "Sound file name.")],
        children: &[],
    },
    ElementSchema {
        name: "Row",
        doc: "Arranges its children horizontally.",
        props: &[
            prop("padding", PropKind::Padding, PropDefault::Str("0"), "Inner spacing."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: UI_ELEMENTS,
    },
    ElementSchema {
        name: "Column",
        doc: "Arranges its children vertically.",
        props: &[
            prop("padding", PropKind::Padding, PropDefault::Str("0"), "Inner spacing."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: UI_ELEMENTS,
    },
    ElementSchema {
        name: "Markdown",
        doc: "Renders styled text written in markdown.",
        props: &[
            text("text", "", "Markdown source. Leading and trailing spaces of every line are dropped."),
            prop("color", PropKind::Color, PropDefault::Str("#FFFFFF"), "Text color."),
            int("fontSize", 14, "Font size."),
            prop("fontWeight", PropKind::FontWeight, PropDefault::Str(""), "Font weight name."),
            prop("textAlign", PropKind::TextAlign, PropDefault::Str(""), "left, center or right."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    ElementSchema {
        name: "Scene",
        doc: "Renders a 3D scene, from a static model to an interactive tutorial.",
        props: &[
            text("glb", "", "Binary glTF model."),
            text("gltf", "", "glTF model."),
            text("ibl", "", "Image based lighting environment."),
            text("skybox", "", "Skybox texture."),
            SIZE_PROPS[0],
            SIZE_PROPS[1],
            SIZE_PROPS[2],
        ],
        children: &[],
    },
    // ── Apps ──────────────────────────────────────────────────────────────
    ElementSchema {
        name: "App",
        doc: "Project file of an app: metadata, theme, navigation and deployment state.",
        props: &[
            text("name", "", "Display name."),
            text("icon", "", "Icon file name."),
            text("id", "", "Reverse-domain application id."),
            text("smlVersion", "1.1", "Language version the project was written for."),
        ],
        children: &["Theme", "Navigation", "Deployment"],
    },
    ElementSchema {
        name: "Theme",
        doc: "Material color roles used by the renderer.",
        props: THEME_PROPS,
        children: &[],
    },
    ElementSchema {
        name: "Navigation",
        doc: "How the pages of an app are reached.",
        props: &[text("type", "", "Navigation style.")],
        children: &["Item"],
    },
    ElementSchema {
        name: "Item",
        doc: "A page listed in the navigation.",
        props: &[text("page", "", "Page name without extension.")],
        children: &[],
    },
    ElementSchema {
        name: "Deployment",
        doc: "Files already uploaded, used to skip unchanged ones.",
        props: &[],
        children: &["File"],
    },
    ElementSchema {
        name: "File",
        doc: "One deployed file.",
        props: &[
            text("path", "", "Path relative to the project."),
            prop("time", PropKind::Timestamp, PropDefault::Str(""), "Modification time, `YYYY.MM.DD HH.MM.SS`."),
            text("type", "", "File category, such as page or image."),
        ],
        children: &[],
    },
    // ── Books ─────────────────────────────────────────────────────────────
    ElementSchema {
        name: "Ebook",
        doc: "Project file of an ebook. `Book` is accepted as an alias.",
        props: &[
            text("smlVersion", "1.1", "Language version the project was written for."),
            text("theme", "Epub3", "Export theme."),
            text("name", "", "Title."),
            text("language", "en", "Language code."),
            text("creator", "", "Author."),
            text("creatorLink", "#", "Link to the author."),
            text("bookLink", "#", "Link to the book."),
        ],
        children: &["Part"],
    },
    ElementSchema {
        name: "Part",
        doc: "A chapter file of the book.",
        props: &[
            text("src", "", "Markdown file of the part."),
            prop("pdfOnly", PropKind::Flag, PropDefault::Str("false"), "Leave the part out of the epub."),
        ],
        children: &[],
    },
];
