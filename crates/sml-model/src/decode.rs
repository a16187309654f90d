//! Tree to model decoding, driven by [`crate::schema`].

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sml_parser::{Element, ParseTree, Property, PropertyValue};

use crate::color::{parse_hex_color, Color};
use crate::model::*;
use crate::padding::{parse_padding, Padding};
use crate::schema::{self, ElementSchema};
use crate::{DecodeError, DecodeWarning, Decoded};

/// Format of `File { time: ... }` in deployment records.
pub const DEPLOY_TIME_FORMAT: &str = "%Y.%m.%d %H.%M.%S";

/// Decode a document, choosing the model by its root element.
pub fn decode(tree: &ParseTree) -> Result<Decoded<Model>, DecodeError> {
    let (root, root_schema) = find_root(tree)?;
    let mut decoder = Decoder::default();
    decoder.check_extra_roots(tree);

    let model = match root_schema.name {
        "Page" => Model::Page(decoder.page(root, root_schema)),
        "App" => Model::App(decoder.app(root, root_schema)),
        _ => Model::Book(decoder.book(root, root_schema)),
    };
    Ok(decoder.finish(model))
}

pub fn decode_page(tree: &ParseTree) -> Result<Decoded<Page>, DecodeError> {
    decode_as(tree, "Page", Decoder::page)
}

pub fn decode_app(tree: &ParseTree) -> Result<Decoded<App>, DecodeError> {
    decode_as(tree, "App", Decoder::app)
}

/// Decode an `Ebook` (or `Book`) document.
pub fn decode_book(tree: &ParseTree) -> Result<Decoded<Book>, DecodeError> {
    decode_as(tree, "Ebook", Decoder::book)
}

fn decode_as<T>(
    tree: &ParseTree,
    expected: &'static str,
    decode_root: impl FnOnce(&mut Decoder, &Element, &'static ElementSchema) -> T,
) -> Result<Decoded<T>, DecodeError> {
    let (root, root_schema) = find_root(tree)?;
    if root_schema.name != expected {
        return Err(DecodeError::WrongRoot {
            expected,
            found: root.name.clone(),
        });
    }

    let mut decoder = Decoder::default();
    decoder.check_extra_roots(tree);
    let value = decode_root(&mut decoder, root, root_schema);
    Ok(decoder.finish(value))
}

fn find_root(tree: &ParseTree) -> Result<(&Element, &'static ElementSchema), DecodeError> {
    let root = tree.root().ok_or(DecodeError::MissingRoot)?;
    let root_schema = schema::element(&root.name)
        .filter(|_| schema::ROOTS.contains(&root.name.as_str()))
        .ok_or_else(|| DecodeError::UnknownRoot {
            name: root.name.clone(),
            line: root.span.line,
        })?;
    log::trace!("decoding '{}' document", root_schema.name);
    Ok((root, root_schema))
}

// =============================================================================
// Decoder
// =============================================================================

#[derive(Default)]
struct Decoder {
    warnings: Vec<DecodeWarning>,
}

impl Decoder {
    fn finish<T>(self, value: T) -> Decoded<T> {
        for warning in &self.warnings {
            log::debug!("{warning}");
        }
        Decoded {
            value,
            warnings: self.warnings,
        }
    }

    fn warn(&mut self, warning: DecodeWarning) {
        self.warnings.push(warning);
    }

    fn check_extra_roots(&mut self, tree: &ParseTree) {
        for extra in tree.elements().skip(1) {
            self.warn(DecodeWarning::ExtraRoot {
                name: extra.name.clone(),
                line: extra.span.line,
            });
        }
    }

    /// Property reader for `el`. Leaf elements report nested elements here.
    fn props<'e>(&mut self, el: &'e Element, schema: &'static ElementSchema) -> Props<'e, '_> {
        if schema.children.is_empty() {
            self.children(el, schema);
        }
        Props::new(el, schema, &mut self.warnings)
    }

    /// Report unknown properties of an element whose values are not read.
    fn check_props(&mut self, el: &Element, schema: &'static ElementSchema) {
        for prop in el.properties() {
            if schema.prop(&prop.name).is_none() {
                self.warn(unknown_property(el, prop));
            }
        }
    }

    /// Recognized child elements of `parent`; the rest are reported.
    fn children<'e>(
        &mut self,
        parent: &'e Element,
        parent_schema: &'static ElementSchema,
    ) -> Vec<(&'e Element, &'static ElementSchema)> {
        let mut known = Vec::new();
        for child in parent.elements() {
            match schema::element(&child.name).filter(|_| parent_schema.accepts_child(&child.name)) {
                Some(child_schema) => known.push((child, child_schema)),
                None => self.warn(DecodeWarning::UnknownElement {
                    parent: parent.name.clone(),
                    name: child.name.clone(),
                    line: child.span.line,
                }),
            }
        }
        known
    }

    // ── Pages ─────────────────────────────────────────────────────────────

    fn page(&mut self, el: &Element, schema: &'static ElementSchema) -> Page {
        let mut p = self.props(el, schema);
        let page = Page {
            color: p.string("color"),
            background_color: p.string("backgroundColor"),
            padding: p.padding("padding"),
            scrollable: p.flag("scrollable"),
            elements: Vec::new(),
        };
        Page {
            elements: self.ui_elements(el, schema),
            ..page
        }
    }

    fn ui_elements(&mut self, parent: &Element, schema: &'static ElementSchema) -> Vec<UIElement> {
        self.children(parent, schema)
            .into_iter()
            .filter_map(|(el, s)| self.ui_element(el, s))
            .collect()
    }

    fn ui_element(&mut self, el: &Element, s: &'static ElementSchema) -> Option<UIElement> {
        let ui = match s.name {
            "Text" => {
                let mut p = self.props(el, s);
                UIElement::Text(TextElement {
                    text: p.string("text"),
                    color: p.color("color"),
                    font_size: p.int("fontSize"),
                    font_weight: p.font_weight("fontWeight"),
                    text_align: p.text_align("textAlign"),
                    size: p.size(),
                })
            }
            "Button" => {
                let mut p = self.props(el, s);
                UIElement::Button(ButtonElement {
                    label: p.string("label"),
                    color: p.optional_color("color"),
                    background_color: p.optional_color("backgroundColor"),
                    link: p.string("link"),
                    size: p.size(),
                })
            }
            "Image" => {
                let mut p = self.props(el, s);
                UIElement::Image(ImageElement {
                    src: p.string("src"),
                    scale: p.string("scale"),
                    link: p.string("link"),
                    size: p.size(),
                })
            }
            "Spacer" => {
                let mut p = self.props(el, s);
                UIElement::Spacer(SpacerElement {
                    amount: p.int("amount"),
                    weight: p.int("weight"),
                })
            }
            "Video" => {
                let mut p = self.props(el, s);
                UIElement::Video(VideoElement {
                    src: p.string("src"),
                    size: p.size(),
                })
            }
            "Youtube" => {
                let mut p = self.props(el, s);
                UIElement::Youtube(YoutubeElement {
                    id: p.string("id"),
                    size: p.size(),
                })
            }
            "Sound" => {
                let mut p = self.props(el, s);
                UIElement::Sound(SoundElement { src: p.string("src") })
            }
            "Row" => UIElement::Row(self.container(el, s)),
            "Column" => UIElement::Column(self.container(el, s)),
            "Markdown" => {
                let mut p = self.props(el, s);
                UIElement::Markdown(MarkdownElement {
                    text: trim_lines(&p.string("text")),
                    color: p.color("color"),
                    font_size: p.int("fontSize"),
                    font_weight: p.font_weight("fontWeight"),
                    text_align: p.text_align("textAlign"),
                    size: p.size(),
                })
            }
            "Scene" => {
                let mut p = self.props(el, s);
                UIElement::Scene(SceneElement {
                    glb: p.string("glb"),
                    gltf: p.string("gltf"),
                    ibl: p.string("ibl"),
                    skybox: p.string("skybox"),
                    size: p.size(),
                })
            }
            _ => return None,
        };
        Some(ui)
    }

    fn container(&mut self, el: &Element, s: &'static ElementSchema) -> ContainerElement {
        let mut p = self.props(el, s);
        let padding = p.padding("padding");
        let size = p.size();
        ContainerElement {
            padding,
            size,
            children: self.ui_elements(el, s),
        }
    }

    // ── Apps ──────────────────────────────────────────────────────────────

    fn app(&mut self, el: &Element, schema: &'static ElementSchema) -> App {
        let mut p = self.props(el, schema);
        let mut app = App {
            name: p.string("name"),
            icon: p.string("icon"),
            id: p.string("id"),
            sml_version: p.string("smlVersion"),
            ..App::default()
        };

        for (child, s) in self.children(el, schema) {
            match s.name {
                "Theme" => app.theme = self.theme(child, s),
                "Navigation" => app.navigation = self.navigation(child, s),
                "Deployment" => app.deployment = self.deployment(child, s),
                _ => {}
            }
        }
        app
    }

    fn theme(&mut self, el: &Element, s: &'static ElementSchema) -> Theme {
        let mut p = self.props(el, s);
        Theme {
            primary: p.string("primary"),
            on_primary: p.string("onPrimary"),
            primary_container: p.string("primaryContainer"),
            on_primary_container: p.string("onPrimaryContainer"),
            secondary: p.string("secondary"),
            on_secondary: p.string("onSecondary"),
            secondary_container: p.string("secondaryContainer"),
            on_secondary_container: p.string("onSecondaryContainer"),
            tertiary: p.string("tertiary"),
            on_tertiary: p.string("onTertiary"),
            tertiary_container: p.string("tertiaryContainer"),
            on_tertiary_container: p.string("onTertiaryContainer"),
            error: p.string("error"),
            error_container: p.string("errorContainer"),
            on_error: p.string("onError"),
            on_error_container: p.string("onErrorContainer"),
            background: p.string("background"),
            on_background: p.string("onBackground"),
            surface: p.string("surface"),
            on_surface: p.string("onSurface"),
            surface_variant: p.string("surfaceVariant"),
            on_surface_variant: p.string("onSurfaceVariant"),
            outline: p.string("outline"),
            inverse_on_surface: p.string("inverseOnSurface"),
            inverse_surface: p.string("inverseSurface"),
            inverse_primary: p.string("inversePrimary"),
            surface_tint: p.string("surfaceTint"),
            outline_variant: p.string("outlineVariant"),
            scrim: p.string("scrim"),
        }
    }

    fn navigation(&mut self, el: &Element, schema: &'static ElementSchema) -> Navigation {
        let kind = self.props(el, schema).string("type");
        let mut items = Vec::new();
        for (child, s) in self.children(el, schema) {
            items.push(NavigationItem {
                page: self.props(child, s).string("page"),
            });
        }
        Navigation { kind, items }
    }

    fn deployment(&mut self, el: &Element, schema: &'static ElementSchema) -> Deployment {
        self.check_props(el, schema);
        let mut files = Vec::new();
        for (child, s) in self.children(el, schema) {
            let mut p = self.props(child, s);
            files.push(DeployedFile {
                path: p.string("path"),
                time: p.timestamp("time"),
                kind: p.string("type"),
            });
        }
        Deployment { files }
    }

    // ── Books ─────────────────────────────────────────────────────────────

    fn book(&mut self, el: &Element, schema: &'static ElementSchema) -> Book {
        let mut p = self.props(el, schema);
        let mut book = Book {
            sml_version: p.string("smlVersion"),
            theme: p.string("theme"),
            name: p.string("name"),
            language: p.string("language"),
            creator: p.string("creator"),
            creator_link: p.string("creatorLink"),
            book_link: p.string("bookLink"),
            parts: Vec::new(),
        };

        for (child, s) in self.children(el, schema) {
            let mut p = self.props(child, s);
            book.parts.push(Part {
                src: p.string("src"),
                pdf_only: p.flag("pdfOnly"),
            });
        }
        book
    }
}

/// Markdown is usually indented to match the SML around it.
fn trim_lines(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

// =============================================================================
// Property access
// =============================================================================

fn unknown_property(element: &Element, prop: &Property) -> DecodeWarning {
    DecodeWarning::UnknownProperty {
        element: element.name.clone(),
        name: prop.name.clone(),
        line: prop.span.line,
    }
}

/// Typed, schema-checked view of one element's properties.
struct Props<'e, 'w> {
    element: &'e Element,
    schema: &'static ElementSchema,
    /// Last occurrence of each recognized property.
    values: HashMap<&'e str, &'e Property>,
    warnings: &'w mut Vec<DecodeWarning>,
}

impl<'e, 'w> Props<'e, 'w> {
    fn new(
        element: &'e Element,
        schema: &'static ElementSchema,
        warnings: &'w mut Vec<DecodeWarning>,
    ) -> Self {
        let mut values = HashMap::new();
        for prop in element.properties() {
            if schema.prop(&prop.name).is_some() {
                values.insert(prop.name.as_str(), prop);
            } else {
                warnings.push(unknown_property(element, prop));
            }
        }

        Self {
            element,
            schema,
            values,
            warnings,
        }
    }

    /// The value of `name` if present and of the right literal type.
    fn lookup(&mut self, name: &str) -> Option<&'e PropertyValue> {
        let spec = self.schema.prop(name)?;
        match self.values.get(name).copied() {
            Some(prop) if spec.kind.accepts(&prop.value) => Some(&prop.value),
            Some(prop) => {
                self.warnings.push(DecodeWarning::TypeMismatch {
                    element: self.element.name.clone(),
                    property: prop.name.clone(),
                    expected: spec.kind.literal_name(),
                    found: prop.value.kind_name(),
                    line: prop.span.line,
                });
                None
            }
            None => {
                if spec.required {
                    self.warnings.push(DecodeWarning::MissingProperty {
                        element: self.element.name.clone(),
                        property: name.to_string(),
                        line: self.element.span.line,
                    });
                }
                None
            }
        }
    }

    fn invalid(&mut self, name: &str, value: &str) {
        let line = self
            .values
            .get(name)
            .map_or(self.element.span.line, |p| p.span.line);
        self.warnings.push(DecodeWarning::InvalidValue {
            element: self.element.name.clone(),
            property: name.to_string(),
            value: value.to_string(),
            line,
        });
    }

    fn default_str(&self, name: &str) -> &'static str {
        self.schema.prop(name).map_or("", |p| p.default.as_str())
    }

    fn str_value(&mut self, name: &str) -> Option<&'e str> {
        match self.lookup(name) {
            Some(PropertyValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The written string, or the default.
    fn str_or_default(&mut self, name: &str) -> &'e str {
        match self.str_value(name) {
            Some(s) => s,
            None => self.default_str(name),
        }
    }

    fn string(&mut self, name: &str) -> String {
        self.str_or_default(name).to_string()
    }

    fn int(&mut self, name: &str) -> i64 {
        match self.lookup(name) {
            Some(PropertyValue::Int(n)) => *n,
            _ => self.schema.prop(name).map_or(0, |p| p.default.as_int()),
        }
    }

    fn color(&mut self, name: &str) -> Color {
        let hex = self.str_or_default(name);
        self.parse_color(name, hex)
    }

    fn optional_color(&mut self, name: &str) -> Option<Color> {
        let hex = self.str_value(name)?;
        Some(self.parse_color(name, hex))
    }

    fn parse_color(&mut self, name: &str, hex: &str) -> Color {
        parse_hex_color(hex).unwrap_or_else(|| {
            self.invalid(name, hex);
            Color::BLACK
        })
    }

    fn padding(&mut self, name: &str) -> Padding {
        parse_padding(self.str_or_default(name))
    }

    fn flag(&mut self, name: &str) -> bool {
        let value = self.str_or_default(name);
        if value != "true" && value != "false" {
            self.invalid(name, value);
        }
        value == "true"
    }

    fn font_weight(&mut self, name: &str) -> FontWeight {
        let value = self.str_or_default(name);
        FontWeight::from_name(value).unwrap_or_else(|| {
            self.invalid(name, value);
            FontWeight::default()
        })
    }

    fn text_align(&mut self, name: &str) -> TextAlign {
        let value = self.str_or_default(name);
        TextAlign::from_name(value).unwrap_or_else(|| {
            self.invalid(name, value);
            TextAlign::default()
        })
    }

    fn timestamp(&mut self, name: &str) -> Option<NaiveDateTime> {
        let value = self.str_value(name)?;
        match NaiveDateTime::parse_from_str(value, DEPLOY_TIME_FORMAT) {
            Ok(time) => Some(time),
            Err(_) => {
                self.invalid(name, value);
                None
            }
        }
    }

    fn size(&mut self) -> Size {
        Size {
            weight: self.int("weight"),
            width: self.int("width"),
            height: self.int("height"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_app, parse_book, parse_model, parse_page};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sml_parser::Parser;

    fn page(source: &str) -> Decoded<Page> {
        parse_page(source).unwrap()
    }

    fn only_element(source: &str) -> UIElement {
        let decoded = page(source);
        assert_eq!(decoded.value.elements.len(), 1, "{source}");
        decoded.value.elements.into_iter().next().unwrap()
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn test_page_with_text() {
        let decoded = page("Page{color:\"#FFFFFF\" Text{text:\"Hi\"}}");
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.value.color, "#FFFFFF");
        assert_eq!(
            decoded.value.elements,
            vec![UIElement::Text(TextElement {
                text: "Hi".into(),
                color: Color::BLACK,
                font_size: 14,
                font_weight: FontWeight::Normal,
                text_align: TextAlign::Unspecified,
                size: Size::default(),
            })]
        );
    }

    #[test]
    fn test_page_defaults() {
        let decoded = page("Page {}");
        assert_eq!(decoded.value, Page::default());
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn test_page_properties() {
        let decoded = page(
            "Page {\n  backgroundColor: \"#101010\"\n  padding: \"4 8\"\n  scrollable: \"true\"\n}",
        );
        let p = decoded.value;
        assert_eq!(p.background_color, "#101010");
        assert_eq!(p.padding, Padding::new(4, 8, 4, 8));
        assert!(p.scrollable);
    }

    #[test]
    fn test_text_properties() {
        let el = only_element(
            "Page { Text { text: \"T\" color: \"#FF0000\" fontSize: 24 fontWeight: \"bold\" textAlign: \"center\" weight: 1 } }",
        );
        let UIElement::Text(text) = el else { panic!("expected text") };
        assert_eq!(text.color, Color::rgb(0xFF, 0, 0));
        assert_eq!(text.font_size, 24);
        assert_eq!(text.font_weight, FontWeight::Bold);
        assert_eq!(text.text_align, TextAlign::Center);
        assert_eq!(text.size.weight, 1);
    }

    #[test]
    fn test_button_colors_are_optional() {
        let el = only_element("Page { Button { label: \"Go\" link: \"page:home\" } }");
        let UIElement::Button(button) = el else { panic!("expected button") };
        assert_eq!(button.color, None);
        assert_eq!(button.background_color, None);
        assert_eq!(button.link, "page:home");

        let el = only_element("Page { Button { label: \"Go\" color: \"#80FFFFFF\" } }");
        let UIElement::Button(button) = el else { panic!("expected button") };
        assert_eq!(button.color, Some(Color::argb(0x80, 0xFF, 0xFF, 0xFF)));
    }

    #[test]
    fn test_image_scale_defaults_to_fit() {
        let el = only_element("Page { Image { src: \"logo.png\" } }");
        let UIElement::Image(image) = el else { panic!("expected image") };
        assert_eq!(image.scale, "fit");
        assert_eq!(image.src, "logo.png");
    }

    #[rstest]
    #[case("Spacer { amount: 12 }", "Spacer")]
    #[case("Video { src: \"a.mp4\" height: 200 }", "Video")]
    #[case("Youtube { id: \"dQw4w9WgXcQ\" }", "Youtube")]
    #[case("Sound { src: \"ding.mp3\" }", "Sound")]
    #[case("Scene { glb: \"robot.glb\" skybox: \"sky.ktx\" }", "Scene")]
    #[case("Markdown { text: \"# Title\" }", "Markdown")]
    fn test_element_kinds(#[case] body: &str, #[case] name: &str) {
        let decoded = page(&format!("Page {{ {body} }}"));
        assert!(decoded.warnings.is_empty(), "{:?}", decoded.warnings);
        assert_eq!(decoded.value.elements[0].name(), name);
    }

    #[test]
    fn test_nested_containers() {
        let decoded = page(
            "Page {\n  Column {\n    padding: \"8\"\n    Row {\n      Text { text: \"a\" }\n      Text { text: \"b\" }\n    }\n  }\n}",
        );
        let column = &decoded.value.elements[0];
        assert_eq!(column.name(), "Column");
        let UIElement::Column(c) = column else { panic!("expected column") };
        assert_eq!(c.padding, Padding::uniform(8));
        let row = &c.children[0];
        assert_eq!(row.name(), "Row");
        assert_eq!(row.children().len(), 2);
    }

    #[test]
    fn test_markdown_lines_are_trimmed() {
        let el = only_element("Page {\n  Markdown {\n    text: \"\n      # Title\n      Body text  \n    \"\n  }\n}");
        let UIElement::Markdown(md) = el else { panic!("expected markdown") };
        assert_eq!(md.text, "\n# Title\nBody text\n");
        assert_eq!(md.color, Color::WHITE);
    }

    #[test]
    fn test_element_order_is_kept() {
        let decoded = page("Page { Spacer {} Text { text: \"x\" } Spacer {} }");
        let names: Vec<_> = decoded.value.elements.iter().map(UIElement::name).collect();
        assert_eq!(names, vec!["Spacer", "Text", "Spacer"]);
    }

    // =========================================================================
    // Warnings
    // =========================================================================

    #[test]
    fn test_duplicate_property_last_wins() {
        let el = only_element("Page { Text { text: \"first\" text: \"second\" } }");
        let UIElement::Text(text) = el else { panic!("expected text") };
        assert_eq!(text.text, "second");
    }

    #[test]
    fn test_unknown_element_is_skipped() {
        let decoded = page("Page {\n  Unicorn { horn: 1 }\n  Text { text: \"x\" }\n}");
        assert_eq!(decoded.value.elements.len(), 1);
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::UnknownElement {
                parent: "Page".into(),
                name: "Unicorn".into(),
                line: 2,
            }]
        );
    }

    #[test]
    fn test_misplaced_element_is_skipped() {
        let decoded = page("Page { Theme { primary: \"#FFFFFF\" } }");
        assert!(decoded.value.elements.is_empty());
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn test_children_of_leaf_are_reported() {
        let decoded = page("Page { Text { text: \"x\" Text { text: \"y\" } } }");
        assert_eq!(decoded.value.elements.len(), 1);
        assert_eq!(
            decoded.warnings[0].to_string(),
            "line 1: unknown element 'Text' inside 'Text'"
        );
    }

    #[test]
    fn test_unknown_property() {
        let decoded = page("Page { sparkle: 3 }");
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::UnknownProperty {
                element: "Page".into(),
                name: "sparkle".into(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_type_mismatch_uses_default() {
        let el = only_element("Page {\n  Text {\n    text: \"x\"\n    fontSize: \"big\"\n  }\n}");
        let UIElement::Text(text) = el else { panic!("expected text") };
        assert_eq!(text.font_size, 14);

        let decoded = page("Page {\n  Text {\n    text: \"x\"\n    fontSize: \"big\"\n  }\n}");
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::TypeMismatch {
                element: "Text".into(),
                property: "fontSize".into(),
                expected: "integer",
                found: "string",
                line: 4,
            }]
        );
    }

    #[test]
    fn test_float_where_integer_expected() {
        let decoded = page("Page { Spacer { amount: 1.5 } }");
        let UIElement::Spacer(spacer) = &decoded.value.elements[0] else { panic!("expected spacer") };
        assert_eq!(spacer.amount, 0);
        assert_eq!(
            decoded.warnings[0].to_string(),
            "line 1: 'amount' on 'Spacer' expects integer, got float"
        );
    }

    #[test]
    fn test_missing_required_property() {
        let decoded = page("Page {\n  Image {}\n}");
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::MissingProperty {
                element: "Image".into(),
                property: "src".into(),
                line: 2,
            }]
        );
        let UIElement::Image(image) = &decoded.value.elements[0] else { panic!("expected image") };
        assert_eq!(image.src, "");
    }

    #[rstest]
    #[case("Text { text: \"x\" color: \"red\" }")]
    #[case("Text { text: \"x\" fontWeight: \"heavy\" }")]
    #[case("Text { text: \"x\" textAlign: \"justify\" }")]
    fn test_invalid_values_warn(#[case] body: &str) {
        let decoded = page(&format!("Page {{ {body} }}"));
        assert_eq!(decoded.value.elements.len(), 1);
        assert!(matches!(decoded.warnings[..], [DecodeWarning::InvalidValue { .. }]));
    }

    #[test]
    fn test_invalid_color_is_black() {
        let el = only_element("Page { Text { text: \"x\" color: \"ZZZZZZ\" } }");
        let UIElement::Text(text) = el else { panic!("expected text") };
        assert_eq!(text.color, Color::BLACK);
    }

    #[test]
    fn test_flag_other_than_true_is_false() {
        let decoded = page("Page { scrollable: \"yes\" }");
        assert!(!decoded.value.scrollable);
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn test_extra_root_is_reported() {
        let decoded = page("Page {}\nPage {}");
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::ExtraRoot {
                name: "Page".into(),
                line: 2,
            }]
        );
    }

    // =========================================================================
    // Apps and books
    // =========================================================================

    const APP: &str = r##"App {
    smlVersion: "1.1"
    name: "Demo"
    version: "1.0"
    id: "at.crowdware.demo"
    icon: "icon.png"

    Navigation {
        type: "BottomNavigation"
        Item { page: "home" }
        Item { page: "about" }
    }

    Theme {
        primary: "#FFB59D"
        scrim: "#000000"
    }

    Deployment {
        File { path: "home.sml" time: "2024.11.02 14.05.33" type: "page" }
        File { path: "logo.png" time: "yesterday" type: "image" }
    }
}
"##;

    #[test]
    fn test_app() {
        let decoded = parse_app(APP).unwrap();
        let app = decoded.value;
        assert_eq!(app.name, "Demo");
        assert_eq!(app.id, "at.crowdware.demo");
        assert_eq!(app.sml_version, "1.1");
        assert_eq!(app.theme.primary, "#FFB59D");
        assert_eq!(app.theme.scrim, "#000000");
        assert_eq!(app.theme.on_primary, "");
        assert_eq!(app.navigation.kind, "BottomNavigation");
        let pages: Vec<_> = app.navigation.items.iter().map(|i| i.page.as_str()).collect();
        assert_eq!(pages, vec!["home", "about"]);
    }

    #[test]
    fn test_app_deployment_times() {
        let decoded = parse_app(APP).unwrap();
        let files = &decoded.value.deployment.files;
        assert_eq!(files.len(), 2);
        let expected = NaiveDate::from_ymd_opt(2024, 11, 2)
            .and_then(|d| d.and_hms_opt(14, 5, 33))
            .unwrap();
        assert_eq!(files[0].time, Some(expected));
        assert_eq!(files[0].kind, "page");
        assert_eq!(files[1].time, None);

        // `version` is not part of the model and the second time is malformed.
        let names: Vec<String> = decoded.warnings.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "line 4: unknown property 'version' on 'App'".to_string(),
                "line 21: invalid value \"yesterday\" for 'time' on 'File'".to_string(),
            ]
        );
    }

    #[test]
    fn test_app_defaults() {
        let app = parse_app("App {}").unwrap().value;
        assert_eq!(app.sml_version, "1.1");
        assert_eq!(app.id, "");
        assert_eq!(app.theme, Theme::default());
    }

    #[test]
    fn test_empty_projects_match_defaults() {
        assert_eq!(parse_app("App {}").unwrap().value, App::default());
        assert_eq!(parse_book("Ebook {}").unwrap().value, Book::default());
    }

    #[test]
    fn test_deployment_unknown_property() {
        let decoded = parse_app("App {\n  Deployment {\n    sparkle: 1\n  }\n}").unwrap();
        assert!(decoded.value.deployment.files.is_empty());
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::UnknownProperty {
                element: "Deployment".into(),
                name: "sparkle".into(),
                line: 3,
            }]
        );
    }

    #[test]
    fn test_book() {
        let book = parse_book(
            "Ebook {\n  name: \"Guide\"\n  creator: \"Art\"\n  Part { src: \"intro.md\" }\n  Part { src: \"print.md\" pdfOnly: \"true\" }\n}",
        )
        .unwrap()
        .value;
        assert_eq!(book.name, "Guide");
        assert_eq!(book.theme, "Epub3");
        assert_eq!(book.language, "en");
        assert_eq!(book.creator_link, "#");
        assert_eq!(
            book.parts,
            vec![
                Part { src: "intro.md".into(), pdf_only: false },
                Part { src: "print.md".into(), pdf_only: true },
            ]
        );
    }

    #[test]
    fn test_book_alias() {
        let decoded = parse_model("Book { name: \"B\" }").unwrap();
        assert_eq!(decoded.value.as_book().map(|b| b.name.as_str()), Some("B"));
    }

    // =========================================================================
    // Root selection and errors
    // =========================================================================

    #[rstest]
    #[case("Page {}", "Page")]
    #[case("// app\nApp {}", "App")]
    #[case("Ebook {}", "Book")]
    fn test_decode_picks_model(#[case] source: &str, #[case] kind: &str) {
        let model = parse_model(source).unwrap().value;
        let actual = match model {
            Model::Page(_) => "Page",
            Model::App(_) => "App",
            Model::Book(_) => "Book",
        };
        assert_eq!(actual, kind);
    }

    #[test]
    fn test_unknown_root() {
        let err = parse_model("\nWidget {}").unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownRoot {
                name: "Widget".into(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_ui_element_is_not_a_root() {
        let err = parse_model("Text { text: \"x\" }").unwrap_err();
        assert!(matches!(err, DecodeError::UnknownRoot { .. }));
    }

    #[test]
    fn test_wrong_root() {
        let err = parse_page("App {}").unwrap_err();
        assert_eq!(err.to_string(), "Expected root element 'Page', found 'App'");
        let err = parse_book("Page {}").unwrap_err();
        assert!(matches!(err, DecodeError::WrongRoot { expected: "Ebook", .. }));
    }

    #[test]
    fn test_missing_root() {
        assert_eq!(decode(&ParseTree::default()), Err(DecodeError::MissingRoot));
    }

    #[test]
    fn test_parse_error_is_lifted() {
        let err = parse_page("Page{").unwrap_err();
        assert!(matches!(err, DecodeError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 1: Missing '}' to close element 'Page'"
        );
    }

    #[test]
    fn test_decode_from_tree() {
        let tree = Parser::parse("Page { Text { text: \"Hi\" } }").unwrap();
        let decoded = decode_page(&tree).unwrap();
        assert_eq!(decoded.value.elements.len(), 1);
        let model = decode(&tree).unwrap().map(|m| m.as_page().is_some());
        assert!(model.value);
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn test_serialize_page() {
        let decoded = page("Page { padding: \"8\" Button { label: \"Go\" backgroundColor: \"#336699\" } }");
        let json = serde_json::to_value(&decoded.value).unwrap();
        assert_eq!(json["padding"]["top"], 8);
        assert_eq!(json["elements"][0]["type"], "Button");
        assert_eq!(json["elements"][0]["label"], "Go");
        assert_eq!(json["elements"][0]["backgroundColor"], "#336699");
        assert_eq!(json["elements"][0]["color"], serde_json::Value::Null);
    }

    #[test]
    fn test_serialize_model_roundtrip() {
        let model = parse_model(APP).unwrap().value;
        let json = serde_json::to_string(&model).unwrap();
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
