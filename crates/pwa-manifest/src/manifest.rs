use crate::icon::Icon;
use crate::related::RelatedApplication;
use crate::types::{DisplayMode, Orientation, TextDirection};
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::trace;

pub const ICONS: &str = "icons";
pub const RELATED_APPLICATIONS: &str = "related_applications";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid {field} '{value}': must be one of {allowed}")]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: String,
    },
    #[error("failed to write manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A value stored under one manifest member.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Bool(bool),
    TextList(Vec<String>),
    Icons(Vec<Icon>),
    RelatedApplications(Vec<RelatedApplication>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn render(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::from(s.as_str()),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::TextList(items) => items.iter().map(String::as_str).collect(),
            FieldValue::Icons(icons) => icons
                .iter()
                .map(|icon| Value::Object(icon.render()))
                .collect(),
            FieldValue::RelatedApplications(apps) => apps
                .iter()
                .map(|app| Value::Object(app.render()))
                .collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

macro_rules! integer_field {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(n: $ty) -> Self {
                    FieldValue::Number(Number::from(n))
                }
            }
        )+
    };
}

integer_field!(i32, i64, u32, u64);

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::TextList(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::TextList(items.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<Icon>> for FieldValue {
    fn from(icons: Vec<Icon>) -> Self {
        FieldValue::Icons(icons)
    }
}

impl From<Vec<RelatedApplication>> for FieldValue {
    fn from(apps: Vec<RelatedApplication>) -> Self {
        FieldValue::RelatedApplications(apps)
    }
}

/// A web application manifest under construction.
///
/// Members are kept in first-insertion order; overwriting a member keeps its
/// original position. That order is the key order of the rendered JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: Vec<(String, FieldValue)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manifest from an initial ordered set of members.
    /// Later duplicates overwrite earlier ones in place.
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut manifest = Self::new();
        for (key, value) in fields {
            manifest.set(key, value);
        }
        manifest
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn icon_list(&self) -> &[Icon] {
        match self.get(ICONS) {
            Some(FieldValue::Icons(icons)) => icons.as_slice(),
            _ => &[],
        }
    }

    pub fn related_application_list(&self) -> &[RelatedApplication] {
        match self.get(RELATED_APPLICATIONS) {
            Some(FieldValue::RelatedApplications(apps)) => apps.as_slice(),
            _ => &[],
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set any member, overwriting an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.slot_mut(&key) {
            Some(slot) => *slot = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    pub fn name(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("name", value.into())
    }

    pub fn short_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("short_name", value.into())
    }

    pub fn description(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("description", value.into())
    }

    pub fn scope(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("scope", value.into())
    }

    pub fn start_url(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("start_url", value.into())
    }

    pub fn language(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("lang", value.into())
    }

    /// Accepts text or a number; the sender ID is commonly written as an integer.
    pub fn gcm_sender_id(&mut self, value: impl Into<FieldValue>) -> &mut Self {
        self.set("gcm_sender_id", value)
    }

    pub fn theme_color(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("theme_color", value.into())
    }

    pub fn background_color(&mut self, value: impl Into<String>) -> &mut Self {
        self.set("background_color", value.into())
    }

    /// Replace the whole `icons` list.
    pub fn icons(&mut self, icons: Vec<Icon>) -> &mut Self {
        self.set(ICONS, icons)
    }

    /// Append one icon, creating the list on first use.
    pub fn icon(&mut self, icon: Icon) -> &mut Self {
        if let Some(FieldValue::Icons(icons)) = self.slot_mut(ICONS) {
            icons.push(icon);
            return self;
        }
        self.set(ICONS, vec![icon])
    }

    /// Replace the whole `related_applications` list.
    pub fn related_applications(&mut self, apps: Vec<RelatedApplication>) -> &mut Self {
        self.set(RELATED_APPLICATIONS, apps)
    }

    /// Append one related application, creating the list on first use.
    pub fn add_related_application(&mut self, app: RelatedApplication) -> &mut Self {
        if let Some(FieldValue::RelatedApplications(apps)) = self.slot_mut(RELATED_APPLICATIONS) {
            apps.push(app);
            return self;
        }
        self.set(RELATED_APPLICATIONS, vec![app])
    }

    pub fn prefer_related_applications(&mut self, prefer: bool) -> &mut Self {
        self.set("prefer_related_applications", prefer)
    }

    /// Set `display` from a string, rejecting anything outside the display modes.
    /// The manifest is untouched on error.
    pub fn display(&mut self, value: &str) -> Result<&mut Self, ManifestError> {
        let mode = value.parse::<DisplayMode>().inspect_err(|e| trace!("{e}"))?;
        Ok(self.display_mode(mode))
    }

    pub fn display_mode(&mut self, mode: DisplayMode) -> &mut Self {
        self.set(DisplayMode::FIELD, mode.as_str())
    }

    pub fn fullscreen(&mut self) -> &mut Self {
        self.display_mode(DisplayMode::Fullscreen)
    }

    pub fn standalone(&mut self) -> &mut Self {
        self.display_mode(DisplayMode::Standalone)
    }

    pub fn minimal_ui(&mut self) -> &mut Self {
        self.display_mode(DisplayMode::MinimalUi)
    }

    pub fn browser(&mut self) -> &mut Self {
        self.display_mode(DisplayMode::Browser)
    }

    /// Set `orientation` from a string, rejecting unknown orientations.
    /// The manifest is untouched on error.
    pub fn orientation(&mut self, value: &str) -> Result<&mut Self, ManifestError> {
        let orientation = value
            .parse::<Orientation>()
            .inspect_err(|e| trace!("{e}"))?;
        Ok(self.orientation_mode(orientation))
    }

    pub fn orientation_mode(&mut self, orientation: Orientation) -> &mut Self {
        self.set(Orientation::FIELD, orientation.as_str())
    }

    pub fn natural(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::Natural)
    }

    pub fn portrait(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::Portrait)
    }

    pub fn portrait_primary(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::PortraitPrimary)
    }

    pub fn portrait_secondary(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::PortraitSecondary)
    }

    pub fn landscape(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::Landscape)
    }

    pub fn landscape_primary(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::LandscapePrimary)
    }

    pub fn landscape_secondary(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::LandscapeSecondary)
    }

    pub fn any_orientation(&mut self) -> &mut Self {
        self.orientation_mode(Orientation::Any)
    }

    /// Set `dir` from a string, rejecting anything but `ltr`, `rtl` and `auto`.
    /// The manifest is untouched on error.
    pub fn text_direction(&mut self, value: &str) -> Result<&mut Self, ManifestError> {
        let dir = value
            .parse::<TextDirection>()
            .inspect_err(|e| trace!("{e}"))?;
        Ok(self.text_direction_mode(dir))
    }

    pub fn text_direction_mode(&mut self, dir: TextDirection) -> &mut Self {
        self.set(TextDirection::FIELD, dir.as_str())
    }

    /// Ordered JSON object for the whole document, with icons and related
    /// applications expanded to their object form.
    pub fn render(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), value.render()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(manifest: &Manifest) -> Vec<&str> {
        manifest.fields().map(|(k, _)| k).collect()
    }

    #[test]
    fn empty_manifest_has_no_fields() {
        let manifest = Manifest::new();
        assert!(manifest.is_empty());
        assert!(manifest.render().is_empty());
    }

    #[test]
    fn setting_name_and_description() {
        let mut manifest = Manifest::new();
        manifest
            .name("My Awesome App")
            .short_name("AwesomeApp")
            .description("Just testing");

        assert_eq!(keys(&manifest), vec!["name", "short_name", "description"]);
        assert_eq!(
            manifest.get("short_name").and_then(FieldValue::as_str),
            Some("AwesomeApp")
        );
    }

    #[test]
    fn setting_other_properties() {
        let mut manifest = Manifest::new();
        manifest
            .name("My Awesome App")
            .short_name("AwesomeApp")
            .description("Just testing")
            .language("en-GB")
            .scope("/myapp/")
            .start_url("/?utm_source=homescreen")
            .theme_color("aliceblue")
            .background_color("#ff0000")
            .gcm_sender_id(12345);

        assert_eq!(
            keys(&manifest),
            vec![
                "name",
                "short_name",
                "description",
                "lang",
                "scope",
                "start_url",
                "theme_color",
                "background_color",
                "gcm_sender_id",
            ]
        );
        assert_eq!(manifest.render()["gcm_sender_id"], Value::from(12345));
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let mut manifest = Manifest::new();
        manifest.name("first").short_name("short").name("second");
        assert_eq!(keys(&manifest), vec!["name", "short_name"]);
        assert_eq!(manifest.render()["name"], "second");
    }

    #[test]
    fn from_fields_preserves_order() {
        let manifest = Manifest::from_fields([("theme_color", "red"), ("name", "App")]);
        assert_eq!(keys(&manifest), vec!["theme_color", "name"]);
    }

    #[test]
    fn generic_set_accepts_text_lists() {
        let mut manifest = Manifest::new();
        manifest.set("categories", vec!["games", "utilities"]);
        assert_eq!(
            serde_json::to_string(&manifest.render()).unwrap(),
            r#"{"categories":["games","utilities"]}"#
        );
    }

    #[test]
    fn icons_replace_then_append() {
        let mut manifest = Manifest::new();
        manifest.icons(vec![
            Icon::new("icon/lowres.webp", "48x48"),
            Icon::new("icon/lowres", "48x48"),
        ]);
        manifest.icon(Icon::new("icon/hd_hi.ico", [72, 96, 128, 256]));

        let srcs: Vec<&str> = manifest.icon_list().iter().map(Icon::src).collect();
        assert_eq!(srcs, vec!["icon/lowres.webp", "icon/lowres", "icon/hd_hi.ico"]);

        manifest.icons(vec![Icon::new("only.png", 16)]);
        assert_eq!(manifest.icon_list().len(), 1);
        assert_eq!(manifest.icon_list()[0].sizes(), "16x16");
    }

    #[test]
    fn first_icon_creates_list() {
        let mut manifest = Manifest::new();
        manifest.name("App").icon(Icon::new("icon/hd_hi.ico", [72, 96]));
        assert_eq!(keys(&manifest), vec!["name", "icons"]);
        assert_eq!(manifest.icon_list()[0].sizes(), "72x72 96x96");
    }

    #[test]
    fn appending_does_not_disturb_other_fields() {
        let mut manifest = Manifest::new();
        manifest
            .icon(Icon::new("a.png", 48))
            .name("App")
            .icon(Icon::new("b.png", 96));
        assert_eq!(keys(&manifest), vec!["icons", "name"]);
        assert_eq!(manifest.icon_list().len(), 2);
    }

    #[test]
    fn related_applications_append_and_prefer() {
        let mut manifest = Manifest::new();
        manifest
            .add_related_application(
                RelatedApplication::new(
                    "play",
                    "https://play.google.com/store/apps/details?id=com.example.app1",
                )
                .with_id("com.example.app1"),
            )
            .add_related_application(RelatedApplication::new(
                "itunes",
                "https://itunes.apple.com/app/example-app1/id123456789",
            ))
            .prefer_related_applications(true);

        let rendered = manifest.render();
        assert_eq!(rendered["prefer_related_applications"], true);
        let apps = rendered["related_applications"].as_array().unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0]["id"], "com.example.app1");
        assert!(apps[1].get("id").is_none());
    }

    #[test]
    fn related_applications_replace_accumulated_list() {
        let mut manifest = Manifest::new();
        manifest.add_related_application(RelatedApplication::new("play", "https://a"));
        manifest.related_applications(vec![RelatedApplication::new("itunes", "https://b")]);
        let platforms: Vec<&str> = manifest
            .related_application_list()
            .iter()
            .map(RelatedApplication::platform)
            .collect();
        assert_eq!(platforms, vec!["itunes"]);
    }

    #[test]
    fn display_accepts_every_mode() {
        for mode in DisplayMode::ALL {
            let mut manifest = Manifest::new();
            manifest.display(mode.as_str()).unwrap();
            assert_eq!(manifest.render()["display"], mode.as_str());
        }
    }

    #[test]
    fn display_shortcuts() {
        let cases: [(fn(&mut Manifest) -> &mut Manifest, &str); 4] = [
            (Manifest::standalone, "standalone"),
            (Manifest::browser, "browser"),
            (Manifest::minimal_ui, "minimal-ui"),
            (Manifest::fullscreen, "fullscreen"),
        ];
        for (shortcut, expected) in cases {
            let mut manifest = Manifest::new();
            shortcut(&mut manifest);
            assert_eq!(manifest.render()["display"], expected);
        }
    }

    #[test]
    fn invalid_display_leaves_manifest_unchanged() {
        let mut manifest = Manifest::new();
        manifest.standalone();
        let before = manifest.clone();

        let err = manifest.display("billboard").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::InvalidValue { field: "display", .. }
        ));
        assert_eq!(manifest, before);
    }

    #[test]
    fn orientation_shortcuts() {
        let cases: [(fn(&mut Manifest) -> &mut Manifest, &str); 8] = [
            (Manifest::natural, "natural"),
            (Manifest::portrait, "portrait"),
            (Manifest::portrait_primary, "portrait-primary"),
            (Manifest::portrait_secondary, "portrait-secondary"),
            (Manifest::landscape, "landscape"),
            (Manifest::landscape_primary, "landscape-primary"),
            (Manifest::landscape_secondary, "landscape-secondary"),
            (Manifest::any_orientation, "any"),
        ];
        for (shortcut, expected) in cases {
            let mut manifest = Manifest::new();
            shortcut(&mut manifest);
            assert_eq!(manifest.render()["orientation"], expected);
        }
    }

    #[test]
    fn invalid_orientation_is_rejected() {
        let mut manifest = Manifest::new();
        manifest.orientation("sideways").unwrap_err();
        manifest.orientation("landscape-primary").unwrap();
        assert_eq!(keys(&manifest), vec!["orientation"]);
        assert!(manifest.orientation("upside-down").is_err());
        assert_eq!(manifest.render()["orientation"], "landscape-primary");
    }

    #[test]
    fn text_direction() {
        let mut manifest = Manifest::new();
        manifest.text_direction("rtl").unwrap();
        assert_eq!(manifest.render()["dir"], "rtl");

        let err = manifest.text_direction("sideways").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid dir 'sideways': must be one of ltr, rtl, auto"
        );
        assert_eq!(manifest.render()["dir"], "rtl");
    }

    #[test]
    fn empty_icon_list_renders_as_empty_array() {
        let mut manifest = Manifest::new();
        manifest.icons(Vec::new());
        assert_eq!(
            serde_json::to_string(&manifest.render()).unwrap(),
            r#"{"icons":[]}"#
        );
    }
}
