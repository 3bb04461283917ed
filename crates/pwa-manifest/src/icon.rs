use serde::Serialize;
use serde_json::{Map, Value};

/// One element of a size list: either a square edge length or a preformatted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeToken {
    Square(i64),
    Raw(String),
}

impl SizeToken {
    fn format(&self) -> String {
        match self {
            SizeToken::Square(n) => square(*n),
            SizeToken::Raw(s) => s.clone(),
        }
    }
}

impl From<&str> for SizeToken {
    fn from(s: &str) -> Self {
        SizeToken::Raw(s.to_owned())
    }
}

impl From<String> for SizeToken {
    fn from(s: String) -> Self {
        SizeToken::Raw(s)
    }
}

/// Size input accepted by [`Icon::new`].
///
/// Integers expand to `"NxN"`, lists are joined with single spaces in order,
/// and raw strings are trusted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sizes {
    Single(i64),
    List(Vec<SizeToken>),
    Raw(String),
}

impl Sizes {
    /// Normalize into the space-separated `WxH` string stored on the icon.
    pub fn normalize(&self) -> String {
        match self {
            Sizes::Single(n) => square(*n),
            Sizes::List(tokens) => tokens
                .iter()
                .map(SizeToken::format)
                .collect::<Vec<_>>()
                .join(" "),
            Sizes::Raw(s) => s.clone(),
        }
    }
}

fn square(n: i64) -> String {
    format!("{n}x{n}")
}

macro_rules! integer_sizes {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for SizeToken {
                fn from(n: $ty) -> Self {
                    SizeToken::Square(i64::from(n))
                }
            }

            impl From<$ty> for Sizes {
                fn from(n: $ty) -> Self {
                    Sizes::Single(i64::from(n))
                }
            }
        )+
    };
}

integer_sizes!(u16, u32, i32, i64);

impl From<&str> for Sizes {
    fn from(s: &str) -> Self {
        Sizes::Raw(s.to_owned())
    }
}

impl From<String> for Sizes {
    fn from(s: String) -> Self {
        Sizes::Raw(s)
    }
}

impl<T: Into<SizeToken>> From<Vec<T>> for Sizes {
    fn from(items: Vec<T>) -> Self {
        Sizes::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SizeToken>, const N: usize> From<[T; N]> for Sizes {
    fn from(items: [T; N]) -> Self {
        Sizes::List(items.into_iter().map(Into::into).collect())
    }
}

/// An entry of the manifest `icons` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    src: String,
    sizes: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    density: Option<f64>,
}

impl Icon {
    pub fn new(src: impl Into<String>, sizes: impl Into<Sizes>) -> Self {
        Self {
            src: src.into(),
            sizes: sizes.into().normalize(),
            mime_type: None,
            density: None,
        }
    }

    /// Set the MIME type. An empty string leaves the type unset.
    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        self.mime_type = (!mime_type.is_empty()).then_some(mime_type);
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn sizes(&self) -> &str {
        &self.sizes
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn density(&self) -> Option<f64> {
        self.density
    }

    /// Ordered object form: `src`, `sizes`, then `type` and `density` when set.
    pub fn render(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("src".to_owned(), Value::from(self.src.as_str()));
        map.insert("sizes".to_owned(), Value::from(self.sizes.as_str()));
        if let Some(mime_type) = &self.mime_type {
            map.insert("type".to_owned(), Value::from(mime_type.as_str()));
        }
        if let Some(density) = self.density {
            // Non-finite densities have no JSON form and render as null.
            map.insert("density".to_owned(), Value::from(density));
        }
        map
    }
}
