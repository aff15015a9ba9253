//! JSON page manifests.
//!
//! A manifest lists the pages of a document along with its metadata:
//!
//! ```json
//! {
//!   "title": "Holiday",
//!   "dpi": 144,
//!   "pages": [
//!     { "type": "image", "path": "beach.png" },
//!     { "type": "blank", "width": 595, "height": 842 },
//!     { "type": "view", "frame": { "width": 320, "height": 480 },
//!       "background": "#fafafa",
//!       "subviews": [ { "type": "view",
//!                       "frame": { "x": 10, "y": 10, "width": 300, "height": 200 },
//!                       "image": "header.png" } ] },
//!     { "type": "scroll", "frame": { "width": 320, "height": 480 },
//!       "contentSize": { "width": 320, "height": 2000 },
//!       "contentOffset": { "y": 600 } }
//!   ]
//! }
//! ```
//!
//! Relative image paths resolve against the manifest's directory.

use crate::config::{Dpi, GenerateOptions};
use crate::error::GenerateError;
use crate::generator::{Page, PdfGenerator};
use crate::image_source::{Image, ImageSource};
use crate::view::{ScrollView, View, ViewNode};
use pagecast_types::{Color, Point, Rect, Size};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub dpi: Option<f32>,
    pub pages: Vec<PageSpec>,
    #[serde(skip)]
    base_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageSpec {
    Image { path: PathBuf },
    Blank { width: f32, height: f32 },
    View(ViewSpec),
    Scroll(ScrollSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeSpec {
    View(ViewSpec),
    Scroll(ScrollSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSpec {
    pub frame: Rect,
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub clips_to_bounds: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub subviews: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSpec {
    pub frame: Rect,
    #[serde(default)]
    pub background: Option<Color>,
    pub content_size: Size,
    #[serde(default)]
    pub content_offset: Point,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub subviews: Vec<NodeSpec>,
}

impl Manifest {
    /// Reads a manifest file. Image paths inside it resolve against the
    /// file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            GenerateError::Manifest(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let base_path = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        Self::from_json(&source, base_path)
    }

    pub fn from_json(source: &str, base_path: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        let mut manifest: Manifest = serde_json::from_str(source)?;
        manifest.base_path = base_path.into();
        Ok(manifest)
    }

    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            title: self.title.clone(),
            author: self.author.clone(),
            creator: self.creator.clone(),
            dpi: self.dpi.map(Dpi::from).unwrap_or_default(),
        }
    }

    /// Builds the generator and the page list.
    ///
    /// Images used as view contents are decoded here. Full-page images are
    /// decoded lazily when their page is rendered.
    pub fn into_document(self) -> Result<(PdfGenerator, Vec<Page>), GenerateError> {
        let generator = PdfGenerator::builder()
            .with_options(self.options())
            .build()?;
        let pages = self
            .pages
            .iter()
            .map(|spec| self.page(spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((generator, pages))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    fn page(&self, spec: &PageSpec) -> Result<Page, GenerateError> {
        Ok(match spec {
            PageSpec::Image { path } => Page::Source(ImageSource::Path(self.resolve(path))),
            PageSpec::Blank { width, height } => Page::Blank(Size::new(*width, *height)),
            PageSpec::View(view) => self.view(view)?.into(),
            PageSpec::Scroll(scroll) => self.scroll_view(scroll)?.into(),
        })
    }

    fn node(&self, spec: &NodeSpec) -> Result<ViewNode, GenerateError> {
        Ok(match spec {
            NodeSpec::View(view) => self.view(view)?.into(),
            NodeSpec::Scroll(scroll) => self.scroll_view(scroll)?.into(),
        })
    }

    fn view(&self, spec: &ViewSpec) -> Result<View, GenerateError> {
        let contents = match &spec.image {
            Some(path) => Some(self.load_image(path)?),
            None => None,
        };
        Ok(View {
            frame: spec.frame,
            background: spec.background,
            contents,
            subviews: self.nodes(&spec.subviews)?,
            clips_to_bounds: spec.clips_to_bounds,
            hidden: spec.hidden,
        })
    }

    fn scroll_view(&self, spec: &ScrollSpec) -> Result<ScrollView, GenerateError> {
        Ok(ScrollView {
            frame: spec.frame,
            background: spec.background,
            content_size: spec.content_size,
            content_offset: spec.content_offset,
            subviews: self.nodes(&spec.subviews)?,
            hidden: spec.hidden,
        })
    }

    fn nodes(&self, specs: &[NodeSpec]) -> Result<Vec<ViewNode>, GenerateError> {
        specs.iter().map(|spec| self.node(spec)).collect()
    }

    fn load_image(&self, path: &Path) -> Result<Image, GenerateError> {
        ImageSource::Path(self.resolve(path)).into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_page_kinds() {
        let json = r##"{
            "title": "Doc",
            "dpi": 144,
            "pages": [
                { "type": "image", "path": "a.png" },
                { "type": "blank", "width": 100, "height": 50 },
                { "type": "view", "frame": { "width": 10, "height": 20 }, "background": "#fff",
                  "subviews": [ { "type": "scroll", "frame": { "width": 5, "height": 5 },
                                  "contentSize": { "width": 5, "height": 50 } } ] },
                { "type": "scroll", "frame": { "x": 3, "width": 10, "height": 10 },
                  "contentSize": { "width": 10, "height": 40 }, "contentOffset": { "y": 12 } }
            ]
        }"##;
        let manifest = Manifest::from_json(json, "/base").unwrap();
        assert_eq!(manifest.options().dpi, Dpi::Custom(144.0));
        assert_eq!(manifest.options().title.as_deref(), Some("Doc"));

        let (_, pages) = manifest.into_document().unwrap();
        assert_eq!(pages.len(), 4);
        match &pages[0] {
            Page::Source(source) => assert_eq!(source.as_path(), Some(Path::new("/base/a.png"))),
            other => panic!("unexpected page {:?}", other),
        }
        assert!(matches!(pages[1], Page::Blank(size) if size == Size::new(100.0, 50.0)));
        match &pages[2] {
            Page::Item(item) => {
                assert_eq!(item.page_size(), Size::new(10.0, 20.0));
            }
            other => panic!("unexpected page {:?}", other),
        }
        match &pages[3] {
            Page::Item(item) => assert_eq!(item.page_size(), Size::new(10.0, 40.0)),
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn unknown_page_type_is_a_manifest_error() {
        let err = Manifest::from_json(r#"{"pages": [{"type": "video"}]}"#, "").unwrap_err();
        assert!(matches!(err, GenerateError::Manifest(_)));
    }

    #[test]
    fn malformed_background_colour_is_a_manifest_error() {
        for colour in ["#éa", "#+f+f+f"] {
            let json = format!(
                r#"{{"pages": [{{"type": "view", "frame": {{"width": 10, "height": 10}},
                                "background": "{colour}"}}]}}"#
            );
            let err = Manifest::from_json(&json, "").unwrap_err();
            assert!(matches!(err, GenerateError::Manifest(_)), "{colour}: {err}");
        }
    }

    #[test]
    fn missing_view_image_reports_resolved_path() {
        let json = r#"{"pages": [{"type": "view", "frame": {"width": 1, "height": 1},
                                  "image": "gone.png"}]}"#;
        let err = Manifest::from_json(json, "/nowhere").unwrap().into_document().unwrap_err();
        match err {
            GenerateError::ImageLoadFailed(source) => {
                assert_eq!(source.as_path(), Some(Path::new("/nowhere/gone.png")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_dpi_is_rejected() {
        let json = r#"{"dpi": -3, "pages": [{"type": "blank", "width": 1, "height": 1}]}"#;
        let err = Manifest::from_json(json, "").unwrap().into_document().unwrap_err();
        assert!(matches!(err, GenerateError::InvalidDpi(_)));
    }
}
