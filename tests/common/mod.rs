#![allow(dead_code)]

pub mod fixtures;

use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Width and height of the 1-based page's MediaBox
    pub fn page_size(&self, page_num: u32) -> Result<(f32, f32), Box<dyn std::error::Error>> {
        let page_id = *self
            .doc
            .get_pages()
            .get(&page_num)
            .ok_or_else(|| format!("no page {}", page_num))?;
        let media_box = self
            .doc
            .get_object(page_id)?
            .as_dict()?
            .get(b"MediaBox")?
            .as_array()?
            .iter()
            .map(|o| o.as_float())
            .collect::<Result<Vec<f32>, _>>()?;
        Ok((media_box[2] - media_box[0], media_box[3] - media_box[1]))
    }

    /// Number of image XObjects referenced by the 1-based page
    pub fn image_count(&self, page_num: u32) -> Result<usize, Box<dyn std::error::Error>> {
        let page_id = *self
            .doc
            .get_pages()
            .get(&page_num)
            .ok_or_else(|| format!("no page {}", page_num))?;
        let page = self.doc.get_object(page_id)?.as_dict()?;
        let resources = page.get(b"Resources")?.as_dict()?;
        Ok(match resources.get(b"XObject") {
            Ok(xobjects) => xobjects.as_dict()?.len(),
            Err(_) => 0,
        })
    }

    /// A text entry from the document's /Info dictionary
    pub fn info_string(&self, key: &str) -> Option<String> {
        let info_id = self.doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
        let info = self.doc.get_object(info_id).ok()?.as_dict().ok()?;
        let value = info.get(key.as_bytes()).ok()?.as_str().ok()?;
        Some(String::from_utf8_lossy(value).to_string())
    }
}

#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "expected {} page(s), found {}",
            $count,
            $pdf.page_count()
        );
    };
}

#[macro_export]
macro_rules! assert_pdf_page_size {
    ($pdf:expr, $page:expr, $width:expr, $height:expr) => {{
        let (w, h) = $pdf.page_size($page)?;
        assert!(
            (w - $width as f32).abs() < 0.01 && (h - $height as f32).abs() < 0.01,
            "page {} is {}x{}, expected {}x{}",
            $page,
            w,
            h,
            $width,
            $height
        );
    }};
}
