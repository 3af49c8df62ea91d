//! Printable page shell for the PDF rasterization path.

/// Fixed rasterization geometry: an 800px column with 40px padding, black
/// 14px Arial on a white background at 1.6 line height, and collapsed
/// table borders. The rasterizer captures the page at this exact layout.
const PAGE_STYLE: &str = "\
body{width:800px;padding:40px;margin:0;background-color:#ffffff;color:#000000;\
font-family:Arial,sans-serif;font-size:14px;line-height:1.6}\
table{border-collapse:collapse;width:100%;margin:20px 0}\
th,td{border:1px solid #000000;padding:4px 8px;text-align:left}";

/// Wrap a rendered HTML fragment in a complete printable page.
#[must_use]
pub fn page_document(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <style>{PAGE_STYLE}</style></head><body>{body}</body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_fragment() {
        let page = page_document("<p>hi</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<body><p>hi</p></body>"));
        assert!(page.ends_with("</html>"));
    }

    #[test]
    fn test_contains_fixed_geometry() {
        let page = page_document("");
        assert!(page.contains("width:800px"));
        assert!(page.contains("padding:40px"));
        assert!(page.contains("font-size:14px"));
        assert!(page.contains("line-height:1.6"));
        assert!(page.contains("border-collapse:collapse"));
    }
}
