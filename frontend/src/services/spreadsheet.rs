use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlAnchorElement, Url};

pub const EXPORT_FILE_NAME: &str = "servidores_sociales.xlsx";

/// Value of the file input's `accept` attribute
pub const WORKBOOK_ACCEPT: &str = ".xlsx, .xls";

/// Whether a picked file looks like an Excel workbook the backend can read
pub fn is_workbook(file_name: &str) -> bool {
    let name = file_name.trim().to_ascii_lowercase();
    name.ends_with(".xlsx") || name.ends_with(".xls")
}

/// Hand the bytes to the browser as a download named `file_name`
pub fn save_download(bytes: &[u8], file_name: &str) -> Result<(), JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&parts)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
    link.set_href(&url);
    link.set_download(file_name);
    body.append_child(&link)?;
    link.click();
    link.remove();

    Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_workbook() {
        assert!(is_workbook("servidores.xlsx"));
        assert!(is_workbook("ALTA_2025.XLS"));
        assert!(!is_workbook("servidores.csv"));
        assert!(!is_workbook("xlsx"));
    }
}
