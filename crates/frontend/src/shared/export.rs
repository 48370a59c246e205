/// Выгрузка и печать документов, собранных на клиенте (квитанции)
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlIFrameElement, Url};

const PRINT_FRAME_ID: &str = "print-frame";

/// Скачать HTML-документ как отдельный файл
pub fn download_html(content: &str, filename: &str) -> Result<(), String> {
    let blob = create_blob(content, "text/html;charset=utf-8;")?;
    download_blob(&blob, filename)
}

/// Напечатать HTML-документ через скрытый iframe.
///
/// Документ сам вызывает `window.print()` после загрузки, поэтому
/// живой DOM страницы в печать не попадает.
pub fn print_html(content: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    // Предыдущий iframe мог остаться от прошлой печати
    if let Some(old) = document.get_element_by_id(PRINT_FRAME_ID) {
        old.remove();
    }

    let frame = document
        .create_element("iframe")
        .map_err(|e| format!("Failed to create iframe: {:?}", e))?
        .dyn_into::<HtmlIFrameElement>()
        .map_err(|e| format!("Failed to cast to iframe: {:?}", e))?;

    frame.set_id(PRINT_FRAME_ID);
    let style = frame.style();
    for (name, value) in [
        ("position", "fixed"),
        ("width", "0"),
        ("height", "0"),
        ("border", "0"),
        ("right", "0"),
        ("bottom", "0"),
    ] {
        style
            .set_property(name, value)
            .map_err(|e| format!("Failed to set style: {:?}", e))?;
    }
    frame.set_srcdoc(content);

    body.append_child(&frame)
        .map_err(|e| format!("Failed to append iframe: {:?}", e))?;

    Ok(())
}

/// Создает Blob объект с текстовым содержимым
fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

/// Имя файла без символов, недопустимых в файловых системах
pub fn safe_filename(stem: &str, extension: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}.{}", cleaned.trim_matches('_'), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("receipt-PO/0001 #3", "html"), "receipt-PO_0001__3.html");
    }
}
