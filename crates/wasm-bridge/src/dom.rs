use ndi_gauge_integration::Markup;
use web_sys::{HtmlCanvasElement, HtmlElement};

/// Mirror widget markup onto the live canvas and optional placeholder
pub fn apply_markup(canvas: &HtmlCanvasElement, placeholder: Option<&HtmlElement>, markup: &Markup) {
    canvas.set_hidden(markup.canvas.hidden);

    if let Some(placeholder) = placeholder {
        placeholder.set_text_content(markup.loading_text.as_deref());
        placeholder.set_hidden(!markup.is_loading());
    }
}
