//! Handlebars-based renderer for the generated C sources.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled and HTML
//! escaping disabled. Strict mode turns a `{{variable}}` missing from the data context
//! into an error instead of an empty string; a silently missing name would produce C
//! that fails to compile far from the actual cause. Escaping is off because the output
//! is C source, where `"` and `&&` must pass through untouched.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "name": "RENDER_GREETING", "params": ["char* name"] });
//! let output = renderer.render(embedded::PROTOTYPE, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{GctplError, Result};

/// Template renderer for C declaration and implementation files.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| GctplError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
