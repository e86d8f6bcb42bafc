//! Emission templates for the generated C sources.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module, then rendered at runtime with [Handlebars](https://handlebarsjs.com/)
//! via the [`renderer::TemplateRenderer`].
//!
//! The templates only arrange text. Names, chunked string literals, parameter
//! lists and guards are computed by [`crate::generator`] and passed in as data.
//!
//! ## Template variables
//!
//! - `header.h.hbs`: `constants[] { name, literal }`, `functions[] { context, prototype }`
//! - `source.c.hbs`: `includes[]`, `header`, `functions[] { prototype, literal, guard, render_function, call_args }`
//! - `context.h.hbs`: `name`, `fields[] { c_type, name }`
//! - `prototype.hbs`: `name`, `params[]`
//!
//! **Warning**: Template files in `templates/` and constants in [`embedded`] must stay in sync.

pub mod embedded;
pub mod renderer;
