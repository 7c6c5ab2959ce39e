//! Convert documents between Markdown and HTML.
//!
//! The direction is picked from the input and output file extensions
//! (`.md -> .html` or `.html -> .md`). Markdown is rendered to a standalone
//! HTML5 page with highlighted code blocks and heading anchors; HTML is
//! rendered back to Markdown with ATX headings.

pub mod convert;
pub mod direction;
pub mod error;
pub mod highlight;
pub mod html;
pub mod markdown;
pub mod page;

pub use convert::{ConversionRequest, Converter};
pub use direction::Direction;
pub use error::ConvertError;
pub use html::{Html2MdRenderer, HtmlToMarkdownRenderer};
pub use markdown::{MarkdownOptions, MarkdownRenderer, PulldownRenderer};
