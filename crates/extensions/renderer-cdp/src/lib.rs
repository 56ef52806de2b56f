//! # Stracked CDP Renderer
//!
//! Renders pages in a running Chrome/Chromium through the DevTools
//! protocol and exposes them as [`Renderer`](stracked_protocols::Renderer)
//! pages.
//!
//! Every page is opened in a fresh browser context, so concurrent captures
//! share no cookies, storage or cache.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let renderer = CdpRenderer::connect(CdpRendererConfig::default()).await?;
//! let page = renderer.load_page(&PageRequest::new(url, Viewport::default())).await?;
//! ```

pub mod cdp;
mod renderer;
mod tree;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use renderer::{CdpRenderer, CdpRendererConfig};
pub use tree::page_tree;
