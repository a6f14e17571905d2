//! # DevHub Architecture
//!
//! DevHub is a **UI-agnostic library** for a local-first developer hub: a
//! chat feed, a subject-grouped code board, comments and favorites. It
//! ships with a CLI client, but the library never prints, never assumes a
//! terminal and never exits the process.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI layer (cli/, args.rs, wired by main.rs)                 │
//! │  - Argument parsing, templates, styling, terminal I/O        │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Command layer (commands/*.rs)                               │
//! │  - One verb per file; pure logic over store + router         │
//! │  - Returns structured CmdResult, no I/O assumptions          │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Core (store/, projector.rs, router.rs)                      │
//! │  - EntityStore: validated mutations, sole source of truth    │
//! │  - FeedProjector: pure projections, recomputed per call      │
//! │  - ViewRouter: active view + reply/edit context              │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Persistence (store/gateway.rs over store/backend.rs)        │
//! │  - One JSON document per key; corrupt keys degrade to empty  │
//! │  - FsBackend (production), MemBackend (tests)                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: user action → store mutation → persistence write →
//! projection → render. Every mutation persists exactly once before it
//! returns; a failed validation persists nothing.
//!
//! ## Module overview
//!
//! - [`model`]: entities (`Message`, `Post`, `Comment`), ids, the `FeedItem`
//!   tagged union
//! - [`store`]: the entity store, the persistence gateway and its backends
//! - [`projector`]: feed/subject/board/comment projections
//! - [`router`]: view state machine and the renderer contract
//! - [`commands`]: business logic for each CLI verb
//! - [`markdown`], [`media`], [`clipboard`], [`editor`]: collaborator
//!   services (terminal markdown, data URIs, clipboard, $EDITOR)
//! - [`error`]: error taxonomy
//! - `cli` (binary only): templates, styles and handlers

pub mod clipboard;
pub mod commands;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod media;
pub mod model;
pub mod projector;
pub mod router;
pub mod store;
