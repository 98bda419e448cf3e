//! envseal - Collect, normalize and diff .env files across repositories.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── scan          # List discovered env files
//! │   ├── normalize     # Canonicalize one env file
//! │   ├── diff          # Key-only diff of two env files
//! │   ├── status        # Plan overview for all repositories
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # config.toml management
//!     ├── rules         # Include/exclude/prune rules
//!     ├── scanner       # Repository traversal
//!     ├── env           # .env parser and canonical serializer
//!     ├── diff          # Key-level diff
//!     ├── plan          # Scan → parse → vault destination
//!     └── validation    # Name validation
//! ```
//!
//! Encryption and version control are left to external tools: envseal hands
//! them canonical plaintext via [`core::env::stage`] and a destination path
//! from [`core::config::Config::destination`].

pub mod cli;
pub mod core;
pub mod error;
