//! Test fixtures and constants.

/// A typical local env file.
pub const LOCAL_ENV: &str = "DATABASE_URL=postgres://localhost/db\nAPI_KEY=test123\n";

/// A typical production env file.
pub const PROD_ENV: &str = "DATABASE_URL=postgres://prod/db\nAPI_KEY=prod456\n";

/// Hand-written env file exercising the parser's leniency.
pub const MESSY_ENV: &str = r#"
# Service settings
export ZEBRA=last
APPLE = first
WITH_SPACES="value with spaces"
SPECIAL='value=with=equals'
QUOTE="say \"hi\""

EMPTY=
"#;

/// Canonical form of [`MESSY_ENV`].
pub const MESSY_ENV_CANONICAL: &str = "APPLE=first\nEMPTY=\nQUOTE=\"say \\\"hi\\\"\"\nSPECIAL=\"value=with=equals\"\nWITH_SPACES=\"value with spaces\"\nZEBRA=last\n";

/// A value that must never show up in diff output.
pub const SECRET_VALUE: &str = "sk-live-do-not-print";
