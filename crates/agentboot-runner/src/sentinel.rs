//! Sentinel framing for inline interpreter scripts
//!
//! The remote interpreter writes its answer between [`OPEN`] and [`CLOSE`],
//! so banners or other noise printed by the login shell can be skipped.
//! Both ends must agree on these exact tokens. A value that itself contains
//! [`CLOSE`] is truncated at its first occurrence; no escaping is attempted.

/// Marker written immediately before the payload
pub const OPEN: &str = "###CLOUDIFYCOMMANDOPEN";

/// Marker written immediately after the payload
pub const CLOSE: &str = "CLOUDIFYCOMMANDCLOSE###";

/// Build the one-line interpreter invocation that prints `expression`
/// framed by the sentinels
///
/// The script is a single double-quoted `-c` argument so it survives the
/// remote shell as one word.
#[must_use]
pub fn interpreter_command(interpreter: &str, imports: &str, expression: &str) -> String {
    format!(
        "{interpreter} -c \"import sys; {imports}; \
         sys.stdout.write('{OPEN}{{0}}{CLOSE}\\n'.format({expression}))\""
    )
}

/// Return the text strictly between the first [`OPEN`] and the next [`CLOSE`]
#[must_use]
pub fn extract(stdout: &str) -> Option<&str> {
    let start = stdout.find(OPEN)? + OPEN.len();
    let len = stdout[start..].find(CLOSE)?;
    Some(&stdout[start..start + len])
}
