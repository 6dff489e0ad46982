/// Minimal HKCU registry access through `reg.exe`
///
/// Only string/DWORD reads, string writes and deletes are needed, so this
/// shells out instead of binding the Win32 registry API.

use crate::error::{LauncherError, Result};

/// Read a value, `None` if the key or value doesn't exist
pub fn query_value(key: &str, name: &str) -> Result<Option<String>> {
    let output = reg(&["query", key, "/v", name])?;
    if !output.status.success() {
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_query_output(&stdout, name))
}

/// Write a REG_SZ value, creating the key if needed
pub fn set_string_value(key: &str, name: &str, data: &str) -> Result<()> {
    let output = reg(&["add", key, "/v", name, "/t", "REG_SZ", "/d", data, "/f"])?;
    if output.status.success() {
        Ok(())
    } else {
        Err(LauncherError::Generic(format!(
            "reg add {}\\{} failed: {}",
            key,
            name,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

/// Delete a value; deleting a missing value is not an error
pub fn delete_value(key: &str, name: &str) -> Result<()> {
    if query_value(key, name)?.is_none() {
        return Ok(());
    }

    let output = reg(&["delete", key, "/v", name, "/f"])?;
    if output.status.success() {
        Ok(())
    } else {
        Err(LauncherError::Generic(format!(
            "reg delete {}\\{} failed: {}",
            key,
            name,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

/// Extract the data column for `name` from `reg query` output
///
/// Lines look like `    Name    REG_SZ    some data`.
pub fn parse_query_output(stdout: &str, name: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        let trimmed = line.trim_start();
        let rest = trimmed.strip_prefix(name)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }

        let rest = rest.trim_start();
        let type_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if !rest[..type_end].starts_with("REG_") {
            return None;
        }

        Some(rest[type_end..].trim().to_string())
    })
}

#[cfg(windows)]
fn reg(args: &[&str]) -> Result<std::process::Output> {
    use std::process::Command;

    Ok(Command::new("reg.exe").args(args).output()?)
}

#[cfg(not(windows))]
fn reg(_args: &[&str]) -> Result<std::process::Output> {
    Err(LauncherError::Unsupported("The Windows registry".to_string()))
}
