//! Helpers for reading and writing credentials stored in `.netrc` files.
//!
//! The parser supports both single-line (`machine host login user password
//! pass`) and multi-line entries, matching what curl and Python's netrc
//! module accept, so the same file can be shared with other tooling.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// If the target machine is not present or has missing `login`/`password`
/// values, `Ok(None)` is returned.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let file = File::open(path).context("Failed to open .netrc file")?;
  let reader = BufReader::new(file);

  let mut current_machine = String::new();
  let mut username = String::new();
  let mut password = String::new();

  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    let parts: Vec<&str> = line.split_whitespace().collect();

    for i in 0..parts.len() {
      match parts[i] {
        "machine" if i + 1 < parts.len() => {
          // If we found credentials for the previous machine, check if it's our target
          if !current_machine.is_empty() && !username.is_empty() && !password.is_empty() {
            if current_machine == target_machine {
              return Ok(Some(Credentials { username, password }));
            }
            // Reset for the new machine
            username = String::new();
            password = String::new();
          }
          current_machine = parts[i + 1].to_string();
        }
        "login" if i + 1 < parts.len() => {
          username = parts[i + 1].to_string();
        }
        "password" if i + 1 < parts.len() => {
          password = parts[i + 1].to_string();
        }
        _ => {}
      }
    }
  }

  // Check the last machine in the file
  if current_machine == target_machine && !username.is_empty() && !password.is_empty() {
    return Ok(Some(Credentials { username, password }));
  }

  Ok(None)
}

/// Returns whether a `.netrc` line opens an entry for the given machine.
///
/// Matching is by whitespace-separated tokens, so both the multi-line
/// format and the single-line format (`machine host login u password p`)
/// are recognized, and `osf.io` does not match `osf.io-mirror`.
fn is_machine_line(line: &str, machine: &str) -> bool {
  let mut tokens = line.split_whitespace();
  tokens.next() == Some("machine") && tokens.next() == Some(machine)
}

/// Writes or updates a `.netrc` entry for the given machine.
///
/// Existing entries for the machine are replaced; otherwise a new entry is
/// appended. On Unix the file permissions are tightened to `600` so the
/// stored token is not readable by other users.
pub fn write_netrc_entry(path: &Path, machine: &str, username: &str, password: &str) -> Result<()> {
  // Read existing content if file exists
  let mut existing_content = String::new();

  if path.exists() {
    existing_content = std::fs::read_to_string(path).context("Failed to read existing .netrc file")?;
  }

  // The existence check shares is_machine_line with the rewrite loop, so a
  // recognized entry is always the one that gets replaced
  let machine_exists = existing_content.lines().any(|line| is_machine_line(line, machine));

  if machine_exists {
    // Update existing entry
    let mut new_content = String::new();
    let mut skip_until_next_machine = false;

    for line in existing_content.lines() {
      let starts_entry = line.split_whitespace().next() == Some("machine");

      if starts_entry {
        if is_machine_line(line, machine) {
          skip_until_next_machine = true;
          // Add the updated machine entry
          new_content.push_str(&format!("machine {machine}\n",));
          new_content.push_str(&format!("  login {username}\n",));
          new_content.push_str(&format!("  password {password}\n",));
        } else {
          skip_until_next_machine = false;
          new_content.push_str(line);
          new_content.push('\n');
        }
      } else if !skip_until_next_machine {
        new_content.push_str(line);
        new_content.push('\n');
      }
    }

    std::fs::write(path, new_content).context("Failed to write updated .netrc file")?;
  } else {
    // Append new entry
    let mut file = std::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .context("Failed to open .netrc file for writing")?;

    // Add a newline if file exists and doesn't end with one
    if path.metadata()?.len() > 0 && !existing_content.ends_with('\n') {
      writeln!(file)?;
    }

    writeln!(file, "machine {machine}",)?;
    writeln!(file, "  login {username}",)?;
    writeln!(file, "  password {password}",)?;
  }

  set_secure_permissions(path)?;

  Ok(())
}

/// Restrict the `.netrc` file to the owning user.
#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let metadata = std::fs::metadata(path).context("Failed to read .netrc metadata")?;
  let mut permissions = metadata.permissions();
  permissions.set_mode(0o600);
  std::fs::set_permissions(path, permissions).context("Failed to set .netrc permissions")?;

  Ok(())
}

#[cfg(not(unix))]
fn set_secure_permissions(_path: &Path) -> Result<()> {
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_netrc_file_basic() {
    let content = r#"machine osf.io
  login testuser
  password testpass
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(content);

    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_some());

    let creds = result.unwrap();
    assert_eq!(creds.username, "testuser");
    assert_eq!(creds.password, "testpass");
  }

  #[test]
  fn test_parse_netrc_file_multiple_machines() {
    let content = r#"machine example.com
  login user1
  password pass1

machine osf.io
  login user2
  password pass2

machine github.com
  login user3
  password pass3
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(content);

    // The OSF entry is picked out regardless of position
    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_some());
    let creds = result.unwrap();
    assert_eq!(creds.username, "user2");
    assert_eq!(creds.password, "pass2");

    // Last machine in the file is still reachable
    let result = parse_netrc_file(&netrc_path, "github.com").unwrap();
    assert!(result.is_some());
    let creds = result.unwrap();
    assert_eq!(creds.username, "user3");
  }

  #[test]
  fn test_parse_netrc_file_machine_not_found() {
    let content = r#"machine example.com
  login testuser
  password testpass
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(content);

    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_none());
  }

  #[test]
  fn test_parse_netrc_file_incomplete_entry() {
    let content = r#"machine osf.io
  login testuser
machine github.com
  login user2
  password pass2
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(content);

    // Should not find osf.io because it has no password
    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_none());

    // Should find github.com because it has both login and password
    let result = parse_netrc_file(&netrc_path, "github.com").unwrap();
    assert!(result.is_some());
  }

  #[test]
  fn test_parse_netrc_file_single_line_format() {
    let content = "machine osf.io login testuser password testpass\n";

    let (_temp_dir, netrc_path) = create_test_netrc(content);

    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_some());

    let creds = result.unwrap();
    assert_eq!(creds.username, "testuser");
    assert_eq!(creds.password, "testpass");
  }

  #[test]
  fn test_parse_netrc_file_empty_file() {
    let (_temp_dir, netrc_path) = create_test_netrc("");

    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_none());
  }

  #[test]
  fn test_write_netrc_entry_new_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    write_netrc_entry(&netrc_path, "osf.io", "testuser", "testpass").unwrap();

    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_some());

    let creds = result.unwrap();
    assert_eq!(creds.username, "testuser");
    assert_eq!(creds.password, "testpass");
  }

  #[test]
  fn test_write_netrc_entry_append_to_existing() {
    let initial_content = r#"machine example.com
  login user1
  password pass1
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(initial_content);

    write_netrc_entry(&netrc_path, "osf.io", "user2", "pass2").unwrap();

    // Check original entry still exists
    let result = parse_netrc_file(&netrc_path, "example.com").unwrap();
    assert!(result.is_some());

    // Check new entry was added
    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_some());
    let creds = result.unwrap();
    assert_eq!(creds.username, "user2");
    assert_eq!(creds.password, "pass2");
  }

  #[test]
  fn test_write_netrc_entry_update_existing() {
    let initial_content = r#"machine osf.io
  login olduser
  password oldpass

machine github.com
  login user2
  password pass2
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(initial_content);

    write_netrc_entry(&netrc_path, "osf.io", "newuser", "newpass").unwrap();

    // Check updated entry
    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_some());
    let creds = result.unwrap();
    assert_eq!(creds.username, "newuser");
    assert_eq!(creds.password, "newpass");

    // Check other entry wasn't affected
    let result = parse_netrc_file(&netrc_path, "github.com").unwrap();
    assert!(result.is_some());
    let creds = result.unwrap();
    assert_eq!(creds.username, "user2");
  }

  #[test]
  fn test_write_netrc_entry_update_single_line_entry() {
    let initial_content = r#"machine osf.io login olduser password oldpass
machine github.com
  login user2
  password pass2
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(initial_content);

    write_netrc_entry(&netrc_path, "osf.io", "newuser", "newpass").unwrap();

    // The single-line entry must be replaced, not left behind
    let creds = parse_netrc_file(&netrc_path, "osf.io").unwrap().unwrap();
    assert_eq!(creds.username, "newuser");
    assert_eq!(creds.password, "newpass");

    let content = fs::read_to_string(&netrc_path).unwrap();
    assert!(!content.contains("olduser"));
    assert!(!content.contains("oldpass"));

    // Check other entry wasn't affected
    let creds = parse_netrc_file(&netrc_path, "github.com").unwrap().unwrap();
    assert_eq!(creds.username, "user2");
  }

  #[test]
  fn test_write_netrc_entry_machine_name_is_not_a_prefix_match() {
    let initial_content = r#"machine osf.io-mirror
  login mirroruser
  password mirrorpass
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(initial_content);

    // "osf.io" must not be treated as an update of "osf.io-mirror"
    write_netrc_entry(&netrc_path, "osf.io", "newuser", "newpass").unwrap();

    let creds = parse_netrc_file(&netrc_path, "osf.io").unwrap().unwrap();
    assert_eq!(creds.username, "newuser");

    let creds = parse_netrc_file(&netrc_path, "osf.io-mirror").unwrap().unwrap();
    assert_eq!(creds.username, "mirroruser");
    assert_eq!(creds.password, "mirrorpass");
  }

  #[test]
  #[cfg(unix)]
  fn test_write_netrc_entry_sets_secure_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    write_netrc_entry(&netrc_path, "osf.io", "testuser", "testpass").unwrap();

    let mode = fs::metadata(&netrc_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0, "Expected .netrc to be unreadable by group/others");
  }

  #[test]
  fn test_parse_netrc_file_malformed() {
    let content = r#"machine osf.io
  login researcher@example.com
  # missing password

machine github.com
  login testuser
  password gh-token
  some-invalid-line
"#;

    let (_temp_dir, netrc_path) = create_test_netrc(content);

    // Missing password means no credentials, not an error
    let result = parse_netrc_file(&netrc_path, "osf.io").unwrap();
    assert!(result.is_none());

    // Extra junk lines are tolerated
    let result = parse_netrc_file(&netrc_path, "github.com").unwrap();
    assert!(result.is_some());
  }

  /// Helper function to create a test .netrc file
  fn create_test_netrc(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    fs::write(&netrc_path, content).expect("Failed to write test .netrc");

    (temp_dir, netrc_path)
  }
}
