//! `Module::write` with the default configuration.
//!
//! Changes the working directory, so it lives in its own test binary and
//! holds a single test.

use std::{env, fs, process::Command};

use pypoet_codegen::{Block, Error, Module};
use tempfile::TempDir;

#[test]
fn test_write_into_current_directory() {
    let temp = TempDir::new().unwrap();
    env::set_current_dir(temp.path()).unwrap();
    let module = Module::new("cats").append(Block::statement("CATS = []"));

    let result = module.write();

    // The raw render lands on disk before yapf runs, whether or not it exists.
    let written = temp.path().join("cats.py");
    let content = fs::read_to_string(&written).unwrap();
    assert!(content.starts_with("\"\"\"cats\n"));
    assert!(content.contains("CATS = []"));

    let yapf_available = Command::new("yapf").arg("--version").output().is_ok();
    match result {
        Ok(path) => {
            assert!(yapf_available);
            assert_eq!(path.file_name().unwrap(), "cats.py");
        }
        Err(err) if !yapf_available => match *err {
            Error::FormatterSpawn { program, .. } => assert_eq!(program, "yapf"),
            other => panic!("expected FormatterSpawn, got {other:?}"),
        },
        Err(err) => panic!("yapf is installed but the write failed: {err}"),
    }
}
