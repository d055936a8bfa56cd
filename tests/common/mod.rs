use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use rocks_lang::Rocks;

/// Runs `source` to completion in-process against an in-memory sink and
/// returns everything `print` wrote. Resets the global error flags first so
/// a previous test's failure (the flags are thread-local, not per-`Rocks`)
/// can't bleed into this one.
#[allow(dead_code)]
pub fn run(source: &str) -> String {
    rocks_lang::error::reset_error();

    let output: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let mut rocks = Rocks::new(Rc::clone(&output) as Rc<RefCell<dyn Write>>);
    rocks.run_source(source);

    let bytes = output.borrow().clone();
    String::from_utf8(bytes).expect("program output is valid UTF-8")
}

/// Runs `source` through the compiled `rocks` binary and returns its
/// stderr. Diagnostics go through `eprintln!` directly (see `error.rs`), so
/// the only way to observe their exact text from a test is to spawn the
/// real process rather than capture in-process.
#[allow(dead_code)]
pub fn run_err(source: &str) -> String {
    let path = write_temp_source(source);
    let output = assert_cmd::Command::cargo_bin("rocks")
        .unwrap()
        .arg(&path)
        .output()
        .expect("failed to run the rocks binary");
    let _ = std::fs::remove_file(&path);

    String::from_utf8(output.stderr).expect("stderr is valid UTF-8")
}

/// Runs `source` through the compiled `rocks` binary and returns its exit
/// code, for asserting the 0/64/65/70 contract directly.
#[allow(dead_code)]
pub fn run_exit_code(source: &str) -> i32 {
    let path = write_temp_source(source);
    let output = assert_cmd::Command::cargo_bin("rocks")
        .unwrap()
        .arg(&path)
        .output()
        .expect("failed to run the rocks binary");
    let _ = std::fs::remove_file(&path);

    output.status.code().expect("process exited normally")
}

fn write_temp_source(source: &str) -> std::path::PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("rocks-test-{}-{id}.rocks", std::process::id()));
    std::fs::write(&path, source).expect("failed to write temp source file");
    path
}
