use std::cell::RefCell;
use std::env;
use std::io;
use std::process;
use std::rc::Rc;

use rocks_lang::Rocks;

fn main() {
    let args: Vec<String> = env::args().collect();

    let output: Rc<RefCell<dyn io::Write>> = Rc::new(RefCell::new(io::stdout()));
    let mut rocks = Rocks::new(output);

    match args.len() {
        1 => rocks.run_prompt(),
        2 => {
            if let Err(err) = rocks.run_file(&args[1]) {
                eprintln!("Failed to read {}: {err}", args[1]);
                process::exit(74);
            }
        }
        _ => {
            println!("Usage: rocks [script]");
            process::exit(64);
        }
    }
}
