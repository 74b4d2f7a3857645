use std::io::Read;
use std::process::ExitCode;

use html::Parser;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Parse an HTML file (or stdin when no path is given) and print the laid-out
/// tree.
fn main() -> ExitCode {
    let path = std::env::args().nth(1);
    let bytes = match read_input(path.as_deref()) {
        Ok(bytes) => bytes,
        Err(error) => {
            eprintln!("bramble: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut parser = Parser::new();
    if let Err(error) = parser.push_bytes(&bytes) {
        eprintln!("bramble: parse failed: {error}");
        return ExitCode::FAILURE;
    }
    let tree = match parser.finish() {
        Ok(tree) => tree,
        Err(error) => {
            eprintln!("bramble: parse failed: {error}");
            return ExitCode::FAILURE;
        }
    };

    for line in dom::outline(&tree) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

fn read_input(path: Option<&str>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}
